//! Project field validation
//!
//! Validates project-related inputs and business rules.

use crate::{Error, Result};

/// Validator for project-related operations
pub struct ProjectValidator;

impl ProjectValidator {
    /// Validate a project name
    ///
    /// Rules:
    /// - Must not be empty (after trimming)
    /// - Must be 100 characters or less
    pub fn validate_name(name: &str) -> Result<()> {
        let name = name.trim();

        if name.is_empty() {
            return Err(Error::validation("name", "project name cannot be empty"));
        }

        if name.len() > 100 {
            return Err(Error::validation(
                "name",
                "project name must be 100 characters or less",
            ));
        }

        Ok(())
    }

    /// Validate a budget value
    pub fn validate_budget(budget: f64) -> Result<()> {
        if !budget.is_finite() || budget < 0.0 {
            return Err(Error::validation("budget", "budget must be >= 0"));
        }
        Ok(())
    }

    /// Validate an actual cost value
    pub fn validate_actual_cost(actual_cost: f64) -> Result<()> {
        if !actual_cost.is_finite() || actual_cost < 0.0 {
            return Err(Error::validation("actual_cost", "actual cost must be >= 0"));
        }
        Ok(())
    }

    /// Validate execution progress (a percentage)
    pub fn validate_progress(progress: f64) -> Result<()> {
        if !progress.is_finite() || !(0.0..=100.0).contains(&progress) {
            return Err(Error::validation(
                "execution_progress",
                "execution progress must be between 0 and 100",
            ));
        }
        Ok(())
    }

    /// Validate a team size
    pub fn validate_team_size(team_size: i64) -> Result<()> {
        if team_size < 1 {
            return Err(Error::validation("team_size", "team size must be >= 1"));
        }
        Ok(())
    }
}
