//! Fixed enumerated catalogs
//!
//! Project phases, departments, risk levels, and roles are closed lists.
//! Validation rejects any value outside them; the catalogs are not
//! user-editable.

use serde::{Deserialize, Serialize};

/// Project phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ProjectPhase {
    #[default]
    None,
    Scoping,
    Validation,
    Trial,
    Rollout,
    #[serde(rename = "Money Step")]
    MoneyStep,
}

impl ProjectPhase {
    /// All phases, in catalog order
    pub const ALL: [ProjectPhase; 6] = [
        ProjectPhase::None,
        ProjectPhase::Scoping,
        ProjectPhase::Validation,
        ProjectPhase::Trial,
        ProjectPhase::Rollout,
        ProjectPhase::MoneyStep,
    ];

    /// Convert to string for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectPhase::None => "None",
            ProjectPhase::Scoping => "Scoping",
            ProjectPhase::Validation => "Validation",
            ProjectPhase::Trial => "Trial",
            ProjectPhase::Rollout => "Rollout",
            ProjectPhase::MoneyStep => "Money Step",
        }
    }

    /// Parse from database string
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "None" => Some(ProjectPhase::None),
            "Scoping" => Some(ProjectPhase::Scoping),
            "Validation" => Some(ProjectPhase::Validation),
            "Trial" => Some(ProjectPhase::Trial),
            "Rollout" => Some(ProjectPhase::Rollout),
            "Money Step" => Some(ProjectPhase::MoneyStep),
            _ => None,
        }
    }
}

/// Department catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Department {
    #[default]
    None,
    Automation,
    Maintenance,
    Quality,
    #[serde(rename = "QMS")]
    Qms,
    Stores,
    #[serde(rename = "TPD")]
    Tpd,
    #[serde(rename = "IE")]
    Ie,
    #[serde(rename = "HR")]
    Hr,
    Sustainability,
    Project,
    #[serde(rename = "MIS")]
    Mis,
    #[serde(rename = "Business Analytics (BI)")]
    BusinessAnalytics,
    #[serde(rename = "Business transformation")]
    BusinessTransformation,
    Finance,
    Compliance,
}

impl Department {
    /// All departments, in catalog order
    pub const ALL: [Department; 16] = [
        Department::None,
        Department::Automation,
        Department::Maintenance,
        Department::Quality,
        Department::Qms,
        Department::Stores,
        Department::Tpd,
        Department::Ie,
        Department::Hr,
        Department::Sustainability,
        Department::Project,
        Department::Mis,
        Department::BusinessAnalytics,
        Department::BusinessTransformation,
        Department::Finance,
        Department::Compliance,
    ];

    /// Convert to string for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Department::None => "None",
            Department::Automation => "Automation",
            Department::Maintenance => "Maintenance",
            Department::Quality => "Quality",
            Department::Qms => "QMS",
            Department::Stores => "Stores",
            Department::Tpd => "TPD",
            Department::Ie => "IE",
            Department::Hr => "HR",
            Department::Sustainability => "Sustainability",
            Department::Project => "Project",
            Department::Mis => "MIS",
            Department::BusinessAnalytics => "Business Analytics (BI)",
            Department::BusinessTransformation => "Business transformation",
            Department::Finance => "Finance",
            Department::Compliance => "Compliance",
        }
    }

    /// Parse from database string
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|d| d.as_str() == s)
    }
}

/// Project risk level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RiskLevel {
    #[default]
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Convert to string for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }

    /// Parse from database string
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Low" => Some(RiskLevel::Low),
            "Medium" => Some(RiskLevel::Medium),
            "High" => Some(RiskLevel::High),
            _ => None,
        }
    }
}

/// User role, used only to derive list scoping. Authentication and
/// authorization live outside this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Role {
    #[default]
    Admin,
    Manager,
    Employee,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Manager => "Manager",
            Role::Employee => "Employee",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Admin" => Some(Role::Admin),
            "Manager" => Some(Role::Manager),
            "Employee" => Some(Role::Employee),
            _ => None,
        }
    }
}
