//! API layer
//!
//! Thin DTO surface for external UIs. Requests arrive as strings, get
//! validated against the catalogs here, and flow into the typed command
//! layer. Every function takes the database explicitly; there is no
//! ambient session state.

pub mod dashboard;
pub mod projects;

use crate::catalog::{Department, Role};
use crate::commands::project::ProjectFilter;
use serde::{Deserialize, Serialize};

/// Per-request caller context, supplied by the external authorization
/// layer. Admins see the whole portfolio; other roles are scoped to
/// their own department.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RequestContext {
    pub role: Role,
    pub department: Department,
}

impl RequestContext {
    pub fn admin() -> Self {
        Self {
            role: Role::Admin,
            department: Department::None,
        }
    }

    pub fn new(role: Role, department: Department) -> Self {
        Self { role, department }
    }

    /// Derive the listing filter for this caller
    pub fn project_filter(&self) -> ProjectFilter {
        match self.role {
            Role::Admin => ProjectFilter::default(),
            Role::Manager | Role::Employee => ProjectFilter {
                department: Some(self.department),
            },
        }
    }
}
