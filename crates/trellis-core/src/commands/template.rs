//! Project templates
//!
//! A template is a named preset of default goals, stakeholders, and
//! initial risks applied at project creation. The catalog is fixed and
//! doubles as the list of valid project types. An unknown template name
//! is a hard error at the create path, never a silent empty default.

use crate::{Error, Result};
use serde::Serialize;

/// A named project template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Template {
    /// Template name, also the project type it produces
    pub name: &'static str,
    pub goals: &'static str,
    pub stakeholders: &'static str,
    pub initial_risks: &'static str,
}

/// The fixed template catalog
const TEMPLATES: &[Template] = &[
    Template {
        name: "Turnaround Project",
        goals: "Increase efficiency by 20%",
        stakeholders: "Ops, Finance",
        initial_risks: "High initial cost",
    },
    Template {
        name: "Digitization",
        goals: "Automate 50% of manual processes",
        stakeholders: "IT, Ops",
        initial_risks: "Integration with legacy systems",
    },
    Template {
        name: "Special Project",
        goals: "Launch new product line",
        stakeholders: "Marketing, R&D",
        initial_risks: "Market acceptance",
    },
    Template {
        name: "New Technology Research and Implementation",
        goals: "Research and implement AI solutions",
        stakeholders: "IT, R&D",
        initial_risks: "Rapid tech changes",
    },
];

impl Template {
    /// All templates, in catalog order
    pub fn all() -> &'static [Template] {
        TEMPLATES
    }

    /// Look up a template by name
    pub fn get(name: &str) -> Option<&'static Template> {
        TEMPLATES.iter().find(|t| t.name == name)
    }

    /// Whether the name is a member of the catalog
    pub fn is_known(name: &str) -> bool {
        Self::get(name).is_some()
    }

    /// Resolve a template by name, failing on a catalog miss
    pub fn apply(name: &str) -> Result<&'static Template> {
        Self::get(name).ok_or_else(|| Error::UnknownTemplate(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_four_templates() {
        assert_eq!(Template::all().len(), 4);
    }

    #[test]
    fn test_apply_digitization_returns_fixed_triple() {
        let template = Template::apply("Digitization").unwrap();
        assert_eq!(template.goals, "Automate 50% of manual processes");
        assert_eq!(template.stakeholders, "IT, Ops");
        assert_eq!(template.initial_risks, "Integration with legacy systems");
    }

    #[test]
    fn test_apply_unknown_template_fails() {
        let err = Template::apply("Nonexistent").unwrap_err();
        assert!(matches!(err, Error::UnknownTemplate(name) if name == "Nonexistent"));
    }

    #[test]
    fn test_is_known() {
        assert!(Template::is_known("Turnaround Project"));
        assert!(!Template::is_known("turnaround project"));
    }
}
