//! Dashboard aggregation
//!
//! Pure, deterministic transformations from a snapshot of project
//! records into the summarized views: status classification, grouped
//! counts, and portfolio totals. Every function is total over its input;
//! an empty project list yields the "no data" shape, never an error.
//! Whether to show a "no projects" message is the caller's call.

use crate::commands::project::Project;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Derived status bucket for a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectStatus {
    OnTrack,
    Delayed,
    AtRisk,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::OnTrack => "On Track",
            ProjectStatus::Delayed => "Delayed",
            ProjectStatus::AtRisk => "At Risk",
        }
    }
}

/// Classify execution progress into a status bucket.
///
/// Lower thresholds are inclusive: 80.0 is on track, 79.999 is delayed,
/// 49.999 is at risk.
pub fn classify_status(execution_progress: f64) -> ProjectStatus {
    if execution_progress >= 80.0 {
        ProjectStatus::OnTrack
    } else if execution_progress >= 50.0 {
        ProjectStatus::Delayed
    } else {
        ProjectStatus::AtRisk
    }
}

/// Count projects per distinct key value.
///
/// One entry per key present in the input; counts sum to the input
/// length. The map is ordered by key, so repeated calls over the same
/// snapshot produce identical output.
pub fn group_counts<F>(projects: &[Project], key_fn: F) -> BTreeMap<String, usize>
where
    F: Fn(&Project) -> String,
{
    let mut counts = BTreeMap::new();
    for project in projects {
        *counts.entry(key_fn(project)).or_insert(0) += 1;
    }
    counts
}

/// Project counts grouped by type
pub fn counts_by_type(projects: &[Project]) -> BTreeMap<String, usize> {
    group_counts(projects, |p| p.kind.clone())
}

/// Project counts grouped by department
pub fn counts_by_department(projects: &[Project]) -> BTreeMap<String, usize> {
    group_counts(projects, |p| p.department.as_str().to_string())
}

/// Project counts grouped by phase
pub fn counts_by_phase(projects: &[Project]) -> BTreeMap<String, usize> {
    group_counts(projects, |p| p.phase.as_str().to_string())
}

/// Portfolio-wide sums and count
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioTotals {
    pub total_budget: f64,
    pub total_actual_cost: f64,
    pub count: usize,
}

/// Sum budgets and actual costs over the snapshot. Zero everything on an
/// empty input.
pub fn portfolio_totals(projects: &[Project]) -> PortfolioTotals {
    PortfolioTotals {
        total_budget: projects.iter().map(|p| p.budget).sum(),
        total_actual_cost: projects.iter().map(|p| p.actual_cost).sum(),
        count: projects.len(),
    }
}

/// One row of the project status summary table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusRow {
    pub name: String,
    pub status: ProjectStatus,
    pub completion: f64,
}

/// Per-project status rows, in input order
pub fn status_summary(projects: &[Project]) -> Vec<StatusRow> {
    projects
        .iter()
        .map(|p| StatusRow {
            name: p.name.clone(),
            status: classify_status(p.execution_progress),
            completion: p.execution_progress,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Department, ProjectPhase};
    use crate::commands::project::{NewProject, ProjectFilter, ProjectPatch, ProjectService};
    use crate::commands::template::Template;
    use crate::storage::Database;

    fn project(name: &str, department: Department, budget: f64, progress: f64) -> Project {
        let mut p = Project::new(
            name,
            Template::apply("Digitization").unwrap(),
            ProjectPhase::Scoping,
            department,
            budget,
        );
        p.execution_progress = progress;
        p
    }

    #[test]
    fn test_classify_status_boundaries() {
        assert_eq!(classify_status(80.0), ProjectStatus::OnTrack);
        assert_eq!(classify_status(79.9), ProjectStatus::Delayed);
        assert_eq!(classify_status(50.0), ProjectStatus::Delayed);
        assert_eq!(classify_status(49.9), ProjectStatus::AtRisk);
        assert_eq!(classify_status(100.0), ProjectStatus::OnTrack);
        assert_eq!(classify_status(0.0), ProjectStatus::AtRisk);
    }

    #[test]
    fn test_group_counts_sum_to_input_length() {
        let projects = vec![
            project("a", Department::Automation, 1.0, 10.0),
            project("b", Department::Automation, 1.0, 20.0),
            project("c", Department::Finance, 1.0, 30.0),
            project("d", Department::Hr, 1.0, 40.0),
        ];

        let counts = counts_by_department(&projects);
        assert_eq!(counts.values().sum::<usize>(), projects.len());
        assert_eq!(counts.get("Automation"), Some(&2));
        assert_eq!(counts.get("Finance"), Some(&1));
        assert_eq!(counts.get("HR"), Some(&1));
    }

    #[test]
    fn test_group_counts_empty_input_is_empty_map() {
        let counts = counts_by_phase(&[]);
        assert!(counts.is_empty());
    }

    #[test]
    fn test_group_counts_deterministic_order() {
        let projects = vec![
            project("z", Department::Stores, 1.0, 0.0),
            project("a", Department::Automation, 1.0, 0.0),
        ];

        let first: Vec<String> = counts_by_department(&projects).into_keys().collect();
        let second: Vec<String> = counts_by_department(&projects).into_keys().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_portfolio_totals_empty_is_zero() {
        let totals = portfolio_totals(&[]);
        assert_eq!(totals.total_budget, 0.0);
        assert_eq!(totals.total_actual_cost, 0.0);
        assert_eq!(totals.count, 0);
    }

    #[test]
    fn test_status_summary_rows() {
        let projects = vec![
            project("ahead", Department::Mis, 1.0, 95.0),
            project("behind", Department::Mis, 1.0, 10.0),
        ];

        let rows = status_summary(&projects);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "ahead");
        assert_eq!(rows[0].status, ProjectStatus::OnTrack);
        assert_eq!(rows[1].status, ProjectStatus::AtRisk);
        assert_eq!(rows[1].completion, 10.0);
    }

    #[tokio::test]
    async fn test_end_to_end_three_projects() {
        let db = Database::in_memory().await.expect("Failed to create database");
        let service = ProjectService::new(db);

        let inputs = [
            ("Press Shop Revamp", Department::Automation, 120_000.0, 90.0),
            ("QMS Rollout", Department::Automation, 80_000.0, 60.0),
            ("Ledger Cleanup", Department::Finance, 40_000.0, 30.0),
        ];
        for (name, department, budget, progress) in inputs {
            service
                .create(NewProject {
                    name: name.to_string(),
                    kind: "Digitization".to_string(),
                    phase: ProjectPhase::Rollout,
                    department,
                    budget,
                })
                .await
                .unwrap();
            service
                .update(
                    name,
                    ProjectPatch {
                        execution_progress: Some(progress),
                        ..Default::default()
                    },
                )
                .await
                .unwrap();
        }

        let projects = service.list(ProjectFilter::default()).await.unwrap();
        assert_eq!(projects.len(), 3);

        let totals = portfolio_totals(&projects);
        assert_eq!(totals.total_budget, 240_000.0);
        assert_eq!(totals.count, 3);

        let by_department = counts_by_department(&projects);
        assert_eq!(by_department.get("Automation"), Some(&2));
        assert_eq!(by_department.get("Finance"), Some(&1));

        let statuses: Vec<ProjectStatus> = projects
            .iter()
            .map(|p| classify_status(p.execution_progress))
            .collect();
        assert!(statuses.contains(&ProjectStatus::OnTrack));
        assert!(statuses.contains(&ProjectStatus::Delayed));
        assert!(statuses.contains(&ProjectStatus::AtRisk));
    }
}
