//! Dashboard API
//!
//! Assembles the dashboard view for a caller: lists the projects visible
//! to the request context, then runs the pure aggregations over that
//! snapshot.

use crate::api::RequestContext;
use crate::commands::project::ProjectService;
use crate::dashboard::{
    counts_by_department, counts_by_phase, counts_by_type, portfolio_totals, status_summary,
    PortfolioTotals, StatusRow,
};
use crate::storage::Database;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The full dashboard payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardView {
    pub rows: Vec<StatusRow>,
    pub by_type: BTreeMap<String, usize>,
    pub by_department: BTreeMap<String, usize>,
    pub by_phase: BTreeMap<String, usize>,
    pub totals: PortfolioTotals,
}

/// Build the dashboard over the projects visible to the caller.
///
/// Total over an empty portfolio: all groupings come back empty and the
/// totals zeroed, never an error.
pub async fn overview(db: &Database, ctx: &RequestContext) -> Result<DashboardView> {
    let service = ProjectService::new(db.clone());
    let projects = service.list(ctx.project_filter()).await?;

    Ok(DashboardView {
        rows: status_summary(&projects),
        by_type: counts_by_type(&projects),
        by_department: counts_by_department(&projects),
        by_phase: counts_by_phase(&projects),
        totals: portfolio_totals(&projects),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::projects::{create, CreateProjectRequest};
    use crate::dashboard::ProjectStatus;

    #[tokio::test]
    async fn test_overview_empty_portfolio() {
        let db = Database::in_memory().await.unwrap();

        let view = overview(&db, &RequestContext::admin()).await.unwrap();
        assert!(view.rows.is_empty());
        assert!(view.by_type.is_empty());
        assert!(view.by_department.is_empty());
        assert!(view.by_phase.is_empty());
        assert_eq!(view.totals.count, 0);
        assert_eq!(view.totals.total_budget, 0.0);
    }

    #[tokio::test]
    async fn test_overview_counts_and_totals() {
        let db = Database::in_memory().await.unwrap();

        for (name, department, budget) in [
            ("One", "Automation", 10_000.0),
            ("Two", "Automation", 20_000.0),
            ("Three", "Finance", 30_000.0),
        ] {
            create(
                &db,
                CreateProjectRequest {
                    name: name.to_string(),
                    kind: "Turnaround Project".to_string(),
                    phase: "Validation".to_string(),
                    department: department.to_string(),
                    budget,
                },
            )
            .await
            .unwrap();
        }

        let view = overview(&db, &RequestContext::admin()).await.unwrap();
        assert_eq!(view.rows.len(), 3);
        assert_eq!(view.by_department.get("Automation"), Some(&2));
        assert_eq!(view.by_department.get("Finance"), Some(&1));
        assert_eq!(view.by_type.get("Turnaround Project"), Some(&3));
        assert_eq!(view.by_phase.get("Validation"), Some(&3));
        assert_eq!(view.totals.total_budget, 60_000.0);

        // Fresh projects start at zero progress, so everything is at risk
        assert!(view.rows.iter().all(|r| r.status == ProjectStatus::AtRisk));
    }
}
