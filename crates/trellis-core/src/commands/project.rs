//! Project management commands
//!
//! Provides the full project record lifecycle: creation with template
//! defaults, patch-style updates, deletion, and filtered listing. The
//! service holds no cache across calls; every operation re-reads from
//! the store.

use crate::catalog::{Department, ProjectPhase, RiskLevel};
use crate::commands::template::Template;
use crate::storage::Database;
use crate::validate::ProjectValidator;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::Row;
use uuid::Uuid;

/// A tracked project record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Unique project identifier
    pub id: String,
    /// Project name, unique across all projects
    pub name: String,
    /// Project type, a member of the template catalog
    #[serde(rename = "type")]
    pub kind: String,
    /// Current phase
    pub phase: ProjectPhase,
    /// Owning department
    pub department: Department,
    /// Allocated budget
    pub budget: f64,
    /// Cost incurred so far
    pub actual_cost: f64,
    /// Return on investment
    pub roi: f64,
    /// Execution progress, 0 to 100
    pub execution_progress: f64,
    /// Current risk level
    pub risk_level: RiskLevel,
    /// Goals, seeded from the template at creation
    pub goals: String,
    /// Stakeholders, seeded from the template at creation
    pub stakeholders: String,
    /// Initial risks, seeded from the template at creation
    pub initial_risks: String,
    /// Free-text resource notes
    pub resources: String,
    /// Free-text milestone notes
    pub milestones: String,
    /// Team size, at least 1
    pub team_size: i64,
    /// When the project was created; immutable after creation
    pub created_at: DateTime<Utc>,
}

impl Project {
    /// Create a new project record with template-derived defaults
    pub fn new(
        name: impl Into<String>,
        template: &Template,
        phase: ProjectPhase,
        department: Department,
        budget: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            kind: template.name.to_string(),
            phase,
            department,
            budget,
            actual_cost: 0.0,
            roi: 0.0,
            execution_progress: 0.0,
            risk_level: RiskLevel::Low,
            goals: template.goals.to_string(),
            stakeholders: template.stakeholders.to_string(),
            initial_risks: template.initial_risks.to_string(),
            resources: String::new(),
            milestones: String::new(),
            team_size: 1,
            created_at: Utc::now(),
        }
    }
}

/// Request to create a new project
#[derive(Debug, Clone, Deserialize)]
pub struct NewProject {
    pub name: String,
    /// Template catalog name; also becomes the project type
    pub kind: String,
    pub phase: ProjectPhase,
    pub department: Department,
    pub budget: f64,
}

/// A partial update to a project. `None` fields are left untouched.
/// Name and creation timestamp are not patchable.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectPatch {
    pub kind: Option<String>,
    pub phase: Option<ProjectPhase>,
    pub department: Option<Department>,
    pub budget: Option<f64>,
    pub actual_cost: Option<f64>,
    pub roi: Option<f64>,
    pub execution_progress: Option<f64>,
    pub risk_level: Option<RiskLevel>,
    pub goals: Option<String>,
    pub stakeholders: Option<String>,
    pub initial_risks: Option<String>,
    pub resources: Option<String>,
    pub milestones: Option<String>,
    pub team_size: Option<i64>,
}

impl ProjectPatch {
    /// Whether the patch touches anything at all
    pub fn is_empty(&self) -> bool {
        self.kind.is_none()
            && self.phase.is_none()
            && self.department.is_none()
            && self.budget.is_none()
            && self.actual_cost.is_none()
            && self.roi.is_none()
            && self.execution_progress.is_none()
            && self.risk_level.is_none()
            && self.goals.is_none()
            && self.stakeholders.is_none()
            && self.initial_risks.is_none()
            && self.resources.is_none()
            && self.milestones.is_none()
            && self.team_size.is_none()
    }

    /// Produce the patched snapshot. Name and created_at carry over.
    fn apply_to(&self, mut project: Project) -> Project {
        if let Some(kind) = &self.kind {
            project.kind = kind.clone();
        }
        if let Some(phase) = self.phase {
            project.phase = phase;
        }
        if let Some(department) = self.department {
            project.department = department;
        }
        if let Some(budget) = self.budget {
            project.budget = budget;
        }
        if let Some(actual_cost) = self.actual_cost {
            project.actual_cost = actual_cost;
        }
        if let Some(roi) = self.roi {
            project.roi = roi;
        }
        if let Some(progress) = self.execution_progress {
            project.execution_progress = progress;
        }
        if let Some(risk_level) = self.risk_level {
            project.risk_level = risk_level;
        }
        if let Some(goals) = &self.goals {
            project.goals = goals.clone();
        }
        if let Some(stakeholders) = &self.stakeholders {
            project.stakeholders = stakeholders.clone();
        }
        if let Some(initial_risks) = &self.initial_risks {
            project.initial_risks = initial_risks.clone();
        }
        if let Some(resources) = &self.resources {
            project.resources = resources.clone();
        }
        if let Some(milestones) = &self.milestones {
            project.milestones = milestones.clone();
        }
        if let Some(team_size) = self.team_size {
            project.team_size = team_size;
        }
        project
    }
}

/// Listing filter. The predicate is supplied by the caller (an external
/// authorization layer); no role checks happen here.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectFilter {
    pub department: Option<Department>,
}

const PROJECT_COLUMNS: &str = "id, name, type, phase, department, budget, actual_cost, roi, \
     execution_progress, risk_level, goals, stakeholders, initial_risks, resources, milestones, \
     team_size, created_at";

/// Project repository for database operations
pub struct ProjectRepository<'a> {
    db: &'a Database,
}

impl<'a> ProjectRepository<'a> {
    /// Create a new project repository
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Insert a new project row
    pub async fn create(&self, project: &Project) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO projects (id, name, type, phase, department, budget, actual_cost, roi,
                execution_progress, risk_level, goals, stakeholders, initial_risks, resources,
                milestones, team_size, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&project.id)
        .bind(&project.name)
        .bind(&project.kind)
        .bind(project.phase.as_str())
        .bind(project.department.as_str())
        .bind(project.budget)
        .bind(project.actual_cost)
        .bind(project.roi)
        .bind(project.execution_progress)
        .bind(project.risk_level.as_str())
        .bind(&project.goals)
        .bind(&project.stakeholders)
        .bind(&project.initial_risks)
        .bind(&project.resources)
        .bind(&project.milestones)
        .bind(project.team_size)
        .bind(project.created_at)
        .execute(self.db.pool())
        .await?;

        Ok(())
    }

    /// Get a project by name
    pub async fn get_by_name(&self, name: &str) -> Result<Option<Project>> {
        let row = sqlx::query(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE name = ?"
        ))
        .bind(name)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.map(row_to_project))
    }

    /// List projects with an optional department filter, ordered by name
    pub async fn list(&self, filter: ProjectFilter) -> Result<Vec<Project>> {
        let rows = if let Some(department) = filter.department {
            sqlx::query(&format!(
                "SELECT {PROJECT_COLUMNS} FROM projects WHERE department = ? ORDER BY name"
            ))
            .bind(department.as_str())
            .fetch_all(self.db.pool())
            .await?
        } else {
            sqlx::query(&format!(
                "SELECT {PROJECT_COLUMNS} FROM projects ORDER BY name"
            ))
            .fetch_all(self.db.pool())
            .await?
        };

        Ok(rows.into_iter().map(row_to_project).collect())
    }

    /// Write all mutable columns of a project in a single statement.
    /// Name and created_at are never written after creation.
    pub async fn update(&self, project: &Project) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE projects
            SET type = ?, phase = ?, department = ?, budget = ?, actual_cost = ?, roi = ?,
                execution_progress = ?, risk_level = ?, goals = ?, stakeholders = ?,
                initial_risks = ?, resources = ?, milestones = ?, team_size = ?
            WHERE name = ?
            "#,
        )
        .bind(&project.kind)
        .bind(project.phase.as_str())
        .bind(project.department.as_str())
        .bind(project.budget)
        .bind(project.actual_cost)
        .bind(project.roi)
        .bind(project.execution_progress)
        .bind(project.risk_level.as_str())
        .bind(&project.goals)
        .bind(&project.stakeholders)
        .bind(&project.initial_risks)
        .bind(&project.resources)
        .bind(&project.milestones)
        .bind(project.team_size)
        .bind(&project.name)
        .execute(self.db.pool())
        .await?;

        Ok(())
    }

    /// Delete a project permanently. Returns the number of rows removed.
    pub async fn delete(&self, name: &str) -> Result<u64> {
        let result = sqlx::query("DELETE FROM projects WHERE name = ?")
            .bind(name)
            .execute(self.db.pool())
            .await?;

        Ok(result.rows_affected())
    }

    /// Check if a project with the given name exists
    pub async fn name_exists(&self, name: &str) -> Result<bool> {
        let row: Option<(i32,)> = sqlx::query_as("SELECT 1 FROM projects WHERE name = ?")
            .bind(name)
            .fetch_optional(self.db.pool())
            .await?;

        Ok(row.is_some())
    }

    /// Count all project rows
    pub async fn count(&self) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM projects")
            .fetch_one(self.db.pool())
            .await?;
        Ok(count)
    }
}

/// Convert a database row to a Project
fn row_to_project(row: sqlx::sqlite::SqliteRow) -> Project {
    Project {
        id: row.get("id"),
        name: row.get("name"),
        kind: row.get("type"),
        phase: ProjectPhase::parse(row.get("phase")).unwrap_or_default(),
        department: Department::parse(row.get("department")).unwrap_or_default(),
        budget: row.get("budget"),
        actual_cost: row.get("actual_cost"),
        roi: row.get("roi"),
        execution_progress: row.get("execution_progress"),
        risk_level: RiskLevel::parse(row.get("risk_level")).unwrap_or_default(),
        goals: row.get("goals"),
        stakeholders: row.get("stakeholders"),
        initial_risks: row.get("initial_risks"),
        resources: row.get("resources"),
        milestones: row.get("milestones"),
        team_size: row.get("team_size"),
        created_at: row.get("created_at"),
    }
}

/// The only component with business rules over project records.
///
/// Every operation goes through the repository against current store
/// state; there is no client-side cache to go stale.
pub struct ProjectService {
    db: Database,
}

impl ProjectService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    fn repo(&self) -> ProjectRepository<'_> {
        ProjectRepository::new(&self.db)
    }

    /// Create a new project.
    ///
    /// Fails with `DuplicateName` if the name is taken, `Validation` on
    /// an empty name or negative budget, and `UnknownTemplate` if the
    /// type is not in the template catalog. On success the record is
    /// persisted with template-derived goals/stakeholders/initial risks
    /// and zeroed cost/progress fields.
    pub async fn create(&self, request: NewProject) -> Result<Project> {
        ProjectValidator::validate_name(&request.name)?;
        ProjectValidator::validate_budget(request.budget)?;
        let template = Template::apply(&request.kind)?;

        let repo = self.repo();
        if repo.name_exists(&request.name).await? {
            return Err(Error::DuplicateName(request.name));
        }

        let project = Project::new(
            request.name,
            template,
            request.phase,
            request.department,
            request.budget,
        );

        // The pre-check above can race; the UNIQUE constraint on name is
        // authoritative, so map its violation to the same error.
        match repo.create(&project).await {
            Err(Error::Storage(sqlx::Error::Database(db_err))) if db_err.is_unique_violation() => {
                return Err(Error::DuplicateName(project.name));
            }
            other => other?,
        }

        tracing::info!(name = %project.name, kind = %project.kind, "Created project");
        Ok(project)
    }

    /// Apply a patch to an existing project and return the new snapshot.
    ///
    /// Fails with `ProjectNotFound` if the name is absent and
    /// `Validation` if any touched field leaves its catalog or bounds.
    /// All patched fields are written in one statement; a validation
    /// failure writes nothing.
    pub async fn update(&self, name: &str, patch: ProjectPatch) -> Result<Project> {
        let repo = self.repo();
        let current = repo
            .get_by_name(name)
            .await?
            .ok_or_else(|| Error::ProjectNotFound(name.to_string()))?;

        let next = patch.apply_to(current);

        if !Template::is_known(&next.kind) {
            return Err(Error::validation(
                "type",
                format!("'{}' is not in the template catalog", next.kind),
            ));
        }
        ProjectValidator::validate_budget(next.budget)?;
        ProjectValidator::validate_actual_cost(next.actual_cost)?;
        ProjectValidator::validate_progress(next.execution_progress)?;
        ProjectValidator::validate_team_size(next.team_size)?;

        repo.update(&next).await?;

        tracing::info!(name = %next.name, "Updated project");
        Ok(next)
    }

    /// Delete a project permanently. Fails with `ProjectNotFound` if the
    /// name is absent. No soft delete, no cascading entities.
    pub async fn delete(&self, name: &str) -> Result<()> {
        let removed = self.repo().delete(name).await?;
        if removed == 0 {
            return Err(Error::ProjectNotFound(name.to_string()));
        }

        tracing::info!(name, "Deleted project");
        Ok(())
    }

    /// Get a project by name
    pub async fn get(&self, name: &str) -> Result<Option<Project>> {
        self.repo().get_by_name(name).await
    }

    /// List projects, optionally filtered by department. The filter is
    /// supplied by the caller; scoping decisions live outside this crate.
    pub async fn list(&self, filter: ProjectFilter) -> Result<Vec<Project>> {
        self.repo().list(filter).await
    }
}
