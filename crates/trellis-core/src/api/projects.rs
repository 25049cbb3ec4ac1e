//! Projects API
//!
//! High-level async functions for project operations, consumed by the
//! CLI and any external UI. String-typed enum fields are validated
//! against their catalogs here and rejected with field-level errors.

use crate::api::RequestContext;
use crate::catalog::{Department, ProjectPhase, RiskLevel};
use crate::commands::project::{NewProject, Project, ProjectPatch, ProjectService};
use crate::storage::Database;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Project summary DTO for external consumers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub phase: String,
    pub department: String,
    pub budget: f64,
    pub actual_cost: f64,
    pub roi: f64,
    pub execution_progress: f64,
    pub risk_level: String,
    pub goals: String,
    pub stakeholders: String,
    pub initial_risks: String,
    pub resources: String,
    pub milestones: String,
    pub team_size: i64,
    pub created_at: String,
}

impl From<Project> for ProjectSummary {
    fn from(p: Project) -> Self {
        Self {
            id: p.id,
            name: p.name,
            kind: p.kind,
            phase: p.phase.as_str().to_string(),
            department: p.department.as_str().to_string(),
            budget: p.budget,
            actual_cost: p.actual_cost,
            roi: p.roi,
            execution_progress: p.execution_progress,
            risk_level: p.risk_level.as_str().to_string(),
            goals: p.goals,
            stakeholders: p.stakeholders,
            initial_risks: p.initial_risks,
            resources: p.resources,
            milestones: p.milestones,
            team_size: p.team_size,
            created_at: p.created_at.to_rfc3339(),
        }
    }
}

/// Create project request
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProjectRequest {
    pub name: String,
    /// Template catalog name
    #[serde(rename = "type")]
    pub kind: String,
    pub phase: String,
    pub department: String,
    pub budget: f64,
}

/// Update project request; absent fields are left untouched
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProjectRequest {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub phase: Option<String>,
    pub department: Option<String>,
    pub budget: Option<f64>,
    pub actual_cost: Option<f64>,
    pub roi: Option<f64>,
    pub execution_progress: Option<f64>,
    pub risk_level: Option<String>,
    pub goals: Option<String>,
    pub stakeholders: Option<String>,
    pub initial_risks: Option<String>,
    pub resources: Option<String>,
    pub milestones: Option<String>,
    pub team_size: Option<i64>,
}

fn parse_phase(s: &str) -> Result<ProjectPhase> {
    ProjectPhase::parse(s)
        .ok_or_else(|| Error::validation("phase", format!("'{}' is not a known phase", s)))
}

fn parse_department(s: &str) -> Result<Department> {
    Department::parse(s)
        .ok_or_else(|| Error::validation("department", format!("'{}' is not a known department", s)))
}

fn parse_risk_level(s: &str) -> Result<RiskLevel> {
    RiskLevel::parse(s)
        .ok_or_else(|| Error::validation("risk_level", format!("'{}' is not a known risk level", s)))
}

impl UpdateProjectRequest {
    fn into_patch(self) -> Result<ProjectPatch> {
        Ok(ProjectPatch {
            kind: self.kind,
            phase: self.phase.as_deref().map(parse_phase).transpose()?,
            department: self.department.as_deref().map(parse_department).transpose()?,
            budget: self.budget,
            actual_cost: self.actual_cost,
            roi: self.roi,
            execution_progress: self.execution_progress,
            risk_level: self.risk_level.as_deref().map(parse_risk_level).transpose()?,
            goals: self.goals,
            stakeholders: self.stakeholders,
            initial_risks: self.initial_risks,
            resources: self.resources,
            milestones: self.milestones,
            team_size: self.team_size,
        })
    }
}

/// List projects visible to the caller
pub async fn list(db: &Database, ctx: &RequestContext) -> Result<Vec<ProjectSummary>> {
    let service = ProjectService::new(db.clone());
    let projects = service.list(ctx.project_filter()).await?;
    Ok(projects.into_iter().map(ProjectSummary::from).collect())
}

/// Get a single project by name
pub async fn get(db: &Database, name: &str) -> Result<Option<ProjectSummary>> {
    let service = ProjectService::new(db.clone());
    Ok(service.get(name).await?.map(ProjectSummary::from))
}

/// Create a new project
pub async fn create(db: &Database, request: CreateProjectRequest) -> Result<ProjectSummary> {
    let new_project = NewProject {
        name: request.name,
        kind: request.kind,
        phase: parse_phase(&request.phase)?,
        department: parse_department(&request.department)?,
        budget: request.budget,
    };

    let service = ProjectService::new(db.clone());
    let project = service.create(new_project).await?;
    Ok(ProjectSummary::from(project))
}

/// Patch an existing project and return the new snapshot
pub async fn update(
    db: &Database,
    name: &str,
    request: UpdateProjectRequest,
) -> Result<ProjectSummary> {
    let patch = request.into_patch()?;
    let service = ProjectService::new(db.clone());
    let project = service.update(name, patch).await?;
    Ok(ProjectSummary::from(project))
}

/// Delete a project permanently
pub async fn delete(db: &Database, name: &str) -> Result<()> {
    let service = ProjectService::new(db.clone());
    service.delete(name).await
}
