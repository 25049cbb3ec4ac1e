//! Trellis CLI - project portfolio tracker

use clap::{Parser, Subcommand};
use trellis_core::api::projects::{CreateProjectRequest, UpdateProjectRequest};
use trellis_core::api::{dashboard, projects, RequestContext};
use trellis_core::catalog::{Department, ProjectPhase, Role};
use trellis_core::commands::template::Template;
use trellis_core::config::Config;
use trellis_core::storage::{Database, DatabaseConfig};

#[derive(Parser)]
#[command(name = "trellis")]
#[command(author, version, about = "Project portfolio tracker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text")]
    format: OutputFormat,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Clone, Copy, Default, PartialEq, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage projects
    Projects {
        #[command(subcommand)]
        action: ProjectAction,
    },

    /// Show the dashboard overview
    Dashboard {
        /// Caller role (Admin, Manager, Employee)
        #[arg(long, default_value = "Admin")]
        role: String,
        /// Caller department; scopes the view for non-admin roles
        #[arg(long)]
        department: Option<String>,
    },

    /// List the project template catalog
    Templates,

    /// List the fixed catalogs (phases, departments)
    Catalogs,
}

#[derive(Subcommand)]
enum ProjectAction {
    /// Create a new project
    Add {
        /// Project name (unique)
        name: String,
        /// Project type, a template catalog name
        #[arg(short = 't', long = "type")]
        kind: String,
        /// Project phase
        #[arg(long, default_value = "None")]
        phase: String,
        /// Owning department
        #[arg(long, default_value = "None")]
        department: String,
        /// Allocated budget
        #[arg(long, default_value_t = 0.0)]
        budget: f64,
    },

    /// Show a single project
    Show {
        /// Project name
        name: String,
    },

    /// Update fields on an existing project
    Update {
        /// Project name
        name: String,
        #[arg(long = "type")]
        kind: Option<String>,
        #[arg(long)]
        phase: Option<String>,
        #[arg(long)]
        department: Option<String>,
        #[arg(long)]
        budget: Option<f64>,
        #[arg(long)]
        actual_cost: Option<f64>,
        #[arg(long)]
        roi: Option<f64>,
        #[arg(long)]
        progress: Option<f64>,
        #[arg(long)]
        risk: Option<String>,
        #[arg(long)]
        goals: Option<String>,
        #[arg(long)]
        stakeholders: Option<String>,
        #[arg(long)]
        initial_risks: Option<String>,
        #[arg(long)]
        resources: Option<String>,
        #[arg(long)]
        milestones: Option<String>,
        #[arg(long)]
        team_size: Option<i64>,
    },

    /// Delete a project permanently
    Delete {
        /// Project name
        name: String,
    },

    /// List projects
    List {
        /// Filter by department
        #[arg(long)]
        department: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("trellis=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    let get_db = || async {
        let config = Config::load()?;
        Database::new(DatabaseConfig::with_path(config.database_path())).await
    };

    match cli.command {
        Commands::Projects { action } => {
            let db = get_db().await?;
            cmd_projects(&db, action, cli.format, cli.quiet).await
        }

        Commands::Dashboard { role, department } => {
            let db = get_db().await?;
            cmd_dashboard(&db, &role, department.as_deref(), cli.format).await
        }

        Commands::Templates => cmd_templates(cli.format),

        Commands::Catalogs => cmd_catalogs(cli.format),
    }
}

// ============================================================================
// Command Implementations
// ============================================================================

fn print_project(p: &projects::ProjectSummary) {
    println!("Project: {}", p.name);
    println!("  Type: {}", p.kind);
    println!("  Phase: {}", p.phase);
    println!("  Department: {}", p.department);
    println!("  Budget: {:.2}", p.budget);
    println!("  Actual cost: {:.2}", p.actual_cost);
    println!("  Progress: {:.1}%", p.execution_progress);
    println!("  Risk: {}", p.risk_level);
    println!("  Team size: {}", p.team_size);
    if !p.goals.is_empty() {
        println!("  Goals: {}", p.goals);
    }
    if !p.stakeholders.is_empty() {
        println!("  Stakeholders: {}", p.stakeholders);
    }
    if !p.initial_risks.is_empty() {
        println!("  Initial risks: {}", p.initial_risks);
    }
    println!("  Created: {}", p.created_at);
}

async fn cmd_projects(
    db: &Database,
    action: ProjectAction,
    format: OutputFormat,
    quiet: bool,
) -> anyhow::Result<()> {
    match action {
        ProjectAction::Add {
            name,
            kind,
            phase,
            department,
            budget,
        } => {
            let summary = projects::create(
                db,
                CreateProjectRequest {
                    name,
                    kind,
                    phase,
                    department,
                    budget,
                },
            )
            .await?;

            if format == OutputFormat::Json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else if !quiet {
                println!("Project '{}' created.", summary.name);
                print_project(&summary);
            }
        }

        ProjectAction::Show { name } => {
            let summary = projects::get(db, &name).await?.ok_or_else(|| {
                anyhow::anyhow!(
                    "Project '{}' not found. Run `trellis projects list` to see all projects.",
                    name
                )
            })?;

            if format == OutputFormat::Json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print_project(&summary);
            }
        }

        ProjectAction::Update {
            name,
            kind,
            phase,
            department,
            budget,
            actual_cost,
            roi,
            progress,
            risk,
            goals,
            stakeholders,
            initial_risks,
            resources,
            milestones,
            team_size,
        } => {
            let request = UpdateProjectRequest {
                kind,
                phase,
                department,
                budget,
                actual_cost,
                roi,
                execution_progress: progress,
                risk_level: risk,
                goals,
                stakeholders,
                initial_risks,
                resources,
                milestones,
                team_size,
            };
            let summary = projects::update(db, &name, request).await?;

            if format == OutputFormat::Json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else if !quiet {
                println!("Project '{}' updated.", summary.name);
                print_project(&summary);
            }
        }

        ProjectAction::Delete { name } => {
            projects::delete(db, &name).await?;
            if !quiet {
                println!("Project '{}' deleted.", name);
            }
        }

        ProjectAction::List { department } => {
            let ctx = match department.as_deref() {
                Some(d) => {
                    let department = Department::parse(d)
                        .ok_or_else(|| anyhow::anyhow!("'{}' is not a known department", d))?;
                    RequestContext::new(Role::Manager, department)
                }
                None => RequestContext::admin(),
            };

            let all = projects::list(db, &ctx).await?;
            if format == OutputFormat::Json {
                println!("{}", serde_json::to_string_pretty(&all)?);
            } else if all.is_empty() {
                if !quiet {
                    println!("No projects found.");
                    println!("\nCreate one with: trellis projects add <name> --type <template>");
                }
            } else {
                if !quiet {
                    println!("Projects:");
                }
                for p in all {
                    println!(
                        "  {} - {} / {} ({:.1}%)",
                        p.name, p.department, p.phase, p.execution_progress
                    );
                }
            }
        }
    }

    Ok(())
}

async fn cmd_dashboard(
    db: &Database,
    role: &str,
    department: Option<&str>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let role = Role::parse(role)
        .ok_or_else(|| anyhow::anyhow!("'{}' is not a known role (Admin, Manager, Employee)", role))?;
    let department = match department {
        Some(d) => Department::parse(d)
            .ok_or_else(|| anyhow::anyhow!("'{}' is not a known department", d))?,
        None => Department::None,
    };

    let view = dashboard::overview(db, &RequestContext::new(role, department)).await?;

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    if view.rows.is_empty() {
        println!("No projects found. Add one with: trellis projects add <name> --type <template>");
        return Ok(());
    }

    println!("Project Status Summary");
    for row in &view.rows {
        println!("  {} - {} ({:.1}%)", row.name, row.status.as_str(), row.completion);
    }

    println!("\nBy type:");
    for (kind, count) in &view.by_type {
        println!("  {}: {}", kind, count);
    }
    println!("\nBy department:");
    for (department, count) in &view.by_department {
        println!("  {}: {}", department, count);
    }
    println!("\nBy phase:");
    for (phase, count) in &view.by_phase {
        println!("  {}: {}", phase, count);
    }

    println!(
        "\nPortfolio: {} projects, budget {:.2}, actual cost {:.2}",
        view.totals.count, view.totals.total_budget, view.totals.total_actual_cost
    );

    Ok(())
}

fn cmd_templates(format: OutputFormat) -> anyhow::Result<()> {
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(Template::all())?);
        return Ok(());
    }

    println!("Templates:");
    for template in Template::all() {
        println!("  {}", template.name);
        println!("    Goals: {}", template.goals);
        println!("    Stakeholders: {}", template.stakeholders);
        println!("    Initial risks: {}", template.initial_risks);
    }
    Ok(())
}

fn cmd_catalogs(format: OutputFormat) -> anyhow::Result<()> {
    let phases: Vec<&str> = ProjectPhase::ALL.iter().map(|p| p.as_str()).collect();
    let departments: Vec<&str> = Department::ALL.iter().map(|d| d.as_str()).collect();

    if format == OutputFormat::Json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "phases": phases,
                "departments": departments,
            }))?
        );
        return Ok(());
    }

    println!("Phases:");
    for phase in phases {
        println!("  {}", phase);
    }
    println!("\nDepartments:");
    for department in departments {
        println!("  {}", department);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_command_tree() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_projects_add() {
        let cli = Cli::parse_from([
            "trellis",
            "projects",
            "add",
            "Line 4 Upgrade",
            "--type",
            "Digitization",
            "--phase",
            "Scoping",
            "--department",
            "Automation",
            "--budget",
            "50000",
        ]);
        match cli.command {
            Commands::Projects {
                action:
                    ProjectAction::Add {
                        name,
                        kind,
                        phase,
                        department,
                        budget,
                    },
            } => {
                assert_eq!(name, "Line 4 Upgrade");
                assert_eq!(kind, "Digitization");
                assert_eq!(phase, "Scoping");
                assert_eq!(department, "Automation");
                assert_eq!(budget, 50_000.0);
            }
            _ => panic!("Expected projects add"),
        }
    }

    #[test]
    fn test_parse_dashboard_defaults_to_admin() {
        let cli = Cli::parse_from(["trellis", "dashboard"]);
        match cli.command {
            Commands::Dashboard { role, department } => {
                assert_eq!(role, "Admin");
                assert!(department.is_none());
            }
            _ => panic!("Expected dashboard"),
        }
    }
}
