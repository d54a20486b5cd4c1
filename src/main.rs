use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use sitetrack::config::Config;
use sitetrack::models::TaskStatus;

mod cmd;

#[derive(Parser)]
#[command(name = "sitetrack")]
#[command(version, about = "Construction project tracking client")]
pub struct Cli {
    /// API base URL (overrides SITETRACK_API_URL and the config file)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Project views
    Project {
        #[command(subcommand)]
        command: ProjectCommands,
    },
    /// Manage project phases
    Phase {
        #[command(subcommand)]
        command: PhaseCommands,
    },
    /// Manage tasks within phases
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },
    /// Record and manage progress snapshots
    Progress {
        #[command(subcommand)]
        command: ProgressCommands,
    },
    /// Project documents: upload, listing, and document-triggered actions
    Doc {
        #[command(subcommand)]
        command: DocCommands,
    },
}

#[derive(Subcommand)]
pub enum ProjectCommands {
    /// Show the full project detail: progress, phases, documents, history
    Show {
        /// Project id (defaults to default_project from the config file)
        id: Option<i64>,
    },
}

#[derive(Subcommand)]
pub enum PhaseCommands {
    /// Create a phase in a project
    Add {
        #[arg(short, long)]
        project: i64,
        name: String,
        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// Update a phase's name and/or description
    Update {
        #[arg(short, long)]
        project: i64,
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a phase
    Delete {
        #[arg(short, long)]
        project: i64,
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Create a task under a phase (no-op when the name is blank)
    Add {
        #[arg(short, long)]
        project: i64,
        #[arg(long)]
        phase: i64,
        name: String,
        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// Update a task's name, description, and/or status
    Update {
        #[arg(short, long)]
        project: i64,
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// One of: pending, in_progress, completed
        #[arg(long)]
        status: Option<TaskStatus>,
    },
    /// Delete a task
    Delete {
        #[arg(short, long)]
        project: i64,
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum ProgressCommands {
    /// Record a progress snapshot dated today
    Add {
        #[arg(short, long)]
        project: i64,
        /// Percent complete, 0-100
        percentage: i64,
        #[arg(short, long, default_value = "")]
        notes: String,
    },
    /// Update an existing snapshot, keeping its original date
    Update {
        #[arg(short, long)]
        project: i64,
        id: i64,
        #[arg(long)]
        percentage: Option<i64>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Delete a snapshot
    Delete {
        #[arg(short, long)]
        project: i64,
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum DocCommands {
    /// List a project's documents, optionally filtered by category
    List {
        #[arg(short, long)]
        project: i64,
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Upload a file, with an optional category (vykres, rozpocet, ...)
    Upload {
        #[arg(short, long)]
        project: i64,
        file: PathBuf,
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Run OCR on a document and show the extracted text
    Ocr {
        #[arg(short, long)]
        project: i64,
        id: i64,
    },
    /// Count warehouse aisles on a document drawing
    Aisles {
        #[arg(short, long)]
        project: i64,
        id: i64,
    },
    /// Download a document's raw bytes to a local file
    Download {
        id: i64,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("SITETRACK_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = Config::load(cli.api_url.as_deref())?;

    match cli.command {
        Commands::Project { command } => match command {
            ProjectCommands::Show { id } => cmd::cmd_project_show(&config, id).await?,
        },
        Commands::Phase { command } => match command {
            PhaseCommands::Add {
                project,
                name,
                description,
            } => cmd::cmd_phase_add(&config, project, name, description).await?,
            PhaseCommands::Update {
                project,
                id,
                name,
                description,
            } => cmd::cmd_phase_update(&config, project, id, name, description).await?,
            PhaseCommands::Delete { project, id } => {
                cmd::cmd_phase_delete(&config, project, id).await?
            }
        },
        Commands::Task { command } => match command {
            TaskCommands::Add {
                project,
                phase,
                name,
                description,
            } => cmd::cmd_task_add(&config, project, phase, name, description).await?,
            TaskCommands::Update {
                project,
                id,
                name,
                description,
                status,
            } => cmd::cmd_task_update(&config, project, id, name, description, status).await?,
            TaskCommands::Delete { project, id } => {
                cmd::cmd_task_delete(&config, project, id).await?
            }
        },
        Commands::Progress { command } => match command {
            ProgressCommands::Add {
                project,
                percentage,
                notes,
            } => cmd::cmd_progress_add(&config, project, percentage, notes).await?,
            ProgressCommands::Update {
                project,
                id,
                percentage,
                notes,
            } => cmd::cmd_progress_update(&config, project, id, percentage, notes).await?,
            ProgressCommands::Delete { project, id } => {
                cmd::cmd_progress_delete(&config, project, id).await?
            }
        },
        Commands::Doc { command } => match command {
            DocCommands::List { project, category } => {
                cmd::cmd_doc_list(&config, project, category).await?
            }
            DocCommands::Upload {
                project,
                file,
                category,
            } => cmd::cmd_doc_upload(&config, project, file, category).await?,
            DocCommands::Ocr { project, id } => cmd::cmd_doc_ocr(&config, project, id).await?,
            DocCommands::Aisles { project, id } => {
                cmd::cmd_doc_aisles(&config, project, id).await?
            }
            DocCommands::Download { id, output } => {
                cmd::cmd_doc_download(&config, id, output).await?
            }
        },
    }

    Ok(())
}
