//! Phase CRUD commands: `sitetrack phase add|update|delete`.
//!
//! Every mutation is followed by a full re-fetch of the project aggregate;
//! the printed phase list always reflects server state, never a local patch.

use anyhow::{Context, Result, bail};
use console::style;

use sitetrack::api::ApiClient;
use sitetrack::config::Config;
use sitetrack::detail::ProjectDetailController;
use sitetrack::phases::PhaseListController;
use sitetrack::ui;

fn controllers(
    config: &Config,
    project_id: i64,
) -> (ProjectDetailController, PhaseListController) {
    let client = ApiClient::new(&config.api_url);
    (
        ProjectDetailController::new(client.clone(), project_id),
        PhaseListController::new(client, project_id),
    )
}

async fn refetch_and_print(detail: &mut ProjectDetailController) -> Result<()> {
    detail.refetch().await?;
    let project = detail
        .project()
        .context("Project fetch returned no aggregate")?;
    ui::print_phases(&project.phases);
    Ok(())
}

pub async fn cmd_phase_add(
    config: &Config,
    project_id: i64,
    name: String,
    description: String,
) -> Result<()> {
    let (mut detail, mut phases) = controllers(config, project_id);
    phases.set_new_phase_name(name);
    phases.set_new_phase_description(description);
    let phase = phases.add_phase().await?;
    println!("{} phase [{}] {}", style("Created").green(), phase.id, phase.name);
    refetch_and_print(&mut detail).await
}

pub async fn cmd_phase_update(
    config: &Config,
    project_id: i64,
    phase_id: i64,
    name: Option<String>,
    description: Option<String>,
) -> Result<()> {
    let (mut detail, mut phases) = controllers(config, project_id);
    detail.refetch().await?;
    let current = detail
        .project()
        .and_then(|p| p.phases.iter().find(|phase| phase.id == phase_id))
        .cloned();
    let Some(current) = current else {
        bail!("Phase {} not found in project {}", phase_id, project_id);
    };

    phases.begin_edit(&current);
    if let Some(name) = name {
        phases.set_edit_name(name);
    }
    if let Some(description) = description {
        phases.set_edit_description(description);
    }
    let updated = phases
        .save_edit()
        .await?
        .context("Save left edit mode without persisting")?;
    println!("{} phase [{}] {}", style("Updated").green(), updated.id, updated.name);
    refetch_and_print(&mut detail).await
}

pub async fn cmd_phase_delete(config: &Config, project_id: i64, phase_id: i64) -> Result<()> {
    let (mut detail, mut phases) = controllers(config, project_id);
    phases.delete_phase(phase_id).await?;
    println!("{} phase [{}]", style("Deleted").green(), phase_id);
    refetch_and_print(&mut detail).await
}
