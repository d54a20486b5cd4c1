//! Progress log commands: `sitetrack progress add|update|delete`.
//!
//! `add` posts a new snapshot dated today; `update` re-submits an existing
//! log under its original date; `delete` removes one. The history printed
//! afterwards always comes from the post-mutation re-fetch.

use anyhow::{Context, Result, bail};
use console::style;

use sitetrack::api::ApiClient;
use sitetrack::config::Config;
use sitetrack::detail::ProjectDetailController;
use sitetrack::ui;

fn detail_controller(config: &Config, project_id: i64) -> ProjectDetailController {
    ProjectDetailController::new(ApiClient::new(&config.api_url), project_id)
}

fn print_history(detail: &ProjectDetailController) -> Result<()> {
    let project = detail
        .project()
        .context("Project fetch returned no aggregate")?;
    ui::print_progress_history(&project.progress_logs);
    Ok(())
}

pub async fn cmd_progress_add(
    config: &Config,
    project_id: i64,
    percentage: i64,
    notes: String,
) -> Result<()> {
    let mut detail = detail_controller(config, project_id);
    detail.set_percentage(percentage);
    detail.set_notes(notes);
    detail.submit_progress().await?;
    println!("{} progress snapshot", style("Recorded").green());
    print_history(&detail)
}

pub async fn cmd_progress_update(
    config: &Config,
    project_id: i64,
    log_id: i64,
    percentage: Option<i64>,
    notes: Option<String>,
) -> Result<()> {
    let mut detail = detail_controller(config, project_id);
    detail.refetch().await?;
    let log = detail
        .project()
        .and_then(|p| p.progress_logs.iter().find(|log| log.id == log_id))
        .cloned();
    let Some(log) = log else {
        bail!("Progress log {} not found in project {}", log_id, project_id);
    };

    detail.edit_progress(log);
    if let Some(percentage) = percentage {
        detail.set_percentage(percentage);
    }
    if let Some(notes) = notes {
        detail.set_notes(notes);
    }
    detail.submit_progress().await?;
    println!("{} progress log [{}]", style("Updated").green(), log_id);
    print_history(&detail)
}

pub async fn cmd_progress_delete(config: &Config, project_id: i64, log_id: i64) -> Result<()> {
    let mut detail = detail_controller(config, project_id);
    detail.delete_progress(log_id).await?;
    println!("{} progress log [{}]", style("Deleted").green(), log_id);
    print_history(&detail)
}
