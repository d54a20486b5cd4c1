//! Task CRUD commands: `sitetrack task add|update|delete`.

use anyhow::{Context, Result, bail};
use console::style;

use sitetrack::api::ApiClient;
use sitetrack::config::Config;
use sitetrack::detail::ProjectDetailController;
use sitetrack::models::{Task, TaskStatus};
use sitetrack::phases::PhaseListController;
use sitetrack::tasks::TaskEditor;
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

fn find_task(detail: &ProjectDetailController, task_id: i64) -> Option<Task> {
    detail.project().and_then(|p| {
        p.phases
            .iter()
            .flat_map(|phase| phase.tasks.iter())
            .find(|task| task.id == task_id)
            .cloned()
    })
}

pub async fn cmd_task_add(
    config: &Config,
    project_id: i64,
    phase_id: i64,
    name: String,
    description: String,
) -> Result<()> {
    let (mut detail, phases) = controllers(config, project_id);
    if !phases.add_task(phase_id, &name, &description).await? {
        println!("Task name is blank; nothing was created.");
        return Ok(());
    }
    println!("{} task under phase [{}]", style("Created").green(), phase_id);
    refetch_and_print(&mut detail).await
}

pub async fn cmd_task_update(
    config: &Config,
    project_id: i64,
    task_id: i64,
    name: Option<String>,
    description: Option<String>,
    status: Option<TaskStatus>,
) -> Result<()> {
    let (mut detail, phases) = controllers(config, project_id);
    detail.refetch().await?;
    let Some(task) = find_task(&detail, task_id) else {
        bail!("Task {} not found in project {}", task_id, project_id);
    };

    let mut editor = TaskEditor::new(task);
    editor.begin_edit();
    if let Some(name) = name {
        editor.set_name(name);
    }
    if let Some(description) = description {
        editor.set_description(description);
    }
    if let Some(status) = status {
        editor.set_status(status);
    }
    editor.save(&phases).await?;
    println!("{} task [{}]", style("Updated").green(), task_id);
    refetch_and_print(&mut detail).await
}

pub async fn cmd_task_delete(config: &Config, project_id: i64, task_id: i64) -> Result<()> {
    let (mut detail, phases) = controllers(config, project_id);
    phases.delete_task(task_id).await?;
    println!("{} task [{}]", style("Deleted").green(), task_id);
    refetch_and_print(&mut detail).await
}
