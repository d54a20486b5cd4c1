//! Project detail view command: `sitetrack project show`.

use anyhow::{Context, Result};
use console::style;

use sitetrack::api::ApiClient;
use sitetrack::config::Config;
use sitetrack::detail::ProjectDetailController;
use sitetrack::ui::{self, chart};

pub async fn cmd_project_show(config: &Config, id: Option<i64>) -> Result<()> {
    let id = id
        .or(config.default_project)
        .context("No project id given and no default_project configured")?;

    let mut detail = ProjectDetailController::new(ApiClient::new(&config.api_url), id);
    detail.refetch().await?;
    let project = detail
        .project()
        .context("Project fetch returned no aggregate")?;

    ui::print_project(project, detail.overall_progress());

    println!("\n{}", style("Progress over time").bold());
    println!("{}", chart::render(&detail.chart_data()).trim_end());

    ui::print_phases(&project.phases);
    ui::print_documents(&project.documents);
    ui::print_progress_history(&project.progress_logs);
    Ok(())
}
