//! Document commands: `sitetrack doc list|upload|ocr|aisles|download`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use console::style;

use sitetrack::api::ApiClient;
use sitetrack::config::Config;
use sitetrack::detail::ProjectDetailController;
use sitetrack::ui;

fn detail_controller(config: &Config, project_id: i64) -> ProjectDetailController {
    ProjectDetailController::new(ApiClient::new(&config.api_url), project_id)
}

pub async fn cmd_doc_list(
    config: &Config,
    project_id: i64,
    category: Option<String>,
) -> Result<()> {
    let mut detail = detail_controller(config, project_id);
    detail.refetch().await?;
    detail.set_filter(category.unwrap_or_default()).await?;
    let project = detail
        .project()
        .context("Project fetch returned no aggregate")?;
    ui::print_documents(&project.documents);
    Ok(())
}

pub async fn cmd_doc_upload(
    config: &Config,
    project_id: i64,
    file: PathBuf,
    category: Option<String>,
) -> Result<()> {
    let mut detail = detail_controller(config, project_id);
    detail.select_file(file);
    detail.set_upload_category(category.unwrap_or_default());
    detail.upload().await?;
    println!("{} document", style("Uploaded").green());
    let project = detail
        .project()
        .context("Project fetch returned no aggregate")?;
    ui::print_documents(&project.documents);
    Ok(())
}

pub async fn cmd_doc_ocr(config: &Config, project_id: i64, document_id: i64) -> Result<()> {
    let mut detail = detail_controller(config, project_id);
    detail.run_ocr(document_id).await;
    if let Some(result) = detail.action_result() {
        ui::print_action_result(result);
    }
    Ok(())
}

pub async fn cmd_doc_aisles(config: &Config, project_id: i64, document_id: i64) -> Result<()> {
    let mut detail = detail_controller(config, project_id);
    detail.count_aisles(document_id).await;
    if let Some(result) = detail.action_result() {
        ui::print_action_result(result);
    }
    Ok(())
}

pub async fn cmd_doc_download(
    config: &Config,
    document_id: i64,
    output: Option<PathBuf>,
) -> Result<()> {
    let client = ApiClient::new(&config.api_url);
    let bytes = client.download_document(document_id).await?;
    let output = output.unwrap_or_else(|| PathBuf::from(format!("document-{}", document_id)));
    tokio::fs::write(&output, &bytes)
        .await
        .with_context(|| format!("Failed to write {}", output.display()))?;
    println!(
        "{} {} bytes to {}",
        style("Saved").green(),
        bytes.len(),
        output.display()
    );
    Ok(())
}
