//! Terminal rendering of the project detail view.

pub mod chart;

use console::style;

use crate::detail::DocumentAction;
use crate::models::{Document, Phase, ProgressLog, Project};

/// Print the project header and the server-computed overall progress.
pub fn print_project(project: &Project, overall_progress: Option<f64>) {
    println!("{}", style(&project.name).bold().underlined());
    if let Some(description) = &project.description {
        println!("{}", description);
    }
    if let Some(overall) = overall_progress {
        println!(
            "\n{} {:.2}%",
            style("Overall progress:").bold(),
            overall
        );
    }
}

/// Print phases with their nested tasks.
pub fn print_phases(phases: &[Phase]) {
    println!("\n{}", style("Phases").bold());
    if phases.is_empty() {
        println!("  (no phases yet)");
        return;
    }
    for phase in phases {
        println!("  [{}] {}", phase.id, style(&phase.name).bold());
        if let Some(description) = &phase.description {
            println!("      {}", style(description).dim());
        }
        if phase.tasks.is_empty() {
            println!("      {}", style("no tasks for this phase").dim());
        }
        for task in &phase.tasks {
            println!(
                "      [{}] {} ({})",
                task.id,
                task.name,
                style(task.status.as_str()).cyan()
            );
            if let Some(description) = &task.description {
                println!("           {}", style(description).dim());
            }
        }
    }
}

pub fn print_documents(documents: &[Document]) {
    println!("\n{}", style("Documents").bold());
    if documents.is_empty() {
        println!("  (no documents uploaded)");
        return;
    }
    for doc in documents {
        match &doc.category {
            Some(category) => println!("  [{}] {} ({})", doc.id, doc.filename, category),
            None => println!("  [{}] {}", doc.id, doc.filename),
        }
        for field in &doc.extracted_data {
            println!("      {}: {}", style(&field.key).dim(), field.value);
        }
    }
}

pub fn print_progress_history(logs: &[ProgressLog]) {
    println!("\n{}", style("Progress history").bold());
    if logs.is_empty() {
        println!("  (no progress recorded)");
        return;
    }
    for log in logs {
        print!("  [{}] {}  {:>3}%", log.id, log.date, log.percentage_completed);
        match &log.notes {
            Some(notes) if !notes.is_empty() => println!("  {}", notes),
            _ => println!(),
        }
    }
}

/// Print the transient result of a document-triggered action, the terminal
/// stand-in for the modal overlay.
pub fn print_action_result(result: &DocumentAction) {
    match result {
        DocumentAction::Ocr { text, extracted } => {
            println!("{}", style("OCR result").bold());
            println!("{}", text);
            if !extracted.is_empty() {
                println!("\n{}", style("Extracted data").bold());
                for field in extracted {
                    println!("  {}: {}", field.label, field.text);
                }
            }
        }
        DocumentAction::AisleCount(count) => {
            println!("{}", style("Aisle count").bold());
            println!("{}", count.message);
        }
    }
}
