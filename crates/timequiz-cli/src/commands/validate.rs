//! The `timequiz validate` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

pub fn execute(problems: PathBuf) -> Result<()> {
    let questions = timequiz_core::source::load_csv(&problems)?;
    println!(
        "Question bank: {} ({} questions)",
        problems.display(),
        questions.len()
    );

    let warnings = timequiz_core::source::validate(&questions);
    if warnings.is_empty() {
        println!("Question bank valid.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Question", "Warning"]);
    for w in &warnings {
        let question = w
            .question
            .map(|n| format!("#{n}"))
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![Cell::new(question), Cell::new(&w.message)]);
    }
    println!("{table}");
    println!("\n{} warning(s) found.", warnings.len());

    Ok(())
}
