//! `riposte personas` command.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};

use crate::state::AppState;

/// List the available personas as a table or JSON.
pub fn list_personas(state: &AppState, json: bool) -> Result<()> {
    let summaries = state.service.personas().summaries();

    if json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    println!(
        "\n  {}\n",
        console::style(format!("Personas ({})", summaries.len())).bold()
    );

    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Persona", "Description"]);

    for summary in &summaries {
        table.add_row(vec![
            Cell::new(&summary.name).fg(Color::Cyan),
            Cell::new(&summary.description).fg(Color::White),
        ]);
    }

    println!("{table}");
    Ok(())
}
