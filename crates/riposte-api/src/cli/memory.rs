//! `riposte memory` commands.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use serde_json::json;

use riposte_types::exchange::ChatId;

use crate::state::AppState;

/// Show stored exchanges for a chat as a table or JSON.
pub async fn show_memory(state: &AppState, chat: &str, json: bool) -> Result<()> {
    let chat_id = ChatId::from(chat);
    let records = state.service.memory_snapshot(&chat_id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!(
            "\n  {} No stored exchanges for '{}'.\n",
            console::style("i").cyan().bold(),
            chat
        );
        return Ok(());
    }

    println!(
        "\n  {}\n",
        console::style(format!("Memory for '{chat}'")).bold()
    );

    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["ID", "Message", "Reply", "Persona", "Date"]);

    for record in &records {
        table.add_row(vec![
            Cell::new(record.id.to_string()).fg(Color::DarkGrey),
            Cell::new(truncate(&record.user_message, 40)),
            Cell::new(truncate(&record.response, 40)),
            Cell::new(&record.persona).fg(Color::Cyan),
            Cell::new(record.created_at.format("%Y-%m-%d").to_string()).fg(Color::DarkGrey),
        ]);
    }

    println!("{table}");

    let plural = if records.len() == 1 { "" } else { "s" };
    println!(
        "\n  {} exchange{plural}\n",
        console::style(records.len()).bold()
    );
    Ok(())
}

/// Wipe stored exchanges for a chat, with a confirmation prompt.
pub async fn clear_memory(state: &AppState, chat: &str, force: bool, json: bool) -> Result<()> {
    let chat_id = ChatId::from(chat);
    let count = state.service.memory_snapshot(&chat_id).await?.len();

    if count == 0 {
        if json {
            println!("{}", json!({"cleared": 0, "chat": chat}));
        } else {
            println!(
                "\n  {} No stored exchanges for '{}'.\n",
                console::style("i").cyan().bold(),
                chat
            );
        }
        return Ok(());
    }

    if !force && !json {
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(format!(
                "Wipe all {count} exchanges for '{chat}'? This cannot be undone."
            ))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("  Cancelled.");
            return Ok(());
        }
    }

    state.service.clear_memory(&chat_id).await?;

    if json {
        println!("{}", json!({"cleared": count, "chat": chat}));
    } else {
        let plural = if count == 1 { "" } else { "s" };
        println!(
            "\n  {} Cleared {count} exchange{plural} for '{chat}'.\n",
            console::style("x").red().bold()
        );
    }
    Ok(())
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let prefix: String = text.chars().take(max - 3).collect();
        format!("{prefix}...")
    }
}
