//! `lectern config check`.

use std::path::Path;

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use lectern_types::config::LecternConfig;

const NOT_SET: &str = "(not set)";

/// Tabulate the resolved settings. The API key is shown only as set/unset.
pub fn settings_table(config: &LecternConfig) -> Table {
    let ai = &config.ai;
    let missing = ai.missing_fields();
    let key_state = if missing.iter().any(|f| f == "api_key") {
        NOT_SET
    } else {
        "set"
    };

    let rows: Vec<(&str, String)> = vec![
        (
            "ai.deployment_uri",
            ai.deployment_uri.clone().unwrap_or_else(|| NOT_SET.to_string()),
        ),
        ("ai.api_key", key_state.to_string()),
        ("ai.deployment_model_name", ai.deployment_model_name.clone()),
        ("ai.provider", ai.provider.to_string()),
        ("ai.api_version", ai.api_version.clone()),
        ("ai.temperature", ai.temperature.to_string()),
        ("ai.top_p", ai.top_p.to_string()),
        ("ai.max_output_tokens", ai.max_output_tokens.to_string()),
        ("ai.request_timeout_secs", ai.request_timeout_secs.to_string()),
        ("forecast.seed_count", config.forecast.seed_count.to_string()),
    ];

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Setting").fg(Color::White),
        Cell::new("Value").fg(Color::White),
    ]);

    for (name, value) in rows {
        let value_cell = if value == NOT_SET {
            Cell::new(value).fg(Color::Red)
        } else {
            Cell::new(value)
        };
        table.add_row(vec![Cell::new(name).fg(Color::Cyan), value_cell]);
    }
    table
}

/// Print the resolved configuration and fail if the chat demo could not start.
pub fn check(path: &Path, config: &LecternConfig) -> Result<()> {
    let source = if path.exists() {
        path.display().to_string()
    } else {
        format!("{} (missing, using defaults)", path.display())
    };

    println!();
    println!("  {} {}", style("Config:").bold(), style(source).dim());
    println!();
    println!("{}", settings_table(config));
    println!();
    println!("  {} forecast demo ready", style("✓").green());

    match config.ai.validate() {
        Ok(()) => {
            println!("  {} chat demo ready", style("✓").green());
            println!();
            Ok(())
        }
        Err(e) => {
            println!("  {} chat demo unavailable: {e}", style("✗").red());
            println!();
            Err(e.into())
        }
    }
}
