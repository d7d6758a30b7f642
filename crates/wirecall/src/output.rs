use std::io::IsTerminal;

use clap::ValueEnum;
use serde_json::Value;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    /// Table when stdout is a terminal, JSON when piped.
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            OutputFormat::Table
        } else {
            OutputFormat::Json
        }
    }
}

/// Print a procedure result in the requested format.
pub fn print_value(value: &Value, format: OutputFormat) {
    match format {
        OutputFormat::Json => println!("{value}"),
        OutputFormat::Table | OutputFormat::Pretty => {
            let rendered = serde_json::to_string_pretty(value)
                .unwrap_or_else(|_| value.to_string());
            println!("{rendered}");
        }
        OutputFormat::Raw => match value {
            Value::String(text) => println!("{text}"),
            other => println!("{other}"),
        },
    }
}
