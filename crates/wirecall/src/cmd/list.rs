use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;
use wirecall_demo::demo_router;
use wirecall_router::Procedure;

use crate::cmd::ListArgs;
use crate::exit::{registry_error, CliResult, SUCCESS};
use crate::output::OutputFormat;

#[derive(Serialize)]
struct ProcedureRow {
    name: String,
    kind: &'static str,
    access: &'static str,
    input: Option<String>,
}

#[derive(Serialize)]
struct ContractOutput {
    procedures: Vec<ProcedureRow>,
}

impl ProcedureRow {
    fn from_procedure(procedure: &Procedure) -> Self {
        Self {
            name: procedure.name().to_string(),
            kind: procedure.kind().as_str(),
            access: procedure.access().as_str(),
            input: procedure.input().map(|shape| shape.to_string()),
        }
    }
}

pub fn run(_args: ListArgs, format: OutputFormat) -> CliResult<i32> {
    let router = demo_router().map_err(|err| registry_error("contract build failed", err))?;
    let output = ContractOutput {
        procedures: router
            .procedures()
            .into_iter()
            .map(ProcedureRow::from_procedure)
            .collect(),
    };

    print_contract(&output, format);
    Ok(SUCCESS)
}

fn print_contract(output: &ContractOutput, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let line = serde_json::to_string(output).unwrap_or_else(|_| "{}".to_string());
            println!("{line}");
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["PROCEDURE", "KIND", "ACCESS", "INPUT"]);
            for row in &output.procedures {
                table.add_row(vec![
                    row.name.clone(),
                    row.kind.to_string(),
                    row.access.to_string(),
                    row.input.clone().unwrap_or_else(|| "none".to_string()),
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            for row in &output.procedures {
                let input = row.input.as_deref().unwrap_or("none");
                println!("{} [{}] {} input={input}", row.name, row.kind, row.access);
            }
        }
        OutputFormat::Raw => {
            for row in &output.procedures {
                println!("{}", row.name);
            }
        }
    }
}
