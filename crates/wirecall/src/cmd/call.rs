use std::fs;

use serde_json::Value;
use wirecall_demo::{demo_principal, demo_router};
use wirecall_router::CallContext;

use crate::cmd::CallArgs;
use crate::exit::{call_error, io_error, registry_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::{print_value, OutputFormat};

pub fn run(args: CallArgs, format: OutputFormat) -> CliResult<i32> {
    let payload = resolve_payload(&args)?;

    let router = demo_router().map_err(|err| registry_error("contract build failed", err))?;
    let context = if args.auth {
        CallContext::authenticated(demo_principal())
    } else {
        CallContext::anonymous()
    };

    let result = router
        .invoke(&args.procedure, payload, &context)
        .map_err(|err| call_error(&format!("{} failed", args.procedure), err))?;

    print_value(&result, format);
    Ok(SUCCESS)
}

fn resolve_payload(args: &CallArgs) -> CliResult<Value> {
    if let Some(json) = &args.json {
        return serde_json::from_str(json)
            .map_err(|err| CliError::new(USAGE, format!("--json is not valid JSON: {err}")));
    }
    if let Some(path) = &args.file {
        let text = fs::read_to_string(path)
            .map_err(|err| io_error(&format!("failed reading {}", path.display()), err))?;
        return serde_json::from_str(&text).map_err(|err| {
            CliError::new(USAGE, format!("{} is not valid JSON: {err}", path.display()))
        });
    }
    Ok(Value::Object(serde_json::Map::new()))
}
