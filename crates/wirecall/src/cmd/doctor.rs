use serde::Serialize;
use serde_json::json;
use wirecall_demo::{demo_router, PROC_CREATE_POST, PROC_POSTS_LIST, PROC_PROFILE};
use wirecall_router::CallContext;

use crate::cmd::DoctorArgs;
use crate::exit::{CliResult, HEALTH_CHECK_FAILED, SUCCESS};
use crate::output::OutputFormat;

#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
enum CheckStatus {
    Pass,
    Fail,
    Info,
}

#[derive(Debug, Serialize)]
struct CheckResult {
    name: String,
    status: CheckStatus,
    detail: String,
}

#[derive(Debug, Serialize)]
struct DoctorOutput {
    checks: Vec<CheckResult>,
    overall: &'static str,
}

pub fn run(_args: DoctorArgs, format: OutputFormat) -> CliResult<i32> {
    let checks = vec![
        contract_build_check(),
        pagination_window_check(),
        access_control_check(),
        validation_guard_check(),
        compiled_features_check(),
    ];

    let has_fail = checks.iter().any(|c| matches!(c.status, CheckStatus::Fail));
    let overall = if has_fail { "fail" } else { "pass" };

    let output = DoctorOutput { checks, overall };

    print_doctor(&output, format);

    if has_fail {
        Ok(HEALTH_CHECK_FAILED)
    } else {
        Ok(SUCCESS)
    }
}

fn contract_build_check() -> CheckResult {
    match demo_router() {
        Ok(router) if router.len() == 7 => CheckResult {
            name: "contract_build".to_string(),
            status: CheckStatus::Pass,
            detail: "7 procedures registered".to_string(),
        },
        Ok(router) => CheckResult {
            name: "contract_build".to_string(),
            status: CheckStatus::Fail,
            detail: format!("expected 7 procedures, found {}", router.len()),
        },
        Err(err) => CheckResult {
            name: "contract_build".to_string(),
            status: CheckStatus::Fail,
            detail: err.to_string(),
        },
    }
}

fn pagination_window_check() -> CheckResult {
    let name = "pagination_window".to_string();
    let router = match demo_router() {
        Ok(router) => router,
        Err(err) => {
            return CheckResult {
                name,
                status: CheckStatus::Fail,
                detail: err.to_string(),
            }
        }
    };

    let out = match router.invoke(
        PROC_POSTS_LIST,
        json!({ "limit": 3, "cursor": 2 }),
        &CallContext::anonymous(),
    ) {
        Ok(out) => out,
        Err(err) => {
            return CheckResult {
                name,
                status: CheckStatus::Fail,
                detail: err.to_string(),
            }
        }
    };

    let ids: Vec<i64> = out["items"]
        .as_array()
        .map(|items| items.iter().filter_map(|item| item["id"].as_i64()).collect())
        .unwrap_or_default();
    if ids == [3, 4, 5] && out["nextCursor"] == json!(5) {
        CheckResult {
            name,
            status: CheckStatus::Pass,
            detail: "cursor window holds".to_string(),
        }
    } else {
        CheckResult {
            name,
            status: CheckStatus::Fail,
            detail: format!("unexpected page: ids {ids:?}, nextCursor {}", out["nextCursor"]),
        }
    }
}

fn access_control_check() -> CheckResult {
    let name = "access_control".to_string();
    let router = match demo_router() {
        Ok(router) => router,
        Err(err) => {
            return CheckResult {
                name,
                status: CheckStatus::Fail,
                detail: err.to_string(),
            }
        }
    };

    match router.invoke(PROC_PROFILE, json!(null), &CallContext::anonymous()) {
        Err(err) if err.kind() == "unauthorized" => CheckResult {
            name,
            status: CheckStatus::Pass,
            detail: "anonymous callers are rejected".to_string(),
        },
        Err(err) => CheckResult {
            name,
            status: CheckStatus::Fail,
            detail: format!("expected an unauthorized error, got {}", err.kind()),
        },
        Ok(_) => CheckResult {
            name,
            status: CheckStatus::Fail,
            detail: "anonymous caller reached a protected procedure".to_string(),
        },
    }
}

fn validation_guard_check() -> CheckResult {
    let name = "validation_guard".to_string();
    let router = match demo_router() {
        Ok(router) => router,
        Err(err) => {
            return CheckResult {
                name,
                status: CheckStatus::Fail,
                detail: err.to_string(),
            }
        }
    };

    let payload = json!({ "title": "x", "content": "long enough text", "tags": [] });
    match router.invoke(PROC_CREATE_POST, payload, &CallContext::anonymous()) {
        Err(err) if err.kind() == "invalid_input" => CheckResult {
            name,
            status: CheckStatus::Pass,
            detail: "malformed input is rejected".to_string(),
        },
        Err(err) => CheckResult {
            name,
            status: CheckStatus::Fail,
            detail: format!("expected a validation error, got {}", err.kind()),
        },
        Ok(_) => CheckResult {
            name,
            status: CheckStatus::Fail,
            detail: "malformed input was accepted".to_string(),
        },
    }
}

fn compiled_features_check() -> CheckResult {
    let mut features = Vec::new();
    if cfg!(feature = "demo") {
        features.push("demo");
    }
    if cfg!(feature = "cli") {
        features.push("cli");
    }

    CheckResult {
        name: "compiled_features".to_string(),
        status: CheckStatus::Info,
        detail: features.join(", "),
    }
}

fn print_doctor(output: &DoctorOutput, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string(output).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table | OutputFormat::Pretty => {
            println!("wirecall doctor\n");
            for c in &output.checks {
                println!(
                    "  [{:>4}] {:<22} {}",
                    status_text(c.status),
                    c.name,
                    c.detail
                );
            }
            if output.overall == "pass" {
                println!("\n  Result: all checks passed");
            } else {
                println!("\n  Result: one or more checks failed");
            }
        }
        OutputFormat::Raw => {
            println!("{}", output.overall);
        }
    }
}

fn status_text(status: CheckStatus) -> &'static str {
    match status {
        CheckStatus::Pass => "PASS",
        CheckStatus::Fail => "FAIL",
        CheckStatus::Info => "INFO",
    }
}
