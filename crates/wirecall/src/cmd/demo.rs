use serde_json::{json, Value};
use wirecall_demo::{
    demo_principal, demo_router, PROC_BATCH_UPDATE, PROC_COMPLEX_DATA, PROC_CREATE_POST,
    PROC_HELLO, PROC_POSTS_BY_ID, PROC_POSTS_LIST, PROC_PROFILE,
};
use wirecall_router::{CallContext, Router};

use crate::cmd::DemoArgs;
use crate::exit::{call_error, registry_error, CliError, CliResult, INTERNAL, SUCCESS};
use crate::output::{print_value, OutputFormat};

/// Walk every procedure once, then page through the listing.
pub fn run(args: DemoArgs, format: OutputFormat) -> CliResult<i32> {
    let router = demo_router().map_err(|err| registry_error("contract build failed", err))?;
    let anon = CallContext::anonymous();
    let authed = CallContext::authenticated(demo_principal());

    step(&router, PROC_HELLO, json!({"name": "Demo User"}), &anon, format)?;
    step(
        &router,
        PROC_COMPLEX_DATA,
        json!({"id": 1, "filter": "latest"}),
        &anon,
        format,
    )?;
    step(&router, PROC_PROFILE, Value::Null, &authed, format)?;
    step(
        &router,
        PROC_CREATE_POST,
        json!({
            "title": "Hello wirecall",
            "content": "A post created by the scripted demo walk.",
            "tags": ["demo", "wirecall"],
        }),
        &authed,
        format,
    )?;
    step(
        &router,
        PROC_BATCH_UPDATE,
        json!([
            {"id": 1, "status": "active"},
            {"id": 2, "status": "archived"},
        ]),
        &authed,
        format,
    )?;

    let mut cursor = 0_i64;
    for page in 1..=args.pages {
        println!("==> {PROC_POSTS_LIST} (page {page})");
        let out = router
            .invoke(
                PROC_POSTS_LIST,
                json!({"limit": args.page_size, "cursor": cursor}),
                &anon,
            )
            .map_err(|err| call_error(&format!("{PROC_POSTS_LIST} failed"), err))?;
        print_value(&out, format);
        cursor = out["nextCursor"]
            .as_i64()
            .ok_or_else(|| CliError::new(INTERNAL, "posts.list returned no nextCursor"))?;
    }

    step(&router, PROC_POSTS_BY_ID, json!(1), &anon, format)?;

    Ok(SUCCESS)
}

fn step(
    router: &Router,
    name: &str,
    payload: Value,
    context: &CallContext,
    format: OutputFormat,
) -> CliResult<()> {
    println!("==> {name}");
    let out = router
        .invoke(name, payload, context)
        .map_err(|err| call_error(&format!("{name} failed"), err))?;
    print_value(&out, format);
    Ok(())
}
