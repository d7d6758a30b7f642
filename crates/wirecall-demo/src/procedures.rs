use chrono::{SecondsFormat, Utc};
use rand::Rng;
use serde_json::{json, Value};
use wirecall_router::{CallContext, HandlerError, Principal, Procedure, RegistryError, Router};
use wirecall_shape::Shape;

use crate::types::{
    BatchItem, BatchItemResult, ComplexData, ComplexDataInput, ComplexPayload, CreatePostInput,
    Greeting, HelloInput, ItemStatus, NestedData, Post, PostDetail, PostPage, PostSummary,
    PostsListInput, ProfileOutput,
};

/// Greeting query.
pub const PROC_HELLO: &str = "hello";
/// Pseudo-random structured data query.
pub const PROC_COMPLEX_DATA: &str = "complexData";
/// Authenticated profile lookup.
pub const PROC_PROFILE: &str = "profile";
/// Post creation mutation.
pub const PROC_CREATE_POST: &str = "createPost";
/// Batch status update mutation.
pub const PROC_BATCH_UPDATE: &str = "batchUpdate";
/// Paginated listing query.
pub const PROC_POSTS_LIST: &str = "posts.list";
/// Single post lookup query.
pub const PROC_POSTS_BY_ID: &str = "posts.byId";

/// The identity injected for authenticated demo calls. Constant; no
/// credential verification happens anywhere in this workspace.
pub fn demo_principal() -> Principal {
    Principal::new(1, "Demo User")
}

/// Build the demo contract: seven procedures over synthesized data.
pub fn demo_router() -> Result<Router, RegistryError> {
    let mut router = Router::new();

    router.register(
        Procedure::query(PROC_HELLO, hello)
            .with_input(Shape::object().optional("name", Shape::string())),
    )?;
    router.register(
        Procedure::query(PROC_COMPLEX_DATA, complex_data).with_input(
            Shape::object()
                .required("id", Shape::number())
                .optional("filter", Shape::string()),
        ),
    )?;
    router.register(Procedure::query(PROC_PROFILE, profile).protected())?;
    router.register(
        Procedure::mutation(PROC_CREATE_POST, create_post)
            .protected()
            .with_input(
                Shape::object()
                    .required("title", Shape::string().min_len(1).max_len(100))
                    .required("content", Shape::string().min_len(10))
                    .required(
                        "tags",
                        Shape::sequence(Shape::string()).min_len(1).max_len(5),
                    )
                    .with_default("isDraft", Shape::boolean(), json!(false)),
            ),
    )?;
    router.register(
        Procedure::mutation(PROC_BATCH_UPDATE, batch_update)
            .protected()
            .with_input(Shape::sequence(
                Shape::object()
                    .required("id", Shape::number())
                    .required("status", Shape::one_of(ItemStatus::WIRE_VALUES)),
            )),
    )?;
    router.register(
        Procedure::query(PROC_POSTS_LIST, posts_list).with_input(
            Shape::object()
                .with_default("limit", Shape::integer().min(1).max(100), json!(10))
                .optional("cursor", Shape::integer().min(0)),
        ),
    )?;
    router.register(Procedure::query(PROC_POSTS_BY_ID, posts_by_id).with_input(Shape::integer()))?;

    Ok(router)
}

/// Current time in the wire format: RFC 3339, millisecond precision, `Z`.
fn wire_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn hello(input: Value, _context: &CallContext) -> Result<Value, HandlerError> {
    let input: HelloInput = serde_json::from_value(input)?;
    let name = input.name.unwrap_or_else(|| "World".to_string());
    let output = Greeting {
        greeting: format!("Hello {name}!"),
    };
    Ok(serde_json::to_value(output)?)
}

fn complex_data(input: Value, _context: &CallContext) -> Result<Value, HandlerError> {
    let input: ComplexDataInput = serde_json::from_value(input)?;
    let output = ComplexData {
        id: input.id,
        timestamp: wire_timestamp(),
        data: ComplexPayload {
            title: "Complex API Response".to_string(),
            filter: input.filter,
            random_value: rand::rng().random(),
            nested: NestedData {
                field1: "value1".to_string(),
                field2: "value2".to_string(),
            },
        },
    };
    Ok(serde_json::to_value(output)?)
}

fn profile(_input: Value, context: &CallContext) -> Result<Value, HandlerError> {
    let principal = context.principal().ok_or("caller context has no principal")?;
    let output = ProfileOutput {
        user: principal.clone(),
        last_access: wire_timestamp(),
    };
    Ok(serde_json::to_value(output)?)
}

fn create_post(input: Value, context: &CallContext) -> Result<Value, HandlerError> {
    let input: CreatePostInput = serde_json::from_value(input)?;
    let principal = context.principal().ok_or("caller context has no principal")?;
    let post = Post {
        id: rand::rng().random_range(0..10_000),
        title: input.title,
        content: input.content,
        tags: input.tags,
        is_draft: input.is_draft,
        author_id: principal.id,
        created_at: wire_timestamp(),
    };
    Ok(serde_json::to_value(post)?)
}

fn batch_update(input: Value, _context: &CallContext) -> Result<Value, HandlerError> {
    let items: Vec<BatchItem> = serde_json::from_value(input)?;
    let updated_at = wire_timestamp();
    let results: Vec<BatchItemResult> = items
        .into_iter()
        .map(|item| BatchItemResult {
            id: item.id,
            status: item.status,
            updated_at: updated_at.clone(),
            success: true,
        })
        .collect();
    Ok(serde_json::to_value(results)?)
}

fn posts_list(input: Value, _context: &CallContext) -> Result<Value, HandlerError> {
    let input: PostsListInput = serde_json::from_value(input)?;
    let cursor = input.cursor.unwrap_or(0);
    let next_cursor = cursor
        .checked_add(input.limit)
        .ok_or("cursor too large for the listing window")?;
    let items: Vec<PostSummary> = (1..=input.limit)
        .map(|offset| PostSummary::synthesized(cursor + offset))
        .collect();
    let page = PostPage { items, next_cursor };
    Ok(serde_json::to_value(page)?)
}

fn posts_by_id(input: Value, _context: &CallContext) -> Result<Value, HandlerError> {
    let id: i64 = serde_json::from_value(input)?;
    let detail = PostDetail {
        id,
        title: format!("Post {id}"),
        content: "Full post content...".to_string(),
        created_at: wire_timestamp(),
    };
    Ok(serde_json::to_value(detail)?)
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;

    use super::*;

    fn router() -> Router {
        demo_router().unwrap()
    }

    fn auth() -> CallContext {
        CallContext::authenticated(demo_principal())
    }

    fn anon() -> CallContext {
        CallContext::anonymous()
    }

    fn assert_wire_timestamp(value: &Value) {
        let text = value.as_str().expect("timestamp should be a string");
        assert!(text.ends_with('Z'), "not UTC: {text}");
        assert!(
            DateTime::parse_from_rfc3339(text).is_ok(),
            "bad timestamp: {text}"
        );
    }

    #[test]
    fn hello_greets_world_by_default() {
        let out = router().invoke(PROC_HELLO, json!({}), &anon()).unwrap();
        assert_eq!(out, json!({ "greeting": "Hello World!" }));
    }

    #[test]
    fn hello_greets_the_given_name() {
        let out = router()
            .invoke(PROC_HELLO, json!({ "name": "Ada" }), &anon())
            .unwrap();
        assert_eq!(out, json!({ "greeting": "Hello Ada!" }));
    }

    #[test]
    fn complex_data_echoes_id_and_omits_absent_filter() {
        let out = router()
            .invoke(PROC_COMPLEX_DATA, json!({ "id": 7 }), &anon())
            .unwrap();

        assert_eq!(out["id"], json!(7));
        assert_wire_timestamp(&out["timestamp"]);

        let data = out["data"].as_object().unwrap();
        assert_eq!(data["title"], json!("Complex API Response"));
        assert!(data.get("filter").is_none());
        assert_eq!(
            data["nested"],
            json!({ "field1": "value1", "field2": "value2" })
        );

        let random_value = data["randomValue"].as_f64().unwrap();
        assert!((0.0..1.0).contains(&random_value));
    }

    #[test]
    fn complex_data_echoes_filter_when_present() {
        let out = router()
            .invoke(
                PROC_COMPLEX_DATA,
                json!({ "id": 7, "filter": "recent" }),
                &anon(),
            )
            .unwrap();

        assert_eq!(out["data"]["filter"], json!("recent"));
    }

    #[test]
    fn profile_fails_without_principal() {
        let err = router().invoke(PROC_PROFILE, json!(null), &anon()).unwrap_err();
        assert_eq!(err.kind(), "unauthorized");
    }

    #[test]
    fn profile_returns_the_caller_principal() {
        let out = router().invoke(PROC_PROFILE, json!(null), &auth()).unwrap();

        assert_eq!(out["user"], json!({ "id": 1, "name": "Demo User" }));
        assert_wire_timestamp(&out["lastAccess"]);
    }

    #[test]
    fn create_post_echoes_input_and_stamps_author() {
        let out = router()
            .invoke(
                PROC_CREATE_POST,
                json!({
                    "title": "First",
                    "content": "long enough body",
                    "tags": ["rust", "demo", "api"]
                }),
                &auth(),
            )
            .unwrap();

        assert_eq!(out["title"], json!("First"));
        assert_eq!(out["content"], json!("long enough body"));
        assert_eq!(out["tags"], json!(["rust", "demo", "api"]));
        assert_eq!(out["isDraft"], json!(false));
        assert_eq!(out["authorId"], json!(1));
        assert_wire_timestamp(&out["createdAt"]);

        let id = out["id"].as_i64().unwrap();
        assert!((0..10_000).contains(&id));
    }

    #[test]
    fn create_post_keeps_an_explicit_draft_flag() {
        let out = router()
            .invoke(
                PROC_CREATE_POST,
                json!({
                    "title": "First",
                    "content": "long enough body",
                    "tags": ["rust"],
                    "isDraft": true
                }),
                &auth(),
            )
            .unwrap();

        assert_eq!(out["isDraft"], json!(true));
    }

    #[test]
    fn create_post_enforces_field_bounds() {
        let router = router();
        let base = json!({
            "title": "First",
            "content": "long enough body",
            "tags": ["rust"]
        });

        let mut no_tags = base.clone();
        no_tags["tags"] = json!([]);
        let err = router.invoke(PROC_CREATE_POST, no_tags, &auth()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid input at '/tags': must contain at least 1 item"
        );

        let mut many_tags = base.clone();
        many_tags["tags"] = json!(["a", "b", "c", "d", "e", "f"]);
        let err = router.invoke(PROC_CREATE_POST, many_tags, &auth()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid input at '/tags': must contain at most 5 items"
        );

        let mut short_content = base.clone();
        short_content["content"] = json!("too short");
        let err = router
            .invoke(PROC_CREATE_POST, short_content, &auth())
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid input at '/content': must be at least 10 characters"
        );

        let mut long_title = base;
        long_title["title"] = json!("x".repeat(101));
        let err = router.invoke(PROC_CREATE_POST, long_title, &auth()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid input at '/title': must be at most 100 characters"
        );
    }

    #[test]
    fn create_post_requires_principal() {
        let err = router()
            .invoke(
                PROC_CREATE_POST,
                json!({
                    "title": "First",
                    "content": "long enough body",
                    "tags": ["rust"]
                }),
                &anon(),
            )
            .unwrap_err();

        assert_eq!(err.kind(), "unauthorized");
    }

    #[test]
    fn batch_update_returns_a_receipt_per_item() {
        let out = router()
            .invoke(
                PROC_BATCH_UPDATE,
                json!([
                    { "id": 1, "status": "active" },
                    { "id": 2, "status": "archived" },
                    { "id": 3, "status": "deleted" }
                ]),
                &auth(),
            )
            .unwrap();

        let results = out.as_array().unwrap();
        assert_eq!(results.len(), 3);
        for (position, status) in ["active", "archived", "deleted"].iter().enumerate() {
            let result = &results[position];
            assert_eq!(result["id"], json!(position + 1));
            assert_eq!(result["status"], json!(status));
            assert_eq!(result["success"], json!(true));
            assert_wire_timestamp(&result["updatedAt"]);
        }
    }

    #[test]
    fn batch_update_accepts_an_empty_sequence() {
        let out = router().invoke(PROC_BATCH_UPDATE, json!([]), &auth()).unwrap();
        assert_eq!(out, json!([]));
    }

    #[test]
    fn batch_update_rejects_unknown_status() {
        let err = router()
            .invoke(
                PROC_BATCH_UPDATE,
                json!([{ "id": 1, "status": "pending" }]),
                &auth(),
            )
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "invalid input at '/0/status': must be one of: active, archived, deleted"
        );
    }

    #[test]
    fn posts_list_returns_the_exact_window() {
        let router = router();

        let out = router
            .invoke(PROC_POSTS_LIST, json!({ "limit": 3, "cursor": 2 }), &anon())
            .unwrap();
        let ids: Vec<i64> = out["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|item| item["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![3, 4, 5]);
        assert_eq!(out["nextCursor"], json!(5));
        assert_eq!(out["items"][0]["title"], json!("Post 3"));
        assert_eq!(
            out["items"][0]["excerpt"],
            json!("Lorem ipsum dolor sit amet...")
        );

        let out = router
            .invoke(PROC_POSTS_LIST, json!({ "limit": 1, "cursor": 0 }), &anon())
            .unwrap();
        assert_eq!(out["items"][0]["id"], json!(1));
        assert_eq!(out["nextCursor"], json!(1));
    }

    #[test]
    fn posts_list_defaults_to_ten_from_the_start() {
        let out = router().invoke(PROC_POSTS_LIST, json!({}), &anon()).unwrap();

        let ids: Vec<i64> = out["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|item| item["id"].as_i64().unwrap())
            .collect();
        let expected: Vec<i64> = (1..=10).collect();
        assert_eq!(ids, expected);
        assert_eq!(out["nextCursor"], json!(10));
    }

    #[test]
    fn posts_list_pagination_chains_without_gaps() {
        let router = router();
        let mut cursor = 0i64;
        let mut seen = Vec::new();

        for _ in 0..3 {
            let out = router
                .invoke(
                    PROC_POSTS_LIST,
                    json!({ "limit": 5, "cursor": cursor }),
                    &anon(),
                )
                .unwrap();
            for item in out["items"].as_array().unwrap() {
                seen.push(item["id"].as_i64().unwrap());
            }
            cursor = out["nextCursor"].as_i64().unwrap();
        }

        let expected: Vec<i64> = (1..=15).collect();
        assert_eq!(seen, expected);
        assert_eq!(cursor, 15);
    }

    #[test]
    fn posts_list_rejects_out_of_range_inputs() {
        let router = router();

        for (payload, reason) in [
            (json!({ "limit": 0 }), "must be at least 1"),
            (json!({ "limit": 101 }), "must be at most 100"),
            (json!({ "limit": 2.5 }), "must be an integer"),
            (json!({ "cursor": -1 }), "must be at least 0"),
        ] {
            let err = router.invoke(PROC_POSTS_LIST, payload, &anon()).unwrap_err();
            assert_eq!(err.kind(), "invalid_input");
            assert!(
                err.to_string().contains(reason),
                "expected {reason:?} in {err}"
            );
        }
    }

    #[test]
    fn posts_list_overflowing_cursor_is_an_internal_error() {
        let err = router()
            .invoke(
                PROC_POSTS_LIST,
                json!({ "limit": 2, "cursor": i64::MAX - 1 }),
                &anon(),
            )
            .unwrap_err();

        assert_eq!(err.kind(), "internal");
    }

    #[test]
    fn posts_by_id_synthesizes_the_detail() {
        let out = router().invoke(PROC_POSTS_BY_ID, json!(42), &anon()).unwrap();

        assert_eq!(out["id"], json!(42));
        assert_eq!(out["title"], json!("Post 42"));
        assert_eq!(out["content"], json!("Full post content..."));
        assert_wire_timestamp(&out["createdAt"]);
    }

    #[test]
    fn posts_by_id_rejects_non_integers() {
        let router = router();

        let err = router.invoke(PROC_POSTS_BY_ID, json!(7.5), &anon()).unwrap_err();
        assert_eq!(err.to_string(), "invalid input at '/': must be an integer");

        let err = router.invoke(PROC_POSTS_BY_ID, json!("42"), &anon()).unwrap_err();
        assert_eq!(err.kind(), "invalid_input");
    }

    #[test]
    fn unknown_procedure_is_not_found() {
        let err = router().invoke("posts.missing", json!({}), &anon()).unwrap_err();
        assert_eq!(err.kind(), "not_found");
    }

    #[test]
    fn demo_router_registers_the_full_contract() {
        use wirecall_router::{Access, ProcedureKind};

        let router = router();
        assert_eq!(router.len(), 7);

        for name in [
            PROC_HELLO,
            PROC_COMPLEX_DATA,
            PROC_PROFILE,
            PROC_CREATE_POST,
            PROC_BATCH_UPDATE,
            PROC_POSTS_LIST,
            PROC_POSTS_BY_ID,
        ] {
            assert!(router.resolve(name).is_some(), "missing {name}");
        }

        let profile = router.resolve(PROC_PROFILE).unwrap();
        assert_eq!(profile.kind(), ProcedureKind::Query);
        assert_eq!(profile.access(), Access::Protected);
        assert!(profile.input().is_none());

        let create = router.resolve(PROC_CREATE_POST).unwrap();
        assert_eq!(create.kind(), ProcedureKind::Mutation);
        assert_eq!(create.access(), Access::Protected);

        let list = router.resolve(PROC_POSTS_LIST).unwrap();
        assert_eq!(list.access(), Access::Public);
        assert_eq!(
            list.input().unwrap().to_string(),
            "{limit?: integer(1..100) = 10, cursor?: integer(0..)}"
        );
    }
}
