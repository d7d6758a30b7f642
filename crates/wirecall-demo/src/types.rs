use serde::{Deserialize, Serialize};
use serde_json::Number;
use wirecall_router::Principal;

/// Input accepted by the `hello` query.
#[derive(Debug, Deserialize)]
pub struct HelloInput {
    pub name: Option<String>,
}

/// Output of the `hello` query.
#[derive(Debug, Clone, Serialize)]
pub struct Greeting {
    pub greeting: String,
}

/// Input accepted by the `complexData` query.
///
/// `id` stays a raw JSON number so the handler can echo it back without
/// changing its representation.
#[derive(Debug, Deserialize)]
pub struct ComplexDataInput {
    pub id: Number,
    pub filter: Option<String>,
}

/// Output of the `complexData` query.
#[derive(Debug, Clone, Serialize)]
pub struct ComplexData {
    pub id: Number,
    pub timestamp: String,
    pub data: ComplexPayload,
}

/// Payload section of [`ComplexData`]. An absent `filter` stays absent
/// on the wire.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplexPayload {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    pub random_value: f64,
    pub nested: NestedData,
}

/// Fixed nested block inside [`ComplexPayload`].
#[derive(Debug, Clone, Serialize)]
pub struct NestedData {
    pub field1: String,
    pub field2: String,
}

/// Output of the `profile` query.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileOutput {
    pub user: Principal,
    pub last_access: String,
}

/// Input accepted by the `createPost` mutation, after normalization.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostInput {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub is_draft: bool,
}

/// A synthesized post. Created transiently by `createPost` and
/// discarded; no store exists to retrieve it from later.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub is_draft: bool,
    pub author_id: i64,
    pub created_at: String,
}

/// Status values accepted by the `batchUpdate` mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    Active,
    Archived,
    Deleted,
}

impl ItemStatus {
    /// Wire spellings accepted by the batch update shape.
    pub const WIRE_VALUES: [&'static str; 3] = ["active", "archived", "deleted"];
}

/// One entry of the `batchUpdate` input sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchItem {
    pub id: Number,
    pub status: ItemStatus,
}

/// One entry of the `batchUpdate` output: the input item with the
/// update receipt attached.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchItemResult {
    pub id: Number,
    pub status: ItemStatus,
    pub updated_at: String,
    pub success: bool,
}

/// Input accepted by the `posts.list` query, after normalization.
#[derive(Debug, Deserialize)]
pub struct PostsListInput {
    pub limit: i64,
    pub cursor: Option<i64>,
}

/// One row of the stateless listing window.
#[derive(Debug, Clone, Serialize)]
pub struct PostSummary {
    pub id: i64,
    pub title: String,
    pub excerpt: String,
}

impl PostSummary {
    /// Summary templated from the id, reproducible for any window.
    pub fn synthesized(id: i64) -> Self {
        Self {
            id,
            title: format!("Post {id}"),
            excerpt: "Lorem ipsum dolor sit amet...".to_string(),
        }
    }
}

/// Output of the `posts.list` query.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPage {
    pub items: Vec<PostSummary>,
    pub next_cursor: i64,
}

/// Output of the `posts.byId` query.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDetail {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created_at: String,
}
