//! The demo contract for wirecall: seven procedures over synthesized
//! data, matching the sample application this workspace demonstrates.
//!
//! Nothing here persists. Every handler is a pure function of its
//! normalized input and (for protected procedures) the caller's
//! principal; pagination state travels entirely in the cursor the
//! caller hands back.

pub mod procedures;
pub mod types;

pub use procedures::{
    demo_principal, demo_router, PROC_BATCH_UPDATE, PROC_COMPLEX_DATA, PROC_CREATE_POST,
    PROC_HELLO, PROC_POSTS_BY_ID, PROC_POSTS_LIST, PROC_PROFILE,
};
pub use types::{
    BatchItem, BatchItemResult, ComplexData, ComplexDataInput, ComplexPayload, CreatePostInput,
    Greeting, HelloInput, ItemStatus, NestedData, Post, PostDetail, PostPage, PostSummary,
    PostsListInput, ProfileOutput,
};
