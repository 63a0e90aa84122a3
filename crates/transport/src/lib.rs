//! The two transports the access layer rides on.
//!
//! [`GraphClient`] speaks GraphQL-over-HTTP to the graph backend;
//! [`ActionClient`] speaks plain JSON to the secondary service. Both consult
//! the request signer immediately before transmission, so identity changes
//! take effect on the next request with no caching lag.
//!
//! The [`GraphExecutor`] and [`ActionExecutor`] traits are the seam the
//! dispatch router is built against; tests substitute in-memory fakes.

pub mod actions;
pub mod graph;

use {async_trait::async_trait, minab_common::Result, serde_json::Value};

pub use {
    actions::{ActionClient, BookmarkReceipt, PaymentSession, UploadedFile},
    graph::GraphClient,
};

/// Executes named catalog operations against the graph backend.
#[async_trait]
pub trait GraphExecutor: Send + Sync {
    /// Execute a catalog operation and return its `data` payload.
    async fn execute(&self, operation: &str, variables: Value) -> Result<Value>;
}

/// Executes delegated actions against the secondary service.
#[async_trait]
pub trait ActionExecutor: Send + Sync {
    async fn bookmark(&self, event_id: i64) -> Result<BookmarkReceipt>;

    async fn unbookmark(&self, event_id: i64) -> Result<()>;

    async fn initialize_payment(
        &self,
        event_id: i64,
        full_name: &str,
        email: &str,
    ) -> Result<PaymentSession>;

    async fn upload(&self, name: &str, base64_payload: &str) -> Result<UploadedFile>;
}
