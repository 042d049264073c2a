//! GraphQL Admin API client.
//!
//! - [`GraphqlClient`]: sends documents to `/admin/api/{version}/graphql.json`
//! - [`GraphqlTransport`]: the capability higher layers depend on, so they
//!   can be exercised without a network
//! - [`GraphqlError`]: transport-level failures

mod client;
mod errors;

use async_trait::async_trait;

pub use client::GraphqlClient;
pub use errors::GraphqlError;

/// Executes a GraphQL document with bound variables and returns the JSON body.
///
/// Implementations send exactly one request per call.
#[async_trait]
pub trait GraphqlTransport: Send + Sync {
    /// Executes `document` with `variables`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphqlError`] if the request could not be completed.
    async fn execute(
        &self,
        document: &str,
        variables: serde_json::Value,
    ) -> Result<serde_json::Value, GraphqlError>;
}

#[async_trait]
impl<T: GraphqlTransport + ?Sized> GraphqlTransport for std::sync::Arc<T> {
    async fn execute(
        &self,
        document: &str,
        variables: serde_json::Value,
    ) -> Result<serde_json::Value, GraphqlError> {
        (**self).execute(document, variables).await
    }
}
