//! GraphQL client implementation for the Shopify Admin API.
//!
//! This module provides the [`GraphqlClient`] type for executing GraphQL
//! documents against a shop's `graphql.json` endpoint.

use async_trait::async_trait;

use crate::clients::graphql::{GraphqlError, GraphqlTransport};
use crate::clients::{DataType, HttpClient, HttpMethod, HttpRequest, HttpResponse};
use crate::config::{ApiVersion, ShopifyConfig};

/// GraphQL API client for the Shopify Admin API.
///
/// Documents are sent as `{"query": ..., "variables": ...}`; callers pass
/// user-supplied values as variables, never spliced into the document.
///
/// # Thread Safety
///
/// `GraphqlClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use customer_sync::{GraphqlClient, ShopifyConfig};
/// use serde_json::json;
///
/// let config = ShopifyConfig::from_env()?;
/// let client = GraphqlClient::new(&config);
///
/// let response = client
///     .query(
///         "query Customer($id: ID!) { customer(id: $id) { email } }",
///         Some(json!({ "id": "gid://shopify/Customer/1" })),
///     )
///     .await?;
/// ```
#[derive(Debug)]
pub struct GraphqlClient {
    /// The internal HTTP client for making requests.
    http_client: HttpClient,
    /// The API version being used.
    api_version: ApiVersion,
}

// Verify GraphqlClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<GraphqlClient>();
};

impl GraphqlClient {
    /// Creates a new GraphQL client using the configured API version.
    #[must_use]
    pub fn new(config: &ShopifyConfig) -> Self {
        Self::create_client(config, config.api_version().clone())
    }

    /// Creates a new GraphQL client with a specific API version override.
    #[must_use]
    pub fn with_version(config: &ShopifyConfig, version: ApiVersion) -> Self {
        if &version == config.api_version() {
            tracing::debug!(
                "GraphQL client has a redundant API version override to the default {}",
                version
            );
        } else {
            tracing::debug!(
                "GraphQL client overriding default API version {} with {}",
                config.api_version(),
                version
            );
        }

        Self::create_client(config, version)
    }

    fn create_client(config: &ShopifyConfig, api_version: ApiVersion) -> Self {
        let base_path = format!("/admin/api/{api_version}");
        let http_client = HttpClient::new(base_path, config);

        Self {
            http_client,
            api_version,
        }
    }

    /// Returns the API version being used by this client.
    #[must_use]
    pub const fn api_version(&self) -> &ApiVersion {
        &self.api_version
    }

    /// Returns the underlying HTTP client.
    #[must_use]
    pub const fn http_client(&self) -> &HttpClient {
        &self.http_client
    }

    /// Executes a GraphQL document against the Admin API.
    ///
    /// # Returns
    ///
    /// The raw [`HttpResponse`]; `body` holds the `data`, `errors` and
    /// `extensions` fields.
    ///
    /// # Errors
    ///
    /// Returns [`GraphqlError::Http`] for HTTP-level errors (network errors,
    /// timeouts, non-2xx responses). GraphQL-level errors arrive with HTTP
    /// 200 inside `response.body`.
    pub async fn query(
        &self,
        query: &str,
        variables: Option<serde_json::Value>,
    ) -> Result<HttpResponse, GraphqlError> {
        let body = serde_json::json!({
            "query": query,
            "variables": variables
        });

        let request = HttpRequest::builder(HttpMethod::Post, "graphql.json")
            .body(body)
            .body_type(DataType::Json)
            .build()
            .map_err(|e| GraphqlError::Http(e.into()))?;

        let response = self.http_client.request(request).await?;

        if let Some(cost) = response.query_cost() {
            tracing::debug!(
                "GraphQL query cost {:?}, available {:?}",
                cost.actual_query_cost,
                cost.throttle_status.map(|t| t.currently_available)
            );
        }

        Ok(response)
    }
}

#[async_trait]
impl GraphqlTransport for GraphqlClient {
    async fn execute(
        &self,
        document: &str,
        variables: serde_json::Value,
    ) -> Result<serde_json::Value, GraphqlError> {
        self.query(document, Some(variables))
            .await
            .map(|response| response.body)
    }
}
