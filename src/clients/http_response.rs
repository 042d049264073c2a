//! HTTP response types.
//!
//! This module provides the [`HttpResponse`] type and the Shopify-specific
//! values parsed out of it.

use std::collections::HashMap;

use serde::Deserialize;

/// Query cost reported in a GraphQL response's `extensions.cost`.
///
/// Shopify throttles the GraphQL Admin API by a leaky bucket of cost points
/// rather than by request count.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QueryCost {
    /// Cost Shopify estimated before running the query.
    pub requested_query_cost: Option<f64>,
    /// Cost actually charged.
    pub actual_query_cost: Option<f64>,
    /// Throttle bucket state after the query.
    pub throttle_status: Option<ThrottleStatus>,
}

/// Leaky-bucket state from `extensions.cost.throttleStatus`.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ThrottleStatus {
    /// Bucket size.
    pub maximum_available: f64,
    /// Points currently available.
    pub currently_available: f64,
    /// Points restored per second.
    pub restore_rate: f64,
}

/// An HTTP response from the Admin API.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers, keyed by lowercase name (headers may repeat).
    pub headers: HashMap<String, Vec<String>>,
    /// The parsed response body.
    pub body: serde_json::Value,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`.
    #[must_use]
    pub const fn new(
        code: u16,
        headers: HashMap<String, Vec<String>>,
        body: serde_json::Value,
    ) -> Self {
        Self {
            code,
            headers,
            body,
        }
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the `X-Request-Id` header value, if present.
    ///
    /// This ID is useful for debugging and should be included in error reports.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.header("x-request-id")
    }

    /// Returns the `X-Shopify-API-Deprecated-Reason` header value, if present.
    #[must_use]
    pub fn deprecation_reason(&self) -> Option<&str> {
        self.header("x-shopify-api-deprecated-reason")
    }

    /// Returns the GraphQL query cost, if the body reports one.
    ///
    /// # Example
    ///
    /// ```rust
    /// use customer_sync::clients::HttpResponse;
    /// use serde_json::json;
    /// use std::collections::HashMap;
    ///
    /// let body = json!({
    ///     "data": {},
    ///     "extensions": { "cost": { "requestedQueryCost": 12, "actualQueryCost": 4 } }
    /// });
    /// let response = HttpResponse::new(200, HashMap::new(), body);
    ///
    /// assert_eq!(response.query_cost().unwrap().actual_query_cost, Some(4.0));
    /// ```
    #[must_use]
    pub fn query_cost(&self) -> Option<QueryCost> {
        self.body
            .pointer("/extensions/cost")
            .and_then(|cost| QueryCost::deserialize(cost).ok())
    }

    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }
}
