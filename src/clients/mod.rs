//! HTTP and GraphQL client types for Admin API communication.
//!
//! # Overview
//!
//! - [`HttpClient`]: the async HTTP client
//! - [`HttpRequest`]: a request to be sent to the API
//! - [`HttpResponse`]: a parsed response from the API
//! - [`HttpMethod`]: supported HTTP methods
//! - [`DataType`]: content types for request bodies
//! - [`graphql::GraphqlClient`]: GraphQL client for the Admin API
//! - [`graphql::GraphqlTransport`]: the seam higher layers depend on
//!
//! # Failure Behavior
//!
//! Requests are sent once. Non-2xx responses, network failures and timeouts
//! are returned as [`HttpError`] without retrying.

mod errors;
pub mod graphql;
mod http_client;
mod http_request;
mod http_response;

pub use errors::{HttpError, HttpResponseError, InvalidHttpRequestError};
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_request::{DataType, HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::{HttpResponse, QueryCost, ThrottleStatus};

pub use graphql::{GraphqlClient, GraphqlError, GraphqlTransport};
