//! Typed, blocking client library for the Notion REST API.
//!
//! Public API layers:
//! - [`NotionClient`]: endpoint operations (create a page, find or list
//!   databases, list child blocks, query a database) plus a raw JSON escape
//!   hatch.
//! - [`ClientConfig`]: credential, base URL and API version.
//! - [`Transport`]: the HTTP seam; [`ReqwestTransport`] is the default.
//! - [`model`]: typed pages, databases, blocks, properties and queries.
//! - [`ClientError`]: unified error type used by every operation.
//!
//! List endpoints are paginated transparently. A call returns either every
//! result across all pages or the first error encountered.

mod client;
mod config;
mod error;
pub mod model;
mod pagination;
mod request;
mod response;
mod transport;

#[cfg(test)]
mod testing;

/// Blocking Notion API client.
pub use client::NotionClient;
pub use config::{ClientConfig, Credential, DEFAULT_BASE_URL, DEFAULT_NOTION_VERSION};
/// Error type returned by all client operations.
pub use error::ClientError;
pub use pagination::ListResponse;
pub use response::ApiFailure;
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport, TransportError};

/// Re-exported so callers can name methods and statuses without a direct
/// `reqwest` dependency.
pub use reqwest::{Method, StatusCode};
