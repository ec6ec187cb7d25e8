//! HTTP transport seam.
//!
//! The client builds [`HttpRequest`] values and decodes [`HttpResponse`]
//! values; a [`Transport`] moves one to the other. [`ReqwestTransport`] is the
//! default, blocking implementation. Tests substitute a scripted transport.

use std::error::Error as StdError;
use std::time::Duration;

use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode, Url};
use thiserror::Error;

/// A fully addressed and headered HTTP request.
#[derive(Clone, Debug)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
}

/// Raw status and body bytes returned by a transport.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

/// Network or connection failure reported by a [`Transport`].
#[derive(Debug, Error)]
#[error(transparent)]
pub struct TransportError(Box<dyn StdError + Send + Sync>);

impl TransportError {
    pub fn new(source: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        Self(source.into())
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(source: reqwest::Error) -> Self {
        Self::new(source)
    }
}

/// Executes one request and returns the raw response.
///
/// Implementations must not interpret the status code; non-2xx responses are
/// data, not errors.
pub trait Transport {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).send(request)
    }
}

/// Blocking transport backed by `reqwest`.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    http: reqwest::blocking::Client,
}

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

impl ReqwestTransport {
    pub fn new() -> Result<Self, TransportError> {
        Self::from_builder(reqwest::blocking::Client::builder())
    }

    /// Creates a transport whose requests abort after `timeout`.
    ///
    /// A timed-out page fetch surfaces as [`crate::ClientError::Transport`].
    pub fn with_timeout(timeout: Duration) -> Result<Self, TransportError> {
        Self::from_builder(reqwest::blocking::Client::builder().timeout(timeout))
    }

    fn from_builder(builder: reqwest::blocking::ClientBuilder) -> Result<Self, TransportError> {
        let http = builder.user_agent(USER_AGENT).build()?;
        Ok(Self { http })
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut outgoing = self
            .http
            .request(request.method, request.url)
            .headers(request.headers);

        if let Some(body) = request.body {
            outgoing = outgoing.body(body);
        }

        let response = outgoing.send()?;
        let status = response.status();
        let body = response.bytes()?.to_vec();

        Ok(HttpResponse { status, body })
    }
}
