//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! These types describe the single contacts request and its response as plain
//! data. The core crate builds an `HttpRequest` and parses an `HttpResponse`
//! without ever touching the network; the host (an iOS app, a test harness)
//! executes the GET and hands the response back.
//!
//! `Transport` is the seam for hosts that want the core to drive the round
//! trip itself (`ContactList::fetch_and_load`). It is blocking:
//! an async host runs it on its own worker and marshals the result back.

use crate::error::ApiError;

/// HTTP method for a request. The contacts endpoint is read-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
}

/// An HTTP request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
///
/// Constructed by the host after executing an `HttpRequest`, then passed to
/// `ContactsClient::parse_fetch_contacts`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    /// A `200 OK` response with no headers.
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            headers: Vec::new(),
            body: body.into(),
        }
    }
}

/// Executes one `HttpRequest`. Network or URL failures map to
/// `ApiError::Transport`; non-2xx statuses are returned as data.
pub trait Transport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

impl<F> Transport for F
where
    F: Fn(HttpRequest) -> Result<HttpResponse, ApiError>,
{
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self(request)
    }
}
