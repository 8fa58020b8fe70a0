//! Request builder and response parser for the contacts endpoint.
//!
//! # Design
//! `ContactsClient` holds only the endpoint URL. `build_fetch_contacts`
//! produces the GET; `parse_fetch_contacts` checks the status and hands the
//! body to `decode_contacts`. The host executes the round trip in between.

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Contact, ContactsDocument};

/// Path of the static contacts document on the mock endpoint.
pub const DEFAULT_CONTACTS_PATH: &str = "/v3/contacts";

/// Stateless client for the contacts endpoint.
#[derive(Debug, Clone)]
pub struct ContactsClient {
    base_url: String,
    path: String,
}

impl ContactsClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_path(base_url, DEFAULT_CONTACTS_PATH)
    }

    /// Client for a document served somewhere other than `/v3/contacts`.
    pub fn with_path(base_url: &str, path: &str) -> Self {
        let path = path.trim_start_matches('/');
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            path: format!("/{path}"),
        }
    }

    /// Full URL the fetch goes to.
    pub fn url(&self) -> String {
        format!("{}{}", self.base_url, self.path)
    }

    pub fn build_fetch_contacts(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.url(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_fetch_contacts(&self, response: HttpResponse) -> Result<Vec<Contact>, ApiError> {
        check_status(&response, 200)?;
        decode_contacts(response.body.as_bytes())
    }
}

/// Decode a contacts document. A missing or `null` `result` is an error; an
/// empty array is a valid, empty contact list.
pub fn decode_contacts(bytes: &[u8]) -> Result<Vec<Contact>, ApiError> {
    let document: ContactsDocument =
        serde_json::from_slice(bytes).map_err(|e| ApiError::Deserialization(e.to_string()))?;
    document.result.ok_or(ApiError::MissingResult)
}

fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}
