//! Stand-in for the remote contacts endpoint.
//!
//! Serves one static JSON document on `GET /v3/contacts`, the way the hosted
//! mock the app was built against does. The document is served verbatim so
//! tests can hand it malformed or partial payloads.

pub mod config;

use std::sync::Arc;

use axum::{extract::State, http::header, response::IntoResponse, routing::get, Router};
use log::info;
use tokio::net::TcpListener;

pub use config::{Config, ConfigError};

/// Bundled fixture: 23 contacts, a few with missing fields.
pub const CONTACTS_FIXTURE: &str = include_str!("../fixtures/contacts.json");

pub const CONTACTS_PATH: &str = "/v3/contacts";

pub type Document = Arc<String>;

pub fn app() -> Router {
    app_with_document(CONTACTS_FIXTURE.to_string())
}

/// Router that answers every contacts request with `document`.
pub fn app_with_document(document: String) -> Router {
    let document: Document = Arc::new(document);
    Router::new()
        .route(CONTACTS_PATH, get(get_contacts))
        .with_state(document)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with_document(listener, CONTACTS_FIXTURE.to_string()).await
}

pub async fn run_with_document(listener: TcpListener, document: String) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!("serving contacts on http://{addr}{CONTACTS_PATH}");
    }
    axum::serve(listener, app_with_document(document)).await
}

async fn get_contacts(State(document): State<Document>) -> impl IntoResponse {
    info!("GET {CONTACTS_PATH} ({} bytes)", document.len());
    ([(header::CONTENT_TYPE, "application/json")], document.as_str().to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_has_twenty_three_contacts() {
        let doc: serde_json::Value = serde_json::from_str(CONTACTS_FIXTURE).unwrap();
        assert_eq!(doc["total"], 23);
        assert_eq!(doc["result"].as_array().unwrap().len(), 23);
    }

    #[test]
    fn fixture_contacts_use_camel_case_keys() {
        let doc: serde_json::Value = serde_json::from_str(CONTACTS_FIXTURE).unwrap();
        let first = &doc["result"][0];
        assert!(first.get("firstName").is_some());
        assert!(first.get("lastName").is_some());
        assert!(first.get("dateUpdate").is_some());
        assert!(first["email"].as_str().unwrap().starts_with("devnull+"));
    }

    #[test]
    fn fixture_has_partial_records() {
        let doc: serde_json::Value = serde_json::from_str(CONTACTS_FIXTURE).unwrap();
        let result = doc["result"].as_array().unwrap();
        assert!(result.iter().any(|c| c.get("lastName").is_none()));
        assert!(result.iter().any(|c| c["email"].is_null()));
    }
}
