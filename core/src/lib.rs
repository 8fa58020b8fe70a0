//! Contact list core: fetch, decode, filter, and paginate contacts.
//!
//! # Overview
//! Builds the `HttpRequest` for the contacts endpoint and parses the
//! `HttpResponse` the host brings back (host-does-IO pattern). The decoded
//! contacts feed a `ContactList`, which keeps a filtered subset and its
//! partition into pages of ten.
//!
//! # Design
//! - `ContactsClient` is stateless; it holds only the endpoint URL.
//! - `ContactList` is the only stateful piece. It is single-threaded and
//!   notifies subscribers after every load and filter.
//! - `PageCursor` tracks the page on screen for next / previous / jump.
//! - Fetch failures are logged through `log` and leave the list untouched.

pub mod client;
pub mod error;
pub mod http;
pub mod model;
pub mod pager;
pub mod types;

pub use client::{decode_contacts, ContactsClient, DEFAULT_CONTACTS_PATH};
pub use error::{ApiError, PageError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use model::{paginate, ContactList, SubscriptionId, PAGE_SIZE};
pub use pager::PageCursor;
pub use types::{Contact, ContactsDocument};
