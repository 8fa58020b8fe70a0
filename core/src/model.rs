//! The contact list model: full set, filtered subset, and pages.
//!
//! # Design
//! `ContactList` owns three views of the data. `all_items` is replaced only by
//! a successful load. `filtered_items` changes only through
//! `set_filtered_items`, which rebuilds `pages` before returning, so a reader
//! can never see pages that disagree with the filtered set.
//!
//! The model is single-threaded and holds no locks. Hosts that fetch on a
//! worker thread must hand the response back to the thread that owns the
//! list before calling `load_response`.

use std::fmt;

use log::{debug, error};

use crate::client::ContactsClient;
use crate::error::ApiError;
use crate::http::{HttpResponse, Transport};
use crate::types::Contact;

/// Number of contacts on a full page.
pub const PAGE_SIZE: usize = 10;

/// Handle returned by `ContactList::subscribe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(&ContactList)>;

/// Split `items` into consecutive chunks of `page_size`. The last chunk holds
/// the remainder; no items means no pages.
pub fn paginate(items: &[Contact], page_size: usize) -> Vec<Vec<Contact>> {
    if page_size == 0 {
        return Vec::new();
    }
    items.chunks(page_size).map(<[Contact]>::to_vec).collect()
}

#[derive(Default)]
pub struct ContactList {
    all_items: Vec<Contact>,
    filtered_items: Vec<Contact>,
    pages: Vec<Vec<Contact>>,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
}

impl fmt::Debug for ContactList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContactList")
            .field("all_items", &self.all_items.len())
            .field("filtered_items", &self.filtered_items.len())
            .field("pages", &self.pages.len())
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl ContactList {
    pub fn new() -> Self {
        Self::default()
    }

    // -----------------------------------------------------------------------
    // Loading
    // -----------------------------------------------------------------------

    /// Replace the whole data set, reset the filter, and notify.
    pub fn load(&mut self, items: Vec<Contact>) {
        debug!("loaded {} contacts", items.len());
        self.all_items = items.clone();
        self.set_filtered_items(items);
        self.notify();
    }

    /// Parse a host-executed response and load it.
    ///
    /// On any failure the error is logged, the list keeps what it had, and no
    /// observer fires. The error is still returned so the host can inspect it.
    pub fn load_response(
        &mut self,
        client: &ContactsClient,
        response: HttpResponse,
    ) -> Result<usize, ApiError> {
        match client.parse_fetch_contacts(response) {
            Ok(items) => {
                let count = items.len();
                self.load(items);
                Ok(count)
            }
            Err(e) => {
                error!("failed to load contacts from {}: {e}", client.url());
                Err(e)
            }
        }
    }

    /// Build the request, run it through `transport`, and load the result.
    /// A single attempt; nothing is retried.
    pub fn fetch_and_load<T>(&mut self, client: &ContactsClient, transport: &T) -> Result<usize, ApiError>
    where
        T: Transport + ?Sized,
    {
        let response = match transport.execute(client.build_fetch_contacts()) {
            Ok(response) => response,
            Err(e) => {
                error!("failed to fetch contacts from {}: {e}", client.url());
                return Err(e);
            }
        };
        self.load_response(client, response)
    }

    // -----------------------------------------------------------------------
    // Filtering
    // -----------------------------------------------------------------------

    /// Keep the contacts whose raw email contains `search_text`, ignoring
    /// case. Always filters from the full set; empty text restores it.
    /// Observers fire even when the result is unchanged.
    pub fn filter(&mut self, search_text: &str) {
        let filtered = if search_text.is_empty() {
            self.all_items.clone()
        } else {
            let needle = search_text.to_lowercase();
            self.all_items
                .iter()
                .filter(|contact| {
                    contact
                        .email
                        .as_deref()
                        .is_some_and(|email| email.to_lowercase().contains(&needle))
                })
                .cloned()
                .collect()
        };
        debug!(
            "filter {search_text:?} kept {} of {} contacts",
            filtered.len(),
            self.all_items.len()
        );
        self.set_filtered_items(filtered);
        self.notify();
    }

    /// Replace the filtered set and rebuild pages from it.
    pub fn set_filtered_items(&mut self, items: Vec<Contact>) {
        self.pages = paginate(&items, PAGE_SIZE);
        self.filtered_items = items;
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn all_items(&self) -> &[Contact] {
        &self.all_items
    }

    pub fn filtered_items(&self) -> &[Contact] {
        &self.filtered_items
    }

    pub fn pages(&self) -> &[Vec<Contact>] {
        &self.pages
    }

    pub fn number_of_items(&self) -> usize {
        self.filtered_items.len()
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn page(&self, page: usize) -> Option<&[Contact]> {
        self.pages.get(page).map(Vec::as_slice)
    }

    /// Contact at `index` in the filtered set.
    pub fn item_at(&self, index: usize) -> Option<&Contact> {
        self.filtered_items.get(index)
    }

    /// Contact at row `index` of page `page`.
    pub fn item_at_in_page(&self, index: usize, page: usize) -> Option<&Contact> {
        self.pages.get(page)?.get(index)
    }

    // -----------------------------------------------------------------------
    // Observers
    // -----------------------------------------------------------------------

    /// Register a callback fired after every load and every filter. The
    /// callback gets the updated list to re-read; there is no other payload.
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&ContactList) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove a callback. Returns false if `id` was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sid, _)| *sid != id);
        self.observers.len() != before
    }

    /// Observers are detached while they run so each one sees `&self`.
    fn notify(&mut self) {
        let mut observers = std::mem::take(&mut self.observers);
        for (_, observer) in &mut observers {
            observer(&*self);
        }
        observers.append(&mut self.observers);
        self.observers = observers;
    }
}
