//! C-ABI wrapper around `contacts-core`.
//!
//! # Overview
//! Exposes the contacts fetch, the contact list model, and the page cursor
//! through `extern "C"` functions so a native host (the iOS app) can drive
//! them without linking to serde or any Rust runtime.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - The host performs the HTTP GET: `contacts_build_fetch` describes it,
//!   `contacts_list_load_response` consumes the result.
//! - The list handle is not thread-safe. Call every `contacts_list_*`
//!   function from the thread that owns the list (the UI thread).
//! - The C caller owns all returned pointers and must call the matching
//!   `contacts_free_*` function to release them.

pub mod types;

use std::os::raw::{c_char, c_void};
use std::panic::{catch_unwind, AssertUnwindSafe};

use contacts_core::{ContactList, ContactsClient, PageCursor};
use log::error;

use types::*;

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

/// Create a new `ContactsClient` bound to `base_url`, fetching `/v3/contacts`.
///
/// Returns null if `base_url` is null or if an internal panic occurs.
/// The caller must free the returned pointer with `contacts_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn contacts_client_new(base_url: *const c_char) -> *mut FfiContactsClient {
    catch_unwind(|| match read_c_str(base_url) {
        Some(url) => Box::into_raw(Box::new(FfiContactsClient {
            inner: ContactsClient::new(&url),
        })),
        None => std::ptr::null_mut(),
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Like `contacts_client_new`, with an explicit document path.
#[unsafe(no_mangle)]
pub extern "C" fn contacts_client_with_path(
    base_url: *const c_char,
    path: *const c_char,
) -> *mut FfiContactsClient {
    catch_unwind(|| match (read_c_str(base_url), read_c_str(path)) {
        (Some(url), Some(path)) => Box::into_raw(Box::new(FfiContactsClient {
            inner: ContactsClient::with_path(&url, &path),
        })),
        _ => std::ptr::null_mut(),
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a client. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn contacts_client_free(client: *mut FfiContactsClient) {
    if !client.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(client) });
        });
    }
}

/// Build the GET request for the contacts document.
///
/// Returns null if `client` is null.
/// The caller must free the returned pointer with `contacts_free_request`.
#[unsafe(no_mangle)]
pub extern "C" fn contacts_build_fetch(client: *const FfiContactsClient) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        FfiHttpRequest::from_core(client.inner.build_fetch_contacts())
    })
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Contact list
// ---------------------------------------------------------------------------

/// Create an empty contact list.
/// The caller must free the returned pointer with `contacts_list_free`.
#[unsafe(no_mangle)]
pub extern "C" fn contacts_list_new() -> *mut FfiContactList {
    catch_unwind(|| {
        Box::into_raw(Box::new(FfiContactList {
            inner: ContactList::new(),
            on_update: None,
        }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a contact list. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn contacts_list_free(list: *mut FfiContactList) {
    if !list.is_null() {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            drop(unsafe { Box::from_raw(list) });
        }));
    }
}

/// Load the contacts from a response the host obtained by executing the
/// request from `contacts_build_fetch`.
///
/// On any error the list keeps its previous contents and the update callback
/// does not fire.
#[unsafe(no_mangle)]
pub extern "C" fn contacts_list_load_response(
    list: *mut FfiContactList,
    client: *const FfiContactsClient,
    response: *const FfiHttpResponse,
) -> FfiErrorCode {
    guarded("contacts_list_load_response", || {
        if list.is_null() || client.is_null() || response.is_null() {
            return FfiErrorCode::NullArg;
        }
        let client = unsafe { &*client };
        let response = unsafe { &*response }.to_core();
        let hook = {
            let list = unsafe { &mut *list };
            if let Err(e) = list.inner.load_response(&client.inner, response) {
                return FfiErrorCode::from(&e);
            }
            list.on_update
        };
        if let Some(hook) = hook {
            hook.fire();
        }
        FfiErrorCode::Ok
    })
}

/// Filter by case-insensitive substring of the email. An empty string
/// restores the full list.
#[unsafe(no_mangle)]
pub extern "C" fn contacts_list_filter(list: *mut FfiContactList, text: *const c_char) -> FfiErrorCode {
    guarded("contacts_list_filter", || {
        if list.is_null() {
            return FfiErrorCode::NullArg;
        }
        let Some(text) = read_c_str(text) else {
            return FfiErrorCode::NullArg;
        };
        let hook = {
            let list = unsafe { &mut *list };
            list.inner.filter(&text);
            list.on_update
        };
        if let Some(hook) = hook {
            hook.fire();
        }
        FfiErrorCode::Ok
    })
}

/// Number of contacts matching the current filter. 0 for a null list.
#[unsafe(no_mangle)]
pub extern "C" fn contacts_list_count(list: *const FfiContactList) -> u32 {
    with_list(list, 0, |list| to_u32(list.number_of_items()))
}

/// Number of pages of the filtered contacts.
#[unsafe(no_mangle)]
pub extern "C" fn contacts_list_page_count(list: *const FfiContactList) -> u32 {
    with_list(list, 0, |list| to_u32(list.page_count()))
}

/// Number of contacts on `page`, 0 if the page does not exist.
#[unsafe(no_mangle)]
pub extern "C" fn contacts_list_page_len(list: *const FfiContactList, page: u32) -> u32 {
    with_list(list, 0, |list| {
        list.page(page as usize).map_or(0, |p| to_u32(p.len()))
    })
}

/// Copy of the contact at `index` of the filtered list, or null if out of
/// range. Free with `contacts_free_contact`.
#[unsafe(no_mangle)]
pub extern "C" fn contacts_list_item_at(list: *const FfiContactList, index: u32) -> *mut FfiContact {
    with_list(list, std::ptr::null_mut(), |list| {
        list.item_at(index as usize)
            .map_or(std::ptr::null_mut(), FfiContact::from_core)
    })
}

/// Copy of the contact at row `index` of `page`, or null if either is out of
/// range. Free with `contacts_free_contact`.
#[unsafe(no_mangle)]
pub extern "C" fn contacts_list_item_at_in_page(
    list: *const FfiContactList,
    index: u32,
    page: u32,
) -> *mut FfiContact {
    with_list(list, std::ptr::null_mut(), |list| {
        list.item_at_in_page(index as usize, page as usize)
            .map_or(std::ptr::null_mut(), FfiContact::from_core)
    })
}

/// Register `callback` to run with `context` after every successful load and
/// every filter.
///
/// Replaces a callback set earlier through this function. A null callback
/// just clears it. `context` is passed back untouched and never freed. The
/// callback runs once the list is no longer borrowed, so it may call the
/// `contacts_list_*` queries on the same handle.
#[unsafe(no_mangle)]
pub extern "C" fn contacts_list_set_on_update(
    list: *mut FfiContactList,
    callback: FfiUpdateCallback,
    context: *mut c_void,
) {
    if list.is_null() {
        return;
    }
    let _ = catch_unwind(AssertUnwindSafe(|| {
        unsafe { &mut *list }.on_update =
            callback.map(|callback| UpdateHook { callback, context });
    }));
}

fn with_list<R>(list: *const FfiContactList, fallback: R, f: impl FnOnce(&ContactList) -> R) -> R {
    if list.is_null() {
        return fallback;
    }
    let list = unsafe { &*list };
    match catch_unwind(AssertUnwindSafe(|| f(&list.inner))) {
        Ok(value) => value,
        Err(_) => fallback,
    }
}

fn guarded(name: &str, f: impl FnOnce() -> FfiErrorCode) -> FfiErrorCode {
    catch_unwind(AssertUnwindSafe(f)).unwrap_or_else(|_| {
        error!("panic in {name}");
        FfiErrorCode::Panic
    })
}

// ---------------------------------------------------------------------------
// Page cursor
// ---------------------------------------------------------------------------

/// Create a cursor on the first page. Free with `contacts_pager_free`.
#[unsafe(no_mangle)]
pub extern "C" fn contacts_pager_new() -> *mut FfiPageCursor {
    catch_unwind(|| {
        Box::into_raw(Box::new(FfiPageCursor {
            inner: PageCursor::new(),
        }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a cursor. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn contacts_pager_free(pager: *mut FfiPageCursor) {
    if !pager.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(pager) });
        });
    }
}

/// Zero-based current page. 0 for a null cursor.
#[unsafe(no_mangle)]
pub extern "C" fn contacts_pager_current(pager: *const FfiPageCursor) -> u32 {
    if pager.is_null() {
        return 0;
    }
    catch_unwind(AssertUnwindSafe(|| to_u32(unsafe { &*pager }.inner.current()))).unwrap_or(0)
}

/// Advance one page. Returns false on the last page.
#[unsafe(no_mangle)]
pub extern "C" fn contacts_pager_next(pager: *mut FfiPageCursor, page_count: u32) -> bool {
    if pager.is_null() {
        return false;
    }
    catch_unwind(AssertUnwindSafe(|| {
        unsafe { &mut *pager }.inner.next(page_count as usize)
    }))
    .unwrap_or(false)
}

/// Go back one page. Returns false on the first page.
#[unsafe(no_mangle)]
pub extern "C" fn contacts_pager_previous(pager: *mut FfiPageCursor) -> bool {
    if pager.is_null() {
        return false;
    }
    catch_unwind(AssertUnwindSafe(|| unsafe { &mut *pager }.inner.previous())).unwrap_or(false)
}

#[unsafe(no_mangle)]
pub extern "C" fn contacts_pager_reset(pager: *mut FfiPageCursor) {
    if !pager.is_null() {
        let _ = catch_unwind(AssertUnwindSafe(|| unsafe { &mut *pager }.inner.reset()));
    }
}

/// Jump to the 1-based page number typed by the user.
///
/// Returns `InvalidPage` and leaves the cursor alone unless `input` is an
/// integer in `1..=page_count`.
#[unsafe(no_mangle)]
pub extern "C" fn contacts_pager_jump_to(
    pager: *mut FfiPageCursor,
    input: *const c_char,
    page_count: u32,
) -> FfiErrorCode {
    guarded("contacts_pager_jump_to", || {
        if pager.is_null() {
            return FfiErrorCode::NullArg;
        }
        let Some(input) = read_c_str(input) else {
            return FfiErrorCode::NullArg;
        };
        match unsafe { &mut *pager }.inner.jump_to(&input, page_count as usize) {
            Ok(_) => FfiErrorCode::Ok,
            Err(_) => FfiErrorCode::InvalidPage,
        }
    })
}

/// Page indicator text such as `2/3 page`. Free with `contacts_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn contacts_pager_title(pager: *const FfiPageCursor, page_count: u32) -> *mut c_char {
    if pager.is_null() {
        return std::ptr::null_mut();
    }
    catch_unwind(|| into_c_string(unsafe { &*pager }.inner.title(page_count as usize)))
        .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free an `FfiHttpRequest` returned by `contacts_build_fetch`.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn contacts_free_request(req: *mut FfiHttpRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let req = unsafe { Box::from_raw(req) };
        free_c_string(req.path);
        free_c_string(req.body);
        if !req.headers.is_null() && req.headers_len > 0 {
            let headers = unsafe {
                Box::from_raw(std::ptr::slice_from_raw_parts_mut(
                    req.headers,
                    req.headers_len as usize,
                ))
            };
            for h in headers.iter() {
                free_c_string(h.key);
                free_c_string(h.value);
            }
        }
    });
}

/// Free a contact returned by `contacts_list_item_at*`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn contacts_free_contact(contact: *mut FfiContact) {
    if contact.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let contact = unsafe { Box::from_raw(contact) };
        contact.free_fields();
    });
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn contacts_free_string(s: *mut c_char) {
    let _ = catch_unwind(|| free_c_string(s));
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
