//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type but uses C-compatible representations:
//! `*mut c_char` instead of `String`, `has_*` flags instead of `Option`, and
//! enums with explicit discriminants. Conversion functions live here to keep
//! `lib.rs` focused on the `extern "C"` surface.

use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_void};

use contacts_core::{ApiError, Contact, ContactList, HttpMethod, PageCursor};

/// Opaque handle to a `ContactsClient`.
pub struct FfiContactsClient {
    pub(crate) inner: contacts_core::ContactsClient,
}

/// Opaque handle to a `ContactList` plus the C update callback, if any.
pub struct FfiContactList {
    pub(crate) inner: ContactList,
    pub(crate) on_update: Option<UpdateHook>,
}

/// C callback and the context it was registered with.
#[derive(Clone, Copy)]
pub(crate) struct UpdateHook {
    pub(crate) callback: extern "C" fn(context: *mut c_void),
    pub(crate) context: *mut c_void,
}

impl UpdateHook {
    pub(crate) fn fire(self) {
        (self.callback)(self.context);
    }
}

/// Opaque handle to a `PageCursor`.
pub struct FfiPageCursor {
    pub(crate) inner: PageCursor,
}

/// Called with the registered context after every load and filter.
pub type FfiUpdateCallback = Option<extern "C" fn(context: *mut c_void)>;

/// Saturating `usize` to `u32` for counts handed to C.
pub(crate) fn to_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

/// Copy `s` into a heap C string. Strings with interior NULs become null.
pub(crate) fn into_c_string(s: String) -> *mut c_char {
    CString::new(s)
        .map(CString::into_raw)
        .unwrap_or(std::ptr::null_mut())
}

pub(crate) fn opt_c_string(s: Option<String>) -> *mut c_char {
    s.map(into_c_string).unwrap_or(std::ptr::null_mut())
}

/// Read a borrowed C string. Invalid UTF-8 is replaced, null gives `None`.
pub(crate) fn read_c_str(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    Some(unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned())
}

/// Free a C string produced by `into_c_string`. Null is ignored.
pub(crate) fn free_c_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(unsafe { CString::from_raw(ptr) });
    }
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// HTTP method as a C enum.
#[repr(C)]
pub enum FfiHttpMethod {
    Get = 0,
}

impl From<HttpMethod> for FfiHttpMethod {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => FfiHttpMethod::Get,
        }
    }
}

/// A single HTTP header as a key-value pair of C strings.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// The contacts request described as C-compatible plain data.
///
/// Built by `contacts_build_fetch`. The C caller executes the request and
/// passes the response to `contacts_list_load_response`.
#[repr(C)]
pub struct FfiHttpRequest {
    pub method: FfiHttpMethod,
    pub path: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
    pub body: *mut c_char,
}

impl FfiHttpRequest {
    pub(crate) fn from_core(req: contacts_core::HttpRequest) -> *mut Self {
        let headers_len = to_u32(req.headers.len());
        let headers = if req.headers.is_empty() {
            std::ptr::null_mut()
        } else {
            let ffi_headers: Box<[FfiHeader]> = req
                .headers
                .into_iter()
                .map(|(k, v)| FfiHeader {
                    key: into_c_string(k),
                    value: into_c_string(v),
                })
                .collect();
            Box::into_raw(ffi_headers) as *mut FfiHeader
        };

        Box::into_raw(Box::new(FfiHttpRequest {
            method: req.method.into(),
            path: into_c_string(req.path),
            headers,
            headers_len,
            body: opt_c_string(req.body),
        }))
    }
}

// ---------------------------------------------------------------------------
// Response input (caller-provided, not heap-allocated by us)
// ---------------------------------------------------------------------------

/// An HTTP response described as C-compatible plain data.
///
/// The C caller builds this after executing the request and passes a pointer
/// in. The FFI layer reads but does not free these fields.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub body: *const c_char,
}

impl FfiHttpResponse {
    pub(crate) fn to_core(&self) -> contacts_core::HttpResponse {
        contacts_core::HttpResponse {
            status: self.status,
            headers: Vec::new(),
            body: read_c_str(self.body).unwrap_or_default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Status codes
// ---------------------------------------------------------------------------

/// Outcome of a fallible FFI call.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    Transport = 1,
    Http = 2,
    Deserialization = 3,
    MissingResult = 4,
    InvalidPage = 5,
    Panic = 6,
    NullArg = 7,
}

impl From<&ApiError> for FfiErrorCode {
    fn from(e: &ApiError) -> Self {
        match e {
            ApiError::Transport(_) => FfiErrorCode::Transport,
            ApiError::HttpError { .. } => FfiErrorCode::Http,
            ApiError::Deserialization(_) => FfiErrorCode::Deserialization,
            ApiError::MissingResult => FfiErrorCode::MissingResult,
        }
    }
}

// ---------------------------------------------------------------------------
// Contact
// ---------------------------------------------------------------------------

/// A contact exposed to C, with the row text precomputed.
///
/// String fields are null when the source field is absent. `has_id` and
/// `has_date_update` say whether the numeric fields carry a value.
#[repr(C)]
pub struct FfiContact {
    pub has_id: bool,
    pub id: i64,
    pub email: *mut c_char,
    pub clean_email: *mut c_char,
    pub first_name: *mut c_char,
    pub last_name: *mut c_char,
    pub has_date_update: bool,
    pub date_update: i64,
    /// Medium date and time in the host's local timezone.
    pub formatted_date_update: *mut c_char,
}

impl FfiContact {
    pub(crate) fn from_core(contact: &Contact) -> *mut Self {
        Box::into_raw(Box::new(FfiContact {
            has_id: contact.id.is_some(),
            id: contact.id.unwrap_or(0),
            email: opt_c_string(contact.email.clone()),
            clean_email: opt_c_string(contact.clean_email()),
            first_name: opt_c_string(contact.first_name.clone()),
            last_name: opt_c_string(contact.last_name.clone()),
            has_date_update: contact.date_update.is_some(),
            date_update: contact.date_update.unwrap_or(0),
            formatted_date_update: opt_c_string(contact.formatted_date_update()),
        }))
    }

    /// Free the C-string fields (but not the struct itself).
    pub(crate) fn free_fields(&self) {
        free_c_string(self.email);
        free_c_string(self.clean_email);
        free_c_string(self.first_name);
        free_c_string(self.last_name);
        free_c_string(self.formatted_date_update);
    }
}
