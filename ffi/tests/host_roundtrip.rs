//! Drive the C ABI the way the iOS host does, against the live mock server.
//!
//! The test reads `FfiHttpRequest`, performs the GET with ureq, and hands an
//! `FfiHttpResponse` back, exactly as a Swift caller would with URLSession.

use std::ffi::{CStr, CString};

use contacts_ffi::types::{FfiErrorCode, FfiHttpResponse};
use contacts_ffi::*;

fn start_server() -> std::net::SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    addr
}

fn get(url: &str) -> (u16, String) {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();
    let mut response = agent.get(url).call().expect("HTTP transport error");
    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();
    (status, body)
}

#[test]
fn fetch_filter_and_page_through_ffi() {
    let addr = start_server();
    let base = CString::new(format!("http://{addr}")).unwrap();
    let client = contacts_client_new(base.as_ptr());
    let list = contacts_list_new();
    let pager = contacts_pager_new();

    // Host executes the request.
    let req = contacts_build_fetch(client);
    let url = unsafe { CStr::from_ptr((*req).path) }.to_str().unwrap().to_string();
    contacts_free_request(req);
    let (status, body) = get(&url);

    let body = CString::new(body).unwrap();
    let resp = FfiHttpResponse {
        status,
        body: body.as_ptr(),
    };
    assert_eq!(contacts_list_load_response(list, client, &resp), FfiErrorCode::Ok);

    assert_eq!(contacts_list_count(list), 23);
    assert_eq!(contacts_list_page_count(list), 3);
    let sizes: Vec<u32> = (0..3).map(|p| contacts_list_page_len(list, p)).collect();
    assert_eq!(sizes, [10, 10, 3]);

    // Jump to the last page and read its final row.
    let input = CString::new("3").unwrap();
    let pages = contacts_list_page_count(list);
    assert_eq!(contacts_pager_jump_to(pager, input.as_ptr(), pages), FfiErrorCode::Ok);
    let contact = contacts_list_item_at_in_page(list, 2, contacts_pager_current(pager));
    assert!(!contact.is_null());
    assert_eq!(unsafe { (*contact).id }, 1022);
    contacts_free_contact(contact);

    // Search and go back to the first page.
    let text = CString::new("example.COM").unwrap();
    contacts_list_filter(list, text.as_ptr());
    contacts_pager_reset(pager);
    assert_eq!(contacts_list_count(list), 1);
    let title = contacts_pager_title(pager, contacts_list_page_count(list));
    assert_eq!(unsafe { CStr::from_ptr(title) }.to_str().unwrap(), "1/1 page");
    contacts_free_string(title);

    let contact = contacts_list_item_at(list, 0);
    let clean = unsafe { CStr::from_ptr((*contact).clean_email) }.to_str().unwrap();
    assert_eq!(clean, "Nikita.Mikhailov@Example.COM");
    contacts_free_contact(contact);

    contacts_pager_free(pager);
    contacts_list_free(list);
    contacts_client_free(client);
}

#[test]
fn unknown_path_leaves_list_empty() {
    let addr = start_server();
    let base = CString::new(format!("http://{addr}")).unwrap();
    let path = CString::new("/v3/nothing-here").unwrap();
    let client = contacts_client_with_path(base.as_ptr(), path.as_ptr());
    let list = contacts_list_new();

    let req = contacts_build_fetch(client);
    let url = unsafe { CStr::from_ptr((*req).path) }.to_str().unwrap().to_string();
    contacts_free_request(req);
    let (status, body) = get(&url);
    assert_eq!(status, 404);

    let body = CString::new(body).unwrap();
    let resp = FfiHttpResponse {
        status,
        body: body.as_ptr(),
    };
    assert_eq!(contacts_list_load_response(list, client, &resp), FfiErrorCode::Http);
    assert_eq!(contacts_list_count(list), 0);
    assert_eq!(contacts_list_page_count(list), 0);

    contacts_list_free(list);
    contacts_client_free(client);
}
