//! `posty_send` against the live echo server.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use posty_ffi::types::{FfiDataTag, FfiErrorCode, FfiRequestFields, FfiResponseView, FfiTlsConfig};
use posty_ffi::{posty_free_result, posty_send};

fn start_server() -> String {
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

    format!("http://{addr}")
}

fn text(ptr: *const c_char) -> String {
    unsafe { CStr::from_ptr(ptr) }.to_str().unwrap().to_string()
}

#[test]
fn send_fills_response_view() {
    let base = start_server();
    let method = CString::new("put").unwrap();
    let url = CString::new(format!("{base}/echo")).unwrap();
    let headers = CString::new("X-Test: 1").unwrap();
    let body = CString::new("payload").unwrap();

    let fields = FfiRequestFields {
        method: method.as_ptr(),
        url: url.as_ptr(),
        headers: headers.as_ptr(),
        body: body.as_ptr(),
    };
    let tls = FfiTlsConfig {
        verify: false,
        ca_cert: std::ptr::null(),
        client_cert: std::ptr::null(),
        client_key: std::ptr::null(),
    };

    let result = posty_send(&fields, &tls);
    let result_ref = unsafe { &*result };
    assert_eq!(result_ref.error_code, FfiErrorCode::Ok);
    assert_eq!(result_ref.data_tag, FfiDataTag::ResponseView);

    let view = unsafe { &*(result_ref.data as *const FfiResponseView) };
    assert_eq!(text(view.status), "200");
    let echo: serde_json::Value = serde_json::from_str(&text(view.body)).unwrap();
    assert_eq!(echo["method"], "PUT");
    assert_eq!(echo["body"], "payload");

    posty_free_result(result);
}

#[test]
fn send_to_closed_port_is_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let method = CString::new("GET").unwrap();
    let url = CString::new(format!("http://{addr}/")).unwrap();
    let fields = FfiRequestFields {
        method: method.as_ptr(),
        url: url.as_ptr(),
        headers: std::ptr::null(),
        body: std::ptr::null(),
    };
    let tls = FfiTlsConfig {
        verify: false,
        ca_cert: std::ptr::null(),
        client_cert: std::ptr::null(),
        client_key: std::ptr::null(),
    };

    let result = posty_send(&fields, &tls);
    let result_ref = unsafe { &*result };
    assert_eq!(result_ref.error_code, FfiErrorCode::Transport);
    assert!(result_ref.data.is_null());
    assert!(!result_ref.error_message.is_null());
    assert!(!text(result_ref.error_message).starts_with("invalid request"));

    posty_free_result(result);
}
