//! C-ABI wrapper around `posty-core`.
//!
//! # Overview
//! Exposes request building, response mapping, defaults encoding and the
//! full send flow through `extern "C"` functions so a UI written in any
//! language with a C FFI can drive the engine.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - Fallible calls return a single `FfiPostyResult` envelope with
//!   `FfiDataTag` + `void* data`.
//! - The C caller owns all returned pointers and must call
//!   `posty_free_result` / `posty_free_string` to release them.

pub mod types;

use std::os::raw::c_char;
use std::panic::catch_unwind;

use posty_core::{ResponseView, UreqTransport};

use types::*;

// ---------------------------------------------------------------------------
// Build and map
// ---------------------------------------------------------------------------

/// Validate the fields and build a request.
///
/// Returns a result with `data_tag = Request` on success, or a validation
/// error code with a message suitable for showing to the user.
#[unsafe(no_mangle)]
pub extern "C" fn posty_build(
    fields: *const FfiRequestFields,
    tls: *const FfiTlsConfig,
) -> *mut FfiPostyResult {
    catch_unwind(|| {
        if fields.is_null() {
            return FfiPostyResult::null_arg("fields");
        }
        if tls.is_null() {
            return FfiPostyResult::null_arg("tls");
        }
        let (fields, tls) = unsafe { ((*fields).to_core(), (*tls).to_core()) };
        match posty_core::build(&fields, &tls) {
            Ok(req) => FfiPostyResult::ok_request(req),
            Err(e) => FfiPostyResult::from_validation(e),
        }
    })
    .unwrap_or_else(|_| FfiPostyResult::panic("panic in posty_build"))
}

/// Render a response received by the caller's own transport.
///
/// Returns a result with `data_tag = ResponseView`.
#[unsafe(no_mangle)]
pub extern "C" fn posty_map_response(response: *const FfiHttpResponse) -> *mut FfiPostyResult {
    catch_unwind(|| {
        if response.is_null() {
            return FfiPostyResult::null_arg("response");
        }
        let response = unsafe { (*response).to_core() };
        FfiPostyResult::ok_view(posty_core::map(&response))
    })
    .unwrap_or_else(|_| FfiPostyResult::panic("panic in posty_map_response"))
}

/// Build and send the request with the built-in transport.
///
/// Blocks until the response is read in full. Returns `data_tag =
/// ResponseView` on success; the display the caller holds should be cleared
/// before calling and replaced only from a successful result.
#[unsafe(no_mangle)]
pub extern "C" fn posty_send(
    fields: *const FfiRequestFields,
    tls: *const FfiTlsConfig,
) -> *mut FfiPostyResult {
    catch_unwind(|| {
        if fields.is_null() {
            return FfiPostyResult::null_arg("fields");
        }
        if tls.is_null() {
            return FfiPostyResult::null_arg("tls");
        }
        let (fields, tls) = unsafe { ((*fields).to_core(), (*tls).to_core()) };
        let mut display = ResponseView::default();
        match posty_core::send(&fields, &tls, &UreqTransport::default(), &mut display) {
            Ok(()) => FfiPostyResult::ok_view(display),
            Err(e) => FfiPostyResult::from_send(e),
        }
    })
    .unwrap_or_else(|_| FfiPostyResult::panic("panic in posty_send"))
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// Encode the fields as a defaults document.
///
/// Returns null if either argument is null. Free with `posty_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn posty_encode_defaults(
    fields: *const FfiRequestFields,
    tls: *const FfiTlsConfig,
) -> *mut c_char {
    catch_unwind(|| {
        if fields.is_null() || tls.is_null() {
            return std::ptr::null_mut();
        }
        let (fields, tls) = unsafe { ((*fields).to_core(), (*tls).to_core()) };
        match posty_core::encode(&fields, &tls) {
            Ok(text) => to_c(text),
            Err(_) => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Decode a defaults document.
///
/// Returns `data_tag = Defaults` on success or `Parse` on malformed input;
/// on failure the caller keeps its current field values.
#[unsafe(no_mangle)]
pub extern "C" fn posty_decode_defaults(text: *const c_char) -> *mut FfiPostyResult {
    catch_unwind(|| {
        if text.is_null() {
            return FfiPostyResult::null_arg("text");
        }
        let text = unsafe { read_str(text) };
        match posty_core::decode(&text) {
            Ok((fields, tls)) => FfiPostyResult::ok_defaults(fields, tls),
            Err(e) => FfiPostyResult::error(FfiErrorCode::Parse, e.to_string()),
        }
    })
    .unwrap_or_else(|_| FfiPostyResult::panic("panic in posty_decode_defaults"))
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free an `FfiPostyResult` returned by any entry point. Safe to call with
/// null. Uses `data_tag` to determine what `data` points to.
#[unsafe(no_mangle)]
pub extern "C" fn posty_free_result(result: *mut FfiPostyResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        free_c(result.error_message);
        if result.data.is_null() {
            return;
        }
        match result.data_tag {
            FfiDataTag::Request => {
                let req = unsafe { Box::from_raw(result.data as *mut FfiOutboundRequest) };
                req.free_fields();
            }
            FfiDataTag::ResponseView => {
                let view = unsafe { Box::from_raw(result.data as *mut FfiResponseView) };
                view.free_fields();
            }
            FfiDataTag::Defaults => {
                let defaults = unsafe { Box::from_raw(result.data as *mut FfiDefaults) };
                defaults.free_fields();
            }
            FfiDataTag::None => {}
        }
    });
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn posty_free_string(s: *mut c_char) {
    let _ = catch_unwind(|| free_c(s));
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
