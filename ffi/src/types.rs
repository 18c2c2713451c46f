//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type but uses C-compatible representations:
//! `*mut c_char` instead of `String`, raw pointers instead of `Vec`, and
//! tagged enums with explicit discriminants. Input structs hold borrowed
//! `*const` pointers the caller keeps ownership of; output structs hold
//! `*mut` pointers the caller releases with `posty_free_result`.
//! Conversion functions live here to keep `lib.rs` focused on the
//! `extern "C"` surface.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use posty_core::{
    ClientIdentity, OutboundRequest, RequestFields, ResponseView, SendError, TlsConfig, ValidationError,
    VerifyMode,
};

// ---------------------------------------------------------------------------
// String helpers
// ---------------------------------------------------------------------------

/// Copy a borrowed C string. Null reads as empty; invalid UTF-8 is replaced.
///
/// # Safety
/// `ptr` must be null or point to a NUL-terminated string.
pub(crate) unsafe fn read_str(ptr: *const c_char) -> String {
    if ptr.is_null() {
        return String::new();
    }
    unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned()
}

/// Hand a Rust string to C. Interior NULs are dropped.
pub(crate) fn to_c(s: impl Into<Vec<u8>>) -> *mut c_char {
    let cstring = CString::new(s).unwrap_or_else(|e| {
        let mut bytes = e.into_vec();
        bytes.retain(|&b| b != 0);
        CString::new(bytes).unwrap_or_default()
    });
    cstring.into_raw()
}

/// Free a string produced by `to_c`. Null is ignored.
pub(crate) fn free_c(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(unsafe { CString::from_raw(ptr) });
    }
}

fn path_to_c(path: &std::path::Path) -> *mut c_char {
    to_c(path.to_string_lossy().into_owned())
}

// ---------------------------------------------------------------------------
// Inputs (caller-owned)
// ---------------------------------------------------------------------------

/// Request fields as the UI holds them. Null pointers read as empty strings.
#[repr(C)]
pub struct FfiRequestFields {
    pub method: *const c_char,
    pub url: *const c_char,
    pub headers: *const c_char,
    pub body: *const c_char,
}

impl FfiRequestFields {
    /// # Safety
    /// Every non-null pointer must be a NUL-terminated string.
    pub(crate) unsafe fn to_core(&self) -> RequestFields {
        unsafe {
            RequestFields {
                method: read_str(self.method),
                url: read_str(self.url),
                headers: read_str(self.headers),
                body: read_str(self.body),
            }
        }
    }
}

/// TLS settings as the UI holds them. Null paths read as "not set".
#[repr(C)]
pub struct FfiTlsConfig {
    pub verify: bool,
    pub ca_cert: *const c_char,
    pub client_cert: *const c_char,
    pub client_key: *const c_char,
}

impl FfiTlsConfig {
    /// # Safety
    /// Every non-null pointer must be a NUL-terminated string.
    pub(crate) unsafe fn to_core(&self) -> TlsConfig {
        unsafe {
            TlsConfig {
                verify: self.verify,
                ca_cert: read_str(self.ca_cert),
                client_cert: read_str(self.client_cert),
                client_key: read_str(self.client_key),
            }
        }
    }
}

/// A single HTTP header as a key-value pair of C strings.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// A response the C caller received from its own transport.
///
/// Constructed on the caller's side and passed to `posty_map_response`. The
/// FFI layer reads but does not free these fields.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub headers: *const FfiHeader,
    pub headers_len: u32,
    pub body: *const c_char,
}

impl FfiHttpResponse {
    /// # Safety
    /// `headers` must be null or point to `headers_len` valid entries.
    pub(crate) unsafe fn to_core(&self) -> posty_core::HttpResponse {
        let headers = if self.headers.is_null() || self.headers_len == 0 {
            Vec::new()
        } else {
            unsafe { std::slice::from_raw_parts(self.headers, self.headers_len as usize) }
                .iter()
                .map(|h| unsafe { (read_str(h.key), read_str(h.value)) })
                .collect()
        };
        posty_core::HttpResponse {
            status: self.status,
            headers,
            body: unsafe { read_str(self.body) },
        }
    }
}

// ---------------------------------------------------------------------------
// Outputs (library-owned until freed)
// ---------------------------------------------------------------------------

/// Trust mode as a C enum. `ca_bundle` is set only for `CaBundle`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiVerifyMode {
    Default = 0,
    CaBundle = 1,
    Disabled = 2,
}

/// A built request as C-compatible plain data.
///
/// `body`, `ca_bundle`, `client_cert` and `client_key` are null when absent.
#[repr(C)]
pub struct FfiOutboundRequest {
    pub method: *mut c_char,
    pub url: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
    pub body: *mut c_char,
    pub verify_mode: FfiVerifyMode,
    pub ca_bundle: *mut c_char,
    pub client_cert: *mut c_char,
    pub client_key: *mut c_char,
}

impl FfiOutboundRequest {
    pub(crate) fn from_core(req: OutboundRequest) -> Box<Self> {
        let headers_len = req.headers.len() as u32;
        let headers = if req.headers.is_empty() {
            std::ptr::null_mut()
        } else {
            let ffi_headers: Vec<FfiHeader> = req
                .headers
                .into_iter()
                .map(|(k, v)| FfiHeader {
                    key: to_c(k),
                    value: to_c(v),
                })
                .collect();
            Box::into_raw(ffi_headers.into_boxed_slice()) as *mut FfiHeader
        };

        let (verify_mode, ca_bundle) = match &req.options.verify {
            VerifyMode::Default => (FfiVerifyMode::Default, std::ptr::null_mut()),
            VerifyMode::CaBundle(path) => (FfiVerifyMode::CaBundle, path_to_c(path)),
            VerifyMode::Disabled => (FfiVerifyMode::Disabled, std::ptr::null_mut()),
        };
        let (client_cert, client_key) = match &req.options.client_identity {
            Some(ClientIdentity { cert, key }) => (path_to_c(cert), path_to_c(key)),
            None => (std::ptr::null_mut(), std::ptr::null_mut()),
        };

        Box::new(FfiOutboundRequest {
            method: to_c(req.method.as_str()),
            url: to_c(req.url),
            headers,
            headers_len,
            body: req.body.map_or(std::ptr::null_mut(), to_c),
            verify_mode,
            ca_bundle,
            client_cert,
            client_key,
        })
    }

    pub(crate) fn free_fields(&self) {
        for ptr in [self.method, self.url, self.body, self.ca_bundle, self.client_cert, self.client_key] {
            free_c(ptr);
        }
        if !self.headers.is_null() && self.headers_len > 0 {
            let slice = std::ptr::slice_from_raw_parts_mut(self.headers, self.headers_len as usize);
            let headers = unsafe { Box::from_raw(slice) };
            for h in headers.iter() {
                free_c(h.key);
                free_c(h.value);
            }
        }
    }
}

/// The three display strings.
#[repr(C)]
pub struct FfiResponseView {
    pub status: *mut c_char,
    pub headers: *mut c_char,
    pub body: *mut c_char,
}

impl FfiResponseView {
    pub(crate) fn from_core(view: ResponseView) -> Box<Self> {
        Box::new(FfiResponseView {
            status: to_c(view.status),
            headers: to_c(view.headers),
            body: to_c(view.body),
        })
    }

    pub(crate) fn free_fields(&self) {
        for ptr in [self.status, self.headers, self.body] {
            free_c(ptr);
        }
    }
}

/// Field values restored from a defaults document.
#[repr(C)]
pub struct FfiDefaults {
    pub method: *mut c_char,
    pub url: *mut c_char,
    pub headers: *mut c_char,
    pub body: *mut c_char,
    pub verify: bool,
    pub ca_cert: *mut c_char,
    pub client_cert: *mut c_char,
    pub client_key: *mut c_char,
}

impl FfiDefaults {
    pub(crate) fn from_core(fields: RequestFields, tls: TlsConfig) -> Box<Self> {
        Box::new(FfiDefaults {
            method: to_c(fields.method),
            url: to_c(fields.url),
            headers: to_c(fields.headers),
            body: to_c(fields.body),
            verify: tls.verify,
            ca_cert: to_c(tls.ca_cert),
            client_cert: to_c(tls.client_cert),
            client_key: to_c(tls.client_key),
        })
    }

    pub(crate) fn free_fields(&self) {
        for ptr in [
            self.method,
            self.url,
            self.headers,
            self.body,
            self.ca_cert,
            self.client_cert,
            self.client_key,
        ] {
            free_c(ptr);
        }
    }
}

// ---------------------------------------------------------------------------
// Result envelope
// ---------------------------------------------------------------------------

/// Error codes returned in `FfiPostyResult`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    EmptyUrl = 1,
    HeaderSyntax = 2,
    InsecureUrl = 3,
    IncompleteClientIdentity = 4,
    Transport = 5,
    Parse = 6,
    Panic = 7,
    NullArg = 8,
}

impl From<&ValidationError> for FfiErrorCode {
    fn from(err: &ValidationError) -> Self {
        match err {
            ValidationError::EmptyUrl => FfiErrorCode::EmptyUrl,
            ValidationError::HeaderSyntax { .. } => FfiErrorCode::HeaderSyntax,
            ValidationError::InsecureUrl { .. } => FfiErrorCode::InsecureUrl,
            ValidationError::IncompleteClientIdentity(_) => FfiErrorCode::IncompleteClientIdentity,
        }
    }
}

/// Tag that tells `posty_free_result` what `FfiPostyResult::data` points to.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiDataTag {
    None = 0,
    Request = 1,
    ResponseView = 2,
    Defaults = 3,
}

/// Result envelope for every fallible entry point.
///
/// On success `error_code` is `Ok`, `error_message` is null, and `data`
/// points to the payload tagged by `data_tag`. On failure `error_message`
/// is a human-readable C string and `data` is null.
#[repr(C)]
pub struct FfiPostyResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub data_tag: FfiDataTag,
    pub data: *mut std::ffi::c_void,
}

impl FfiPostyResult {
    fn ok(data_tag: FfiDataTag, data: *mut std::ffi::c_void) -> *mut Self {
        Box::into_raw(Box::new(FfiPostyResult {
            error_code: FfiErrorCode::Ok,
            error_message: std::ptr::null_mut(),
            data_tag,
            data,
        }))
    }

    pub(crate) fn error(error_code: FfiErrorCode, msg: impl Into<Vec<u8>>) -> *mut Self {
        Box::into_raw(Box::new(FfiPostyResult {
            error_code,
            error_message: to_c(msg),
            data_tag: FfiDataTag::None,
            data: std::ptr::null_mut(),
        }))
    }

    pub(crate) fn ok_request(req: OutboundRequest) -> *mut Self {
        let data = Box::into_raw(FfiOutboundRequest::from_core(req));
        Self::ok(FfiDataTag::Request, data as *mut std::ffi::c_void)
    }

    pub(crate) fn ok_view(view: ResponseView) -> *mut Self {
        let data = Box::into_raw(FfiResponseView::from_core(view));
        Self::ok(FfiDataTag::ResponseView, data as *mut std::ffi::c_void)
    }

    pub(crate) fn ok_defaults(fields: RequestFields, tls: TlsConfig) -> *mut Self {
        let data = Box::into_raw(FfiDefaults::from_core(fields, tls));
        Self::ok(FfiDataTag::Defaults, data as *mut std::ffi::c_void)
    }

    pub(crate) fn from_validation(err: ValidationError) -> *mut Self {
        Self::error(FfiErrorCode::from(&err), err.to_string())
    }

    pub(crate) fn from_send(err: SendError) -> *mut Self {
        match err {
            SendError::Validation(e) => Self::from_validation(e),
            SendError::Transport(e) => Self::error(FfiErrorCode::Transport, e.to_string()),
        }
    }

    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::error(FfiErrorCode::NullArg, format!("null argument: {name}"))
    }

    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::error(FfiErrorCode::Panic, msg)
    }
}
