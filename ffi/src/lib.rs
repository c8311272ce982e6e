//! C-ABI wrapper around `userlist-core`.
//!
//! # Overview
//! Exposes the user list and store operations through `extern "C"`
//! functions so a native host can build and parse HTTP requests/responses
//! while running the round trip on its own networking stack.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - Per-operation `build_*` / `parse_*` mirrors `UserApi` 1:1.
//! - A single `FfiUserResult` envelope with `FfiDataTag` + `void* data`
//!   conveys success payloads and errors uniformly.
//! - The C caller owns all returned pointers and must call the matching
//!   `userlist_free_*` function to release them.

pub mod types;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::panic::catch_unwind;

use userlist_core::{HttpResponse, NewUser, UserApi};

use types::*;

/// Borrow a C string argument. `None` for null or invalid UTF-8.
///
/// # Safety
/// `ptr` must be null or point to a NUL-terminated string.
unsafe fn str_arg<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(ptr) }.to_str().ok()
}

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

/// Create a new client bound to `base_url` with the default endpoints.
///
/// Returns null if `base_url` is null, is not UTF-8, or if an internal panic
/// occurs.
/// The caller must free the returned pointer with `userlist_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn userlist_client_new(base_url: *const c_char) -> *mut FfiUserClient {
    catch_unwind(|| {
        let Some(url) = (unsafe { str_arg(base_url) }) else {
            return std::ptr::null_mut();
        };
        let client = UserApi::with_base_url(url);
        Box::into_raw(Box::new(FfiUserClient { inner: client }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a client created by `userlist_client_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn userlist_client_free(client: *mut FfiUserClient) {
    if !client.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(client) });
        });
    }
}

// ---------------------------------------------------------------------------
// Build request functions
// ---------------------------------------------------------------------------

/// Build the POST request that lists every user.
///
/// Returns null if `client` is null.
/// The caller must free the returned pointer with `userlist_free_request`.
#[unsafe(no_mangle)]
pub extern "C" fn userlist_build_list_users(client: *const FfiUserClient) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        match client.inner.build_list_users() {
            Ok(req) => FfiHttpRequest::from_core(req),
            Err(_) => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Build the POST request that stores a new user.
///
/// Returns null if any argument is null or not UTF-8, or if serialization
/// fails.
#[unsafe(no_mangle)]
pub extern "C" fn userlist_build_create_user(
    client: *const FfiUserClient,
    user_id: *const c_char,
    name: *const c_char,
    comment: *const c_char,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        let (Some(user_id), Some(name), Some(comment)) =
            (unsafe { (str_arg(user_id), str_arg(name), str_arg(comment)) })
        else {
            return std::ptr::null_mut();
        };
        let input = NewUser::new(user_id, name, comment);
        match client.inner.build_create_user(&input) {
            Ok(req) => FfiHttpRequest::from_core(req),
            Err(_) => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Parse response functions
// ---------------------------------------------------------------------------

/// Convert an `FfiHttpResponse` to a core `HttpResponse`. A null body reads
/// as an empty string; invalid UTF-8 is replaced and left for the parser to
/// reject.
fn ffi_response_to_core(resp: &FfiHttpResponse) -> HttpResponse {
    let body = if resp.body.is_null() {
        String::new()
    } else {
        unsafe { CStr::from_ptr(resp.body) }
            .to_string_lossy()
            .into_owned()
    };
    HttpResponse {
        status: resp.status,
        headers: Vec::new(),
        body,
    }
}

/// Parse the response of a list-users request.
///
/// Returns a result with `data_tag = UserList` on success.
#[unsafe(no_mangle)]
pub extern "C" fn userlist_parse_list_users(
    client: *const FfiUserClient,
    response: *const FfiHttpResponse,
) -> *mut FfiUserResult {
    catch_unwind(|| {
        if client.is_null() {
            return FfiUserResult::null_arg("client");
        }
        if response.is_null() {
            return FfiUserResult::null_arg("response");
        }
        let client = unsafe { &*client };
        let resp = unsafe { &*response };
        match client.inner.parse_list_users(ffi_response_to_core(resp)) {
            Ok(users) => FfiUserResult::ok_user_list(users),
            Err(e) => FfiUserResult::from_error(e),
        }
    })
    .unwrap_or_else(|_| FfiUserResult::panic("panic in userlist_parse_list_users"))
}

/// Parse the response of a create-user request.
///
/// Returns a result with `data_tag = None` on success (status 200, body
/// ignored).
#[unsafe(no_mangle)]
pub extern "C" fn userlist_parse_create_user(
    client: *const FfiUserClient,
    response: *const FfiHttpResponse,
) -> *mut FfiUserResult {
    catch_unwind(|| {
        if client.is_null() {
            return FfiUserResult::null_arg("client");
        }
        if response.is_null() {
            return FfiUserResult::null_arg("response");
        }
        let client = unsafe { &*client };
        let resp = unsafe { &*response };
        match client.inner.parse_create_user(ffi_response_to_core(resp)) {
            Ok(()) => FfiUserResult::ok_empty(),
            Err(e) => FfiUserResult::from_error(e),
        }
    })
    .unwrap_or_else(|_| FfiUserResult::panic("panic in userlist_parse_create_user"))
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free an `FfiHttpRequest` returned by any `userlist_build_*` function.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn userlist_free_request(req: *mut FfiHttpRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let req = unsafe { Box::from_raw(req) };
        free_c_string(req.url);
        free_c_string(req.body);
        if !req.headers.is_null() {
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

/// Free an `FfiUserResult` returned by any `userlist_parse_*` function.
/// Safe to call with null. Uses `data_tag` to determine what `data` points to.
#[unsafe(no_mangle)]
pub extern "C" fn userlist_free_result(result: *mut FfiUserResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        free_c_string(result.error_message);
        if result.data.is_null() {
            return;
        }
        match result.data_tag {
            FfiDataTag::UserList => {
                let list = unsafe { Box::from_raw(result.data as *mut FfiUserList) };
                if !list.items.is_null() {
                    let items = unsafe {
                        Box::from_raw(std::ptr::slice_from_raw_parts_mut(
                            list.items,
                            list.len as usize,
                        ))
                    };
                    for item in items.iter() {
                        free_c_string(item.name);
                        free_c_string(item.comment);
                    }
                }
            }
            FfiDataTag::None => {}
        }
    });
}

fn free_c_string(s: *mut c_char) {
    if !s.is_null() {
        drop(unsafe { CString::from_raw(s) });
    }
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn userlist_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = catch_unwind(|| free_c_string(s));
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
