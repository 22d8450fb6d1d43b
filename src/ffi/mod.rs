use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_int};

use serde::Serialize;

use crate::ffi::error::{ErrorCode, FFIError};

pub mod core;
pub mod error;
pub mod permission;
pub mod query;

pub use error::FFIResult;

/// Error handling helper for FFI boundaries (returns error code)
pub fn handle_status_result<F>(func: F) -> c_int
where
    F: FnOnce() -> FFIResult<()>,
{
    match catch_panic(func) {
        Ok(()) => ErrorCode::Success as c_int,
        Err(e) => {
            log::error!(
                "FFI call failed: code {:?}, message: {}, details: {}",
                e.code,
                e.message,
                e.details.as_deref().unwrap_or("none")
            );
            e.code as c_int
        }
    }
}

/// Handles results for FFI functions that return data, serializing Ok(T) or Err(FFIError) to JSON.
/// Returns a pointer to a C string (must be freed with `canvass_free_string`).
pub fn handle_json_result<F, T>(func: F) -> *mut c_char
where
    F: FnOnce() -> FFIResult<T>,
    T: Serialize,
{
    let json_string = match catch_panic(func) {
        Ok(value) => serde_json::to_string(&value),
        Err(ffi_error) => serde_json::to_string(&ffi_error),
    };

    let final_json = json_string.unwrap_or_else(|e| {
        log::error!("Failed to serialize FFI result: {}", e);
        // The caller must always get parseable JSON back
        serde_json::json!({
            "code": ErrorCode::InternalError,
            "message": format!("Failed to serialize result: {}", e),
            "details": null,
        })
        .to_string()
    });

    CString::new(final_json).map_or(std::ptr::null_mut(), CString::into_raw)
}

/// Borrows a C string argument as UTF-8.
///
/// # Safety
/// `ptr` must be null or point to a NUL-terminated string that outlives the call.
pub unsafe fn c_str_arg<'a>(ptr: *const c_char, name: &str) -> FFIResult<&'a str> {
    if ptr.is_null() {
        return Err(FFIError::null_pointer(name));
    }
    unsafe { CStr::from_ptr(ptr) }
        .to_str()
        .map_err(|_| FFIError::new(ErrorCode::InvalidUtf8, &format!("Invalid UTF-8 in {}", name)))
}

/// Serializes `value` into a new C string stored at `result`.
///
/// # Safety
/// `result` must be null or valid for a pointer write.
pub unsafe fn write_json_result<T: Serialize>(result: *mut *mut c_char, value: &T) -> FFIResult<()> {
    if result.is_null() {
        return Err(FFIError::null_pointer("result"));
    }
    let json = serde_json::to_string(value)
        .map_err(|e| FFIError::internal(format!("Failed to serialize result: {}", e)))?;
    let c_string = CString::new(json)?;
    unsafe { *result = c_string.into_raw() };
    Ok(())
}

/// Panics must not unwind into the host app.
fn catch_panic<F, T>(func: F) -> FFIResult<T>
where
    F: FnOnce() -> FFIResult<T>,
{
    std::panic::catch_unwind(std::panic::AssertUnwindSafe(func)).unwrap_or_else(|payload| {
        let panic_msg = if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else if let Some(s) = payload.downcast_ref::<&str>() {
            s.to_string()
        } else {
            "panic message is not a string".to_string()
        };
        log::error!("Panic in FFI call: {}", panic_msg);
        Err(FFIError::new(ErrorCode::Unknown, &format!("Panic during FFI call: {}", panic_msg)))
    })
}
