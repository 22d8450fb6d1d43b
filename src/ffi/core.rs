// ============================================================================
// Core FFI functions for library initialization and memory management
// ============================================================================

use std::ffi::{c_char, CString};
use std::os::raw::c_int;

use crate::config::CoreConfig;
use crate::ffi::{c_str_arg, handle_status_result};
use crate::globals;

/// Builds the process-wide access core.
/// `config_json` may be null, which means the built-in tables.
/// Returns 0 on success, an `ErrorCode` otherwise.
///
/// # Safety
/// `config_json` must be null or a valid NUL-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn canvass_initialize(config_json: *const c_char) -> c_int {
    handle_status_result(|| {
        let config = if config_json.is_null() {
            CoreConfig::default()
        } else {
            let json = unsafe { c_str_arg(config_json, "config_json")? };
            CoreConfig::from_json(json)?
        };
        globals::initialize(config)?;
        Ok(())
    })
}

#[unsafe(no_mangle)]
pub extern "C" fn canvass_is_initialized() -> bool {
    globals::is_initialized()
}

/// Frees a C string that was allocated by Rust and passed over FFI.
/// This function should be called by the C/Swift side for any string
/// that was created in Rust using `CString::into_raw()`.
///
/// # Safety
/// `ptr` must come from this library and must not be freed twice.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn canvass_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        // Takes ownership back and drops it
        let _ = unsafe { CString::from_raw(ptr) };
    }
}

/// Get library version
/// Returns allocated string that must be freed with canvass_free_string()
#[unsafe(no_mangle)]
pub extern "C" fn canvass_library_version() -> *mut c_char {
    CString::new(env!("CARGO_PKG_VERSION")).map_or(std::ptr::null_mut(), CString::into_raw)
}
