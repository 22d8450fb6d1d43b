// ============================================================================
// FFI bindings for permission checks. Menu items and action buttons call
// these; list screens go through the query functions instead.
// ============================================================================

use std::os::raw::{c_char, c_int};

use crate::domains::permission::{Resource, Role};
use crate::errors::DomainError;
use crate::ffi::error::FFIResult;
use crate::ffi::{c_str_arg, handle_status_result, write_json_result};
use crate::globals;

/// `false` when the core is not initialized, on null or invalid strings and
/// on unknown role, resource or action names.
///
/// # Safety
/// Each argument must be null or a valid NUL-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn canvass_has_permission(
    role: *const c_char,
    resource: *const c_char,
    action: *const c_char,
) -> bool {
    let check = || -> FFIResult<bool> {
        let role = unsafe { c_str_arg(role, "role")? };
        let resource = unsafe { c_str_arg(resource, "resource")? };
        let action = unsafe { c_str_arg(action, "action")? };
        let core = globals::get_core()?;
        Ok(core.permissions().has_permission_str(role, resource, action))
    };

    check().unwrap_or_else(|e| {
        log::warn!("Permission check failed closed: {}", e);
        false
    })
}

/// Writes the JSON array of resources `role` can do anything with.
///
/// # Safety
/// `role` must be null or a valid NUL-terminated string; `result` must be
/// null or valid for a pointer write. Free the result with `canvass_free_string`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn canvass_accessible_resources(role: *const c_char, result: *mut *mut c_char) -> c_int {
    handle_status_result(|| {
        let role = parse_role(unsafe { c_str_arg(role, "role")? })?;
        let core = globals::get_core()?;
        let resources: Vec<&str> = core
            .permissions()
            .accessible_resources(role)
            .into_iter()
            .map(|resource| resource.as_str())
            .collect();
        unsafe { write_json_result(result, &resources) }
    })
}

/// Writes the JSON array of actions `role` holds on `resource`.
///
/// # Safety
/// Same contract as `canvass_accessible_resources`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn canvass_permitted_actions(
    role: *const c_char,
    resource: *const c_char,
    result: *mut *mut c_char,
) -> c_int {
    handle_status_result(|| {
        let role = parse_role(unsafe { c_str_arg(role, "role")? })?;
        let resource_name = unsafe { c_str_arg(resource, "resource")? };
        let resource = Resource::from_str(resource_name)
            .ok_or_else(|| DomainError::unknown("resource", resource_name))?;
        let core = globals::get_core()?;
        let actions: Vec<&str> = core
            .permissions()
            .permitted_actions(role, resource)
            .into_iter()
            .map(|action| action.as_str())
            .collect();
        unsafe { write_json_result(result, &actions) }
    })
}

fn parse_role(name: &str) -> Result<Role, DomainError> {
    Role::from_str(name).ok_or_else(|| DomainError::unknown("role", name))
}
