// ============================================================================
// FFI bindings for list screens and the dashboard.
//
// Memory ownership: any *mut c_char written to `result` must be freed by the
// caller with `canvass_free_string`.
//
// JSON contract (all list functions):
// {
//   "role": "field_volunteer",
//   "search_text": "kumar",                          // optional
//   "filters": { "gender": "F", "caste": null },     // optional
//   "sort": { "field": "age", "direction": "descending" }, // optional
//   "page": { "page": 1, "per_page": 20 },           // optional
//   "records": [ ... ]
// }
// The result is a `VisiblePage` object. An unknown role gets a page with
// `permission_denied` set, never an error with records.
// ============================================================================

use std::os::raw::{c_char, c_int};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::domains::booth::BoothRecord;
use crate::domains::constituency::ConstituencyRecord;
use crate::domains::filter::{FilterSelection, FilterableRecord};
use crate::domains::query::{SortRequest, VisiblePage};
use crate::domains::user::UserRecord;
use crate::domains::voter::{VoterRecord, VoterSummary};
use crate::errors::ServiceError;
use crate::ffi::error::FFIResult;
use crate::ffi::{c_str_arg, handle_status_result, write_json_result};
use crate::globals;
use crate::types::{PaginationParams, Role};

#[derive(Deserialize)]
#[serde(bound(deserialize = "R: DeserializeOwned"))]
struct QueryPayload<R> {
    role: String,
    #[serde(default)]
    search_text: Option<String>,
    #[serde(default)]
    filters: FilterSelection,
    #[serde(default)]
    sort: Option<SortRequest>,
    #[serde(default)]
    page: Option<PaginationParams>,
    records: Vec<R>,
}

/// Decodes the payload and runs it through the facade.
fn run_query<R>(payload_json: &str) -> FFIResult<VisiblePage<R>>
where
    R: FilterableRecord + Clone + DeserializeOwned,
{
    let payload: QueryPayload<R> = serde_json::from_str(payload_json)?;

    let role = match Role::from_str(&payload.role) {
        Some(role) => role,
        None => {
            log::warn!("Unknown role '{}' in {} query", payload.role, R::RESOURCE.as_str());
            return Ok(VisiblePage::denied());
        }
    };

    let core = globals::get_core()?;
    let sort = payload.sort.as_ref().and_then(SortRequest::to_spec::<R::Field>);

    Ok(core.facade().query_with_selections(
        role,
        R::RESOURCE,
        &payload.records,
        payload.search_text.as_deref(),
        &payload.filters,
        sort,
        payload.page,
    ))
}

unsafe fn query_ffi<R>(payload_json: *const c_char, result: *mut *mut c_char) -> c_int
where
    R: FilterableRecord + Clone + DeserializeOwned + Serialize,
{
    handle_status_result(|| {
        let json = unsafe { c_str_arg(payload_json, "payload_json")? };
        let page = run_query::<R>(json)?;
        unsafe { write_json_result(result, &page) }
    })
}

/// # Safety
/// `payload_json` must be null or a valid NUL-terminated string; `result`
/// must be null or valid for a pointer write.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn canvass_query_voters(payload_json: *const c_char, result: *mut *mut c_char) -> c_int {
    unsafe { query_ffi::<VoterRecord>(payload_json, result) }
}

/// # Safety
/// Same contract as `canvass_query_voters`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn canvass_query_users(payload_json: *const c_char, result: *mut *mut c_char) -> c_int {
    unsafe { query_ffi::<UserRecord>(payload_json, result) }
}

/// # Safety
/// Same contract as `canvass_query_voters`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn canvass_query_booths(payload_json: *const c_char, result: *mut *mut c_char) -> c_int {
    unsafe { query_ffi::<BoothRecord>(payload_json, result) }
}

/// # Safety
/// Same contract as `canvass_query_voters`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn canvass_query_constituencies(
    payload_json: *const c_char,
    result: *mut *mut c_char,
) -> c_int {
    unsafe { query_ffi::<ConstituencyRecord>(payload_json, result) }
}

// Expected JSON payload:
// { "role": "...", "search_text": "...", "filters": {...}, "records": [VoterRecord] }
#[derive(Deserialize)]
struct SummaryPayload {
    role: String,
    #[serde(default)]
    search_text: Option<String>,
    #[serde(default)]
    filters: FilterSelection,
    records: Vec<VoterRecord>,
}

fn run_summary(payload_json: &str) -> FFIResult<VoterSummary> {
    let payload: SummaryPayload = serde_json::from_str(payload_json)?;
    let denied = || ServiceError::PermissionDenied(format!("Role '{}' may not view the dashboard", payload.role));

    let role = Role::from_str(&payload.role).ok_or_else(denied)?;
    let core = globals::get_core()?;
    let filters = payload.filters.into_spec::<VoterRecord>().spec;

    let summary = core
        .facade()
        .summarize_voters(role, &payload.records, payload.search_text.as_deref(), &filters)
        .ok_or_else(denied)?;
    Ok(summary)
}

/// Dashboard tallies over the voters in the payload after search and
/// filters. Returns `PermissionDenied` for roles without dashboard access.
///
/// # Safety
/// Same contract as `canvass_query_voters`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn canvass_voter_summary(payload_json: *const c_char, result: *mut *mut c_char) -> c_int {
    handle_status_result(|| {
        let json = unsafe { c_str_arg(payload_json, "payload_json")? };
        let summary = run_summary(json)?;
        unsafe { write_json_result(result, &summary) }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CoreConfig;
    use crate::domains::voter::fixtures::sample_voters;
    use crate::ffi::error::ErrorCode;
    use std::ffi::{CStr, CString};

    fn ensure_core() {
        if !globals::is_initialized() {
            // Another test may win the race; either way the defaults are in place
            let _ = globals::initialize(CoreConfig::default());
        }
    }

    fn voters_payload(extra: serde_json::Value) -> String {
        let mut payload = serde_json::json!({ "records": sample_voters() });
        if let (Some(target), Some(fields)) = (payload.as_object_mut(), extra.as_object()) {
            for (key, value) in fields {
                target.insert(key.clone(), value.clone());
            }
        }
        payload.to_string()
    }

    #[test]
    fn test_run_query_voters() {
        ensure_core();
        let json = voters_payload(serde_json::json!({
            "role": "field_volunteer",
            "filters": { "gender": "F", "caste": null, "mood": "happy" },
            "sort": { "field": "age", "direction": "descending" },
            "page": { "page": 1, "per_page": 2 }
        }));

        let page = run_query::<VoterRecord>(&json).unwrap();
        assert!(!page.permission_denied);
        assert_eq!(page.total_count, 3);
        assert_eq!(page.records.iter().map(|v| v.id.as_str()).collect::<Vec<_>>(), vec!["v6", "v4"]);
        assert_eq!(page.total_pages, Some(2));
        assert_eq!(page.ignored_filters, vec!["mood"]);
    }

    #[test]
    fn test_unknown_role_is_denied() {
        ensure_core();
        let json = voters_payload(serde_json::json!({ "role": "mukhiya" }));
        let page = run_query::<VoterRecord>(&json).unwrap();
        assert!(page.permission_denied);
        assert!(page.records.is_empty());
    }

    #[test]
    fn test_malformed_payload() {
        ensure_core();
        let err = run_query::<VoterRecord>("{\"role\": \"party\"}").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidArgument);
    }

    #[test]
    fn test_canvass_query_users_denied_for_candidate() {
        ensure_core();
        let payload = CString::new(
            r#"{"role":"candidate","records":[{"id":"u1","name":"Rakesh Verma","role":"field_volunteer"}]}"#,
        )
        .unwrap();
        let mut out: *mut c_char = std::ptr::null_mut();

        let status = unsafe { canvass_query_users(payload.as_ptr(), &mut out) };
        assert_eq!(status, 0);

        let json = unsafe { CStr::from_ptr(out) }.to_str().unwrap().to_string();
        unsafe { crate::ffi::core::canvass_free_string(out) };
        let page: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(page["permission_denied"], true);
        assert_eq!(page["records"], serde_json::json!([]));
    }

    #[test]
    fn test_run_summary() {
        ensure_core();
        let json = voters_payload(serde_json::json!({ "role": "candidate", "filters": { "booth": "B-103" } }));
        let summary = run_summary(&json).unwrap();
        assert_eq!(summary.total, 2);

        let json = voters_payload(serde_json::json!({ "role": "nobody" }));
        assert_eq!(run_summary(&json).unwrap_err().code, ErrorCode::PermissionDenied);
    }
}
