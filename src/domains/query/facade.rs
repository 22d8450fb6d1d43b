use std::cmp::Ordering;
use std::sync::Arc;

use crate::auth::AuthContext;
use crate::domains::filter::evaluator::value_contains;
use crate::domains::filter::{FieldValue, FilterEngine, FilterSelection, FilterSpec, FilterableRecord};
use crate::domains::permission::PermissionRegistry;
use crate::domains::query::types::{QueryRequest, SortDirection, SortSpec, VisiblePage};
use crate::domains::voter::{VoterField, VoterRecord, VoterSummary};
use crate::errors::ServiceResult;
use crate::types::{Action, PaginationParams, Resource, Role};

/// Entry point for list and dashboard screens.
///
/// A query runs these steps in order, each a pure function of its inputs:
/// 1. permission gate (`read` or `list_all` on the resource, fail closed)
/// 2. free-text search, OR across the schema's searchable fields
/// 3. filter spec, AND across predicates
/// 4. optional stable sort
/// 5. optional pagination
#[derive(Debug, Clone)]
pub struct QueryFacade {
    permissions: Arc<PermissionRegistry>,
    engine: FilterEngine,
    max_per_page: u32,
}

impl QueryFacade {
    pub fn new(permissions: Arc<PermissionRegistry>, engine: FilterEngine, max_per_page: u32) -> Self {
        Self {
            permissions,
            engine,
            max_per_page,
        }
    }

    pub fn permissions(&self) -> &PermissionRegistry {
        &self.permissions
    }

    pub fn engine(&self) -> &FilterEngine {
        &self.engine
    }

    pub fn has_permission(&self, role: Role, resource: Resource, action: Action) -> bool {
        self.permissions.has_permission(role, resource, action)
    }

    /// Gate for action buttons and menu items
    pub fn authorize(&self, ctx: &AuthContext, resource: Resource, action: Action) -> ServiceResult<()> {
        ctx.authorize(&self.permissions, resource, action)
    }

    pub fn query<R>(
        &self,
        role: Role,
        resource: Resource,
        records: &[R],
        request: &QueryRequest<R::Field>,
    ) -> VisiblePage<R>
    where
        R: FilterableRecord + Clone,
    {
        if !self.may_list::<R>(role, resource) {
            return VisiblePage::denied();
        }

        let mut visible = self.visible_records(records, request.search_text.as_deref(), &request.filters);

        if let Some(sort) = &request.sort {
            sort_records(&mut visible, sort);
        }

        let total_count = visible.len();
        let (page_records, page, per_page, total_pages) = match request.page {
            Some(params) => {
                let params = params.normalized(self.max_per_page);
                let slice: Vec<R> = visible
                    .into_iter()
                    .skip(params.offset())
                    .take(params.per_page as usize)
                    .cloned()
                    .collect();
                (
                    slice,
                    Some(params.page),
                    Some(params.per_page),
                    Some(params.total_pages(total_count)),
                )
            }
            None => (visible.into_iter().cloned().collect(), None, None, None),
        };

        log::debug!(
            "{} query by {}: {} in, {} matched, {} returned",
            resource.as_str(),
            role.as_str(),
            records.len(),
            total_count,
            page_records.len()
        );

        VisiblePage {
            records: page_records,
            total_count,
            active_filter_count: request.filters.active_count(),
            permission_denied: false,
            page,
            per_page,
            total_pages,
            ignored_filters: Vec::new(),
        }
    }

    /// Same as `query`, starting from a screen's key/value filter state.
    /// Keys that cannot be applied are listed in `ignored_filters`.
    #[allow(clippy::too_many_arguments)]
    pub fn query_with_selections<R>(
        &self,
        role: Role,
        resource: Resource,
        records: &[R],
        search_text: Option<&str>,
        selections: &FilterSelection,
        sort: Option<SortSpec<R::Field>>,
        page: Option<PaginationParams>,
    ) -> VisiblePage<R>
    where
        R: FilterableRecord + Clone,
    {
        let parsed = selections.into_spec::<R>();
        let request = QueryRequest {
            search_text: search_text.map(str::to_string),
            filters: parsed.spec,
            sort,
            page,
        };

        let mut visible = self.query(role, resource, records, &request);
        if !visible.permission_denied {
            visible.ignored_filters = parsed.ignored;
        }
        visible
    }

    /// Dashboard tallies over the voters a role can see after search and
    /// filters. `None` when the role lacks dashboard or voter list access.
    pub fn summarize_voters(
        &self,
        role: Role,
        records: &[VoterRecord],
        search_text: Option<&str>,
        filters: &FilterSpec<VoterField>,
    ) -> Option<VoterSummary> {
        if !self.permissions.has_permission(role, Resource::Dashboard, Action::Read)
            || !self.may_list::<VoterRecord>(role, Resource::Voters)
        {
            return None;
        }
        let visible = self.visible_records(records, search_text, filters);
        Some(VoterSummary::from_records(
            visible,
            self.engine.castes(),
            self.engine.alliances(),
        ))
    }

    fn may_list<R: FilterableRecord>(&self, role: Role, resource: Resource) -> bool {
        if resource != R::RESOURCE {
            log::warn!(
                "Refusing {} query over {} records",
                resource.as_str(),
                R::RESOURCE.as_str()
            );
            return false;
        }
        self.permissions.can_list(role, resource)
    }

    /// Search pass followed by the filter pass
    fn visible_records<'r, R: FilterableRecord>(
        &self,
        records: &'r [R],
        search_text: Option<&str>,
        filters: &FilterSpec<R::Field>,
    ) -> Vec<&'r R> {
        let searched = search(records, search_text);
        self.engine.apply_refs(searched, filters)
    }
}

/// Keeps records where any searchable field contains `search_text`, ignoring
/// case. Blank search text keeps everything.
pub fn search<'r, R: FilterableRecord>(records: &'r [R], search_text: Option<&str>) -> Vec<&'r R> {
    let needle = match search_text.map(str::trim).filter(|text| !text.is_empty()) {
        Some(text) => text.to_lowercase(),
        None => return records.iter().collect(),
    };
    records
        .iter()
        .filter(|record| {
            R::search_fields()
                .iter()
                .any(|field| value_contains(record.value(*field), &needle))
        })
        .collect()
}

/// Stable; missing values go last whatever the direction.
fn sort_records<R: FilterableRecord>(records: &mut [&R], sort: &SortSpec<R::Field>) {
    records.sort_by(|a, b| compare_for_sort(a.value(sort.field), b.value(sort.field), sort.direction));
}

fn compare_for_sort(a: FieldValue<'_>, b: FieldValue<'_>, direction: SortDirection) -> Ordering {
    match (a.is_missing(), b.is_missing()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => {
            let ordering = a.sort_cmp(&b);
            match direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        }
    }
}
