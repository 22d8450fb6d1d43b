use std::sync::Arc;

use crate::domains::demographics::{AllianceResolver, CasteCategoryMapper};
use crate::domains::filter::evaluator::PredicateEvaluator;
use crate::domains::filter::predicate::FilterSpec;
use crate::domains::filter::record::FilterableRecord;

/// Narrows record collections by a `FilterSpec` (logical AND).
///
/// The engine never sees screen filter keys; unknown keys are dropped
/// earlier by `FilterSelection::into_spec`, one key at a time.
#[derive(Debug, Clone)]
pub struct FilterEngine {
    castes: Arc<CasteCategoryMapper>,
    alliances: Arc<AllianceResolver>,
}

impl FilterEngine {
    pub fn new(castes: Arc<CasteCategoryMapper>, alliances: Arc<AllianceResolver>) -> Self {
        Self { castes, alliances }
    }

    pub fn castes(&self) -> &CasteCategoryMapper {
        &self.castes
    }

    pub fn alliances(&self) -> &AllianceResolver {
        &self.alliances
    }

    pub fn evaluator(&self) -> PredicateEvaluator<'_> {
        PredicateEvaluator::new(&self.castes, &self.alliances)
    }

    /// True when every predicate matches. Stops at the first miss.
    pub fn matches_all<R: FilterableRecord>(&self, record: &R, spec: &FilterSpec<R::Field>) -> bool {
        let evaluator = self.evaluator();
        spec.iter().all(|predicate| evaluator.matches(record, predicate))
    }

    /// Records satisfying `spec`, in input order. An empty spec keeps everything.
    pub fn apply<'r, R: FilterableRecord>(&self, records: &'r [R], spec: &FilterSpec<R::Field>) -> Vec<&'r R> {
        self.apply_refs(records.iter(), spec)
    }

    pub fn apply_refs<'r, R, I>(&self, records: I, spec: &FilterSpec<R::Field>) -> Vec<&'r R>
    where
        R: FilterableRecord + 'r,
        I: IntoIterator<Item = &'r R>,
    {
        if spec.is_empty() {
            return records.into_iter().collect();
        }
        records
            .into_iter()
            .filter(|record| self.matches_all(*record, spec))
            .collect()
    }

    pub fn count<R: FilterableRecord>(&self, records: &[R], spec: &FilterSpec<R::Field>) -> usize {
        records.iter().filter(|record| self.matches_all(*record, spec)).count()
    }
}

impl Default for FilterEngine {
    fn default() -> Self {
        Self::new(
            Arc::new(CasteCategoryMapper::default()),
            Arc::new(AllianceResolver::default()),
        )
    }
}
