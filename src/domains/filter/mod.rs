pub mod engine;
pub mod evaluator;
pub mod predicate;
pub mod record;
pub mod selection;

pub use engine::FilterEngine;
pub use evaluator::{parse_flag, PredicateEvaluator};
pub use predicate::{is_age_bracket, Derivation, FilterPredicate, FilterSpec, SetResolver, AGE_BRACKETS, ALL_SENTINEL};
pub use record::{FieldKind, FieldValue, FilterableRecord, RecordField};
pub use selection::{parse_range, FilterSelection, ParsedSelection};
