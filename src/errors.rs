use thiserror::Error;

use crate::params::ParamField;

/// Failures of a single tree generation pass. A failed pass publishes nothing;
/// the caller keeps whatever forest it had before.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GenerationError {
    #[error("Popped an empty turtle stack.")]
    EmptyStack,
    #[error("Unmatched ']' at index {index}: popping from an empty turtle stack.")]
    PoppedEmptyStack { index: usize },
}

/// Rejected text input for a generation parameter. The previous value stays in
/// place; callers are expected to re-display it and move on.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParamError {
    #[error("Could not parse {input:?} for {field:?}")]
    Parse { field: ParamField, input: String },
}
