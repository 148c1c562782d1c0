//! Domain errors raised at the input boundary.

use thiserror::Error;

/// The only domain failure: a metric outside its hard domain.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("{field} = {value} is invalid: {reason}")]
    InvalidInput {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },
}

impl InputError {
    pub fn field(&self) -> &'static str {
        match self {
            InputError::InvalidInput { field, .. } => field,
        }
    }
}
