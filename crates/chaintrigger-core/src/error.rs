//! Error types for the trigger-code codec.

use thiserror::Error;

/// Errors from building a code table or translating codes.
///
/// Every variant indicates a caller-side contract violation; the codec
/// itself is total over its declared domain and never clamps.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TriggerCodeError {
    #[error("Invalid topic subset for LOG{arity}: {reason}")]
    InvalidSubset { arity: u8, reason: String },

    #[error("Trigger code {code:#04x} out of range (max {max_code:#04x})")]
    CodeOutOfRange { code: u8, max_code: u8 },

    #[error("Max arity {max_arity} unsupported: single-byte codes cap max arity at {limit}")]
    UnsupportedMaxArity { max_arity: u8, limit: u8 },
}
