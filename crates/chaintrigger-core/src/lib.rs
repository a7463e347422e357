//! # chaintrigger-core
//!
//! Trigger-code codec: a deterministic bijection between single-byte codes
//! and (log arity, topic-slot subset) pairs. A code names *which* topic
//! slots of a log event a trigger constrains, never the values in them.
//!
//! Codes are assigned by enumerating, for each arity from 0 upward, every
//! subset of that arity's slots in canonical order: smaller subsets first,
//! lexicographic within one size. The assignment is dense, stable, and
//! checked against closed-form arithmetic. The EVM LOG0..LOG4 byte table
//! built on top of this lives in `chaintrigger-evm`.

pub mod codec;
pub mod error;
pub mod powerset;
pub mod rank;
pub mod subset;

pub use codec::{TriggerCode, TriggerCodec, TriggerPattern, MAX_SUPPORTED_ARITY};
pub use error::TriggerCodeError;
pub use powerset::{subsets, subsets_upto, SubsetSequence};
pub use subset::{TopicIndices, TopicSubset};
