//! The trigger-code table: a total bijection between single-byte codes and
//! (log arity, topic-slot subset) pairs.

use crate::error::TriggerCodeError;
use crate::powerset::subsets_upto;
use crate::rank;
use crate::subset::TopicSubset;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Largest `max_arity` a single-byte code space can carry: the arity-7
/// table assigns 255 codes and fills the byte exactly.
pub const MAX_SUPPORTED_ARITY: u8 = 7;

/// A single-byte trigger code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TriggerCode(u8);

impl TriggerCode {
    pub const fn new(code: u8) -> Self {
        Self(code)
    }

    pub const fn value(self) -> u8 {
        self.0
    }
}

impl From<u8> for TriggerCode {
    fn from(code: u8) -> Self {
        Self(code)
    }
}

impl From<TriggerCode> for u8 {
    fn from(code: TriggerCode) -> Self {
        code.0
    }
}

impl fmt::Display for TriggerCode {
    /// Two lowercase hex digits, the form the table listing uses.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02x}", self.0)
    }
}

/// What a trigger code stands for: a log arity and the topic slots a
/// trigger constrains within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TriggerPattern {
    /// Number of topic slots the log carries (LOG0..LOG4 on the EVM).
    pub arity: u8,
    /// Constrained slot indices; every index is below `arity`.
    pub topics: TopicSubset,
}

/// The materialized code table for arities `0..=max_arity`.
///
/// Codes are assigned by walking the canonical enumeration arity by arity,
/// so the assignment is deterministic and dense from 0. The table is
/// immutable after construction and safe to share across threads.
#[derive(Debug, Clone)]
pub struct TriggerCodec {
    max_arity: u8,
    table: Vec<TriggerPattern>,
}

impl TriggerCodec {
    /// Build the table covering every arity in `0..=max_arity`.
    ///
    /// Rejects `max_arity` above [`MAX_SUPPORTED_ARITY`]: a larger table
    /// would not fit single-byte codes.
    pub fn new(max_arity: u8) -> Result<Self, TriggerCodeError> {
        if max_arity > MAX_SUPPORTED_ARITY {
            return Err(TriggerCodeError::UnsupportedMaxArity {
                max_arity,
                limit: MAX_SUPPORTED_ARITY,
            });
        }

        let mut table = Vec::with_capacity(Self::table_size(max_arity));
        for (arity, topics) in subsets_upto(max_arity) {
            debug_assert_eq!(rank::code_of(arity, topics) as usize, table.len());
            table.push(TriggerPattern { arity, topics });
        }
        debug_assert_eq!(table.len(), Self::table_size(max_arity));

        debug!(max_arity, codes = table.len(), "trigger code table built");
        Ok(Self { max_arity, table })
    }

    /// Number of codes a table for `max_arity` assigns:
    /// `2^(max_arity + 1) - 1`.
    pub fn table_size(max_arity: u8) -> usize {
        (1usize << (u32::from(max_arity) + 1)) - 1
    }

    /// Largest arity this table covers.
    pub fn max_arity(&self) -> u8 {
        self.max_arity
    }

    /// Highest assigned code.
    pub fn max_code(&self) -> TriggerCode {
        TriggerCode((self.table.len() - 1) as u8)
    }

    /// Number of assigned codes.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Always false: even a `max_arity` of 0 assigns one code.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// The unique code of a valid `(arity, topics)` pair.
    ///
    /// The pair is invalid when `arity` exceeds the table's max arity or
    /// any topic index is not below `arity`.
    pub fn encode(&self, arity: u8, topics: TopicSubset) -> Result<TriggerCode, TriggerCodeError> {
        if arity > self.max_arity {
            return Err(TriggerCodeError::InvalidSubset {
                arity,
                reason: format!("arity exceeds table max {}", self.max_arity),
            });
        }
        if let Some(max_index) = topics.max_index() {
            if max_index >= arity {
                return Err(TriggerCodeError::InvalidSubset {
                    arity,
                    reason: format!("topic index {max_index} not below arity"),
                });
            }
        }
        Ok(TriggerCode(rank::code_of(arity, topics)))
    }

    /// The `(arity, topics)` pattern assigned to a code.
    pub fn decode(&self, code: TriggerCode) -> Result<TriggerPattern, TriggerCodeError> {
        self.table
            .get(usize::from(code.value()))
            .copied()
            .ok_or(TriggerCodeError::CodeOutOfRange {
                code: code.value(),
                max_code: self.max_code().value(),
            })
    }

    /// Every assignment in code order, starting at code 0.
    pub fn iter(&self) -> impl Iterator<Item = (TriggerCode, TriggerPattern)> + '_ {
        self.table
            .iter()
            .enumerate()
            .map(|(code, pattern)| (TriggerCode(code as u8), *pattern))
    }
}
