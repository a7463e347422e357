//! # chaintrigger-evm
//!
//! The LOG0..LOG4 byte table for EVM log-event triggers, plus the fixed
//! line-oriented listing format the table is published in. The codec math
//! lives in `chaintrigger-core`; this crate pins the EVM contract: 31
//! codes, `0x00..=0x1e`, one per (opcode arity, topic-slot subset) pair.

pub mod listing;
pub mod table;

pub use listing::{format_line, format_table, parse_line, parse_table, ListingError};
pub use table::{decode_trigger, encode_trigger, log_trigger_table, MAX_LOG_TOPICS};
