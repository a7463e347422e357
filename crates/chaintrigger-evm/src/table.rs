//! The canonical LOG0..LOG4 byte table.
//!
//! EVM logs carry zero to four indexed topics, so the trigger table for the
//! LOG opcode family covers arities 0..=4: 31 codes, `0x00..=0x1e`. Config
//! bytes written by one deployment are decoded by another, which is why
//! [`MAX_LOG_TOPICS`] is a fixed contract and not a tunable.

use std::sync::OnceLock;

use chaintrigger_core::{TopicSubset, TriggerCode, TriggerCodeError, TriggerCodec, TriggerPattern};

/// Topic slots an EVM LOG opcode can carry: LOG0 through LOG4.
pub const MAX_LOG_TOPICS: u8 = 4;

static TABLE: OnceLock<TriggerCodec> = OnceLock::new();

/// The process-wide trigger table for the LOG0..LOG4 opcode family.
///
/// Built on first access and shared by every caller thereafter.
pub fn log_trigger_table() -> &'static TriggerCodec {
    TABLE.get_or_init(|| {
        TriggerCodec::new(MAX_LOG_TOPICS).expect("LOG table arity is within the single-byte bound")
    })
}

/// Encode an `(arity, topics)` pair against the LOG0..LOG4 table.
pub fn encode_trigger(arity: u8, topics: TopicSubset) -> Result<TriggerCode, TriggerCodeError> {
    log_trigger_table().encode(arity, topics)
}

/// Decode a config byte against the LOG0..LOG4 table.
pub fn decode_trigger(code: u8) -> Result<TriggerPattern, TriggerCodeError> {
    log_trigger_table().decode(TriggerCode::new(code))
}
