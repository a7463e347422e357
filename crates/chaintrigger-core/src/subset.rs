//! Topic-slot subsets represented as bitsets.
//!
//! A `TopicSubset` names *which* positional topic slots of a log event a
//! trigger constrains. It carries no topic values and no arity; pairing a
//! subset with an arity (and validating the pair) is the codec's job.

use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Slot capacity of a `TopicSubset`: indices 0..=7 pack into one byte,
/// matching the single-byte trigger-code space.
pub const MAX_SLOTS: u8 = 8;

/// A set of topic-slot indices represented as a bitset.
///
/// Bit i (counting from the LSB) is set if slot i is in the subset.
/// Insert, remove, and contains are O(1). Identity is mask equality, so
/// insertion order and duplicates are irrelevant.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TopicSubset(u8);

impl TopicSubset {
    /// The empty subset.
    pub const EMPTY: Self = Self(0);

    /// Build a subset from slot indices.
    ///
    /// Panics if any index is 8 or more; checking indices against an arity
    /// is done by [`TriggerCodec::encode`](crate::TriggerCodec::encode).
    pub fn from_indices<I: IntoIterator<Item = u8>>(indices: I) -> Self {
        let mut set = Self::EMPTY;
        for index in indices {
            set.insert(index);
        }
        set
    }

    /// Build a subset from a raw bitmask.
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    /// Check if the subset contains a slot index.
    pub fn contains(self, index: u8) -> bool {
        index < MAX_SLOTS && (self.0 >> index) & 1 != 0
    }

    /// Insert a slot index.
    ///
    /// Panics if `index >= 8`.
    pub fn insert(&mut self, index: u8) {
        assert!(index < MAX_SLOTS, "topic slot index {index} out of range");
        self.0 |= 1 << index;
    }

    /// Remove a slot index.
    pub fn remove(&mut self, index: u8) {
        if index < MAX_SLOTS {
            self.0 &= !(1 << index);
        }
    }

    /// Number of slots in the subset (population count).
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Check if the subset is empty.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// The underlying bitmask.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Highest slot index in the subset, or `None` when empty.
    pub fn max_index(self) -> Option<u8> {
        if self.0 == 0 {
            None
        } else {
            Some(7 - self.0.leading_zeros() as u8)
        }
    }

    /// Iterate over slot indices in ascending order.
    pub fn indices(self) -> TopicIndices {
        TopicIndices {
            bits: self.0,
            index: 0,
        }
    }
}

impl FromIterator<u8> for TopicSubset {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        Self::from_indices(iter)
    }
}

impl fmt::Debug for TopicSubset {
    /// Prints as a set of indices, e.g. `{0, 2}`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.indices()).finish()
    }
}

/// Iterator over the slot indices of a `TopicSubset`, ascending.
#[derive(Debug, Clone)]
pub struct TopicIndices {
    bits: u8,
    index: u8,
}

impl Iterator for TopicIndices {
    type Item = u8;

    fn next(&mut self) -> Option<Self::Item> {
        while self.index < MAX_SLOTS {
            let idx = self.index;
            self.index += 1;

            if (self.bits >> idx) & 1 != 0 {
                return Some(idx);
            }
        }
        None
    }
}

impl std::iter::FusedIterator for TopicIndices {}

// The wire form is an ascending index array, not the raw mask: configs and
// fixtures stay readable, and the mask layout stays private.

impl Serialize for TopicSubset {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for index in self.indices() {
            seq.serialize_element(&index)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for TopicSubset {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct IndexSeq;

        impl<'de> Visitor<'de> for IndexSeq {
            type Value = TopicSubset;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a sequence of topic slot indices in 0..=7")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let mut set = TopicSubset::EMPTY;
                while let Some(index) = seq.next_element::<u8>()? {
                    if index >= MAX_SLOTS {
                        return Err(de::Error::custom(format!(
                            "topic slot index {index} out of range (max 7)"
                        )));
                    }
                    set.insert(index);
                }
                Ok(set)
            }
        }

        deserializer.deserialize_seq(IndexSeq)
    }
}
