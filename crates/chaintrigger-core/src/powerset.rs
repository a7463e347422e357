//! Canonical enumeration of topic-slot subsets.
//!
//! Subsets of `{0, .., arity-1}` are yielded smallest size first, and within
//! one size in lexicographic order of the ascending index tuples. For arity
//! 4 the size-2 run is (0,1), (0,2), (0,3), (1,2), (1,3), (2,3). Trigger
//! codes are assigned by walking this sequence arity by arity, so the order
//! is part of the wire contract and must never change.

use crate::subset::{TopicSubset, MAX_SLOTS};

/// Enumerate every subset of `{0, .., arity-1}` in canonical order.
///
/// Yields exactly `2^arity` subsets, the empty set first and the full set
/// last. Restartable: two calls with the same arity produce identical
/// sequences. Panics if `arity` exceeds the slot capacity of
/// [`TopicSubset`].
pub fn subsets(arity: u8) -> SubsetSequence {
    assert!(arity <= MAX_SLOTS, "arity {arity} exceeds {MAX_SLOTS} slots");
    SubsetSequence {
        arity,
        size: 0,
        slots: [0; MAX_SLOTS as usize],
        size_started: false,
        remaining: 1usize << arity,
    }
}

/// Enumerate `(arity, subset)` pairs for every arity in `0..=max_arity`,
/// smaller arities first, each arity's subsets in canonical order.
///
/// This is exactly the walk that assigns trigger codes: the n-th pair of
/// this sequence gets code n.
pub fn subsets_upto(max_arity: u8) -> impl Iterator<Item = (u8, TopicSubset)> {
    (0..=max_arity).flat_map(|arity| subsets(arity).map(move |subset| (arity, subset)))
}

/// Lazy iterator over the canonical subset sequence of one arity.
///
/// Holds the current combination as ascending indices in `slots[..size]`
/// and steps it with the textbook next-combination rule: bump the rightmost
/// index that can still grow, then reset everything after it.
#[derive(Debug, Clone)]
pub struct SubsetSequence {
    arity: u8,
    size: u8,
    slots: [u8; MAX_SLOTS as usize],
    size_started: bool,
    remaining: usize,
}

impl SubsetSequence {
    fn rewind_size(&mut self) {
        for i in 0..self.size as usize {
            self.slots[i] = i as u8;
        }
        self.size_started = true;
    }

    /// Step to the next same-size combination; false when the size block is
    /// exhausted.
    fn advance_within_size(&mut self) -> bool {
        let size = self.size as usize;
        let mut i = size;
        while i > 0 {
            i -= 1;
            if self.slots[i] < self.arity - self.size + i as u8 {
                self.slots[i] += 1;
                for j in i + 1..size {
                    self.slots[j] = self.slots[j - 1] + 1;
                }
                return true;
            }
        }
        false
    }

    fn current(&self) -> TopicSubset {
        TopicSubset::from_indices(self.slots[..self.size as usize].iter().copied())
    }
}

impl Iterator for SubsetSequence {
    type Item = TopicSubset;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        if !self.size_started {
            self.rewind_size();
        } else if !self.advance_within_size() {
            self.size += 1;
            self.rewind_size();
        }
        self.remaining -= 1;
        Some(self.current())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for SubsetSequence {}

impl std::iter::FusedIterator for SubsetSequence {}
