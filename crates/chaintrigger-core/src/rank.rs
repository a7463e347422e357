//! Closed-form arithmetic for trigger-code assignment.
//!
//! The table is *defined* by enumeration order (see [`crate::powerset`]);
//! the functions here compute the same assignment without materializing it.
//! An arity block starts at code `2^arity - 1`; inside it, a subset's offset
//! is the count of smaller same-arity subsets, split into a size offset and
//! a lexicographic rank. All inputs are assumed valid for a single-byte
//! table (arity at most 7); callers do the range checks.

use crate::subset::TopicSubset;

/// Binomial coefficient C(n, k). Exact for the small domain used here
/// (n at most 8).
pub fn binomial(n: u8, k: u8) -> u32 {
    if k > n {
        return 0;
    }
    let k = u32::from(k.min(n - k));
    let n = u32::from(n);
    let mut c = 1u32;
    for i in 0..k {
        c = c * (n - i) / (i + 1);
    }
    c
}

/// First code of an arity block: `2^arity - 1`.
///
/// Codes below it cover every smaller arity, `2^a` subsets each.
pub fn arity_floor(arity: u8) -> u8 {
    ((1u16 << arity) - 1) as u8
}

/// Offset of the first size-`size` subset within its arity block.
pub fn size_offset(arity: u8, size: u8) -> u32 {
    (0..size).map(|k| binomial(arity, k)).sum()
}

/// Lexicographic rank of `subset` among the same-size subsets of `arity`.
pub fn subset_rank(arity: u8, subset: TopicSubset) -> u32 {
    let size = subset.len() as u8;
    let mut rank = 0u32;
    let mut next_candidate = 0u8;
    for (i, index) in subset.indices().enumerate() {
        // Count combinations whose i-th element lands below `index`.
        for skipped in next_candidate..index {
            rank += binomial(arity - 1 - skipped, size - 1 - i as u8);
        }
        next_candidate = index + 1;
    }
    rank
}

/// Inverse of [`subset_rank`]: the rank-th size-`size` subset of `arity`.
///
/// The caller guarantees `rank < C(arity, size)`.
pub fn subset_unrank(arity: u8, size: u8, rank: u32) -> TopicSubset {
    let mut subset = TopicSubset::EMPTY;
    let mut rank = rank;
    let mut candidate = 0u8;
    for picked in 0..size {
        loop {
            let with_candidate = binomial(arity - 1 - candidate, size - 1 - picked);
            if rank < with_candidate {
                break;
            }
            rank -= with_candidate;
            candidate += 1;
        }
        subset.insert(candidate);
        candidate += 1;
    }
    subset
}

/// Closed-form trigger code for a valid `(arity, subset)` pair.
pub fn code_of(arity: u8, subset: TopicSubset) -> u8 {
    let offset = size_offset(arity, subset.len() as u8) + subset_rank(arity, subset);
    arity_floor(arity) + offset as u8
}

/// Closed-form decode: the `(arity, subset)` pair a code stands for.
///
/// Total over codes 0..=0xfe; 0xff is outside every single-byte table
/// (the arity-7 table ends at 0xfe) and the caller's range check keeps it
/// out.
pub fn pattern_of(code: u8) -> (u8, TopicSubset) {
    debug_assert!(code != u8::MAX, "code 0xff is outside every single-byte table");

    let mut arity = 0u8;
    while arity < 7 && arity_floor(arity + 1) <= code {
        arity += 1;
    }

    let mut offset = u32::from(code - arity_floor(arity));
    let mut size = 0u8;
    while size < arity {
        let block = binomial(arity, size);
        if offset < block {
            break;
        }
        offset -= block;
        size += 1;
    }

    (arity, subset_unrank(arity, size, offset))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::powerset::subsets_upto;

    fn set(indices: &[u8]) -> TopicSubset {
        TopicSubset::from_indices(indices.iter().copied())
    }

    #[test]
    fn binomial_small_values() {
        assert_eq!(binomial(0, 0), 1);
        assert_eq!(binomial(4, 0), 1);
        assert_eq!(binomial(4, 1), 4);
        assert_eq!(binomial(4, 2), 6);
        assert_eq!(binomial(4, 4), 1);
        assert_eq!(binomial(7, 3), 35);
        assert_eq!(binomial(8, 4), 70);
        assert_eq!(binomial(3, 5), 0);
    }

    #[test]
    fn binomial_rows_sum_to_powers_of_two() {
        for n in 0..=8u8 {
            let row: u32 = (0..=n).map(|k| binomial(n, k)).sum();
            assert_eq!(row, 1 << n);
        }
    }

    #[test]
    fn arity_floors() {
        let expected = [0u8, 1, 3, 7, 15, 31, 63, 127];
        for (arity, floor) in expected.iter().enumerate() {
            assert_eq!(arity_floor(arity as u8), *floor);
        }
    }

    #[test]
    fn size_offsets_for_arity_four() {
        assert_eq!(size_offset(4, 0), 0);
        assert_eq!(size_offset(4, 1), 1);
        assert_eq!(size_offset(4, 2), 5);
        assert_eq!(size_offset(4, 3), 11);
        assert_eq!(size_offset(4, 4), 15);
    }

    #[test]
    fn rank_follows_lexicographic_order() {
        // Arity 4, size 2: (0,1) (0,2) (0,3) (1,2) (1,3) (2,3).
        let order = [
            set(&[0, 1]),
            set(&[0, 2]),
            set(&[0, 3]),
            set(&[1, 2]),
            set(&[1, 3]),
            set(&[2, 3]),
        ];
        for (rank, subset) in order.iter().enumerate() {
            assert_eq!(subset_rank(4, *subset), rank as u32);
            assert_eq!(subset_unrank(4, 2, rank as u32), *subset);
        }
    }

    #[test]
    fn rank_unrank_round_trip_everywhere() {
        for arity in 0..=7u8 {
            for size in 0..=arity {
                for rank in 0..binomial(arity, size) {
                    let subset = subset_unrank(arity, size, rank);
                    assert_eq!(subset.len() as u8, size);
                    assert_eq!(subset_rank(arity, subset), rank);
                }
            }
        }
    }

    #[test]
    fn known_codes() {
        assert_eq!(code_of(0, set(&[])), 0x00);
        assert_eq!(code_of(2, set(&[0, 1])), 0x06);
        assert_eq!(code_of(3, set(&[0, 1, 2])), 0x0e);
        assert_eq!(code_of(4, set(&[1, 3])), 0x18);
        assert_eq!(code_of(4, set(&[0, 1, 2, 3])), 0x1e);
    }

    #[test]
    fn closed_forms_agree_with_enumeration() {
        // Full single-byte space: 255 assignments for max arity 7.
        for (code, (arity, subset)) in subsets_upto(7).enumerate() {
            assert_eq!(code_of(arity, subset) as usize, code);
            assert_eq!(pattern_of(code as u8), (arity, subset));
        }
    }
}
