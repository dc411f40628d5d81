//! Fault-mask fingerprinting
//!
//! `mask_to_index` turns a fault bitmask into a positional base-`(N+K)`
//! encoding of its set bits, a perfect hash over the fault masks that
//! actually occur (at most `K` bits set, each below `N+K`), cheap enough
//! to compute per lookup without a hash table. `max_hash` bounds the
//! result so an out-of-range value can be rejected in O(1) before ever
//! touching the lookup table.
//!
//! Grounded in `CodingTable.cpp`'s `Mask2Index`, `_MaxHash` and
//! `_MatrixCount` (the portable, non-assembly fallback branch).

/// Encode the set bits of `mask` (scanned ascending, over `blocks` total
/// bit positions) into a single fingerprint value.
///
/// `sum <- sum * blocks + (bit_index + 1)` for every set bit, ascending.
/// The `+1` offset reserves `0` to mean "no bits scanned yet so far",
/// which is also why a fingerprint of exactly `0` (the empty mask) is
/// treated as out of range by [`max_hash`]'s caller: there is no
/// coding matrix for zero faults.
pub fn mask_to_index(mask: u32, blocks: usize) -> usize {
    let mut sum = 0usize;
    for index in 0..blocks {
        if mask & (1 << index) != 0 {
            sum = sum * blocks + (index + 1);
        }
    }
    sum
}

/// Upper bound on the fingerprint produced by [`mask_to_index`] for any
/// mask with at most `k` bits set out of `n + k` total positions. The
/// lookup table is sized `max_hash(n, k) + 1`.
pub fn max_hash(n: usize, k: usize) -> usize {
    let m = n + k;
    let mut sum = 0usize;
    let mut factor = 1usize;
    for i in 0..k {
        sum += (m - i) * factor;
        factor *= m;
    }
    sum
}

/// Total number of recoverable fault subsets of size `1..=k` out of
/// `n + k` blocks: `sum_{i=1..=k} C(n+k, i)`.
pub fn matrix_count(n: usize, k: usize) -> usize {
    let m = n + k;
    (1..=k).map(|i| binomial(m, i)).sum()
}

fn binomial(n: usize, k: usize) -> usize {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut numerator = 1u128;
    let mut denominator = 1u128;
    for i in 0..k {
        numerator *= (n - i) as u128;
        denominator *= (i + 1) as u128;
    }
    (numerator / denominator) as usize
}
