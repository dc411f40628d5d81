//! Coding table: every recoverable fault set, precomputed once per session
//!
//! Grounded in `CodingTable.cpp`: for every fault-block count `1..=k`, for
//! every `k`-subset of the `n+k` blocks (in [`crate::coding::combination`]'s
//! canonical order), build the [`CodingMatrix`] for that fault set and
//! record it at a dense index addressed via
//! [`crate::coding::mask_index::mask_to_index`].

use crate::coding::coding_matrix::CodingMatrix;
use crate::coding::combination::CombinationIter;
use crate::coding::encoding_matrix::build_encoding_matrix;
use crate::coding::mask_index::{mask_to_index, max_hash};
use crate::error::{Error, Result};

/// Sentinel for "no coding matrix at this fingerprint".
const NO_MATRIX: usize = usize::MAX;

/// Every coding matrix recoverable for a given `(N, K)`, indexed by fault
/// mask through a dense fingerprint lookup.
pub struct CodingTable {
    matrices: Vec<CodingMatrix>,
    /// Indexed by `mask_to_index(mask, n + k)`; `NO_MATRIX` means absent
    /// (either unused or an unrecoverable fault count).
    lookup: Vec<usize>,
}

impl CodingTable {
    /// Build the full coding table for `n` data blocks and `k` ECC
    /// blocks.
    pub fn build(n: usize, k: usize) -> Result<Self> {
        let total = n + k;
        let encoding_matrix = build_encoding_matrix(n, k);

        let hash_bound = max_hash(n, k);
        let mut lookup = vec![NO_MATRIX; hash_bound + 1];
        let mut matrices = Vec::new();

        for fault_count in 1..=k {
            for tuple in CombinationIter::new(total, fault_count) {
                let mask = tuple.iter().fold(0u32, |acc, &i| acc | (1 << i));
                let cm = CodingMatrix::build(mask, &encoding_matrix, n).ok_or_else(|| {
                    Error::Configuration(format!(
                        "encoding matrix failed to produce a recovery matrix for mask {mask:#x}"
                    ))
                })?;

                let index = matrices.len();
                matrices.push(cm);

                let hash = mask_to_index(mask, total);
                lookup[hash] = index;
            }
        }

        Ok(CodingTable { matrices, lookup })
    }

    /// Look up the coding matrix for `invalid_mask`. Returns `None` if the
    /// mask names more faults than `K`, or any other mask this table was
    /// never built for.
    pub fn lookup(&self, invalid_mask: u32, total_blocks: usize) -> Option<&CodingMatrix> {
        let hash = mask_to_index(invalid_mask, total_blocks);
        if hash == 0 || hash >= self.lookup.len() {
            return None;
        }
        let index = self.lookup[hash];
        if index == NO_MATRIX {
            None
        } else {
            Some(&self.matrices[index])
        }
    }

    /// Number of distinct fault sets this table has a coding matrix for.
    pub fn len(&self) -> usize {
        self.matrices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matrices.is_empty()
    }
}
