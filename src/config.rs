//! Block configuration for a reliability group
//!
//! A `BlockConfig` is the immutable `(BlockSize, N, K)` triple that a
//! [`crate::session::Session`] is built from. Validation happens once, at
//! construction, so every downstream component (the coding table, the
//! kernels) can assume the configuration is in range.

use crate::error::{Error, Result};

/// Minimum number of data blocks supported.
pub const MIN_N: usize = 1;
/// Maximum number of data blocks supported.
pub const MAX_N: usize = 16;
/// Minimum number of ECC blocks supported.
pub const MIN_K: usize = 1;
/// Maximum number of ECC blocks supported.
pub const MAX_K: usize = 4;
/// Maximum total blocks in a reliability group (`N + K`).
pub const MAX_TOTAL_BLOCKS: usize = 17;
/// Maximum simultaneous open sessions in the registry.
pub const MAX_SESSIONS: usize = 20;

/// Required alignment, in bytes, for every block pointer passed to the core.
pub const BLOCK_ALIGNMENT: usize = 16;

/// Coarsest XOR-kernel stride, in bytes: four 128-bit bit-slices per
/// element. `BlockSize` must be a multiple of this so no backend needs a
/// scalar tail loop (see the resolved "WriteDelta block-size multiples"
/// open question).
pub const KERNEL_STRIDE: usize = 64;

/// Immutable `(BlockSize, N, K)` configuration for a reliability group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockConfig {
    block_size: usize,
    data_blocks: usize,
    ecc_blocks: usize,
}

impl BlockConfig {
    /// Validate and build a configuration.
    ///
    /// Rejects `N`, `K`, or `BlockSize` outside their supported ranges.
    pub fn new(block_size: usize, data_blocks: usize, ecc_blocks: usize) -> Result<Self> {
        if !(MIN_N..=MAX_N).contains(&data_blocks) {
            return Err(Error::Configuration(format!(
                "data_blocks (N) must be in [{MIN_N}, {MAX_N}], got {data_blocks}"
            )));
        }
        if !(MIN_K..=MAX_K).contains(&ecc_blocks) {
            return Err(Error::Configuration(format!(
                "ecc_blocks (K) must be in [{MIN_K}, {MAX_K}], got {ecc_blocks}"
            )));
        }
        if data_blocks + ecc_blocks > MAX_TOTAL_BLOCKS {
            return Err(Error::Configuration(format!(
                "N + K must be <= {MAX_TOTAL_BLOCKS}, got {}",
                data_blocks + ecc_blocks
            )));
        }
        if block_size == 0 || block_size % KERNEL_STRIDE != 0 {
            return Err(Error::Configuration(format!(
                "block_size must be a positive multiple of {KERNEL_STRIDE}, got {block_size}"
            )));
        }
        Ok(Self {
            block_size,
            data_blocks,
            ecc_blocks,
        })
    }

    #[inline]
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    #[inline]
    pub fn data_blocks(&self) -> usize {
        self.data_blocks
    }

    #[inline]
    pub fn ecc_blocks(&self) -> usize {
        self.ecc_blocks
    }

    #[inline]
    pub fn total_blocks(&self) -> usize {
        self.data_blocks + self.ecc_blocks
    }
}

/// Returns `true` if every pointer in `blocks` is aligned to
/// [`BLOCK_ALIGNMENT`] bytes. Mirrors the original's "bitwise-or of low
/// bits" trick: ORing every address together and masking once is cheaper
/// than branching per pointer.
pub fn all_aligned(blocks: &[*const u8]) -> bool {
    let mash = blocks
        .iter()
        .fold(0usize, |acc, &p| acc | (p as usize));
    mash & (BLOCK_ALIGNMENT - 1) == 0
}
