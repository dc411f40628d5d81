//! Session: one reliability group's coding table, masks, and entry points
//!
//! Grounded in the original `Session` class: a session is built once from a
//! [`BlockConfig`], builds its [`CodingTable`] up front, and precomputes the
//! three masks (`all`, `data`, `ecc`) used to validate callers' fault masks
//! cheaply. `rebuild`/`encode_delta`/`write_delta` are thin validating
//! wrappers around the coding-core primitives in [`crate::coding`].

use log::{debug, trace};

use crate::config::{all_aligned, BlockConfig};
use crate::coding::coding_table::CodingTable;
use crate::coding::xor_kernel::{self, Backend};
use crate::error::{Error, Result};

/// One reliability group: its configuration, precomputed coding table, and
/// the three block masks (`all`, `data`, `ecc`).
pub struct Session {
    config: BlockConfig,
    table: CodingTable,
    data_mask: u32,
    ecc_mask: u32,
    all_mask: u32,
}

impl Session {
    /// Build a session for `config`, constructing its coding table up
    /// front. This is the only place the coding table is built; every
    /// `rebuild`/`encode_delta` call afterwards is a lookup, not a build.
    pub fn new(config: BlockConfig) -> Result<Self> {
        let n = config.data_blocks();
        let k = config.ecc_blocks();
        let table = CodingTable::build(n, k)?;

        let data_mask = (1u32 << n) - 1;
        let all_mask_full = (1u32 << (n + k)) - 1;
        let ecc_mask = all_mask_full ^ data_mask;

        debug!(
            "session built: n={n} k={k} block_size={} matrices={}",
            config.block_size(),
            table.len()
        );

        Ok(Session {
            config,
            table,
            data_mask,
            ecc_mask,
            all_mask: all_mask_full,
        })
    }

    #[inline]
    pub fn config(&self) -> BlockConfig {
        self.config
    }

    #[inline]
    pub fn data_mask(&self) -> u32 {
        self.data_mask
    }

    #[inline]
    pub fn ecc_mask(&self) -> u32 {
        self.ecc_mask
    }

    #[inline]
    pub fn all_mask(&self) -> u32 {
        self.all_mask
    }

    /// Rebuild either a single faulted block (`which = Some(i)`) or every
    /// block named by `invalid_mask` (`which = None`).
    ///
    /// `invalid_mask = 0` succeeds immediately with no work. A mask with
    /// more bits set than `K` (or any bit outside `all_mask`) is rejected
    /// before any allocation or pointer dereference.
    ///
    /// # Safety
    /// Every entry of `blocks` named by `invalid_mask` or by the coding
    /// matrix's surviving-column set must be a valid pointer to
    /// `config.block_size()` writable/readable bytes respectively, and
    /// `blocks.len()` must be at least `config.total_blocks()`.
    pub unsafe fn rebuild(
        &self,
        invalid_mask: u32,
        blocks: &[*mut u8],
        which: Option<usize>,
    ) -> Result<()> {
        let total = self.config.total_blocks();

        if let Some(w) = which {
            if w >= total {
                return Err(Error::Parameters(format!(
                    "which={w} out of range [0, {total})"
                )));
            }
            if invalid_mask & (1 << w) == 0 {
                return Err(Error::Parameters(format!(
                    "which={w} is not a member of invalid_mask {invalid_mask:#x}"
                )));
            }
        }

        if invalid_mask & !self.all_mask != 0 {
            return Err(Error::Parameters(format!(
                "invalid_mask {invalid_mask:#x} has bits outside the group"
            )));
        }

        let ptrs: Vec<*const u8> = blocks.iter().map(|&p| p as *const u8).collect();
        if !all_aligned(&ptrs) {
            return Err(Error::Alignment(format!(
                "block pointer not aligned to {} bytes",
                crate::config::BLOCK_ALIGNMENT
            )));
        }

        if invalid_mask == 0 {
            trace!("rebuild: invalid_mask=0, nothing to do");
            return Ok(());
        }

        let matrix = self.table.lookup(invalid_mask, total).ok_or_else(|| {
            Error::Unrecoverable(invalid_mask.count_ones() as usize, self.config.ecc_blocks())
        })?;

        trace!("rebuild: invalid_mask={invalid_mask:#x} which={which:?}");
        matrix.rebuild(blocks, which, self.config.block_size(), self.backend());
        Ok(())
    }

    /// Incrementally refresh a single ECC block from a data-block delta,
    /// without touching the other data blocks.
    pub fn encode_delta(
        &self,
        data_index: usize,
        delta: &[u8],
        ecc_index: usize,
        old_ecc: &[u8],
        new_ecc: &mut [u8],
    ) -> Result<()> {
        let n = self.config.data_blocks();
        if data_index >= n {
            return Err(Error::Parameters(format!(
                "data_index={data_index} out of range [0, {n})"
            )));
        }
        let k = self.config.ecc_blocks();
        if ecc_index >= k {
            return Err(Error::Parameters(format!(
                "ecc_index={ecc_index} out of range [0, {k})"
            )));
        }

        let ptrs = [
            delta.as_ptr(),
            old_ecc.as_ptr(),
            new_ecc.as_ptr() as *const u8,
        ];
        if !all_aligned(&ptrs) {
            return Err(Error::Alignment(
                "encode_delta buffer not aligned".to_string(),
            ));
        }

        let ecc_bit = self.config.data_blocks() + ecc_index;
        let mask = 1u32 << ecc_bit;
        let matrix = self
            .table
            .lookup(mask, self.config.total_blocks())
            .ok_or_else(|| Error::Parameters(format!("no ECC block at index {ecc_index}")))?;

        matrix.encode_delta(data_index, delta, old_ecc, new_ecc, self.backend());
        Ok(())
    }

    /// `delta[i] = old[i] XOR new[i]` over a whole block.
    pub fn write_delta(&self, old: &[u8], new: &[u8], delta: &mut [u8]) -> Result<()> {
        let ptrs = [old.as_ptr(), new.as_ptr(), delta.as_ptr() as *const u8];
        if !all_aligned(&ptrs) {
            return Err(Error::Alignment(
                "write_delta buffer not aligned".to_string(),
            ));
        }
        crate::coding::delta_kernel::write_delta(old, new, delta, self.backend());
        Ok(())
    }

    #[inline]
    fn backend(&self) -> Backend {
        xor_kernel::current_backend()
    }
}
