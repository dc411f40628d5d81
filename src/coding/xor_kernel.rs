//! XOR kernel: lowered `GF(2^4)` multiply-accumulate over aligned blocks
//!
//! A block is tiled into consecutive 64-byte "elements"; each element is
//! four 128-bit "hyperwords" (bit-slices). Multiplying a block by a fixed
//! scalar `v` and XOR-accumulating the result into a destination block
//! reduces, per element, to the fixed program from [`crate::coding::bitslice`]
//! applied to that element's four slices. Three backends provide the same
//! semantics at different granularities (32-bit scalar, 64-bit, 128-bit),
//! mirroring the three CPU tiers the original selects between.

use std::sync::atomic::{AtomicU8, Ordering};

use crate::coding::bitslice::{program_for, ProgramStep};
use crate::coding::galois::GfElement;

/// Bytes in one bit-slice (one hyperword).
pub const HYPERWORD_BYTES: usize = 16;
/// Bytes in one element (four hyperwords).
pub const ELEMENT_BYTES: usize = HYPERWORD_BYTES * 4;

/// Which word width the XOR kernel uses to walk a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// 32-bit words, four per hyperword.
    Scalar,
    /// 64-bit words, two per hyperword.
    Simd64,
    /// 128-bit words, one per hyperword.
    Simd128,
}

const UNSET: u8 = 0;
const RANK_SCALAR: u8 = 1;
const RANK_SIMD64: u8 = 2;
const RANK_SIMD128: u8 = 3;

static BACKEND_RANK: AtomicU8 = AtomicU8::new(UNSET);

fn rank_of(backend: Backend) -> u8 {
    match backend {
        Backend::Scalar => RANK_SCALAR,
        Backend::Simd64 => RANK_SIMD64,
        Backend::Simd128 => RANK_SIMD128,
    }
}

fn backend_of(rank: u8) -> Backend {
    match rank {
        RANK_SCALAR => Backend::Scalar,
        RANK_SIMD64 => Backend::Simd64,
        _ => Backend::Simd128,
    }
}

fn detect_backend() -> Backend {
    #[cfg(target_arch = "x86_64")]
    {
        if is_x86_feature_detected!("sse2") {
            return Backend::Simd128;
        }
    }
    Backend::Simd64
}

/// The process-wide backend, detected once on first use and cached for
/// the lifetime of the process.
pub fn current_backend() -> Backend {
    let rank = BACKEND_RANK.load(Ordering::Acquire);
    if rank != UNSET {
        return backend_of(rank);
    }
    let detected = rank_of(detect_backend());
    match BACKEND_RANK.compare_exchange(UNSET, detected, Ordering::AcqRel, Ordering::Acquire) {
        Ok(_) => backend_of(detected),
        Err(actual) => backend_of(actual),
    }
}

/// Force the process-wide backend down to at most `backend`. Never
/// upgrades: if the effective backend (forcing detection if not yet
/// chosen) is already no stronger than `backend`, this is a no-op.
/// Intended for tests that need to exercise the scalar or 64-bit paths on
/// hardware that would otherwise select 128-bit SIMD.
pub fn clamp_backend(backend: Backend) {
    let current = rank_of(current_backend());
    let requested = rank_of(backend);
    if requested < current {
        BACKEND_RANK.store(requested, Ordering::Release);
    }
}

#[inline]
unsafe fn xor_steps_u32(dst: *mut u8, src: *const u8, steps: &[ProgramStep]) {
    let dst_words = dst as *mut u32;
    let src_words = src as *const u32;
    for &(i, j) in steps {
        for lane in 0..4usize {
            let d = dst_words.add(i as usize * 4 + lane);
            let s = src_words.add(j as usize * 4 + lane);
            *d ^= *s;
        }
    }
}

#[inline]
unsafe fn xor_steps_u64(dst: *mut u8, src: *const u8, steps: &[ProgramStep]) {
    let dst_words = dst as *mut u64;
    let src_words = src as *const u64;
    for &(i, j) in steps {
        for lane in 0..2usize {
            let d = dst_words.add(i as usize * 2 + lane);
            let s = src_words.add(j as usize * 2 + lane);
            *d ^= *s;
        }
    }
}

#[inline]
unsafe fn xor_steps_u128(dst: *mut u8, src: *const u8, steps: &[ProgramStep]) {
    let dst_words = dst as *mut u128;
    let src_words = src as *const u128;
    for &(i, j) in steps {
        let d = dst_words.add(i as usize);
        let s = src_words.add(j as usize);
        *d ^= *s;
    }
}

/// `dst[element] ^= v * src[element]` for every `ELEMENT_BYTES`-sized
/// element in the two (equal-length) slices, using the given backend.
///
/// Panics (debug) if `src.len() != dst.len()` or either length is not a
/// multiple of [`ELEMENT_BYTES`]. Callers are responsible for 16-byte
/// pointer alignment, checked once at the session boundary, not per
/// call.
pub fn multiply_accumulate(v: GfElement, src: &[u8], dst: &mut [u8], backend: Backend) {
    debug_assert_eq!(src.len(), dst.len());
    debug_assert_eq!(src.len() % ELEMENT_BYTES, 0);

    if v.is_zero() {
        return;
    }
    let steps = program_for(v.raw());
    if steps.is_empty() {
        return;
    }

    let elements = src.len() / ELEMENT_BYTES;
    for e in 0..elements {
        let off = e * ELEMENT_BYTES;
        let src_ptr = unsafe { src.as_ptr().add(off) };
        let dst_ptr = unsafe { dst.as_mut_ptr().add(off) };
        unsafe {
            match backend {
                Backend::Scalar => xor_steps_u32(dst_ptr, src_ptr, steps),
                Backend::Simd64 => xor_steps_u64(dst_ptr, src_ptr, steps),
                Backend::Simd128 => xor_steps_u128(dst_ptr, src_ptr, steps),
            }
        }
    }
}

/// Zero a block's worth of bytes.
pub fn zero_block(dst: &mut [u8]) {
    dst.fill(0);
}
