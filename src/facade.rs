//! Public entry points: `CreateSession` / `CloseSession` / `Encode` /
//! `Decode` / `Rebuild` / `WriteDelta` / `EncodeDelta` / `SetMethod`
//!
//! Owns the process-wide session registry and dispatches each documented
//! entry point to a [`Session`] method. The thin C-style ABI wrapper that
//! would map [`Error::code`] onto the documented negative integers is out
//! of scope for this crate; what's here is the safe Rust surface such a
//! wrapper would be built on.

use std::sync::OnceLock;

use log::info;

use crate::config::BlockConfig;
use crate::coding::xor_kernel::Backend;
use crate::error::{Error, Result};
use crate::registry::{Handle, Registry};
use crate::session::Session;

fn registry() -> &'static Registry {
    static REGISTRY: OnceLock<Registry> = OnceLock::new();
    REGISTRY.get_or_init(Registry::new)
}

/// Build a session for `config` and register it, returning its handle.
pub fn create_session(config: BlockConfig) -> Result<Handle> {
    let session = Session::new(config)?;
    let handle = registry().add(session)?;
    info!(
        "created session {handle}: n={} k={} block_size={}",
        config.data_blocks(),
        config.ecc_blocks(),
        config.block_size()
    );
    Ok(handle)
}

/// Close `handle`, dropping its session. Idempotent: closing an
/// already-closed or unknown handle is an error, not a panic.
pub fn close_session(handle: Handle) -> Result<()> {
    match registry().remove(handle)? {
        Some(_session) => {
            info!("closed session {handle}");
            Ok(())
        }
        None => Err(Error::Handle(handle)),
    }
}

fn with_session<T>(handle: Handle, f: impl FnOnce(&Session) -> Result<T>) -> Result<T> {
    let session = unsafe { registry().lookup(handle) }.ok_or(Error::Handle(handle))?;
    f(session)
}

/// `Encode(h, blocks)`: overwrite all `K` ECC slots from the `N` data
/// blocks.
///
/// # Safety
/// See [`Session::rebuild`].
pub unsafe fn encode(handle: Handle, blocks: &[*mut u8]) -> Result<()> {
    with_session(handle, |s| s.rebuild(s.ecc_mask(), blocks, None))
}

/// `Decode(h, blocks, invalidMask)`: restore every block named by
/// `invalid_mask` from the survivors.
///
/// # Safety
/// See [`Session::rebuild`].
pub unsafe fn decode(handle: Handle, blocks: &[*mut u8], invalid_mask: u32) -> Result<()> {
    with_session(handle, |s| s.rebuild(invalid_mask, blocks, None))
}

/// `Rebuild(h, blocks, invalidMask, which)`: restore either one specified
/// block (`which = Some(i)`) or every invalid block (`which = None`).
///
/// # Safety
/// See [`Session::rebuild`].
pub unsafe fn rebuild(
    handle: Handle,
    blocks: &[*mut u8],
    invalid_mask: u32,
    which: Option<usize>,
) -> Result<()> {
    with_session(handle, |s| s.rebuild(invalid_mask, blocks, which))
}

/// `WriteDelta(h, oldData, newData, deltaOut)`.
pub fn write_delta(handle: Handle, old_data: &[u8], new_data: &[u8], delta_out: &mut [u8]) -> Result<()> {
    let session = unsafe { registry().lookup(handle) }.ok_or(Error::Handle(handle))?;
    session.write_delta(old_data, new_data, delta_out)
}

/// `EncodeDelta(h, dataIdx, delta, eccIdx, oldEcc, newEccOut)`.
pub fn encode_delta(
    handle: Handle,
    data_idx: usize,
    delta: &[u8],
    ecc_idx: usize,
    old_ecc: &[u8],
    new_ecc_out: &mut [u8],
) -> Result<()> {
    let session = unsafe { registry().lookup(handle) }.ok_or(Error::Handle(handle))?;
    session.encode_delta(data_idx, delta, ecc_idx, old_ecc, new_ecc_out)
}

/// `SetMethod(&m)`: clamp the process-wide CPU backend to at most `max`,
/// returning the resulting backend. Never upgrades.
pub fn set_method(max: Backend) -> Backend {
    crate::coding::xor_kernel::clamp_backend(max);
    crate::coding::xor_kernel::current_backend()
}
