//! Session registry: fixed-capacity slot table with atomic claim
//!
//! A fixed array of `MaxSessions` slots, each holding an optional session,
//! claimed with a single compare-and-swap per slot. `lookup` is
//! intentionally racy against a concurrent `remove` of the same handle:
//! the documented contract is that callers own a handle's lifecycle and
//! must not close a session while another thread still operates on it.

use std::ptr;
use std::sync::atomic::{AtomicPtr, Ordering};

use crate::config::MAX_SESSIONS;
use crate::error::{Error, Result};
use crate::session::Session;

/// Opaque handle into the registry; stable for the lifetime of the
/// session it names.
pub type Handle = usize;

/// Fixed-capacity table of session slots, each an atomically-claimed
/// nullable raw pointer.
pub struct Registry {
    slots: Box<[AtomicPtr<Session>]>,
}

impl Registry {
    /// A fresh, empty registry with [`MAX_SESSIONS`] slots.
    pub fn new() -> Self {
        let slots = (0..MAX_SESSIONS)
            .map(|_| AtomicPtr::new(ptr::null_mut()))
            .collect();
        Registry { slots }
    }

    /// Claim the first free slot for `session`, scanning from index 0 and
    /// CAS-ing each candidate slot. Returns the claimed handle, or
    /// [`Error::Capacity`] if every slot is occupied.
    pub fn add(&self, session: Session) -> Result<Handle> {
        let raw = Box::into_raw(Box::new(session));
        for (index, slot) in self.slots.iter().enumerate() {
            if slot
                .compare_exchange(ptr::null_mut(), raw, Ordering::AcqRel, Ordering::Acquire)
                .is_ok()
            {
                return Ok(index);
            }
        }
        // No free slot: reclaim the box we allocated speculatively.
        unsafe {
            drop(Box::from_raw(raw));
        }
        Err(Error::Capacity(format!(
            "session registry full (capacity {MAX_SESSIONS})"
        )))
    }

    /// Look up the session at `handle`. Returns `None` if `handle` is out
    /// of range or the slot is empty (never claimed, or concurrently
    /// removed).
    ///
    /// # Safety
    /// The returned reference is valid only as long as no other thread
    /// calls [`Self::remove`] on the same handle concurrently. Callers
    /// must serialize a session's close against its own in-flight
    /// operations.
    pub unsafe fn lookup(&self, handle: Handle) -> Option<&Session> {
        let slot = self.slots.get(handle)?;
        let ptr = slot.load(Ordering::Acquire);
        if ptr.is_null() {
            None
        } else {
            Some(&*ptr)
        }
    }

    /// Release `handle`, returning ownership of the session that was
    /// there (if any) so the caller can drop it. Bounds-checks `handle`;
    /// returns `Err(Error::Handle)` for an out-of-range index.
    pub fn remove(&self, handle: Handle) -> Result<Option<Box<Session>>> {
        let slot = self
            .slots
            .get(handle)
            .ok_or(Error::Handle(handle))?;
        let prev = slot.swap(ptr::null_mut(), Ordering::AcqRel);
        if prev.is_null() {
            Ok(None)
        } else {
            Ok(Some(unsafe { Box::from_raw(prev) }))
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Registry::new()
    }
}

impl Drop for Registry {
    fn drop(&mut self) {
        for slot in self.slots.iter() {
            let ptr = slot.swap(ptr::null_mut(), Ordering::AcqRel);
            if !ptr.is_null() {
                unsafe {
                    drop(Box::from_raw(ptr));
                }
            }
        }
    }
}
