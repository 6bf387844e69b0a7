//! Initializer ownership tracking.
//!
//! Loading type `A` can force its dependencies `B` and `C` to load before
//! `A`'s own file finishes. Only `A` was requested by the caller, so only `A`
//! gets its post-load initializer run now.
//!
//! The guard holds a single slot:
//!
//! ```text
//!   Idle ──claim(A)──▶ Owned(A) ──complete(A) / release(A)──▶ Idle
//!                        │
//!                        └─claim(B): no transition (B is a dependency load)
//! ```
//!
//! A [`Claim`] releases the slot when dropped, so every exit path of a
//! resolution (success, soft failure, early return, or an error bubbling up)
//! clears ownership it still holds.

use parking_lot::Mutex;
use tracing::trace;

/// Single-slot reentrancy tracker for post-load initialization.
#[derive(Debug, Default)]
pub struct OwnershipGuard {
    slot: Mutex<Option<String>>,
}

impl OwnershipGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim ownership for `type_name` if the slot is idle.
    ///
    /// The returned claim must be held for the duration of the resolution.
    pub fn claim(&self, type_name: &str) -> Claim<'_> {
        let mut slot = self.slot.lock();
        let owner = slot.is_none();
        if owner {
            *slot = Some(type_name.to_string());
            trace!(type_name, "ownership claimed");
        }
        Claim {
            guard: self,
            type_name: type_name.to_string(),
            owner,
        }
    }

    /// Completion check for a type whose file just finished loading.
    ///
    /// Returns `true` (and clears the slot) only when `type_name` owns it; the
    /// caller then runs the type's initializer.
    pub fn complete(&self, type_name: &str) -> bool {
        let mut slot = self.slot.lock();
        if slot.as_deref() == Some(type_name) {
            *slot = None;
            trace!(type_name, "ownership completed");
            true
        } else {
            false
        }
    }

    /// The type currently entitled to its initializer, if any.
    pub fn owner(&self) -> Option<String> {
        self.slot.lock().clone()
    }

    pub fn is_idle(&self) -> bool {
        self.slot.lock().is_none()
    }

    fn release(&self, type_name: &str) {
        let mut slot = self.slot.lock();
        if slot.as_deref() == Some(type_name) {
            *slot = None;
            trace!(type_name, "ownership released");
        }
    }
}

/// Scope of one resolution. Dropping it releases the slot if it still holds this name.
#[derive(Debug)]
pub struct Claim<'a> {
    guard: &'a OwnershipGuard,
    type_name: String,
    owner: bool,
}

impl Claim<'_> {
    /// Whether this resolution claimed the slot (it is not a dependency load).
    pub fn is_owner(&self) -> bool {
        self.owner
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }
}

impl Drop for Claim<'_> {
    fn drop(&mut self) {
        self.guard.release(&self.type_name);
    }
}
