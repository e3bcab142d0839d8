//! Atomic initialization flag for kernel subsystems.
//!
//! ```ignore
//! use hssos_lib::InitFlag;
//!
//! static SUBSYSTEM_INIT: InitFlag = InitFlag::new();
//!
//! pub fn init() {
//!     if !SUBSYSTEM_INIT.init_once() {
//!         return; // Already initialized
//!     }
//!     // ... perform initialization ...
//! }
//! ```
//!
//! # Memory Ordering
//!
//! - `init_once()` uses `SeqCst` swap
//! - `mark_set()` uses `Release` to publish initialization side-effects
//! - `is_set()` uses `Acquire` to observe initialization side-effects
//! - `is_set_relaxed()` uses `Relaxed` for logging guards

use core::sync::atomic::{AtomicBool, Ordering};

#[repr(transparent)]
pub struct InitFlag {
    flag: AtomicBool,
}

impl InitFlag {
    /// Create a new unset flag.
    #[inline]
    pub const fn new() -> Self {
        Self {
            flag: AtomicBool::new(false),
        }
    }

    /// Set the flag, returning `true` if this call is the one that set it.
    #[inline]
    pub fn init_once(&self) -> bool {
        !self.flag.swap(true, Ordering::SeqCst)
    }

    #[inline]
    pub fn is_set(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }

    #[inline]
    pub fn is_set_relaxed(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn mark_set(&self) {
        self.flag.store(true, Ordering::Release);
    }

    /// Reset the flag to unset state. Only for subsystems that support
    /// re-initialization.
    #[inline]
    pub fn reset(&self) {
        self.flag.store(false, Ordering::Release);
    }
}

impl Default for InitFlag {
    fn default() -> Self {
        Self::new()
    }
}
