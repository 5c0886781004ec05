//! Nullable infrastructure for deterministic testing.
//!
//! Everything the oracle reads from the host chain (the key-value store, the
//! staking and bank modules, block height and time) sits behind a trait. This
//! crate provides in-memory implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Never touch the filesystem or network
//!
//! Usage: swap real implementations for nullables in tests.

pub mod bank;
pub mod clock;
pub mod kv;
pub mod staking;

pub use bank::NullBank;
pub use clock::NullClock;
pub use kv::NullKvStore;
pub use staking::NullStaking;

use std::sync::{Mutex, MutexGuard};

/// Lock a mutex, recovering the data if a panicking test poisoned it.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
