//! Scoped mutation of process environment variables.
//!
//! Writes to the environment go through one process-wide re-entrant lock.
//! Each helper hands back a [`VarGuard`] that puts the previous value back
//! (or removes the variable again) when dropped. Guards for the same key
//! unwind in LIFO order.
//!
//! The lock is only held while a single write happens. Tests that need
//! several writes to appear atomically should hold [`lock`] for their
//! whole body.
//!
//! # Examples
//!
//! ```
//! use test_helpers::env;
//!
//! let _g = env::set_var("STRATA_DOC_KEY", "value");
//! assert_eq!(std::env::var("STRATA_DOC_KEY").as_deref(), Ok("value"));
//! ```

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::sync::LazyLock;

use parking_lot::{ReentrantMutex, ReentrantMutexGuard};

static ENV_LOCK: LazyLock<ReentrantMutex<()>> = LazyLock::new(ReentrantMutex::default);

/// Restores one environment variable to its earlier state on drop.
#[must_use = "dropping the guard restores the variable immediately"]
pub struct VarGuard {
    key: String,
    previous: Option<OsString>,
}

impl VarGuard {
    /// Name of the variable this guard restores.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl fmt::Debug for VarGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VarGuard")
            .field("key", &self.key)
            .field("had_previous", &self.previous.is_some())
            .finish()
    }
}

impl Drop for VarGuard {
    fn drop(&mut self) {
        let _held = ENV_LOCK.lock();
        match self.previous.take() {
            // SAFETY: writes are serialised by `ENV_LOCK`.
            Some(value) => unsafe { std::env::set_var(&self.key, value) },
            // SAFETY: writes are serialised by `ENV_LOCK`.
            None => unsafe { std::env::remove_var(&self.key) },
        }
    }
}

/// Holds the environment lock until dropped.
///
/// ```
/// use test_helpers::env;
///
/// let held = env::lock();
/// let _a = held.set_var("STRATA_DOC_A", "1");
/// let _b = held.remove_var("STRATA_DOC_B");
/// ```
#[must_use = "dropping releases the environment lock"]
pub struct EnvLock {
    _held: ReentrantMutexGuard<'static, ()>,
}

impl fmt::Debug for EnvLock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EnvLock")
    }
}

#[expect(
    clippy::unused_self,
    reason = "the receiver proves the lock is held for the write"
)]
impl EnvLock {
    /// Set `key` while this lock is held.
    pub fn set_var(&self, key: impl Into<String>, value: impl AsRef<OsStr>) -> VarGuard {
        set_var(key, value)
    }

    /// Remove `key` while this lock is held.
    pub fn remove_var(&self, key: impl Into<String>) -> VarGuard {
        remove_var(key)
    }
}

/// Take the environment lock.
pub fn lock() -> EnvLock {
    EnvLock {
        _held: ENV_LOCK.lock(),
    }
}

/// Set `key` to `value` until the returned guard drops.
pub fn set_var(key: impl Into<String>, value: impl AsRef<OsStr>) -> VarGuard {
    let name = key.into();
    let _held = ENV_LOCK.lock();
    let previous = std::env::var_os(&name);
    // SAFETY: writes are serialised by `ENV_LOCK`.
    unsafe { std::env::set_var(&name, value) };
    VarGuard {
        key: name,
        previous,
    }
}

/// Unset `key` until the returned guard drops.
pub fn remove_var(key: impl Into<String>) -> VarGuard {
    let name = key.into();
    let _held = ENV_LOCK.lock();
    let previous = std::env::var_os(&name);
    // SAFETY: writes are serialised by `ENV_LOCK`.
    unsafe { std::env::remove_var(&name) };
    VarGuard {
        key: name,
        previous,
    }
}
