use std::sync::{Condvar, Mutex};
use std::time::{Duration, Instant};

use crate::{EngineError, Result};

/// Default bounded wait for lock acquisition, matching the host platform's
/// conventional 300-second script lock wait.
pub const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(300);

/// Process-wide mutual exclusion with a bounded wait.
///
/// Modeled on the single script-scoped lock of hosted spreadsheet platforms:
/// one lock per process, keyed to nothing. That also serializes appends to
/// unrelated tables, an intentionally conservative trade-off; callers needing
/// per-table parallelism can hold their own [`ScriptLock`] instances instead
/// of [`global`](ScriptLock::global).
#[derive(Debug)]
pub struct ScriptLock {
    held: Mutex<bool>,
    released: Condvar,
}

static GLOBAL: ScriptLock = ScriptLock::new();

impl ScriptLock {
    pub const fn new() -> Self {
        Self {
            held: Mutex::new(false),
            released: Condvar::new(),
        }
    }

    /// The shared process-wide lock used by the append engine.
    pub fn global() -> &'static ScriptLock {
        &GLOBAL
    }

    /// Blocks until the lock is acquired, for at most `timeout`.
    ///
    /// The returned guard releases on drop, so every failure path after
    /// acquisition still releases the lock.
    pub fn acquire(&self, timeout: Duration) -> Result<LockGuard<'_>> {
        let deadline = Instant::now() + timeout;
        let mut held = self.held.lock().expect("script lock poisoned");
        while *held {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Err(EngineError::LockTimeout { waited: timeout });
            }
            let (guard, wait) = self
                .released
                .wait_timeout(held, remaining)
                .expect("script lock poisoned");
            held = guard;
            if wait.timed_out() && *held {
                return Err(EngineError::LockTimeout { waited: timeout });
            }
        }
        *held = true;
        Ok(LockGuard { lock: self })
    }
}

impl Default for ScriptLock {
    fn default() -> Self {
        Self::new()
    }
}

/// Releases the owning [`ScriptLock`] on drop.
#[derive(Debug)]
pub struct LockGuard<'a> {
    lock: &'a ScriptLock,
}

impl Drop for LockGuard<'_> {
    fn drop(&mut self) {
        let mut held = self.lock.held.lock().expect("script lock poisoned");
        *held = false;
        self.lock.released.notify_one();
    }
}
