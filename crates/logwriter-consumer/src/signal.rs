use std::sync::{Condvar, Mutex};
use std::time::Duration;

/// A set/clear/wait event for a blocking consumer thread, used by MANUAL
/// mode to wake on an explicit `trigger()` call or on shutdown.
pub(crate) struct Signal {
    flag: Mutex<bool>,
    condvar: Condvar,
}

impl Signal {
    pub(crate) fn new() -> Self {
        Self {
            flag: Mutex::new(false),
            condvar: Condvar::new(),
        }
    }

    pub(crate) fn set(&self) {
        let mut guard = self.flag.lock().unwrap();
        *guard = true;
        self.condvar.notify_all();
    }

    pub(crate) fn clear(&self) {
        *self.flag.lock().unwrap() = false;
    }

    /// Waits up to `timeout` for the signal. Returns `true` if set
    /// (leaving the flag set — caller clears explicitly), `false` on
    /// timeout.
    pub(crate) fn wait_timeout(&self, timeout: Duration) -> bool {
        let guard = self.flag.lock().unwrap();
        if *guard {
            return true;
        }
        let (guard, _) = self.condvar.wait_timeout(guard, timeout).unwrap();
        *guard
    }
}
