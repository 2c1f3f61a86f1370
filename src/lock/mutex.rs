use parking_lot::{Condvar, Mutex};

use super::Lock;

/// In-process mutex with explicit `lock`/`unlock` and a non-blocking probe.
///
/// Backed by a `Mutex<bool>` + `Condvar`: the flag is the ownership bit and
/// waiters park on the condvar until a release. There is no timeout-bounded
/// acquire; `try_lock` is exactly one immediate attempt.
pub struct ProcessMutex {
    state: Mutex<bool>,
    wake: Condvar,
}

impl ProcessMutex {
    pub fn new() -> Self {
        ProcessMutex {
            state: Mutex::new(false),
            wake: Condvar::new(),
        }
    }

    /// Snapshot of the ownership flag. Racy; for diagnostics and tests.
    pub fn is_locked(&self) -> bool {
        *self.state.lock()
    }
}

impl Default for ProcessMutex {
    fn default() -> Self {
        Self::new()
    }
}

impl Lock for ProcessMutex {
    fn lock(&self) {
        let mut locked = self.state.lock();
        while *locked {
            self.wake.wait(&mut locked);
        }
        *locked = true;
    }

    fn try_lock(&self) -> bool {
        let mut locked = self.state.lock();
        if *locked {
            false
        } else {
            *locked = true;
            true
        }
    }

    fn unlock(&self) {
        let mut locked = self.state.lock();
        if !*locked {
            drop(locked);
            panic!("ProcessMutex::unlock called on an unlocked mutex");
        }
        *locked = false;
        drop(locked);
        self.wake.notify_one();
    }
}
