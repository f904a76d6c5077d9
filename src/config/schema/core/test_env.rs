use std::sync::{LazyLock, Mutex, MutexGuard, PoisonError};

static ENV_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

/// Process environment owned by one config test.
///
/// Holds the env lock for its whole lifetime and puts every touched variable
/// back on drop, newest change first.
pub(super) struct ScopedEnv {
    saved: Vec<(&'static str, Option<String>)>,
    _lock: MutexGuard<'static, ()>,
}

impl ScopedEnv {
    pub(super) fn lock() -> Self {
        Self {
            saved: Vec::new(),
            _lock: ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner),
        }
    }

    pub(super) fn set(mut self, key: &'static str, value: &str) -> Self {
        self.saved.push((key, std::env::var(key).ok()));
        // SAFETY: every writer goes through ScopedEnv, which holds ENV_LOCK.
        unsafe { std::env::set_var(key, value) };
        self
    }

    pub(super) fn unset(mut self, key: &'static str) -> Self {
        self.saved.push((key, std::env::var(key).ok()));
        // SAFETY: see `set`.
        unsafe { std::env::remove_var(key) };
        self
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        while let Some((key, previous)) = self.saved.pop() {
            // SAFETY: ENV_LOCK is released only after this loop.
            unsafe {
                match previous {
                    Some(value) => std::env::set_var(key, value),
                    None => std::env::remove_var(key),
                }
            }
        }
    }
}
