use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

/// Serializes environment-variable mutation across tests and restores the
/// previous values on drop.
pub struct TestEnvVarGuard {
    _lock: MutexGuard<'static, ()>,
    saved: HashMap<String, Option<String>>,
}

impl TestEnvVarGuard {
    pub fn new() -> Self {
        let lock = ENV_LOCK
            .get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Self {
            _lock: lock,
            saved: HashMap::new(),
        }
    }

    pub fn set_var(&mut self, key: &str, value: &str) {
        self.save_original(key);
        std::env::set_var(key, value);
    }

    pub fn remove_var(&mut self, key: &str) {
        self.save_original(key);
        std::env::remove_var(key);
    }

    fn save_original(&mut self, key: &str) {
        self.saved
            .entry(key.to_string())
            .or_insert_with(|| std::env::var(key).ok());
    }
}

impl Drop for TestEnvVarGuard {
    fn drop(&mut self) {
        for (key, original) in self.saved.drain() {
            match original {
                Some(value) => std::env::set_var(&key, value),
                None => std::env::remove_var(&key),
            }
        }
    }
}
