//! Ownership probe.

use std::sync::{Arc, Mutex};

use typeload::{Autoloader, Host, TypeLoader};

/// Fallback loader that forwards to an autoloader and records, for every
/// request, which type owned the initializer slot when the request arrived.
pub struct OwnershipProbe {
    pub inner: Arc<Autoloader>,
    pub calls: Mutex<Vec<(String, Option<String>)>>,
}

impl OwnershipProbe {
    pub fn new(inner: Arc<Autoloader>) -> Arc<Self> {
        Arc::new(Self {
            inner,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<(String, Option<String>)> {
        self.calls.lock().unwrap().clone()
    }
}

impl TypeLoader for OwnershipProbe {
    fn load(&self, host: &mut dyn Host, type_name: &str) -> anyhow::Result<bool> {
        self.calls
            .lock()
            .unwrap()
            .push((type_name.to_string(), self.inner.owner()));
        self.inner.load(host, type_name)
    }
}
