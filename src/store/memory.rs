use std::collections::HashMap;

use super::{SecretBundle, SecretStore, StoreError};

/// In-memory secret store for tests and for hosts that inject their own
/// persistence.
#[derive(Debug, Default)]
pub struct MemorySecretStore {
    by_address: HashMap<String, SecretBundle>,
}

impl MemorySecretStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SecretStore for MemorySecretStore {
    fn save(&mut self, address: &str, bundle: &SecretBundle) -> Result<(), StoreError> {
        self.by_address
            .insert(address.to_ascii_lowercase(), bundle.clone());
        Ok(())
    }

    fn load(&self, address: &str) -> Option<SecretBundle> {
        self.by_address.get(&address.to_ascii_lowercase()).cloned()
    }

    fn delete(&mut self, address: &str) -> Result<bool, StoreError> {
        Ok(self.by_address.remove(&address.to_ascii_lowercase()).is_some())
    }

    fn addresses(&self) -> Vec<String> {
        let mut addresses: Vec<String> = self.by_address.keys().cloned().collect();
        addresses.sort();
        addresses
    }
}
