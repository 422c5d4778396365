use std::collections::HashMap;
use std::path::PathBuf;

use super::disk::{self, SecretRecord};
use super::{SecretBundle, SecretStore, StoreError};

/// Encrypted file-backed secret store: one AES-256-GCM-encrypted record per
/// address, loaded into an in-memory index at startup.
pub struct FileSecretStore {
    aes_key: [u8; 32],
    dir: PathBuf,
    by_address: HashMap<String, SecretBundle>,
}

impl FileSecretStore {
    /// Load all records from `dir` into memory.
    pub fn load(aes_key: [u8; 32], dir: PathBuf) -> Result<Self, StoreError> {
        let records = disk::load_all(&aes_key, &dir)?;
        let mut by_address = HashMap::new();
        for record in records {
            by_address.insert(normalize_address(&record.address), record.bundle);
        }
        Ok(Self {
            aes_key,
            dir,
            by_address,
        })
    }

    pub fn len(&self) -> usize {
        self.by_address.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_address.is_empty()
    }
}

fn normalize_address(address: &str) -> String {
    address.to_ascii_lowercase()
}

impl SecretStore for FileSecretStore {
    fn save(&mut self, address: &str, bundle: &SecretBundle) -> Result<(), StoreError> {
        let record = SecretRecord {
            version: 1,
            address: normalize_address(address),
            bundle: bundle.clone(),
        };
        disk::write_record(&self.aes_key, &self.dir, &record)?;
        self.by_address.insert(record.address, record.bundle);
        Ok(())
    }

    fn load(&self, address: &str) -> Option<SecretBundle> {
        self.by_address.get(&normalize_address(address)).cloned()
    }

    fn delete(&mut self, address: &str) -> Result<bool, StoreError> {
        let address = normalize_address(address);
        if self.by_address.remove(&address).is_some() {
            disk::delete_record(&self.dir, &address)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn addresses(&self) -> Vec<String> {
        let mut addresses: Vec<String> = self.by_address.keys().cloned().collect();
        addresses.sort();
        addresses
    }
}
