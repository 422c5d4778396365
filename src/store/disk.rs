use aes_gcm::aead::Aead;
use aes_gcm::{Aes256Gcm, KeyInit, Nonce};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{SecretBundle, StoreError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct SecretRecord {
    pub version: u8,
    pub address: String,
    pub bundle: SecretBundle,
}

fn record_path(dir: &Path, address: &str) -> std::path::PathBuf {
    let name: String = address
        .strip_prefix("0x")
        .unwrap_or(address)
        .to_ascii_lowercase();
    dir.join(format!("{name}.bin"))
}

/// Encrypt + write a record to `dir/{address}.bin` (12-byte nonce prefix).
pub(crate) fn write_record(
    aes_key: &[u8; 32],
    dir: &Path,
    record: &SecretRecord,
) -> Result<(), StoreError> {
    let mut buf = Vec::new();
    ciborium::into_writer(record, &mut buf)
        .map_err(|e| StoreError::Serialization(e.to_string()))?;

    let mut nonce_bytes = [0u8; 12];
    rand::thread_rng().fill_bytes(&mut nonce_bytes);

    let cipher = Aes256Gcm::new_from_slice(aes_key)
        .map_err(|e| StoreError::Encryption(e.to_string()))?;
    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce_bytes), buf.as_slice())
        .map_err(|e| StoreError::Encryption(e.to_string()))?;

    let mut file_bytes = Vec::with_capacity(12 + ciphertext.len());
    file_bytes.extend_from_slice(&nonce_bytes);
    file_bytes.extend_from_slice(&ciphertext);

    std::fs::write(record_path(dir, &record.address), file_bytes)?;
    Ok(())
}

/// Read + decrypt + deserialize a record from `path`.
pub(crate) fn read_record(aes_key: &[u8; 32], path: &Path) -> Result<SecretRecord, StoreError> {
    let bytes = std::fs::read(path)?;
    if bytes.len() < 12 {
        return Err(StoreError::Corrupt("file too short".into()));
    }
    let (nonce_bytes, ciphertext) = bytes.split_at(12);

    let cipher = Aes256Gcm::new_from_slice(aes_key)
        .map_err(|e| StoreError::Encryption(e.to_string()))?;
    let plaintext = cipher
        .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
        .map_err(|e| StoreError::Encryption(e.to_string()))?;

    let record: SecretRecord = ciborium::from_reader(plaintext.as_slice())
        .map_err(|e| StoreError::Serialization(e.to_string()))?;
    Ok(record)
}

/// Delete the record file for `address`.
pub(crate) fn delete_record(dir: &Path, address: &str) -> Result<(), StoreError> {
    std::fs::remove_file(record_path(dir, address))?;
    Ok(())
}

/// Load all valid records from `dir`. Logs and skips corrupt files.
pub(crate) fn load_all(aes_key: &[u8; 32], dir: &Path) -> Result<Vec<SecretRecord>, StoreError> {
    let mut records = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("bin") {
            continue;
        }
        match read_record(aes_key, &path) {
            Ok(record) => records.push(record),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Skipping corrupt secret file");
            }
        }
    }
    Ok(records)
}
