use serde::{Deserialize, Serialize};

use super::BackupError;
use crate::config::{BACKUP_NONCE_LEN, BACKUP_SALT_LEN, BACKUP_TAG_LEN, ENVELOPE_VERSION};

/// The wire format persisted to and shared from a backup file.
///
/// Serialized as JSON with each byte field emitted as an array of 0–255
/// integers, not base64. Two independent implementations read and write
/// this format; the field typing is part of the contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedBackupEnvelope {
    /// Format version, currently 1.
    pub v: u32,
    /// 16 bytes, fresh random per encryption.
    pub salt: Vec<u8>,
    /// 12 bytes, fresh random per encryption (GCM nonce).
    pub iv: Vec<u8>,
    /// Ciphertext with the 16-byte authentication tag appended.
    pub data: Vec<u8>,
}

impl EncryptedBackupEnvelope {
    /// Strict structural check for writers and transports.
    ///
    /// Decryption does NOT surface these distinctions: a malformed salt or
    /// iv and a wrong password are collapsed into one error there.
    pub fn validate(&self) -> Result<(), BackupError> {
        if self.v != ENVELOPE_VERSION {
            return Err(BackupError::InvalidFormat(format!(
                "unsupported backup version {}",
                self.v
            )));
        }
        if self.salt.len() != BACKUP_SALT_LEN {
            return Err(BackupError::InvalidFormat(format!(
                "salt must be {BACKUP_SALT_LEN} bytes, got {}",
                self.salt.len()
            )));
        }
        if self.iv.len() != BACKUP_NONCE_LEN {
            return Err(BackupError::InvalidFormat(format!(
                "iv must be {BACKUP_NONCE_LEN} bytes, got {}",
                self.iv.len()
            )));
        }
        if self.data.len() <= BACKUP_TAG_LEN {
            return Err(BackupError::InvalidFormat(
                "data is too short to contain an authentication tag".into(),
            ));
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<Vec<u8>, BackupError> {
        serde_json::to_vec(self).map_err(|e| BackupError::InvalidFormat(e.to_string()))
    }

    pub fn from_json(bytes: &[u8]) -> Result<Self, BackupError> {
        serde_json::from_slice(bytes).map_err(|e| BackupError::InvalidFormat(e.to_string()))
    }
}
