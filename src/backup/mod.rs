pub mod codec;
pub mod envelope;
pub mod payload;

pub use codec::{decrypt, decrypt_backup, encrypt, encrypt_backup};
pub use envelope::EncryptedBackupEnvelope;
pub use payload::BackupPayload;

#[derive(Debug, thiserror::Error)]
pub enum BackupError {
    #[error("invalid backup format: {0}")]
    InvalidFormat(String),
    /// Wrong password and corrupted data collapse into one error on purpose:
    /// distinguishing them would leak which failure occurred.
    #[error("wrong password or corrupted backup")]
    DecryptionFailed,
    #[error("key derivation failed: {0}")]
    KeyDerivationFailed(String),
}
