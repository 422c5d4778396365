use aes_gcm::aead::Aead;
use aes_gcm::{Aes256Gcm, KeyInit, Nonce};
use hmac::Hmac;
use rand::RngCore;
use sha2::Sha256;

use super::{BackupError, BackupPayload, EncryptedBackupEnvelope};
use crate::config::{
    BACKUP_KEY_LEN, BACKUP_NONCE_LEN, BACKUP_SALT_LEN, BACKUP_TAG_LEN, ENVELOPE_VERSION,
    PBKDF2_ITERATIONS,
};

/// Stretch `password` into the AES key with PBKDF2-HMAC-SHA256.
///
/// Iteration count, hash and key length are pinned by the cross-implementation
/// wire contract; see `config`.
fn derive_key(password: &str, salt: &[u8]) -> Result<[u8; BACKUP_KEY_LEN], BackupError> {
    let mut key = [0u8; BACKUP_KEY_LEN];
    pbkdf2::pbkdf2::<Hmac<Sha256>>(password.as_bytes(), salt, PBKDF2_ITERATIONS, &mut key)
        .map_err(|e| BackupError::KeyDerivationFailed(e.to_string()))?;
    Ok(key)
}

/// Encrypt an account bundle into a portable envelope.
///
/// Blocking: the key derivation alone costs 0.5–2 s. Use [`encrypt_backup`]
/// from async contexts.
pub fn encrypt(
    payload: &BackupPayload,
    password: &str,
) -> Result<EncryptedBackupEnvelope, BackupError> {
    let plaintext = payload.to_canonical_bytes()?;

    let mut salt = vec![0u8; BACKUP_SALT_LEN];
    let mut iv = vec![0u8; BACKUP_NONCE_LEN];
    let mut rng = rand::thread_rng();
    rng.fill_bytes(&mut salt);
    rng.fill_bytes(&mut iv);

    let key = derive_key(password, &salt)?;
    let cipher = Aes256Gcm::new_from_slice(&key)
        .map_err(|e| BackupError::KeyDerivationFailed(e.to_string()))?;
    // encrypt() appends the 16-byte tag to the ciphertext.
    let data = cipher
        .encrypt(Nonce::from_slice(&iv), plaintext.as_slice())
        .map_err(|_| BackupError::InvalidFormat("payload too large to encrypt".into()))?;

    Ok(EncryptedBackupEnvelope {
        v: ENVELOPE_VERSION,
        salt,
        iv,
        data,
    })
}

/// Decrypt a backup envelope back into its account bundle.
///
/// Blocking, like [`encrypt`]. A wrong password and a corrupted file are
/// indistinguishable by design.
pub fn decrypt(
    envelope: &EncryptedBackupEnvelope,
    password: &str,
) -> Result<BackupPayload, BackupError> {
    if envelope.v != ENVELOPE_VERSION {
        return Err(BackupError::InvalidFormat(format!(
            "unsupported backup version {}",
            envelope.v
        )));
    }
    // Malformed salt/iv and a wrong password must be indistinguishable to
    // the caller, so length failures collapse into DecryptionFailed too.
    if envelope.salt.len() != BACKUP_SALT_LEN
        || envelope.iv.len() != BACKUP_NONCE_LEN
        || envelope.data.len() <= BACKUP_TAG_LEN
    {
        return Err(BackupError::DecryptionFailed);
    }
    let key = derive_key(password, &envelope.salt)?;
    let cipher = Aes256Gcm::new_from_slice(&key)
        .map_err(|e| BackupError::KeyDerivationFailed(e.to_string()))?;
    // decrypt() takes ciphertext || tag and verifies the tag.
    let plaintext = cipher
        .decrypt(Nonce::from_slice(&envelope.iv), envelope.data.as_slice())
        .map_err(|_| BackupError::DecryptionFailed)?;
    BackupPayload::from_bytes(&plaintext)
}

/// Async wrapper over [`encrypt`] running the derivation off the caller's
/// thread. Cancellation is call-site granular: dropping the future abandons
/// the result, the 600k-iteration loop itself is never interrupted.
pub async fn encrypt_backup(
    payload: BackupPayload,
    password: String,
) -> Result<EncryptedBackupEnvelope, BackupError> {
    tokio::task::spawn_blocking(move || encrypt(&payload, &password))
        .await
        .map_err(|e| BackupError::KeyDerivationFailed(e.to_string()))?
}

/// Async wrapper over [`decrypt`]; see [`encrypt_backup`].
pub async fn decrypt_backup(
    envelope: EncryptedBackupEnvelope,
    password: String,
) -> Result<BackupPayload, BackupError> {
    tokio::task::spawn_blocking(move || decrypt(&envelope, &password))
        .await
        .map_err(|e| BackupError::KeyDerivationFailed(e.to_string()))?
}
