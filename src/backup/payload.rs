use serde::{Deserialize, Serialize};

use super::BackupError;

/// The plaintext account bundle protected by the backup codec.
///
/// `address`, `publicKeyX` and `publicKeyY` are required for a restore.
/// Absence of the sensitive fields is valid: a passkey account's private key
/// never leaves the secure enclave, so those fields are simply omitted.
/// Hex-valued fields carry a `0x` prefix; `privateKeyPkcs8` is base64.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupPayload {
    pub address: String,
    pub public_key_x: String,
    pub public_key_y: String,
    /// Account variant tag, e.g. `"ecdsasecp256r1"` or `"passkey"`.
    #[serde(rename = "type")]
    pub account_type: String,
    pub label: String,
    pub deployed: bool,
    /// Creation time, unix milliseconds.
    pub timestamp: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credential_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_key_pkcs8: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salt: Option<String>,
}

impl BackupPayload {
    /// Serialize to the canonical sorted-key byte form.
    ///
    /// Two independent implementations that each re-serialize the payload
    /// must produce identical bytes, so the key order cannot be left to
    /// struct declaration order. `serde_json`'s map is ordered; a `Value`
    /// round-trip yields sorted keys.
    pub fn to_canonical_bytes(&self) -> Result<Vec<u8>, BackupError> {
        let value =
            serde_json::to_value(self).map_err(|e| BackupError::InvalidFormat(e.to_string()))?;
        serde_json::to_vec(&value).map_err(|e| BackupError::InvalidFormat(e.to_string()))
    }

    /// Deserialize from recovered plaintext bytes, in any key order.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, BackupError> {
        serde_json::from_slice(bytes).map_err(|e| BackupError::InvalidFormat(e.to_string()))
    }
}
