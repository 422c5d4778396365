use serde::{Deserialize, Serialize};

/// Sensitive account material held by a [`super::SecretStore`].
///
/// Every field is optional: a passkey account stores nothing here because
/// its private key is device-bound.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretBundle {
    /// Account secret, 0x-prefixed hex.
    pub secret_key: Option<String>,
    /// Exported PKCS8 private key, base64.
    pub private_key_pkcs8: Option<String>,
    /// Account-derivation salt, 0x-prefixed hex.
    pub salt: Option<String>,
}
