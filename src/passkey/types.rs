use serde::{Deserialize, Serialize};

use crate::codec;
use crate::webauthn::WebAuthnError;

#[derive(Debug, thiserror::Error)]
pub enum PasskeyError {
    #[error("credential creation failed: {0}")]
    CredentialCreationFailed(String),
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),
    #[error(transparent)]
    WebAuthn(#[from] WebAuthnError),
}

/// A registered authenticator-bound key pair.
///
/// Created once per registration ceremony and immutable afterwards. The
/// private key never appears here; it stays device-bound behind the
/// authenticator capability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasskeyCredential {
    pub credential_id: String,
    pub raw_id: Vec<u8>,
    pub public_key_x: [u8; 32],
    pub public_key_y: [u8; 32],
}

impl PasskeyCredential {
    /// Assemble a credential, checking that `credential_id` is the base64url
    /// transform of `raw_id`. A mismatch means the attestation response was
    /// assembled incorrectly and the registration cannot be trusted.
    pub fn new(
        credential_id: String,
        raw_id: Vec<u8>,
        public_key_x: [u8; 32],
        public_key_y: [u8; 32],
    ) -> Result<Self, PasskeyError> {
        if codec::encode_base64url(&raw_id) != credential_id {
            return Err(PasskeyError::CredentialCreationFailed(
                "credential id does not match raw id".into(),
            ));
        }
        Ok(Self {
            credential_id,
            raw_id,
            public_key_x,
            public_key_y,
        })
    }
}

/// Result of one signing ceremony. Produced per transaction, never persisted.
#[derive(Debug, Clone)]
pub struct PasskeySignature {
    /// Fixed-width `r (32) || s (32)`, big-endian, no DER wrapper.
    pub signature: [u8; 64],
    /// Opaque bytes the contract uses to reconstruct the signed message.
    pub authenticator_data: Vec<u8>,
    pub client_data_json: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_id_must_match_raw_id() {
        let raw_id = vec![0xDE, 0xAD, 0xBE, 0xEF];
        let ok = PasskeyCredential::new(
            codec::encode_base64url(&raw_id),
            raw_id.clone(),
            [0u8; 32],
            [1u8; 32],
        );
        assert!(ok.is_ok());

        let err = PasskeyCredential::new("bogus".into(), raw_id, [0u8; 32], [1u8; 32]);
        assert!(matches!(
            err.unwrap_err(),
            PasskeyError::CredentialCreationFailed(_)
        ));
    }

    #[test]
    fn test_credential_serde_roundtrip() {
        let raw_id = vec![1, 2, 3, 4, 5];
        let cred = PasskeyCredential::new(
            codec::encode_base64url(&raw_id),
            raw_id,
            [0x11; 32],
            [0x22; 32],
        )
        .unwrap();
        let json = serde_json::to_string(&cred).unwrap();
        let back: PasskeyCredential = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cred);
    }
}
