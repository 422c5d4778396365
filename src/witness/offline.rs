use async_trait::async_trait;
use p256::ecdsa::signature::Signer;
use p256::ecdsa::{Signature, SigningKey};
use p256::pkcs8::DecodePrivateKey;

use super::{AuthWitness, WitnessError, WitnessProvider};
use crate::webauthn;

/// Witness provider backed by a raw P-256 private key, for non-interactive
/// contexts (CLI signing, automation).
///
/// The 32-byte message hash is signed with ECDSA/SHA-256; hashing happens
/// inside the signing primitive, not here. The primitive's output is routed
/// through the signature normalizer rather than assumed to be raw `r || s`:
/// the call is the identity on already-raw input, and it catches a
/// DER-returning primitive before the signature reaches a witness.
#[derive(Debug)]
pub struct OfflineWitnessProvider {
    signing_key: Option<SigningKey>,
}

impl OfflineWitnessProvider {
    /// Create a provider with no key wired yet. Witness creation fails with
    /// `NoSigningMaterial` until a key is supplied.
    pub fn new() -> Self {
        Self { signing_key: None }
    }

    /// Import a PKCS8 DER-encoded P-256 private key.
    pub fn from_pkcs8_der(der: &[u8]) -> Result<Self, WitnessError> {
        let signing_key = SigningKey::from_pkcs8_der(der)
            .map_err(|e| WitnessError::InvalidPrivateKey(e.to_string()))?;
        Ok(Self {
            signing_key: Some(signing_key),
        })
    }

    pub fn signing_key(&self) -> Option<&SigningKey> {
        self.signing_key.as_ref()
    }
}

impl Default for OfflineWitnessProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WitnessProvider for OfflineWitnessProvider {
    async fn create_auth_witness(
        &self,
        message_hash: [u8; 32],
    ) -> Result<AuthWitness, WitnessError> {
        let key = self
            .signing_key
            .as_ref()
            .ok_or(WitnessError::NoSigningMaterial)?;
        let signature: Signature = key.sign(&message_hash);
        let raw = webauthn::normalize(&signature.to_bytes())?;
        AuthWitness::from_signature(message_hash, &raw)
    }
}
