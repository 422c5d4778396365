pub mod interactive;
pub mod offline;

pub use interactive::InteractiveWitnessProvider;
pub use offline::OfflineWitnessProvider;

use async_trait::async_trait;

use crate::passkey::PasskeyError;
use crate::webauthn::WebAuthnError;

/// Number of single-byte elements in a witness, one per signature byte.
pub const WITNESS_FIELD_COUNT: usize = 64;

#[derive(Debug, thiserror::Error)]
pub enum WitnessError {
    #[error("no signing material configured")]
    NoSigningMaterial,
    #[error("signature is {0} bytes, a witness requires exactly 64")]
    FieldCountMismatch(usize),
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),
    #[error(transparent)]
    Passkey(#[from] PasskeyError),
    #[error(transparent)]
    WebAuthn(#[from] WebAuthnError),
}

/// The credential payload handed to the account-abstraction layer with every
/// transaction.
///
/// `fields` is the canonical circuit layout: 64 ordered byte-valued elements,
/// one per byte of the raw signature. Any other length is a contract
/// verification failure, so construction rejects it outright.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthWitness {
    message_hash: [u8; 32],
    fields: [u8; WITNESS_FIELD_COUNT],
}

impl AuthWitness {
    /// Decompose a raw 64-byte signature into witness fields.
    pub fn from_signature(
        message_hash: [u8; 32],
        signature: &[u8],
    ) -> Result<Self, WitnessError> {
        let fields: [u8; WITNESS_FIELD_COUNT] = signature
            .try_into()
            .map_err(|_| WitnessError::FieldCountMismatch(signature.len()))?;
        Ok(Self {
            message_hash,
            fields,
        })
    }

    /// The 32-byte hash the contract expects to have been signed.
    pub fn message_hash(&self) -> &[u8; 32] {
        &self.message_hash
    }

    /// The 64 byte-valued field elements.
    pub fn fields(&self) -> &[u8; WITNESS_FIELD_COUNT] {
        &self.fields
    }
}

/// A signing strategy that can authorize a transaction.
///
/// Exactly one producing implementation is selected at construction time:
/// [`InteractiveWitnessProvider`] for biometric ceremonies,
/// [`OfflineWitnessProvider`] for raw private keys. A provider wired with
/// neither fails at witness-creation time with `NoSigningMaterial`.
#[async_trait]
pub trait WitnessProvider: Send + Sync {
    async fn create_auth_witness(
        &self,
        message_hash: [u8; 32],
    ) -> Result<AuthWitness, WitnessError>;
}
