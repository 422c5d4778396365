pub mod public_key;
pub mod signature;

pub use public_key::{extract_p256_public_key, P256PublicKey};
pub use signature::normalize;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WebAuthnError {
    #[error("invalid signature format")] InvalidSignatureFormat,
    #[error("public key not found")]     PublicKeyNotFound,
}
