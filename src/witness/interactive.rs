use async_trait::async_trait;

use super::{AuthWitness, WitnessError, WitnessProvider};
use crate::passkey::{PasskeyCredential, PasskeyGateway};

/// Witness provider backed by an interactive biometric ceremony.
///
/// Exactly one ceremony per call. A cancelled ceremony surfaces as an error
/// rather than being retried here: an automatic retry of a user-presence
/// prompt is indistinguishable from a stuck UI, so re-prompting is the
/// caller's decision.
pub struct InteractiveWitnessProvider {
    gateway: PasskeyGateway,
    credential: Option<PasskeyCredential>,
}

impl InteractiveWitnessProvider {
    /// Create a provider with no credential wired yet. Witness creation
    /// fails with `NoSigningMaterial` until one is attached.
    pub fn new(gateway: PasskeyGateway) -> Self {
        Self {
            gateway,
            credential: None,
        }
    }

    pub fn with_credential(mut self, credential: PasskeyCredential) -> Self {
        self.credential = Some(credential);
        self
    }

    pub fn credential(&self) -> Option<&PasskeyCredential> {
        self.credential.as_ref()
    }
}

#[async_trait]
impl WitnessProvider for InteractiveWitnessProvider {
    async fn create_auth_witness(
        &self,
        message_hash: [u8; 32],
    ) -> Result<AuthWitness, WitnessError> {
        let credential = self
            .credential
            .as_ref()
            .ok_or(WitnessError::NoSigningMaterial)?;
        let signature = self.gateway.sign(credential, message_hash).await?;
        AuthWitness::from_signature(message_hash, &signature.signature)
    }
}
