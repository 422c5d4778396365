use std::sync::Arc;

use rand::RngCore;

use super::authenticator::{
    AssertionRequest, Authenticator, CredentialCreationRequest,
};
use super::types::{PasskeyCredential, PasskeyError, PasskeySignature};
use crate::config::{CEREMONY_TIMEOUT, ES256_ALG};
use crate::webauthn;

/// Orchestrates platform authenticator ceremonies and exposes normalized
/// outputs. One gateway per relying party.
pub struct PasskeyGateway {
    authenticator: Arc<dyn Authenticator>,
    rp_id: String,
    rp_name: String,
}

impl PasskeyGateway {
    pub fn new(
        authenticator: Arc<dyn Authenticator>,
        rp_id: impl Into<String>,
        rp_name: impl Into<String>,
    ) -> Self {
        Self {
            authenticator,
            rp_id: rp_id.into(),
            rp_name: rp_name.into(),
        }
    }

    pub fn rp_id(&self) -> &str {
        &self.rp_id
    }

    /// Run an attestation ceremony and register a new passkey.
    ///
    /// Requires a platform-resident, user-verified, discoverable ES256
    /// credential; no attestation statement is requested. Cancellation,
    /// timeout and an empty result all surface as `CredentialCreationFailed`.
    pub async fn create_credential(
        &self,
        display_name: &str,
    ) -> Result<PasskeyCredential, PasskeyError> {
        let mut challenge = vec![0u8; 32];
        rand::thread_rng().fill_bytes(&mut challenge);

        let request = CredentialCreationRequest {
            challenge,
            rp_id: self.rp_id.clone(),
            rp_name: self.rp_name.clone(),
            user_name: display_name.to_string(),
            user_display: display_name.to_string(),
            algorithms: vec![ES256_ALG],
            require_resident_key: true,
            require_user_verification: true,
            timeout: CEREMONY_TIMEOUT,
        };

        let response = self
            .authenticator
            .create(request)
            .await
            .map_err(|e| PasskeyError::CredentialCreationFailed(e.to_string()))?;

        if response.raw_id.is_empty() || response.public_key_spki.is_empty() {
            return Err(PasskeyError::CredentialCreationFailed(
                "authenticator returned no credential".into(),
            ));
        }

        let point = webauthn::extract_p256_public_key(&response.public_key_spki)?;
        let credential =
            PasskeyCredential::new(response.credential_id, response.raw_id, point.x, point.y)?;
        tracing::info!(credential_id = %credential.credential_id, "Credential created");
        Ok(credential)
    }

    /// Run an assertion ceremony scoped to `credential` over `message_hash`.
    ///
    /// The authenticator's signature is normalized to raw `r || s` before
    /// being surfaced. Cancellation, timeout and an empty result all surface
    /// as `AuthenticationFailed`.
    pub async fn sign(
        &self,
        credential: &PasskeyCredential,
        message_hash: [u8; 32],
    ) -> Result<PasskeySignature, PasskeyError> {
        let request = AssertionRequest {
            challenge: message_hash.to_vec(),
            rp_id: self.rp_id.clone(),
            allow_credential: credential.raw_id.clone(),
            require_user_verification: true,
            timeout: CEREMONY_TIMEOUT,
        };

        let response = self
            .authenticator
            .get(request)
            .await
            .map_err(|e| PasskeyError::AuthenticationFailed(e.to_string()))?;

        if response.signature.is_empty() {
            return Err(PasskeyError::AuthenticationFailed(
                "authenticator returned no signature".into(),
            ));
        }

        let signature = webauthn::normalize(&response.signature)?;
        tracing::info!(credential_id = %credential.credential_id, "Assertion completed");
        Ok(PasskeySignature {
            signature,
            authenticator_data: response.authenticator_data,
            client_data_json: response.client_data_json,
        })
    }
}
