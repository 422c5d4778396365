use std::time::Duration;

use async_trait::async_trait;

/// Failure modes of a platform authenticator ceremony.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AuthenticatorError {
    #[error("ceremony cancelled by user")]
    Cancelled,
    #[error("ceremony timed out")]
    Timeout,
    #[error("authenticator unavailable: {0}")]
    Unavailable(String),
}

/// Options for a credential-creation (attestation) ceremony.
#[derive(Debug, Clone)]
pub struct CredentialCreationRequest {
    pub challenge: Vec<u8>,
    pub rp_id: String,
    pub rp_name: String,
    pub user_name: String,
    pub user_display: String,
    /// COSE algorithm identifiers the relying party accepts, in preference order.
    pub algorithms: Vec<i64>,
    pub require_resident_key: bool,
    pub require_user_verification: bool,
    pub timeout: Duration,
}

/// Result of a successful attestation ceremony.
#[derive(Debug, Clone)]
pub struct AttestationResponse {
    /// Authenticator-assigned identifier, base64url of `raw_id`.
    pub credential_id: String,
    pub raw_id: Vec<u8>,
    /// SPKI-encoded public key of the new credential.
    pub public_key_spki: Vec<u8>,
}

/// Options for an assertion (signing) ceremony.
#[derive(Debug, Clone)]
pub struct AssertionRequest {
    pub challenge: Vec<u8>,
    pub rp_id: String,
    /// Raw id of the single credential allowed to answer.
    pub allow_credential: Vec<u8>,
    pub require_user_verification: bool,
    pub timeout: Duration,
}

/// Result of a successful assertion ceremony.
#[derive(Debug, Clone)]
pub struct AssertionResponse {
    /// ECDSA P-256 signature, DER or raw form depending on the platform.
    pub signature: Vec<u8>,
    pub authenticator_data: Vec<u8>,
    pub client_data_json: Vec<u8>,
}

/// The platform authenticator capability.
///
/// Both ceremonies suspend the calling task until the hardware resolves,
/// the user cancels, or the ceremony times out. Concurrent duplicate
/// requests against the same credential are the authenticator's problem to
/// reject or queue; callers only see its success or failure.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn create(
        &self,
        request: CredentialCreationRequest,
    ) -> Result<AttestationResponse, AuthenticatorError>;

    async fn get(&self, request: AssertionRequest)
        -> Result<AssertionResponse, AuthenticatorError>;
}
