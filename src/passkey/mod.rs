pub mod authenticator;
pub mod gateway;
pub mod types;

pub use authenticator::{
    AssertionRequest, AssertionResponse, AttestationResponse, Authenticator, AuthenticatorError,
    CredentialCreationRequest,
};
pub use gateway::PasskeyGateway;
pub use types::{PasskeyCredential, PasskeyError, PasskeySignature};
