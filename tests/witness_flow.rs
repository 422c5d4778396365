use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use p256::ecdsa::signature::{Signer, Verifier};
use p256::ecdsa::{Signature, SigningKey};
use p256::elliptic_curve::sec1::ToEncodedPoint;
use p256::pkcs8::EncodePublicKey;

use passbridge::codec;
use passbridge::passkey::{
    AssertionRequest, AssertionResponse, AttestationResponse, Authenticator, AuthenticatorError,
    CredentialCreationRequest, PasskeyError, PasskeyGateway,
};
use passbridge::witness::{
    InteractiveWitnessProvider, WitnessError, WitnessProvider, WITNESS_FIELD_COUNT,
};

#[derive(Clone, Copy)]
enum Behavior {
    /// Emit DER signatures, as browser authenticators do.
    SignDer,
    /// Emit raw `r || s` signatures, as some native platforms do.
    SignRaw,
    Cancel,
    Timeout,
}

/// Software stand-in for the platform authenticator capability.
struct MockAuthenticator {
    key: SigningKey,
    raw_id: Vec<u8>,
    behavior: Behavior,
    ceremonies: AtomicUsize,
}

impl MockAuthenticator {
    fn new(seed: u8, behavior: Behavior) -> Self {
        Self {
            key: SigningKey::from_bytes(&[seed; 32].into()).unwrap(),
            raw_id: vec![seed; 16],
            behavior,
            ceremonies: AtomicUsize::new(0),
        }
    }

    fn ceremony_count(&self) -> usize {
        self.ceremonies.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Authenticator for MockAuthenticator {
    async fn create(
        &self,
        request: CredentialCreationRequest,
    ) -> Result<AttestationResponse, AuthenticatorError> {
        self.ceremonies.fetch_add(1, Ordering::SeqCst);
        match self.behavior {
            Behavior::Cancel => return Err(AuthenticatorError::Cancelled),
            Behavior::Timeout => return Err(AuthenticatorError::Timeout),
            _ => {}
        }
        assert!(request.algorithms.contains(&-7), "gateway must request ES256");
        assert!(request.require_resident_key);
        assert!(request.require_user_verification);
        assert_eq!(request.challenge.len(), 32);

        let spki = self
            .key
            .verifying_key()
            .to_public_key_der()
            .unwrap()
            .as_bytes()
            .to_vec();
        Ok(AttestationResponse {
            credential_id: codec::encode_base64url(&self.raw_id),
            raw_id: self.raw_id.clone(),
            public_key_spki: spki,
        })
    }

    async fn get(
        &self,
        request: AssertionRequest,
    ) -> Result<AssertionResponse, AuthenticatorError> {
        self.ceremonies.fetch_add(1, Ordering::SeqCst);
        match self.behavior {
            Behavior::Cancel => return Err(AuthenticatorError::Cancelled),
            Behavior::Timeout => return Err(AuthenticatorError::Timeout),
            _ => {}
        }
        assert_eq!(request.allow_credential, self.raw_id);
        assert!(request.require_user_verification);

        let signature: Signature = self.key.sign(&request.challenge);
        let bytes = match self.behavior {
            Behavior::SignDer => signature.to_der().as_bytes().to_vec(),
            _ => signature.to_bytes().to_vec(),
        };
        Ok(AssertionResponse {
            signature: bytes,
            authenticator_data: vec![0xA0; 37],
            client_data_json: br#"{"type":"webauthn.get"}"#.to_vec(),
        })
    }
}

fn gateway_with(auth: Arc<MockAuthenticator>) -> PasskeyGateway {
    PasskeyGateway::new(auth, "wallet.example", "Example Wallet")
}

#[tokio::test]
async fn test_create_credential_extracts_point_from_spki() {
    let auth = Arc::new(MockAuthenticator::new(7, Behavior::SignDer));
    let gateway = gateway_with(auth.clone());

    let credential = gateway.create_credential("alice").await.unwrap();
    let point = auth.key.verifying_key().to_encoded_point(false);
    assert_eq!(credential.public_key_x.as_slice(), point.x().unwrap().as_slice());
    assert_eq!(credential.public_key_y.as_slice(), point.y().unwrap().as_slice());
    assert_eq!(credential.raw_id, vec![7u8; 16]);
    assert_eq!(
        credential.credential_id,
        codec::encode_base64url(&credential.raw_id)
    );
}

#[tokio::test]
async fn test_cancelled_creation_fails() {
    let auth = Arc::new(MockAuthenticator::new(1, Behavior::Cancel));
    let gateway = gateway_with(auth);
    let err = gateway.create_credential("alice").await.unwrap_err();
    assert!(matches!(err, PasskeyError::CredentialCreationFailed(_)));
}

#[tokio::test]
async fn test_gateway_sign_normalizes_der_signature() {
    let auth = Arc::new(MockAuthenticator::new(9, Behavior::SignDer));
    let gateway = gateway_with(auth.clone());
    let credential = gateway.create_credential("bob").await.unwrap();

    let message_hash = [0x5Au8; 32];
    let sig = gateway.sign(&credential, message_hash).await.unwrap();

    // ECDSA here is deterministic (RFC 6979), so the raw form is predictable.
    let expected: Signature = auth.key.sign(&message_hash);
    assert_eq!(sig.signature, expected.to_bytes().as_slice());
}

#[tokio::test]
async fn test_interactive_witness_roundtrip() {
    let auth = Arc::new(MockAuthenticator::new(3, Behavior::SignDer));
    let gateway = gateway_with(auth.clone());
    let credential = gateway.create_credential("carol").await.unwrap();

    let provider = InteractiveWitnessProvider::new(gateway_with(auth.clone()))
        .with_credential(credential);
    let before = auth.ceremony_count();

    let message_hash = [0x11u8; 32];
    let witness = provider.create_auth_witness(message_hash).await.unwrap();

    assert_eq!(witness.fields().len(), WITNESS_FIELD_COUNT);
    assert_eq!(witness.message_hash(), &message_hash);
    assert_eq!(
        auth.ceremony_count(),
        before + 1,
        "exactly one biometric ceremony per witness"
    );

    let signature = Signature::from_slice(witness.fields()).unwrap();
    auth.key
        .verifying_key()
        .verify(&message_hash, &signature)
        .expect("witness fields must verify against the credential's public key");
}

#[tokio::test]
async fn test_raw_signing_authenticator_also_accepted() {
    let auth = Arc::new(MockAuthenticator::new(4, Behavior::SignRaw));
    let gateway = gateway_with(auth.clone());
    let credential = gateway.create_credential("dave").await.unwrap();

    let message_hash = [0x22u8; 32];
    let sig = gateway.sign(&credential, message_hash).await.unwrap();
    let expected: Signature = auth.key.sign(&message_hash);
    assert_eq!(sig.signature, expected.to_bytes().as_slice());
}

#[tokio::test]
async fn test_provider_without_credential_fails_fast() {
    let auth = Arc::new(MockAuthenticator::new(5, Behavior::SignDer));
    let provider = InteractiveWitnessProvider::new(gateway_with(auth.clone()));

    let err = provider.create_auth_witness([0u8; 32]).await.unwrap_err();
    assert!(matches!(err, WitnessError::NoSigningMaterial));
    assert_eq!(auth.ceremony_count(), 0, "no ceremony without material");
}

#[tokio::test]
async fn test_cancelled_ceremony_is_not_retried() {
    let auth = Arc::new(MockAuthenticator::new(6, Behavior::SignDer));
    let gateway = gateway_with(auth.clone());
    let credential = gateway.create_credential("erin").await.unwrap();

    let cancelling = Arc::new(MockAuthenticator::new(6, Behavior::Cancel));
    let provider = InteractiveWitnessProvider::new(gateway_with(cancelling.clone()))
        .with_credential(credential);

    let err = provider.create_auth_witness([0u8; 32]).await.unwrap_err();
    assert!(matches!(
        err,
        WitnessError::Passkey(PasskeyError::AuthenticationFailed(_))
    ));
    assert_eq!(
        cancelling.ceremony_count(),
        1,
        "a cancelled ceremony must surface, not loop"
    );
}

#[tokio::test]
async fn test_timeout_surfaces_as_authentication_failure() {
    let auth = Arc::new(MockAuthenticator::new(8, Behavior::SignDer));
    let gateway = gateway_with(auth.clone());
    let credential = gateway.create_credential("frank").await.unwrap();

    let timing_out = Arc::new(MockAuthenticator::new(8, Behavior::Timeout));
    let err = gateway_with(timing_out)
        .sign(&credential, [0u8; 32])
        .await
        .unwrap_err();
    assert!(matches!(err, PasskeyError::AuthenticationFailed(_)));
}
