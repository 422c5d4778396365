#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("WebAuthn: {0}")]
    WebAuthn(#[from] crate::webauthn::WebAuthnError),
    #[error("Passkey: {0}")]
    Passkey(#[from] crate::passkey::PasskeyError),
    #[error("Witness: {0}")]
    Witness(#[from] crate::witness::WitnessError),
    #[error("Backup: {0}")]
    Backup(#[from] crate::backup::BackupError),
    #[error("Store: {0}")]
    Store(#[from] crate::store::StoreError),
    #[error("I/O: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
