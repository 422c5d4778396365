pub mod bundle;
pub mod disk;
pub mod file;
pub mod memory;

pub use bundle::SecretBundle;
pub use file::FileSecretStore;
pub use memory::MemorySecretStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialize: {0}")]
    Serialization(String),
    #[error("Encrypt: {0}")]
    Encryption(String),
    #[error("Corrupt: {0}")]
    Corrupt(String),
}

/// Secure key storage, keyed by account address.
///
/// Platform stores (biometric-gated Keychain, extension storage) implement
/// this outside the crate; [`FileSecretStore`] is the reference
/// implementation and [`MemorySecretStore`] backs tests. Implementations
/// serialize their own reads and writes; callers perform at most one read
/// and one write per high-level operation.
pub trait SecretStore: Send {
    fn save(&mut self, address: &str, bundle: &SecretBundle) -> Result<(), StoreError>;
    fn load(&self, address: &str) -> Option<SecretBundle>;
    fn delete(&mut self, address: &str) -> Result<bool, StoreError>;
    fn addresses(&self) -> Vec<String>;
}
