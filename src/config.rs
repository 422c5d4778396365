use std::path::PathBuf;
use std::time::Duration;

/// COSE algorithm identifier for ECDSA over P-256 with SHA-256 (ES256).
pub const ES256_ALG: i64 = -7;
/// Upper bound on a single authenticator ceremony.
pub const CEREMONY_TIMEOUT: Duration = Duration::from_secs(60);

/// Version tag of the encrypted backup envelope. Any change to the KDF
/// parameters, AEAD construction or wire encoding requires bumping this.
pub const ENVELOPE_VERSION: u32 = 1;
/// PBKDF2-HMAC-SHA256 iteration count for the backup key. Deliberately
/// expensive (0.5–2 s depending on host) to resist offline brute force.
pub const PBKDF2_ITERATIONS: u32 = 600_000;
pub const BACKUP_SALT_LEN: usize = 16;
pub const BACKUP_NONCE_LEN: usize = 12;
pub const BACKUP_TAG_LEN: usize = 16;
pub const BACKUP_KEY_LEN: usize = 32;

#[derive(clap::Parser, Debug, Clone)]
pub struct Config {
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
    /// Directory holding the encrypted account store (defaults to the XDG data dir).
    #[arg(long)]
    pub store_dir: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Subcommand, Debug, Clone)]
pub enum Command {
    /// Produce an auth witness for a message hash with a raw PKCS8 key.
    Sign {
        /// PKCS8 private key file (DER, or base64-wrapped DER).
        #[arg(long)]
        key: PathBuf,
        /// 32-byte message hash, 0x-prefixed hex.
        #[arg(long)]
        hash: String,
    },
    /// Encrypt an account into a portable backup file.
    Export {
        #[arg(long)]
        address: String,
        #[arg(long, default_value = "account")]
        label: String,
        #[arg(long)]
        out: PathBuf,
        #[arg(long)]
        password: String,
        /// P-256 public key X coordinate (derived from the stored private key when omitted).
        #[arg(long)]
        public_key_x: Option<String>,
        /// P-256 public key Y coordinate (derived from the stored private key when omitted).
        #[arg(long)]
        public_key_y: Option<String>,
        /// Passkey credential id, for passkey-backed accounts.
        #[arg(long)]
        credential_id: Option<String>,
        #[arg(long)]
        deployed: bool,
    },
    /// Decrypt a backup file and restore its secrets into the store.
    Import {
        #[arg(long)]
        file: PathBuf,
        #[arg(long)]
        password: String,
    },
    /// List addresses present in the store.
    Accounts,
}
