pub mod backup;
pub mod codec;
pub mod config;
pub mod error;
pub mod passkey;
pub mod store;
pub mod webauthn;
pub mod witness;

pub use error::{Error, Result};

use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use rand::RngCore;

use crate::backup::{BackupPayload, EncryptedBackupEnvelope};
use crate::config::{Command, Config};
use crate::store::{FileSecretStore, SecretBundle, SecretStore};
use crate::witness::{OfflineWitnessProvider, WitnessProvider};

pub async fn run(cfg: Config) -> anyhow::Result<()> {
    use tracing_subscriber::EnvFilter;
    let level = match cfg.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(level))
        .init();

    match cfg.command.clone() {
        Command::Sign { key, hash } => cmd_sign(key, hash).await,
        Command::Export {
            address,
            label,
            out,
            password,
            public_key_x,
            public_key_y,
            credential_id,
            deployed,
        } => {
            let dir = resolve_store_dir(cfg.store_dir)?;
            cmd_export(
                dir,
                address,
                label,
                out,
                password,
                public_key_x,
                public_key_y,
                credential_id,
                deployed,
            )
            .await
        }
        Command::Import { file, password } => {
            let dir = resolve_store_dir(cfg.store_dir)?;
            cmd_import(dir, file, password).await
        }
        Command::Accounts => {
            let dir = resolve_store_dir(cfg.store_dir)?;
            cmd_accounts(dir)
        }
    }
}

async fn cmd_sign(key_path: PathBuf, hash: String) -> anyhow::Result<()> {
    let raw = std::fs::read(&key_path)?;
    let provider = match OfflineWitnessProvider::from_pkcs8_der(&raw) {
        Ok(provider) => provider,
        Err(_) => {
            // Not raw DER; accept base64-wrapped DER as well.
            let text = String::from_utf8(raw)
                .map_err(|_| anyhow::anyhow!("key file is neither PKCS8 DER nor base64"))?;
            let der = BASE64_STANDARD
                .decode(text.trim())
                .map_err(|_| anyhow::anyhow!("key file is neither PKCS8 DER nor base64"))?;
            OfflineWitnessProvider::from_pkcs8_der(&der)?
        }
    };

    let bytes = codec::decode_hex(&hash)?;
    let message_hash: [u8; 32] = bytes
        .as_slice()
        .try_into()
        .map_err(|_| anyhow::anyhow!("--hash must be exactly 32 bytes"))?;

    let witness = provider.create_auth_witness(message_hash).await?;
    println!("messageHash: {}", codec::encode_hex(witness.message_hash()));
    println!("witness:     {}", codec::encode_hex(witness.fields()));
    Ok(())
}

#[allow(clippy::too_many_arguments)]
async fn cmd_export(
    dir: PathBuf,
    address: String,
    label: String,
    out: PathBuf,
    password: String,
    public_key_x: Option<String>,
    public_key_y: Option<String>,
    credential_id: Option<String>,
    deployed: bool,
) -> anyhow::Result<()> {
    let store = open_store(&dir)?;
    let bundle = store.load(&address).unwrap_or_default();

    let (public_key_x, public_key_y) = match (public_key_x, public_key_y) {
        (Some(x), Some(y)) => (x, y),
        _ => derive_public_key(&bundle)?,
    };
    let account_type = if credential_id.is_some() {
        "passkey"
    } else {
        "ecdsasecp256r1"
    };
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64;

    let payload = BackupPayload {
        address,
        public_key_x,
        public_key_y,
        account_type: account_type.into(),
        label,
        deployed,
        timestamp,
        credential_id,
        secret_key: bundle.secret_key,
        private_key_pkcs8: bundle.private_key_pkcs8,
        salt: bundle.salt,
    };

    let envelope = backup::encrypt_backup(payload, password).await?;
    std::fs::write(&out, envelope.to_json()?)?;
    println!("Backup written to {}", out.display());
    Ok(())
}

async fn cmd_import(dir: PathBuf, file: PathBuf, password: String) -> anyhow::Result<()> {
    let bytes = std::fs::read(&file)?;
    let envelope = EncryptedBackupEnvelope::from_json(&bytes)?;
    let payload = backup::decrypt_backup(envelope, password).await?;

    let mut store = open_store(&dir)?;
    let bundle = SecretBundle {
        secret_key: payload.secret_key.clone(),
        private_key_pkcs8: payload.private_key_pkcs8.clone(),
        salt: payload.salt.clone(),
    };
    store.save(&payload.address, &bundle)?;
    println!(
        "Restored {} ({}, type {})",
        payload.address, payload.label, payload.account_type
    );
    Ok(())
}

fn cmd_accounts(dir: PathBuf) -> anyhow::Result<()> {
    let store = open_store(&dir)?;
    let addresses = store.addresses();
    if addresses.is_empty() {
        println!("No accounts in {}", dir.display());
    }
    for address in addresses {
        println!("{address}");
    }
    Ok(())
}

fn resolve_store_dir(dir: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    match dir {
        Some(dir) => Ok(dir),
        None => Ok(directories::ProjectDirs::from("", "", "passbridge")
            .ok_or_else(|| anyhow::anyhow!("cannot determine XDG data dir"))?
            .data_dir()
            .join("accounts")),
    }
}

fn open_store(dir: &Path) -> anyhow::Result<FileSecretStore> {
    std::fs::create_dir_all(dir)?;
    let key = load_or_create_store_key(&dir.join("store.key"))?;
    FileSecretStore::load(key, dir.to_path_buf())
        .map_err(|e| anyhow::anyhow!("failed to load account store: {e}"))
}

fn load_or_create_store_key(path: &Path) -> anyhow::Result<[u8; 32]> {
    if path.exists() {
        let bytes = std::fs::read(path)?;
        let key: [u8; 32] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| anyhow::anyhow!("store.key is corrupt (not 32 bytes)"))?;
        Ok(key)
    } else {
        let mut key = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut key);
        std::fs::write(path, key)?;
        Ok(key)
    }
}

fn derive_public_key(bundle: &SecretBundle) -> anyhow::Result<(String, String)> {
    use p256::elliptic_curve::sec1::ToEncodedPoint;
    use p256::pkcs8::DecodePrivateKey;

    let b64 = bundle.private_key_pkcs8.as_deref().ok_or_else(|| {
        anyhow::anyhow!(
            "no stored private key to derive the public key from; pass --public-key-x and --public-key-y"
        )
    })?;
    let der = BASE64_STANDARD.decode(b64)?;
    let key = p256::ecdsa::SigningKey::from_pkcs8_der(&der)?;
    let point = key.verifying_key().to_encoded_point(false);
    let x = point
        .x()
        .ok_or_else(|| anyhow::anyhow!("stored key has no affine coordinates"))?;
    let y = point
        .y()
        .ok_or_else(|| anyhow::anyhow!("stored key has no affine coordinates"))?;
    Ok((codec::encode_hex(x), codec::encode_hex(y)))
}
