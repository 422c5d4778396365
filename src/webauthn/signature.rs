use super::WebAuthnError;
use crate::codec::{left_pad_32, DerReader};

/// Length of a raw P-256 ECDSA signature: `r (32) || s (32)`.
pub const RAW_SIGNATURE_LEN: usize = 64;

/// Normalize an ECDSA P-256 signature to fixed-width raw `r || s` form.
///
/// A 64-byte input is returned unchanged. Anything else must be a DER
/// SEQUENCE of two INTEGERs; each component is reduced to exactly 32
/// big-endian bytes:
///
/// - 32 bytes: used verbatim
/// - 33 bytes with a leading `0x00`: the sign-padding byte is stripped
/// - under 32 bytes: left-padded with zeros (DER strips leading zero bytes)
/// - anything else: rejected
///
/// Malformed input corrupts a signature silently if accepted, so every
/// deviation from the rules above is an error.
pub fn normalize(signature: &[u8]) -> Result<[u8; RAW_SIGNATURE_LEN], WebAuthnError> {
    if signature.len() == RAW_SIGNATURE_LEN {
        let mut out = [0u8; RAW_SIGNATURE_LEN];
        out.copy_from_slice(signature);
        return Ok(out);
    }

    let mut reader = DerReader::new(signature);
    reader
        .read_sequence_header()
        .ok_or(WebAuthnError::InvalidSignatureFormat)?;
    let r = reader
        .read_integer()
        .ok_or(WebAuthnError::InvalidSignatureFormat)?;
    let s = reader
        .read_integer()
        .ok_or(WebAuthnError::InvalidSignatureFormat)?;
    if !reader.is_exhausted() {
        return Err(WebAuthnError::InvalidSignatureFormat);
    }

    let mut out = [0u8; RAW_SIGNATURE_LEN];
    out[..32].copy_from_slice(&normalize_component(r)?);
    out[32..].copy_from_slice(&normalize_component(s)?);
    Ok(out)
}

fn normalize_component(bytes: &[u8]) -> Result<[u8; 32], WebAuthnError> {
    let trimmed = match bytes.len() {
        33 if bytes[0] == 0x00 => &bytes[1..],
        n if n <= 32 => bytes,
        _ => return Err(WebAuthnError::InvalidSignatureFormat),
    };
    left_pad_32(trimmed).ok_or(WebAuthnError::InvalidSignatureFormat)
}
