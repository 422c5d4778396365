use super::WebAuthnError;

/// Marker byte for an uncompressed SEC1 EC point.
const UNCOMPRESSED_POINT_TAG: u8 = 0x04;

/// Raw P-256 point coordinates recovered from an SPKI container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct P256PublicKey {
    pub x: [u8; 32],
    pub y: [u8; 32],
}

/// Extract the raw X/Y coordinates of a P-256 public key from its
/// SPKI (SubjectPublicKeyInfo) encoding.
///
/// SPKI headers vary slightly in length across platforms and algorithm OID
/// encodings, so instead of assuming a fixed offset this scans for the
/// uncompressed-point marker `0x04` followed by at least 64 bytes. The
/// length guard keeps a stray `0x04` near the end of the buffer from being
/// taken for the point.
pub fn extract_p256_public_key(spki: &[u8]) -> Result<P256PublicKey, WebAuthnError> {
    for (i, &byte) in spki.iter().enumerate() {
        if byte == UNCOMPRESSED_POINT_TAG && spki.len() - i - 1 >= 64 {
            let mut x = [0u8; 32];
            let mut y = [0u8; 32];
            x.copy_from_slice(&spki[i + 1..i + 33]);
            y.copy_from_slice(&spki[i + 33..i + 65]);
            return Ok(P256PublicKey { x, y });
        }
    }
    Err(WebAuthnError::PublicKeyNotFound)
}
