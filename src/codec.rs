use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

/// Encode bytes as a `0x`-prefixed lowercase hex string.
pub fn encode_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Decode a hex string, with or without a `0x` prefix.
pub fn decode_hex(s: &str) -> Result<Vec<u8>, hex::FromHexError> {
    hex::decode(s.strip_prefix("0x").unwrap_or(s))
}

/// Encode bytes as unpadded base64url (the WebAuthn credential-id transform).
pub fn encode_base64url(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Decode unpadded base64url.
pub fn decode_base64url(s: &str) -> Result<Vec<u8>, base64::DecodeError> {
    URL_SAFE_NO_PAD.decode(s)
}

/// Left-pad `bytes` with zeros to a fixed 32-byte big-endian value.
/// Returns `None` if the input is longer than 32 bytes.
pub fn left_pad_32(bytes: &[u8]) -> Option<[u8; 32]> {
    if bytes.len() > 32 {
        return None;
    }
    let mut out = [0u8; 32];
    out[32 - bytes.len()..].copy_from_slice(bytes);
    Some(out)
}

/// Minimal cursor over DER-encoded data.
///
/// Only what the signature normalizer needs: a SEQUENCE header check and
/// short-form INTEGER components. Long-form lengths never occur in a P-256
/// ECDSA signature (the whole structure is under 128 bytes).
pub(crate) struct DerReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> DerReader<'a> {
    pub(crate) fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Consume a SEQUENCE header (`0x30 <len>`) whose declared length must
    /// cover exactly the rest of the buffer.
    pub(crate) fn read_sequence_header(&mut self) -> Option<()> {
        let tag = *self.buf.get(self.pos)?;
        let len = *self.buf.get(self.pos + 1)? as usize;
        if tag != 0x30 || len >= 0x80 || self.pos + 2 + len != self.buf.len() {
            return None;
        }
        self.pos += 2;
        Some(())
    }

    /// Consume an INTEGER component (`0x02 <len> <bytes>`) and return its
    /// content bytes.
    pub(crate) fn read_integer(&mut self) -> Option<&'a [u8]> {
        let tag = *self.buf.get(self.pos)?;
        let len = *self.buf.get(self.pos + 1)? as usize;
        if tag != 0x02 || len == 0 || len >= 0x80 {
            return None;
        }
        let start = self.pos + 2;
        let content = self.buf.get(start..start + len)?;
        self.pos = start + len;
        Some(content)
    }

    pub(crate) fn is_exhausted(&self) -> bool {
        self.pos == self.buf.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_roundtrip() {
        let bytes = vec![0x00, 0xde, 0xad, 0xbe, 0xef];
        let s = encode_hex(&bytes);
        assert_eq!(s, "0x00deadbeef");
        assert_eq!(decode_hex(&s).unwrap(), bytes);
    }

    #[test]
    fn test_decode_hex_without_prefix() {
        assert_eq!(decode_hex("0102ff").unwrap(), vec![1, 2, 255]);
    }

    #[test]
    fn test_decode_hex_rejects_odd_length() {
        assert!(decode_hex("0xabc").is_err());
    }

    #[test]
    fn test_decode_hex_rejects_non_hex() {
        assert!(decode_hex("0xzz").is_err());
    }

    #[test]
    fn test_base64url_roundtrip() {
        let bytes: Vec<u8> = (0u8..=255).collect();
        let s = encode_base64url(&bytes);
        assert!(!s.contains('='), "base64url must be unpadded");
        assert!(!s.contains('+') && !s.contains('/'), "must use url-safe alphabet");
        assert_eq!(decode_base64url(&s).unwrap(), bytes);
    }

    #[test]
    fn test_left_pad_32_shorter_input() {
        let padded = left_pad_32(&[0x01, 0x02]).unwrap();
        assert_eq!(&padded[..30], &[0u8; 30]);
        assert_eq!(&padded[30..], &[0x01, 0x02]);
    }

    #[test]
    fn test_left_pad_32_exact_input() {
        let bytes = [0xAB; 32];
        assert_eq!(left_pad_32(&bytes).unwrap(), bytes);
    }

    #[test]
    fn test_left_pad_32_rejects_oversized() {
        assert!(left_pad_32(&[0u8; 33]).is_none());
    }

    #[test]
    fn test_der_reader_two_integers() {
        // SEQUENCE { INTEGER 0x01, INTEGER 0x02 0x03 }
        let buf = [0x30, 0x07, 0x02, 0x01, 0x01, 0x02, 0x02, 0x02, 0x03];
        let mut reader = DerReader::new(&buf);
        reader.read_sequence_header().unwrap();
        assert_eq!(reader.read_integer().unwrap(), &[0x01]);
        assert_eq!(reader.read_integer().unwrap(), &[0x02, 0x03]);
        assert!(reader.is_exhausted());
    }

    #[test]
    fn test_der_reader_rejects_wrong_sequence_tag() {
        let buf = [0x31, 0x03, 0x02, 0x01, 0x01];
        assert!(DerReader::new(&buf).read_sequence_header().is_none());
    }

    #[test]
    fn test_der_reader_rejects_length_mismatch() {
        // Declared length 5, only 3 content bytes follow.
        let buf = [0x30, 0x05, 0x02, 0x01, 0x01];
        assert!(DerReader::new(&buf).read_sequence_header().is_none());
    }

    #[test]
    fn test_der_reader_rejects_truncated_integer() {
        // INTEGER declares 5 content bytes but only 3 remain.
        let buf = [0x30, 0x05, 0x02, 0x05, 0x01, 0x01, 0x01];
        let mut reader = DerReader::new(&buf);
        reader.read_sequence_header().unwrap();
        assert!(reader.read_integer().is_none());
    }

    #[test]
    fn test_der_reader_rejects_zero_length_integer() {
        let buf = [0x30, 0x02, 0x02, 0x00];
        let mut reader = DerReader::new(&buf);
        reader.read_sequence_header().unwrap();
        assert!(reader.read_integer().is_none());
    }
}
