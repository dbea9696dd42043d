//! HMAC-SHA256 commitments over decimal-encoded values.

use std::fmt;

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::{CoreError, CoreResult};

type HmacSha256 = Hmac<Sha256>;

/// Length in bytes of secret keys and digests.
pub const KEY_LEN: usize = 32;

/// A 256-bit secret key. Never reused across draws.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey([u8; KEY_LEN]);

impl SecretKey {
    /// Create from raw bytes.
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Parse an uppercase or lowercase hex string.
    pub fn from_hex(s: &str) -> CoreResult<Self> {
        decode_fixed(s).map(Self)
    }

    /// Get the underlying bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }

    /// Uppercase hex encoding, as shown to the player.
    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.0)
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Only a prefix; the key may not be revealed yet.
        write!(f, "SecretKey({}..)", hex::encode(&self.0[..4]))
    }
}

/// The published digest `HMAC-SHA256(key, decimal(value))`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Commitment([u8; KEY_LEN]);

impl Commitment {
    /// Compute the commitment to `value` under `key`.
    pub fn new(key: &SecretKey, value: u32) -> CoreResult<Self> {
        let mac = keyed_hash(key, value)?;
        Ok(Self(mac.finalize().into_bytes().into()))
    }

    /// Create from raw bytes.
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Parse an uppercase or lowercase hex string.
    pub fn from_hex(s: &str) -> CoreResult<Self> {
        decode_fixed(s).map(Self)
    }

    /// Get the underlying bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }

    /// Uppercase hex encoding, as shown to the player.
    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.0)
    }

    /// Check that `key` and `value` reproduce this commitment.
    ///
    /// The comparison is constant-time.
    pub fn verify(&self, key: &SecretKey, value: u32) -> bool {
        match keyed_hash(key, value) {
            Ok(mac) => mac.verify_slice(&self.0).is_ok(),
            Err(_) => false,
        }
    }
}

impl fmt::Debug for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Commitment({})", hex::encode(&self.0[..8]))
    }
}

impl fmt::Display for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Verify a reveal given as hex strings, e.g. copied from a game log.
pub fn verify_hex(key_hex: &str, value: u32, digest_hex: &str) -> CoreResult<bool> {
    let key = SecretKey::from_hex(key_hex)?;
    let commitment = Commitment::from_hex(digest_hex)?;
    Ok(commitment.verify(&key, value))
}

fn keyed_hash(key: &SecretKey, value: u32) -> CoreResult<HmacSha256> {
    let mut mac =
        <HmacSha256 as Mac>::new_from_slice(key.as_bytes()).map_err(|_| CoreError::InvalidKey)?;
    mac.update(value.to_string().as_bytes());
    Ok(mac)
}

fn decode_fixed(s: &str) -> CoreResult<[u8; KEY_LEN]> {
    let bytes = hex::decode(s.trim()).map_err(|e| CoreError::InvalidHex(e.to_string()))?;
    bytes.try_into().map_err(|b: Vec<u8>| {
        CoreError::InvalidHex(format!("expected {KEY_LEN} bytes, got {}", b.len()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(byte: u8) -> SecretKey {
        SecretKey::from_bytes([byte; KEY_LEN])
    }

    #[test]
    fn commitment_verifies() {
        let k = key(7);
        let c = Commitment::new(&k, 3).unwrap();
        assert!(c.verify(&k, 3));
    }

    #[test]
    fn wrong_value_fails() {
        let k = key(7);
        let c = Commitment::new(&k, 3).unwrap();
        assert!(!c.verify(&k, 4));
    }

    #[test]
    fn wrong_key_fails() {
        let c = Commitment::new(&key(1), 3).unwrap();
        assert!(!c.verify(&key(2), 3));
    }

    #[test]
    fn digest_covers_decimal_string() {
        let k = key(0x0b);
        let a = Commitment::new(&k, 10).unwrap();
        let mut mac = <HmacSha256 as Mac>::new_from_slice(&[0x0b; KEY_LEN]).unwrap();
        mac.update(b"10");
        let expected: [u8; KEY_LEN] = mac.finalize().into_bytes().into();
        assert_eq!(a.as_bytes(), &expected);
    }

    #[test]
    fn hex_round_trip_is_uppercase() {
        let c = Commitment::new(&key(9), 42).unwrap();
        let hex = c.to_hex();
        assert_eq!(hex.len(), 64);
        assert_eq!(hex, hex.to_uppercase());
        assert_eq!(Commitment::from_hex(&hex).unwrap(), c);
        assert_eq!(Commitment::from_hex(&hex.to_lowercase()).unwrap(), c);
    }

    #[test]
    fn verify_hex_accepts_display_output() {
        let k = key(5);
        let c = Commitment::new(&k, 5).unwrap();
        assert!(verify_hex(&k.to_hex(), 5, &c.to_hex()).unwrap());
        assert!(!verify_hex(&k.to_hex(), 4, &c.to_hex()).unwrap());
    }

    #[test]
    fn short_hex_is_rejected() {
        assert!(matches!(
            SecretKey::from_hex("ABCD"),
            Err(CoreError::InvalidHex(_))
        ));
        assert!(matches!(
            Commitment::from_hex("not hex"),
            Err(CoreError::InvalidHex(_))
        ));
    }

    #[test]
    fn debug_does_not_print_full_key() {
        let k = key(0xab);
        let dbg = format!("{k:?}");
        assert!(!dbg.contains(&k.to_hex()));
    }
}
