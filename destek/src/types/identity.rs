use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::bail;
use crate::error::{DestekError, DestekResult, ErrorKind};

/// Length of a SHA-256 digest in bytes.
const DIGEST_LEN: usize = 32;

/// Accepted identity number lengths: tax id (10) and national id (11).
const IDENTITY_LENGTHS: [usize; 2] = [10, 11];

/// Lowercase hex SHA-256 digest of a normalized identity number.
///
/// The only persisted form of an identity number.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HashKey([u8; DIGEST_LEN]);

impl HashKey {
    /// Hashes the given normalized identity text.
    pub fn digest(identity: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(identity.as_bytes());

        Self(hasher.finalize().into())
    }

    /// Returns the digest bytes, most significant byte first.
    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// Returns the 64 character lowercase hex form.
    pub fn to_hex(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for HashKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }

        Ok(())
    }
}

impl fmt::Debug for HashKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HashKey({self})")
    }
}

impl FromStr for HashKey {
    type Err = DestekError;

    /// Parses a 64 character lowercase hex digest.
    fn from_str(s: &str) -> DestekResult<Self> {
        let is_lower_hex = s
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
        if s.len() != DIGEST_LEN * 2 || !is_lower_hex {
            bail!(
                ErrorKind::DeserializationError,
                "Hash key must be 64 lowercase hex characters",
                detail = format!("got {} characters", s.len())
            );
        }

        let mut bytes = [0u8; DIGEST_LEN];
        for (byte, pair) in bytes.iter_mut().zip(s.as_bytes().chunks_exact(2)) {
            *byte = (hex_value(pair[0]) << 4) | hex_value(pair[1]);
        }

        Ok(Self(bytes))
    }
}

fn hex_value(digit: u8) -> u8 {
    match digit {
        b'0'..=b'9' => digit - b'0',
        _ => digit - b'a' + 10,
    }
}

impl TryFrom<String> for HashKey {
    type Error = DestekError;

    fn try_from(value: String) -> DestekResult<Self> {
        value.parse()
    }
}

impl From<HashKey> for String {
    fn from(value: HashKey) -> Self {
        value.to_string()
    }
}

/// A validated identity number as typed by someone looking up their record.
///
/// Only the format is checked: trimmed, digits only, 10 or 11 characters long. The value
/// never appears in [`fmt::Debug`] output.
#[derive(Clone, PartialEq, Eq)]
pub struct IdentityNumber(String);

impl IdentityNumber {
    /// Validates raw lookup input.
    pub fn parse(input: &str) -> DestekResult<Self> {
        let trimmed = input.trim();

        if !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            bail!(
                ErrorKind::InvalidIdentityNumber,
                "Identity number must contain only digits"
            );
        }

        if !IDENTITY_LENGTHS.contains(&trimmed.len()) {
            bail!(
                ErrorKind::InvalidIdentityNumber,
                "Identity number must be 10 or 11 digits long",
                detail = format!("got {} digits", trimmed.len())
            );
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Returns the hash key this number is stored under.
    pub fn hash_key(&self) -> HashKey {
        HashKey::digest(&self.0)
    }
}

impl fmt::Debug for IdentityNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("IdentityNumber(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_matches_sha256_hex() {
        assert_eq!(
            HashKey::digest("12345678901").to_hex(),
            "254aa248acb47dd654ca3ea53f48c2c26d641d23d7e2e93a1ec56258df7674c4"
        );
        assert_eq!(
            HashKey::digest("1234567890").to_hex(),
            "c775e7b757ede630cd0aa1113bd102661ab38829ca52a6422ab782862f268646"
        );
    }

    #[test]
    fn hex_form_parses_back() {
        let key = HashKey::digest("22222222222");
        let parsed: HashKey = key.to_hex().parse().unwrap();

        assert_eq!(parsed, key);
        assert_eq!(serde_json::to_string(&key).unwrap(), format!("\"{key}\""));
    }

    #[test]
    fn rejects_malformed_hex_keys() {
        assert!("abc".parse::<HashKey>().is_err());
        let upper = HashKey::digest("22222222222").to_hex().to_uppercase();
        assert!(upper.parse::<HashKey>().is_err());
    }

    #[test]
    fn identity_number_accepts_10_and_11_digits() {
        let national = IdentityNumber::parse(" 12345678901 ").unwrap();
        let tax = IdentityNumber::parse("1234567890").unwrap();

        assert_eq!(national.hash_key(), HashKey::digest("12345678901"));
        assert_eq!(tax.hash_key(), HashKey::digest("1234567890"));
    }

    #[test]
    fn identity_number_rejects_other_lengths_and_non_digits() {
        for input in ["123456789", "123456789012", "1234567890a", "", "12345 67890"] {
            let err = IdentityNumber::parse(input).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidIdentityNumber, "{input}");
        }
    }

    #[test]
    fn identity_number_debug_is_redacted() {
        let number = IdentityNumber::parse("12345678901").unwrap();

        assert!(!format!("{number:?}").contains("12345678901"));
    }
}
