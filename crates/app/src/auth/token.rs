//! Access token formatting, parsing, and verifier construction.

use std::{fmt, str::FromStr};

use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};
use thiserror::Error;
use uuid::Uuid;

use crate::auth::models::UserUuid;

/// Access token identifier prefix.
pub const ACCESS_TOKEN_PREFIX: &str = "sw";

/// Number of secret bytes encoded in a token.
pub const ACCESS_TOKEN_SECRET_BYTES: usize = 32;

const ACCESS_TOKEN_SECRET_HEX_CHARS: usize = ACCESS_TOKEN_SECRET_BYTES * 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessTokenVersion {
    V1,
}

impl AccessTokenVersion {
    #[must_use]
    pub const fn as_i16(self) -> i16 {
        match self {
            Self::V1 => 1,
        }
    }

    #[must_use]
    pub const fn segment(self) -> &'static str {
        match self {
            Self::V1 => "v1",
        }
    }
}

impl TryFrom<i16> for AccessTokenVersion {
    type Error = AccessTokenError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::V1),
            _ => Err(AccessTokenError::UnsupportedVersion),
        }
    }
}

impl From<AccessTokenVersion> for i16 {
    fn from(value: AccessTokenVersion) -> Self {
        value.as_i16()
    }
}

impl FromStr for AccessTokenVersion {
    type Err = AccessTokenError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "v1" => Ok(Self::V1),
            _ => Err(AccessTokenError::UnsupportedVersion),
        }
    }
}

#[derive(Clone)]
pub struct AccessTokenSecret {
    bytes: [u8; ACCESS_TOKEN_SECRET_BYTES],
}

impl AccessTokenSecret {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; ACCESS_TOKEN_SECRET_BYTES]) -> Self {
        Self { bytes }
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; ACCESS_TOKEN_SECRET_BYTES] {
        &self.bytes
    }
}

impl fmt::Debug for AccessTokenSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessTokenSecret(**redacted**)")?;
        Ok(())
    }
}

impl Drop for AccessTokenSecret {
    fn drop(&mut self) {
        use zeroize::Zeroize;

        self.bytes.zeroize();
    }
}

#[derive(Debug, Clone)]
pub struct ParsedAccessToken {
    pub token_uuid: Uuid,
    pub version: AccessTokenVersion,
    pub secret: AccessTokenSecret,
}

#[derive(Debug, Error)]
pub enum AccessTokenError {
    #[error("access token format is invalid")]
    InvalidFormat,

    #[error("access token uses an unsupported version")]
    UnsupportedVersion,

    #[error("access token secret encoding is invalid")]
    InvalidSecretEncoding,
}

#[must_use]
pub(crate) fn generate_access_token_secret() -> AccessTokenSecret {
    let mut secret = [0_u8; ACCESS_TOKEN_SECRET_BYTES];

    OsRng.fill_bytes(&mut secret);

    AccessTokenSecret::from_bytes(secret)
}

#[must_use]
pub(crate) fn format_access_token(
    token_uuid: Uuid,
    version: AccessTokenVersion,
    secret: &AccessTokenSecret,
) -> String {
    format!(
        "{ACCESS_TOKEN_PREFIX}_{}_{}.{}",
        version.segment(),
        token_uuid.simple(),
        encode_secret_hex(secret.as_bytes())
    )
}

pub(crate) fn parse_access_token(token: &str) -> Result<ParsedAccessToken, AccessTokenError> {
    let (prefix_and_id, secret_hex) =
        token.split_once('.').ok_or(AccessTokenError::InvalidFormat)?;

    let mut id_parts = prefix_and_id.splitn(3, '_');

    let prefix = id_parts.next().ok_or(AccessTokenError::InvalidFormat)?;
    let version_segment = id_parts.next().ok_or(AccessTokenError::InvalidFormat)?;
    let token_uuid_segment = id_parts.next().ok_or(AccessTokenError::InvalidFormat)?;

    if prefix != ACCESS_TOKEN_PREFIX {
        return Err(AccessTokenError::InvalidFormat);
    }

    let version = AccessTokenVersion::from_str(version_segment)?;

    let token_uuid =
        Uuid::try_parse(token_uuid_segment).map_err(|_| AccessTokenError::InvalidFormat)?;

    let secret = decode_secret_hex(secret_hex).ok_or(AccessTokenError::InvalidSecretEncoding)?;

    Ok(ParsedAccessToken {
        token_uuid,
        version,
        secret: AccessTokenSecret::from_bytes(secret),
    })
}

/// Compute the stored verifier for a token.
///
/// Digest input: `{token_uuid_hex}:{version_i16_decimal}:{user_uuid_hex}:{secret_hex}`
#[must_use]
pub(crate) fn hash_verifier_input(
    token_uuid: &Uuid,
    version: AccessTokenVersion,
    user_uuid: &UserUuid,
    secret: &AccessTokenSecret,
) -> String {
    let input = format!(
        "{}:{}:{}:{}",
        token_uuid.simple(),
        version.as_i16(),
        user_uuid.into_uuid().simple(),
        encode_secret_hex(secret.as_bytes()),
    );

    format!("{:x}", Sha256::digest(input.as_bytes()))
}

fn encode_secret_hex(secret: &[u8; ACCESS_TOKEN_SECRET_BYTES]) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";

    let mut encoded = String::with_capacity(ACCESS_TOKEN_SECRET_HEX_CHARS);

    for byte in secret {
        encoded.push(HEX[(byte >> 4) as usize] as char);
        encoded.push(HEX[(byte & 0x0f) as usize] as char);
    }

    encoded
}

fn decode_secret_hex(secret_hex: &str) -> Option<[u8; ACCESS_TOKEN_SECRET_BYTES]> {
    if secret_hex.len() != ACCESS_TOKEN_SECRET_HEX_CHARS {
        return None;
    }

    let mut secret = [0_u8; ACCESS_TOKEN_SECRET_BYTES];
    let secret_bytes = secret_hex.as_bytes();

    for (index, byte) in secret.iter_mut().enumerate() {
        let hi = decode_hex_nibble(*secret_bytes.get(index * 2)?)?;
        let lo = decode_hex_nibble(*secret_bytes.get((index * 2) + 1)?)?;

        *byte = (hi << 4) | lo;
    }

    Some(secret)
}

fn decode_hex_nibble(value: u8) -> Option<u8> {
    match value {
        b'0'..=b'9' => Some(value - b'0'),
        b'a'..=b'f' => Some(value - b'a' + 10),
        b'A'..=b'F' => Some(value - b'A' + 10),
        _ => None,
    }
}
