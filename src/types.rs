use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// A 32-byte hash value: header hashes, mix digests, and final digests.
///
/// Equality is byte-wise. The bytes carry no endianness of their own and
/// are never interpreted as integers inside this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hash256([u8; 32]);

impl Hash256 {
    /// Length in bytes of every hash crossing the crate boundary.
    pub const LEN: usize = 32;

    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Build from a byte slice, rejecting anything that is not exactly
    /// 32 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, Error> {
        let arr: [u8; 32] = bytes.try_into().map_err(|_| {
            Error::InvalidInput(format!("expected {} bytes, got {}", Self::LEN, bytes.len()))
        })?;
        Ok(Self(arr))
    }

    pub fn from_hex(s: &str) -> Result<Self, Error> {
        let mut out = [0u8; 32];
        hex::decode_to_slice(s, &mut out)
            .map_err(|e| Error::InvalidInput(format!("bad hex hash: {e}")))?;
        Ok(Self(out))
    }

    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Serialize as hex for logging or transport.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub const fn zero() -> Self {
        Self([0u8; 32])
    }
}

impl From<[u8; 32]> for Hash256 {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl TryFrom<&[u8]> for Hash256 {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Error> {
        Self::from_slice(bytes)
    }
}

impl AsRef<[u8]> for Hash256 {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Display for Hash256 {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Result of a one-shot hash: the intermediate mix digest and the final
/// digest a higher layer compares against its difficulty target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowOutput {
    pub mix: Hash256,
    pub digest: Hash256,
}

/// Result of verification.
///
/// `digest` is the recomputed final digest and is populated whether or not
/// the supplied mix matched; a mismatch is an expected outcome of work that
/// fails the proof, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyOutcome {
    pub valid: bool,
    pub digest: Hash256,
}
