//! Value types shared by the dump and dictionary parsers.
//!
//! Every hash that enters the engine goes through [`NtHash::from_prefix`], which
//! accepts a leading run of 32 hex digits and lowercases it. That makes hash
//! comparisons between the two inputs case-insensitive without any further
//! normalization downstream.
use std::fmt;

/// Number of hex characters in an NT hash.
pub const NT_HASH_LEN: usize = 32;

/// A normalized (lowercase) 32-character NT hash.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NtHash(String);

impl NtHash {
    /// Well-known NT hash of the empty password.
    pub const EMPTY_PASSWORD: &'static str = "31d6cfe0d16ae931b73c59d7e0c089c0";

    /// Take the first 32 characters of `candidate` if they are all hex digits.
    /// Anything after the prefix is ignored.
    pub fn from_prefix(candidate: &str) -> Option<Self> {
        let prefix = candidate.as_bytes().get(..NT_HASH_LEN)?;
        if !prefix.iter().all(u8::is_ascii_hexdigit) {
            return None;
        }
        // all ASCII, so slicing at NT_HASH_LEN is on a char boundary
        Some(Self(candidate[..NT_HASH_LEN].to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for NtHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NtHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An account taken from a `user:RID:LM:NTLM:::` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    pub user: String,
    pub hash: NtHash,
}

/// A recovered plaintext taken from a `hash:password` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrackedEntry {
    pub hash: NtHash,
    pub password: String,
}
