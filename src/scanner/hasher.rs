//! MD5 content fingerprinting with streaming reads.
//!
//! # Overview
//!
//! A [`Fingerprint`] is the 128-bit MD5 digest of a file's full contents.
//! [`Hasher`] reads files in fixed-size chunks ([`CHUNK_SIZE`] bytes by
//! default) so peak memory stays constant regardless of file size, and
//! keeps exactly one file handle open at a time.

use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::str::FromStr;

use md5::{Digest, Md5};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::HashError;

/// Default read block size in bytes.
pub const CHUNK_SIZE: usize = 8192;

/// 128-bit content fingerprint.
///
/// Displays and serializes as 32 lowercase hex characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint([u8; 16]);

impl Fingerprint {
    /// Wrap raw digest bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Raw digest bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Hex-encoded fingerprint.
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("{self:x}")
    }
}

impl fmt::LowerHex for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(self, f)
    }
}

/// Error returned when parsing a fingerprint from hex.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseFingerprintError {
    /// Input was not exactly 32 characters.
    #[error("Fingerprint must be 32 hex characters, got {0}")]
    InvalidLength(usize),

    /// Input contained a non-hex character.
    #[error("Invalid hex character in fingerprint: '{0}'")]
    InvalidChar(char),
}

impl FromStr for Fingerprint {
    type Err = ParseFingerprintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 {
            return Err(ParseFingerprintError::InvalidLength(s.len()));
        }

        if let Some(c) = s.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(ParseFingerprintError::InvalidChar(c));
        }

        let mut bytes = [0u8; 16];
        for (i, pair) in s.as_bytes().chunks(2).enumerate() {
            bytes[i] = (hex_value(pair[0]) << 4) | hex_value(pair[1]);
        }
        Ok(Self(bytes))
    }
}

// Caller has already checked the byte is an ASCII hex digit.
fn hex_value(b: u8) -> u8 {
    match b {
        b'0'..=b'9' => b - b'0',
        b'a'..=b'f' => b - b'a' + 10,
        _ => b - b'A' + 10,
    }
}

impl Serialize for Fingerprint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Fingerprint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Streaming MD5 hasher.
///
/// # Example
///
/// ```no_run
/// use dupefinder::scanner::Hasher;
/// use std::path::Path;
///
/// let hasher = Hasher::new();
/// let fp = hasher.fingerprint(Path::new("Cargo.toml")).unwrap();
/// println!("{fp}");
/// ```
#[derive(Debug, Clone)]
pub struct Hasher {
    chunk_size: usize,
}

impl Default for Hasher {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher {
    /// Create a hasher that reads in [`CHUNK_SIZE`] blocks.
    #[must_use]
    pub fn new() -> Self {
        Self {
            chunk_size: CHUNK_SIZE,
        }
    }

    /// Create a hasher with a custom read block size (minimum 1 byte).
    #[must_use]
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
        }
    }

    /// Read block size in bytes.
    #[must_use]
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Fingerprint the file at `path`.
    ///
    /// The handle is dropped before this returns.
    ///
    /// # Errors
    ///
    /// Returns [`HashError`] if the file cannot be opened or read.
    pub fn fingerprint(&self, path: &Path) -> Result<Fingerprint, HashError> {
        let file = File::open(path).map_err(|e| HashError::from_io(path, e))?;
        self.fingerprint_reader(file)
            .map_err(|e| HashError::from_io(path, e))
    }

    /// Fingerprint everything readable from `reader`.
    ///
    /// # Errors
    ///
    /// Returns the first non-`Interrupted` I/O error from the reader.
    pub fn fingerprint_reader<R: Read>(&self, mut reader: R) -> io::Result<Fingerprint> {
        let mut digest = Md5::new();
        let mut buffer = vec![0u8; self.chunk_size];

        loop {
            let bytes_read = match reader.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            digest.update(&buffer[..bytes_read]);
        }

        let mut bytes = [0u8; 16];
        bytes.copy_from_slice(&digest.finalize());
        Ok(Fingerprint(bytes))
    }
}
