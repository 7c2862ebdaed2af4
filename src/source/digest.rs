use crate::core::ArchRepoResult;
use sha2::{Digest as _, Sha256, Sha512};
use std::fmt;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

/// Checksum algorithms used in PKGBUILD `*sums` arrays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigestAlgorithm {
    Sha256,
    Sha512,
}

/// Hex digest of a file's bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Digest {
    pub algorithm: DigestAlgorithm,
    pub hex: String,
}

impl Digest {
    /// Hash a file, streaming it from disk
    pub fn of_file(path: &Path, algorithm: DigestAlgorithm) -> ArchRepoResult<Self> {
        let mut reader = BufReader::new(File::open(path)?);
        let hex = match algorithm {
            DigestAlgorithm::Sha256 => {
                let mut hasher = Sha256::new();
                io::copy(&mut reader, &mut hasher)?;
                hex::encode(hasher.finalize())
            }
            DigestAlgorithm::Sha512 => {
                let mut hasher = Sha512::new();
                io::copy(&mut reader, &mut hasher)?;
                hex::encode(hasher.finalize())
            }
        };
        Ok(Self { algorithm, hex })
    }

    /// Hash bytes already in memory
    pub fn of_bytes(data: &[u8], algorithm: DigestAlgorithm) -> Self {
        let hex = match algorithm {
            DigestAlgorithm::Sha256 => hex::encode(Sha256::digest(data)),
            DigestAlgorithm::Sha512 => hex::encode(Sha512::digest(data)),
        };
        Self { algorithm, hex }
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex)
    }
}
