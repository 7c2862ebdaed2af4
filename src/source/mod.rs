//! Upstream artifacts: where they live, how they are fetched, how they hash.

pub mod artifact;
pub mod digest;
pub mod fetcher;

pub use artifact::Artifact;
pub use digest::{Digest, DigestAlgorithm};
pub use fetcher::{FetchOutcome, FetchReport, Fetcher};
