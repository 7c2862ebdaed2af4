//! Core utilities shared by the archrepo binary and library.
//!
//! Holds the error type every pipeline returns and the path conventions
//! of the repository checkout (`sources/`, `PKGBUILDs/<name>/PKGBUILD`).

pub mod core;

pub use core::error::{ArchRepoError, ArchRepoResult};
pub use core::error_help::{format_error_with_help, ErrorHelp};
