//! archrepo: maintenance tooling for an unofficial Arch Linux package repository
//!
//! This crate provides the library behind the `archrepo` binary, re-exporting
//! core functionality from `archrepo-core` and organizing the modules that
//! resolve upstream versions, fetch sources, render PKGBUILDs, and commit
//! version bumps.

pub use archrepo_core::{format_error_with_help, ArchRepoError, ArchRepoResult, ErrorHelp};

/// Core module re-exported from archrepo-core.
pub mod core {
    pub use archrepo_core::core::*;
    pub use archrepo_core::*;

    /// Path conventions of the checkout.
    pub mod path {
        pub use archrepo_core::core::path::*;
    }
}

/// Configuration management.
pub mod config;

/// GitHub version resolution.
pub mod github;

/// Artifact download and digests.
pub mod source;

/// PKGBUILD templates.
pub mod template;

/// Version extraction from PKGBUILDs.
pub mod pkgbuild;

/// Git index and submodule inspection.
pub mod vcs;

/// Commit messages for version bumps.
pub mod commit;

/// Repository index pages.
pub mod pages;
