//! GitHub integration for version resolution
//!
//! This module provides functionality for interacting with GitHub to:
//! - List the commits of a repository, newest first
//! - List the tag refs of a repository
//! - Resolve the newest commit, or the newest tagged commit

pub mod client;
pub mod resolver;
pub mod types;

pub use client::GitHubClient;
pub use resolver::{find_latest_tag, head_commit, latest_tag, RevisionSource};
pub use types::{RepositoryCommit, ResolvedCommit, ResolvedTag, TagRef, VimVersion};
