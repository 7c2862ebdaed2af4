//! Values substituted into each package's template

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct DropboxInput {
    pub pkgver: String,
    pub sha512_x86: String,
    pub sha512_x86_64: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RubyTrunkInput {
    pub commit_sha: String,
    pub commit_sha_short: String,
    /// Committer date as `YYYYMMDD`
    pub commit_date: String,
    pub sha256: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct VimLatestInput {
    pub baseversion: String,
    pub patchlevel: String,
    pub sha256: String,
}
