//! GitHub API type definitions

use crate::core::{ArchRepoError, ArchRepoResult};
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Entry of `GET /repos/{owner}/{repo}/commits`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryCommit {
    pub sha: String,
    pub commit: CommitDetail,
}

/// Git-level commit data nested in a repository commit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitDetail {
    pub committer: CommitSignature,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitSignature {
    pub date: DateTime<Utc>,
}

/// Entry of `GET /repos/{owner}/{repo}/git/refs/tags`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagRef {
    #[serde(rename = "ref")]
    pub ref_: String,
    pub object: RefObject,
}

/// Object a ref points at
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefObject {
    pub sha: String,
}

impl TagRef {
    /// Tag name without the `refs/tags/` prefix
    pub fn tag_name(&self) -> Option<&str> {
        self.ref_.strip_prefix("refs/tags/").filter(|n| !n.is_empty())
    }
}

/// Newest commit of a repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCommit {
    pub sha: String,
    pub date: DateTime<Utc>,
}

impl ResolvedCommit {
    /// First ten characters of the SHA
    pub fn short_sha(&self) -> &str {
        let end = self
            .sha
            .char_indices()
            .nth(10)
            .map(|(i, _)| i)
            .unwrap_or(self.sha.len());
        &self.sha[..end]
    }

    /// Committer date formatted as a pkgver (`YYYYMMDD`)
    pub fn date_version(&self) -> String {
        self.date.format("%Y%m%d").to_string()
    }
}

impl From<RepositoryCommit> for ResolvedCommit {
    fn from(commit: RepositoryCommit) -> Self {
        Self {
            sha: commit.sha,
            date: commit.commit.committer.date,
        }
    }
}

/// Newest tag reachable through the commit listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTag {
    pub name: String,
    pub sha: String,
}

/// Vim release version, split the way the PKGBUILD consumes it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VimVersion {
    /// `<major>.<minor>`
    pub baseversion: String,
    /// `<patch>`
    pub patchlevel: String,
}

impl VimVersion {
    /// Parse a tag of the form `v<major>.<minor>.<patch>`.
    pub fn parse(tag: &str) -> ArchRepoResult<Self> {
        let re = Regex::new(r"^v(\d+\.\d+)\.(\d+)$")
            .map_err(|e| ArchRepoError::Resolve(format!("Invalid regex: {}", e)))?;
        let caps = re
            .captures(tag)
            .ok_or_else(|| ArchRepoError::Resolve(format!("Malformed tag name: {}", tag)))?;

        Ok(Self {
            baseversion: caps[1].to_string(),
            patchlevel: caps[2].to_string(),
        })
    }

    /// Full `<major>.<minor>.<patch>` version
    pub fn version(&self) -> String {
        format!("{}.{}", self.baseversion, self.patchlevel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_commit() {
        let json = r#"{
            "sha": "0123456789abcdef0123456789abcdef01234567",
            "commit": {
                "committer": {"name": "x", "date": "2020-12-25T08:30:00Z"},
                "message": "Release"
            },
            "url": "ignored"
        }"#;
        let commit: RepositoryCommit = serde_json::from_str(json).unwrap();
        let resolved = ResolvedCommit::from(commit);
        assert_eq!(resolved.short_sha(), "0123456789");
        assert_eq!(resolved.date_version(), "20201225");
    }

    #[test]
    fn test_short_sha_of_short_input() {
        let resolved = ResolvedCommit {
            sha: "abc".to_string(),
            date: Utc::now(),
        };
        assert_eq!(resolved.short_sha(), "abc");
    }

    #[test]
    fn test_tag_name() {
        let json = r#"{"ref": "refs/tags/v8.2.0001", "object": {"sha": "c1", "type": "commit"}}"#;
        let tag: TagRef = serde_json::from_str(json).unwrap();
        assert_eq!(tag.tag_name(), Some("v8.2.0001"));

        let odd = TagRef {
            ref_: "refs/heads/master".to_string(),
            object: RefObject {
                sha: "c2".to_string(),
            },
        };
        assert_eq!(odd.tag_name(), None);
    }

    #[test]
    fn test_vim_version_parse() {
        let v = VimVersion::parse("v9.1.0123").unwrap();
        assert_eq!(v.baseversion, "9.1");
        assert_eq!(v.patchlevel, "0123");
        assert_eq!(v.version(), "9.1.0123");
    }

    #[test]
    fn test_vim_version_malformed() {
        for tag in ["9.1.0123", "v9.1", "v9.1.2.3", "v9.x.1", "v9..1", "latest"] {
            let err = VimVersion::parse(tag).unwrap_err();
            assert!(
                err.to_string().contains("Malformed tag name"),
                "{} should be rejected",
                tag
            );
        }
    }
}
