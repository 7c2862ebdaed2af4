//! Version resolution on top of a revision listing

use crate::core::{ArchRepoError, ArchRepoResult};
use crate::github::types::{RepositoryCommit, ResolvedCommit, ResolvedTag, TagRef};
use async_trait::async_trait;
use std::collections::HashMap;

/// Source of commit and tag listings
///
/// Implemented by [`GitHubClient`](crate::github::GitHubClient); tests use an
/// in-memory listing.
#[async_trait]
pub trait RevisionSource: Send + Sync {
    /// Commits, newest first
    async fn list_commits(&self, owner: &str, repo: &str)
        -> ArchRepoResult<Vec<RepositoryCommit>>;

    /// Tag refs, in any order
    async fn list_tag_refs(&self, owner: &str, repo: &str) -> ArchRepoResult<Vec<TagRef>>;
}

/// Return the tag of the newest commit that is tagged.
///
/// `commits` must be ordered newest first; the walk stops at the first
/// commit found in `tags` (keyed by commit SHA).
pub fn find_latest_tag<'a, I>(commits: I, tags: &HashMap<String, String>) -> Option<(String, String)>
where
    I: IntoIterator<Item = &'a str>,
{
    commits
        .into_iter()
        .find_map(|sha| tags.get(sha).map(|tag| (sha.to_string(), tag.clone())))
}

/// Newest commit of the default branch
pub async fn head_commit<S>(source: &S, owner: &str, repo: &str) -> ArchRepoResult<ResolvedCommit>
where
    S: RevisionSource + ?Sized,
{
    let commits = source.list_commits(owner, repo).await?;
    let head = commits
        .into_iter()
        .next()
        .ok_or_else(|| ArchRepoError::Resolve(format!("No commits found in {}/{}", owner, repo)))?;

    tracing::info!(sha = %head.sha, "resolved head commit of {}/{}", owner, repo);
    Ok(head.into())
}

/// Newest tagged commit of the default branch
pub async fn latest_tag<S>(source: &S, owner: &str, repo: &str) -> ArchRepoResult<ResolvedTag>
where
    S: RevisionSource + ?Sized,
{
    let tags: HashMap<String, String> = source
        .list_tag_refs(owner, repo)
        .await?
        .into_iter()
        .filter_map(|r| {
            let name = r.tag_name()?.to_string();
            Some((r.object.sha, name))
        })
        .collect();

    let commits = source.list_commits(owner, repo).await?;
    let (sha, name) = find_latest_tag(commits.iter().map(|c| c.sha.as_str()), &tags)
        .ok_or_else(|| ArchRepoError::Resolve(format!("No tags found in {}/{}", owner, repo)))?;

    tracing::info!(tag = %name, %sha, "resolved latest tag of {}/{}", owner, repo);
    Ok(ResolvedTag { name, sha })
}
