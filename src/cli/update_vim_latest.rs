use super::GlobalOptions;
use archrepo::config::Config;
use archrepo::core::path::{pkgbuild_path, sources_dir};
use archrepo::core::ArchRepoResult;
use archrepo::github::{latest_tag, GitHubClient, RevisionSource, VimVersion};
use archrepo::source::{Artifact, Digest, DigestAlgorithm, Fetcher};
use archrepo::template::{PkgbuildRenderer, VimLatestInput};
use std::path::PathBuf;

const OWNER: &str = "vim";
const REPO: &str = "vim";
const PKGNAME: &str = "vim-latest";

pub async fn run(options: &GlobalOptions) -> ArchRepoResult<()> {
    let config = options.load_config()?;
    let github = GitHubClient::new(&config)?;
    let dest = update(&config, &github).await?;
    println!("Updated {}", dest.display());
    Ok(())
}

/// Pin vim-latest to the newest tagged commit of vim/vim
pub async fn update<S>(config: &Config, source: &S) -> ArchRepoResult<PathBuf>
where
    S: RevisionSource + ?Sized,
{
    let tag = latest_tag(source, OWNER, REPO).await?;
    let version = VimVersion::parse(&tag.name)?;

    let artifact = Artifact::github_archive(
        &config.github.archive_url,
        OWNER,
        REPO,
        &tag.name,
        format!("vim-{}.tar.gz", version.version()),
    );
    let fetcher = Fetcher::new(config.http_client()?, sources_dir(&config.root, PKGNAME));
    let tarball = fetcher.fetch(&artifact).await?;
    let sha256 = Digest::of_file(tarball.path(), DigestAlgorithm::Sha256)?.hex;

    let input = VimLatestInput {
        baseversion: version.baseversion,
        patchlevel: version.patchlevel,
        sha256,
    };
    let dest = pkgbuild_path(&config.root, PKGNAME, PKGNAME);
    PkgbuildRenderer::new()?.write(&dest, PKGNAME, &input)?;
    Ok(dest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use archrepo::core::ArchRepoError;
    use archrepo::github::{RepositoryCommit, TagRef};
    use async_trait::async_trait;
    use std::fs;
    use tempfile::TempDir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    struct StaticRevisions {
        commits: Vec<&'static str>,
        tags: Vec<(&'static str, &'static str)>,
    }

    #[async_trait]
    impl RevisionSource for StaticRevisions {
        async fn list_commits(&self, _owner: &str, _repo: &str) -> ArchRepoResult<Vec<RepositoryCommit>> {
            let commits = self
                .commits
                .iter()
                .map(|sha| {
                    serde_json::from_value(serde_json::json!({
                        "sha": sha,
                        "commit": {
                            "committer": {"date": "2024-01-01T00:00:00Z"},
                            "message": ""
                        }
                    }))
                })
                .collect::<Result<_, _>>()?;
            Ok(commits)
        }

        async fn list_tag_refs(&self, _owner: &str, _repo: &str) -> ArchRepoResult<Vec<TagRef>> {
            let tags = self
                .tags
                .iter()
                .map(|(name, sha)| {
                    serde_json::from_value(serde_json::json!({
                        "ref": format!("refs/tags/{}", name),
                        "object": {"sha": sha}
                    }))
                })
                .collect::<Result<_, _>>()?;
            Ok(tags)
        }
    }

    fn config(root: &std::path::Path, archive_url: String) -> Config {
        let mut config = Config::default();
        config.root = root.to_path_buf();
        config.github.archive_url = archive_url;
        config
    }

    #[tokio::test]
    async fn test_update_pins_latest_tag() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/vim/vim/archive/v9.1.0002.tar.gz"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"vim source".to_vec()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let source = StaticRevisions {
            commits: vec!["c3", "c2", "c1"],
            tags: vec![("v9.1.0002", "c2"), ("v9.1.0001", "c1")],
        };
        let temp = TempDir::new().unwrap();
        let config = config(temp.path(), mock_server.uri());

        let dest = update(&config, &source).await.unwrap();
        assert_eq!(dest, temp.path().join("vim-latest/PKGBUILDs/vim-latest/PKGBUILD"));
        assert!(temp
            .path()
            .join("vim-latest/sources/vim-9.1.0002.tar.gz")
            .exists());

        let pkgbuild = fs::read_to_string(dest).unwrap();
        let sha256 = Digest::of_bytes(b"vim source", DigestAlgorithm::Sha256).hex;
        assert!(pkgbuild.contains("_baseversion=9.1\n"));
        assert!(pkgbuild.contains("_patchlevel=0002\n"));
        assert!(pkgbuild.contains(&sha256));
    }

    #[tokio::test]
    async fn test_malformed_tag_aborts_before_download() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let source = StaticRevisions {
            commits: vec!["c1"],
            tags: vec![("nightly", "c1")],
        };
        let temp = TempDir::new().unwrap();
        let err = update(&config(temp.path(), mock_server.uri()), &source)
            .await
            .unwrap_err();
        assert!(matches!(err, ArchRepoError::Resolve(_)));
        assert!(err.to_string().contains("Malformed tag name"));
    }
}
