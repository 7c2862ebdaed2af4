use super::GlobalOptions;
use archrepo::config::Config;
use archrepo::core::path::{pkgbuild_path, sources_dir};
use archrepo::core::ArchRepoResult;
use archrepo::github::{head_commit, GitHubClient, RevisionSource};
use archrepo::source::{Artifact, Digest, DigestAlgorithm, Fetcher};
use archrepo::template::{PkgbuildRenderer, RubyTrunkInput};
use std::path::PathBuf;

const OWNER: &str = "ruby";
const REPO: &str = "ruby";
const PKGNAME: &str = "ruby-trunk";

pub async fn run(options: &GlobalOptions) -> ArchRepoResult<()> {
    let config = options.load_config()?;
    let github = GitHubClient::new(&config)?;
    let dest = update(&config, &github).await?;
    println!("Updated {}", dest.display());
    Ok(())
}

/// Pin ruby-trunk to the newest commit of ruby/ruby
pub async fn update<S>(config: &Config, source: &S) -> ArchRepoResult<PathBuf>
where
    S: RevisionSource + ?Sized,
{
    let commit = head_commit(source, OWNER, REPO).await?;

    let artifact = Artifact::github_archive(
        &config.github.archive_url,
        OWNER,
        REPO,
        &commit.sha,
        format!("ruby-{}.tar.gz", commit.sha),
    );
    let fetcher = Fetcher::new(config.http_client()?, sources_dir(&config.root, PKGNAME));
    let tarball = fetcher.fetch(&artifact).await?;
    let sha256 = Digest::of_file(tarball.path(), DigestAlgorithm::Sha256)?.hex;

    let input = RubyTrunkInput {
        commit_sha: commit.sha.clone(),
        commit_sha_short: commit.short_sha().to_string(),
        commit_date: commit.date_version(),
        sha256,
    };
    let dest = pkgbuild_path(&config.root, PKGNAME, PKGNAME);
    PkgbuildRenderer::new()?.write(&dest, PKGNAME, &input)?;
    Ok(dest)
}
