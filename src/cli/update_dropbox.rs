use super::GlobalOptions;
use archrepo::config::Config;
use archrepo::core::path::{pkgbuild_path, sources_dir};
use archrepo::core::{ArchRepoError, ArchRepoResult};
use archrepo::source::{Artifact, Digest, DigestAlgorithm, Fetcher};
use archrepo::template::{DropboxInput, PkgbuildRenderer};
use std::path::PathBuf;

const PKGNAME: &str = "dropbox";
const ARCHES: [&str; 2] = ["x86", "x86_64"];

pub async fn run(options: &GlobalOptions, version: Option<String>) -> ArchRepoResult<()> {
    let version = version.ok_or_else(|| ArchRepoError::MissingArgument("VERSION".to_string()))?;
    let config = options.load_config()?;
    let dest = update(&config, &version).await?;
    println!("Updated {}", dest.display());
    Ok(())
}

/// Fetch both client tarballs for `version` and rewrite the dropbox PKGBUILD
pub async fn update(config: &Config, version: &str) -> ArchRepoResult<PathBuf> {
    let repository = &config.dropbox.repository;
    let fetcher = Fetcher::new(config.http_client()?, sources_dir(&config.root, repository));

    let artifacts = ARCHES
        .iter()
        .map(|arch| Artifact::dropbox(arch, version, &config.dropbox.download_base))
        .collect();
    let paths = fetcher.fetch_all(artifacts).await.into_paths()?;

    let mut digests = Vec::with_capacity(paths.len());
    for path in &paths {
        digests.push(Digest::of_file(path, DigestAlgorithm::Sha512)?.hex);
    }
    let [sha512_x86, sha512_x86_64]: [String; 2] = digests
        .try_into()
        .map_err(|_| ArchRepoError::Path("Unexpected number of downloads".to_string()))?;

    let input = DropboxInput {
        pkgver: version.to_string(),
        sha512_x86,
        sha512_x86_64,
    };
    let dest = pkgbuild_path(&config.root, repository, PKGNAME);
    PkgbuildRenderer::new()?.write(&dest, PKGNAME, &input)?;
    Ok(dest)
}
