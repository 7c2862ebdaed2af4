use super::GlobalOptions;
use archrepo::commit::{commit, compose_message};
use archrepo::core::ArchRepoResult;
use archrepo::pkgbuild::{ParsedExtractor, ShellExtractor, VersionExtractor};
use archrepo::vcs::{self, detect_change, PkgbuildChange};

pub fn run(options: &GlobalOptions, shell: bool) -> ArchRepoResult<()> {
    let repo = vcs::discover(&options.root()?)?;
    let change = detect_change(&repo)?;

    let message = if shell {
        compose(&ShellExtractor::new()?, &change)?
    } else {
        compose(&ParsedExtractor, &change)?
    };
    tracing::info!("{}", message);

    commit(&vcs::workdir(&repo)?, &message)
}

/// Commit message for a detected change
pub fn compose<E: VersionExtractor>(extractor: &E, change: &PkgbuildChange) -> ArchRepoResult<String> {
    let new_version = extractor.extract(&change.new_pkgbuild)?;
    let old_version = change
        .old_pkgbuild
        .as_deref()
        .map(|old| extractor.extract(old))
        .transpose()?;
    Ok(compose_message(
        &change.pkgname,
        old_version.as_deref(),
        &new_version,
    ))
}
