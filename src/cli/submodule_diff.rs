use super::GlobalOptions;
use archrepo::core::ArchRepoResult;
use archrepo::vcs::{self, modified_workdir_submodules, submodule::show_diffs};

pub fn run(options: &GlobalOptions) -> ArchRepoResult<()> {
    let repo = vcs::discover(&options.root()?)?;
    let diffs = modified_workdir_submodules(&repo)?;
    if diffs.is_empty() {
        tracing::info!("No submodule is modified");
        return Ok(());
    }
    show_diffs(&diffs)
}
