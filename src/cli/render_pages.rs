use super::GlobalOptions;
use archrepo::core::ArchRepoResult;
use archrepo::pages::render_pages;
use std::path::Path;

pub fn run(options: &GlobalOptions, db_dir: &Path, out_dir: &Path) -> ArchRepoResult<()> {
    let config = options.load_config()?;
    let written = render_pages(&config, db_dir, out_dir)?;
    for page in &written {
        println!("Wrote {}", page.display());
    }
    Ok(())
}
