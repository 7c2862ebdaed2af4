//! Subcommand entry points.

pub mod commit_update;
pub mod render_pages;
pub mod submodule_diff;
pub mod update_dropbox;
pub mod update_ruby_trunk;
pub mod update_vim_latest;

use archrepo::config::Config;
use archrepo::core::{ArchRepoError, ArchRepoResult};
use std::env;
use std::path::PathBuf;

/// Options shared by every subcommand
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    pub root: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

impl GlobalOptions {
    /// Checkout root: `--root`, else the current directory
    pub fn root(&self) -> ArchRepoResult<PathBuf> {
        match &self.root {
            Some(root) => Ok(root.clone()),
            None => env::current_dir()
                .map_err(|e| ArchRepoError::Path(format!("Failed to get current directory: {}", e))),
        }
    }

    pub fn load_config(&self) -> ArchRepoResult<Config> {
        let root = self.root()?;
        Config::load(&root, self.config.as_deref())
    }
}
