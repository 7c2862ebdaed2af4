//! PKGBUILD rendering from embedded templates.

pub mod inputs;
pub mod renderer;

pub use inputs::{DropboxInput, RubyTrunkInput, VimLatestInput};
pub use renderer::PkgbuildRenderer;
