//! Integration tests driving the archrepo binary.

pub mod cli;
pub mod commit_update;
pub mod common;
pub mod render_pages;
