//! Human-readable error output with suggestions.

use crate::core::error::ArchRepoError;

/// Provides an optional hint shown below an error message.
pub trait ErrorHelp {
    fn help(&self) -> Option<String>;
}

impl ErrorHelp for ArchRepoError {
    fn help(&self) -> Option<String> {
        match self {
            ArchRepoError::MissingArgument(name) => {
                Some(format!("Pass the {} as the first argument", name))
            }
            ArchRepoError::HttpStatus { status: 403, .. } => {
                Some("GitHub rate limit reached? Set GITHUB_TOKEN".to_string())
            }
            ArchRepoError::HttpStatus { status: 401, .. } => {
                Some("Check the token in GITHUB_TOKEN or archrepo.yaml".to_string())
            }
            ArchRepoError::NothingToDo => {
                Some("Stage a PKGBUILD change (git add) before running commit-update".to_string())
            }
            ArchRepoError::Ambiguous(_) => {
                Some("Stage only one package's changes at a time".to_string())
            }
            ArchRepoError::Config(_) | ArchRepoError::Yaml(_) => {
                Some("Check archrepo.yaml in the repository root".to_string())
            }
            _ => None,
        }
    }
}

/// Render an error for the terminal, including captured subprocess output
/// and a hint when one is known.
pub fn format_error_with_help(error: &ArchRepoError) -> String {
    let mut out = String::new();

    if let ArchRepoError::Extract { stdout, stderr, .. } = error {
        if !stdout.is_empty() {
            out.push_str(stdout.trim_end());
            out.push('\n');
        }
        if !stderr.is_empty() {
            out.push_str(stderr.trim_end());
            out.push('\n');
        }
    }

    out.push_str(&format!("error: {}", error));

    if let Some(help) = error.help() {
        out.push_str(&format!("\n  help: {}", help));
    }

    out
}
