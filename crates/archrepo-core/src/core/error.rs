use thiserror::Error;

pub type ArchRepoResult<T> = Result<T, ArchRepoError>;

#[derive(Error, Debug)]
pub enum ArchRepoError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A request completed with a non-2xx status.
    #[error("HTTP Error: {status} for {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("Template error: {0}")]
    Template(#[from] handlebars::TemplateError),

    #[error("Render error: {0}")]
    Render(#[from] handlebars::RenderError),

    #[error("Path error: {0}")]
    Path(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Resolve error: {0}")]
    Resolve(String),

    #[error("PKGBUILD error: {0}")]
    Manifest(String),

    #[error("Repository database error: {0}")]
    Pages(String),

    /// A required positional argument was not given.
    #[error("Missing argument: {0}")]
    MissingArgument(String),

    /// At least one per-architecture download failed.
    #[error("Failed to download: {}", failed.join(", "))]
    PartialDownload { failed: Vec<String> },

    /// Neither the work tree nor any submodule has a staged PKGBUILD.
    #[error("No PKGBUILD is modified")]
    NothingToDo,

    /// More than one candidate change; refuses to guess.
    #[error("Multiple {0} are modified")]
    Ambiguous(String),

    /// Evaluating a PKGBUILD in a subprocess failed.
    #[error("Cannot retrieve pkgver: exit with {status}")]
    Extract {
        status: i32,
        stdout: String,
        stderr: String,
    },

    /// A subprocess exited with a non-zero status code.
    /// The exit code should be propagated to the shell.
    #[error("Command exited with code {0}")]
    SubprocessExit(i32),
}

impl ArchRepoError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            ArchRepoError::PartialDownload { .. } => 2,
            ArchRepoError::SubprocessExit(code) => u8::try_from(*code).unwrap_or(1),
            _ => 1,
        }
    }
}
