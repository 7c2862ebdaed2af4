use crate::core::path::{user_config_file, CONFIG_FILE_NAME};
use crate::core::{ArchRepoError, ArchRepoResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Root of the packaging checkout. Every repository directory
    /// (`aur-eagletmt`, `ruby-trunk`, ...) lives under it.
    ///
    /// Not read from the file; set from `--root` or the current directory.
    #[serde(skip)]
    pub root: PathBuf,

    /// User-Agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Timeout for a single HTTP request, in seconds
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,

    #[serde(default)]
    pub github: GitHubConfig,

    #[serde(default)]
    pub dropbox: DropboxConfig,

    #[serde(default)]
    pub pages: PagesConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubConfig {
    /// GitHub API base URL
    #[serde(default = "default_github_api_url")]
    pub api_url: String,

    /// Base URL for source archives (`<archive_url>/<owner>/<repo>/archive/<ref>.tar.gz`)
    #[serde(default = "default_github_archive_url")]
    pub archive_url: String,

    /// API token; `GITHUB_TOKEN` takes precedence
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DropboxConfig {
    /// Where client tarballs are published
    #[serde(default = "default_dropbox_download_base")]
    pub download_base: String,

    /// Repository directory that holds the dropbox package
    #[serde(default = "default_dropbox_repository")]
    pub repository: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagesConfig {
    /// Repositories listed on the index page
    #[serde(default = "default_pages_repositories")]
    pub repositories: Vec<String>,

    /// Architecture whose database is read for the package listing
    #[serde(default = "default_pages_arch")]
    pub arch: String,
}

fn default_user_agent() -> String {
    concat!(
        "archrepo/",
        env!("CARGO_PKG_VERSION"),
        " https://github.com/yourusername/archrepo"
    )
    .to_string()
}

fn default_http_timeout_secs() -> u64 {
    300
}

fn default_github_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_github_archive_url() -> String {
    "https://github.com".to_string()
}

fn default_dropbox_download_base() -> String {
    "https://d1ilhw0800yew8.cloudfront.net/client".to_string()
}

fn default_dropbox_repository() -> String {
    "aur-eagletmt".to_string()
}

fn default_pages_repositories() -> Vec<String> {
    vec![
        "aur-eagletmt".to_string(),
        "vim-latest".to_string(),
        "ruby-trunk".to_string(),
    ]
}

fn default_pages_arch() -> String {
    "x86_64".to_string()
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: default_github_api_url(),
            archive_url: default_github_archive_url(),
            token: None,
        }
    }
}

impl Default for DropboxConfig {
    fn default() -> Self {
        Self {
            download_base: default_dropbox_download_base(),
            repository: default_dropbox_repository(),
        }
    }
}

impl Default for PagesConfig {
    fn default() -> Self {
        Self {
            repositories: default_pages_repositories(),
            arch: default_pages_arch(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            user_agent: default_user_agent(),
            http_timeout_secs: default_http_timeout_secs(),
            github: GitHubConfig::default(),
            dropbox: DropboxConfig::default(),
            pages: PagesConfig::default(),
        }
    }
}

impl Config {
    /// Load the configuration for a checkout rooted at `root`.
    ///
    /// Lookup order:
    /// 1. `explicit` (from `--config`), which must exist
    /// 2. `<root>/archrepo.yaml`
    /// 3. the user config file (~/.config/archrepo/archrepo.yaml)
    /// 4. built-in defaults
    pub fn load(root: &Path, explicit: Option<&Path>) -> ArchRepoResult<Self> {
        let mut config = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(ArchRepoError::Config(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                Self::from_file(path)?
            }
            None => {
                let local = root.join(CONFIG_FILE_NAME);
                if local.exists() {
                    Self::from_file(&local)?
                } else {
                    match user_config_file() {
                        Ok(user) if user.exists() => Self::from_file(&user)?,
                        _ => Self::default(),
                    }
                }
            }
        };
        config.root = root.to_path_buf();
        Ok(config)
    }

    /// Parse a config file
    pub fn from_file(path: &Path) -> ArchRepoResult<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content).map_err(|e| {
            ArchRepoError::Config(format!("Failed to parse {}: {}", path.display(), e))
        })?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// GitHub token, preferring the `GITHUB_TOKEN` environment variable
    pub fn github_token(&self) -> Option<String> {
        std::env::var("GITHUB_TOKEN")
            .ok()
            .filter(|t| !t.is_empty())
            .or_else(|| self.github.token.clone())
    }

    /// Build the HTTP client shared by the resolver and the fetcher
    pub fn http_client(&self) -> ArchRepoResult<reqwest::Client> {
        reqwest::Client::builder()
            .user_agent(self.user_agent.clone())
            .timeout(std::time::Duration::from_secs(self.http_timeout_secs))
            .build()
            .map_err(|e| ArchRepoError::Config(format!("Failed to create HTTP client: {}", e)))
    }
}
