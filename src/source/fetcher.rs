use crate::core::path::ensure_dir;
use crate::core::{ArchRepoError, ArchRepoResult};
use crate::source::artifact::Artifact;
use futures_util::StreamExt;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tokio::task::JoinSet;

/// How an artifact ended up on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// A readable copy was already present; nothing was requested
    Cached(PathBuf),
    /// The artifact was downloaded in this run
    Downloaded(PathBuf),
}

impl FetchOutcome {
    pub fn path(&self) -> &Path {
        match self {
            FetchOutcome::Cached(p) | FetchOutcome::Downloaded(p) => p,
        }
    }
}

/// Per-artifact results of [`Fetcher::fetch_all`], in input order
#[derive(Debug)]
pub struct FetchReport {
    pub results: Vec<(Artifact, ArchRepoResult<FetchOutcome>)>,
}

impl FetchReport {
    /// True iff every worker succeeded
    pub fn is_success(&self) -> bool {
        self.results.iter().all(|(_, r)| r.is_ok())
    }

    /// Labels of the artifacts that failed
    pub fn failed(&self) -> Vec<String> {
        self.results
            .iter()
            .filter(|(_, r)| r.is_err())
            .map(|(a, _)| a.label().to_string())
            .collect()
    }

    /// Local paths of all artifacts, or `PartialDownload` if any failed
    pub fn into_paths(self) -> ArchRepoResult<Vec<PathBuf>> {
        if !self.is_success() {
            return Err(ArchRepoError::PartialDownload {
                failed: self.failed(),
            });
        }
        self.results
            .into_iter()
            .map(|(_, r)| r.map(|o| o.path().to_path_buf()))
            .collect()
    }
}

/// Downloads artifacts into a sources directory, reusing existing copies
///
/// No retries, no resume, no integrity check before accepting the bytes.
#[derive(Clone)]
pub struct Fetcher {
    client: reqwest::Client,
    sources_dir: PathBuf,
}

impl Fetcher {
    pub fn new(client: reqwest::Client, sources_dir: PathBuf) -> Self {
        Self {
            client,
            sources_dir,
        }
    }

    pub fn sources_dir(&self) -> &Path {
        &self.sources_dir
    }

    /// Ensure `artifact` is present locally.
    ///
    /// A readable local copy short-circuits the network entirely.
    pub async fn fetch(&self, artifact: &Artifact) -> ArchRepoResult<FetchOutcome> {
        let dest = artifact.path(&self.sources_dir);
        if artifact.exists(&self.sources_dir) {
            tracing::debug!(path = %dest.display(), "already downloaded");
            return Ok(FetchOutcome::Cached(dest));
        }

        ensure_dir(&self.sources_dir)?;

        tracing::info!("Get {}", artifact.url());
        let partial = partial_path(&dest);
        match self.download(artifact.url(), &partial).await {
            Ok(bytes) => {
                tokio::fs::rename(&partial, &dest).await?;
                tracing::info!(bytes, "Done {}", artifact.url());
                Ok(FetchOutcome::Downloaded(dest))
            }
            Err(e) => {
                let _ = tokio::fs::remove_file(&partial).await;
                tracing::error!("Failed {}: {}", artifact.url(), e);
                Err(e)
            }
        }
    }

    /// Fetch every artifact on its own task and wait for all of them.
    ///
    /// The report is successful only if every task succeeded; a panicked
    /// task counts as a failure.
    pub async fn fetch_all(&self, artifacts: Vec<Artifact>) -> FetchReport {
        let mut join_set = JoinSet::new();
        for (index, artifact) in artifacts.iter().cloned().enumerate() {
            let fetcher = self.clone();
            join_set.spawn(async move { (index, fetcher.fetch(&artifact).await) });
        }

        let mut outcomes: Vec<Option<ArchRepoResult<FetchOutcome>>> =
            artifacts.iter().map(|_| None).collect();
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((index, result)) => outcomes[index] = Some(result),
                Err(e) => tracing::error!("download worker failed: {}", e),
            }
        }

        let results = artifacts
            .into_iter()
            .zip(outcomes)
            .map(|(artifact, outcome)| {
                let result = outcome.unwrap_or_else(|| {
                    Err(ArchRepoError::Path(format!(
                        "download worker for {} did not complete",
                        artifact.label()
                    )))
                });
                (artifact, result)
            })
            .collect();

        FetchReport { results }
    }

    /// Stream `url` into `dest`, returning the number of bytes written
    async fn download(&self, url: &str, dest: &Path) -> ArchRepoResult<u64> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ArchRepoError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let file = tokio::fs::File::create(dest).await?;
        let mut writer = tokio::io::BufWriter::new(file);
        let mut stream = response.bytes_stream();
        let mut written = 0u64;
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            writer.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        writer.shutdown().await?;

        Ok(written)
    }
}

fn partial_path(dest: &Path) -> PathBuf {
    let mut name = dest.as_os_str().to_os_string();
    name.push(".part");
    PathBuf::from(name)
}
