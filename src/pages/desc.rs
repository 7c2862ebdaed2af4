use crate::core::{ArchRepoError, ArchRepoResult};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// One package of a repository database
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageEntry {
    pub name: String,
    pub version: String,
    pub filename: String,
    /// Seconds since the epoch
    pub builddate_timestamp: i64,
    /// Build date as RFC 3339 UTC
    pub builddate_str: String,
}

/// Parse a pacman `desc` file.
///
/// Sections start with a `%KEY%` line; the following lines are its values
/// until a blank line. Unknown keys are ignored.
pub fn parse_desc(body: &str) -> ArchRepoResult<PackageEntry> {
    let mut name = None;
    let mut version = None;
    let mut filename = None;
    let mut builddate: Option<i64> = None;

    let mut key = "";
    for line in body.lines() {
        let line = line.trim();
        if line.len() >= 2 && line.starts_with('%') && line.ends_with('%') {
            key = &line[1..line.len() - 1];
        } else if line.is_empty() {
            key = "";
        } else {
            match key {
                "NAME" => name = Some(line.to_string()),
                "VERSION" => version = Some(line.to_string()),
                "FILENAME" => filename = Some(line.to_string()),
                "BUILDDATE" => {
                    let parsed = line.parse().map_err(|e| {
                        ArchRepoError::Pages(format!("Invalid BUILDDATE '{}': {}", line, e))
                    })?;
                    builddate = Some(parsed);
                }
                _ => {}
            }
        }
    }

    let missing = |key: &str| ArchRepoError::Pages(format!("Failed to find {} from desc file", key));
    let name = name.ok_or_else(|| missing("NAME"))?;
    let version = version.ok_or_else(|| missing("VERSION"))?;
    let filename = filename.ok_or_else(|| missing("FILENAME"))?;
    let builddate_timestamp = builddate.ok_or_else(|| missing("BUILDDATE"))?;

    let builddate_str = DateTime::<Utc>::from_timestamp(builddate_timestamp, 0)
        .ok_or_else(|| {
            ArchRepoError::Pages(format!("BUILDDATE out of range: {}", builddate_timestamp))
        })?
        .to_rfc3339();

    Ok(PackageEntry {
        name,
        version,
        filename,
        builddate_timestamp,
        builddate_str,
    })
}
