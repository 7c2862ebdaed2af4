use crate::core::{ArchRepoError, ArchRepoResult};
use crate::pages::desc::{parse_desc, PackageEntry};
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tar::Archive;

/// Read every package of a gzipped `<repo>.db`, sorted by name
pub fn read_repository_db(path: &Path) -> ArchRepoResult<Vec<PackageEntry>> {
    let file = File::open(path).map_err(|e| {
        ArchRepoError::Pages(format!("Failed to open {}: {}", path.display(), e))
    })?;
    let mut archive = Archive::new(GzDecoder::new(file));

    let mut packages = Vec::new();
    for entry in archive.entries()? {
        let mut entry = entry?;
        let is_desc = entry
            .path()?
            .file_name()
            .map(|name| name == "desc")
            .unwrap_or(false);
        if !is_desc {
            continue;
        }

        let mut body = String::new();
        entry.read_to_string(&mut body)?;
        packages.push(parse_desc(&body)?);
    }

    packages.sort_by(|a, b| a.name.cmp(&b.name));
    tracing::debug!(path = %path.display(), count = packages.len(), "read repository database");
    Ok(packages)
}
