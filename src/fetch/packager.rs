//! Artifact download and zip packaging

use std::io::Write;
use std::path::{Path, PathBuf};

use futures::stream::{self, StreamExt, TryStreamExt};
use indexmap::IndexMap;
use tracing::{debug, info};
use zip::write::SimpleFileOptions;

use crate::config::DOWNLOAD_CONCURRENCY;
use crate::fetch::error::FetchError;
use crate::resolve::registry::Registry;

/// Download every resolved crate and pack the artifacts into one zip
/// archive, returning its path.
///
/// Unlike resolution, this step is strict: any single download failure
/// aborts the whole bundle and no archive is produced. The scratch
/// directory is removed on every exit path; on success only the zip
/// remains.
pub async fn package_crates<R: Registry>(
    registry: &R,
    resolved: &IndexMap<String, String>,
) -> Result<PathBuf, FetchError> {
    package_crates_in(registry, resolved, &std::env::temp_dir()).await
}

/// Same as [`package_crates`], placing scratch space and archive under `dir`
pub async fn package_crates_in<R: Registry>(
    registry: &R,
    resolved: &IndexMap<String, String>,
    dir: &Path,
) -> Result<PathBuf, FetchError> {
    let work_dir = tempfile::Builder::new().prefix("crates-").tempdir_in(dir)?;

    let artifacts: Vec<(String, Vec<u8>)> = stream::iter(resolved.iter())
        .map(|(name, version)| async move {
            let bytes = registry.download_crate(name, version).await?;
            debug!("downloaded {} {} ({} bytes)", name, version, bytes.len());
            Ok::<_, FetchError>((format!("{name}-{version}.crate"), bytes))
        })
        .buffer_unordered(DOWNLOAD_CONCURRENCY)
        .try_collect()
        .await?;

    for (file_name, bytes) in &artifacts {
        std::fs::write(work_dir.path().join(file_name), bytes)?;
    }

    let zip_path = work_dir.path().with_extension("zip");
    let mut archive = zip::ZipWriter::new(std::fs::File::create(&zip_path)?);
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    for entry in std::fs::read_dir(work_dir.path())? {
        let entry = entry?;
        archive.start_file(entry.file_name().to_string_lossy(), options)?;
        archive.write_all(&std::fs::read(entry.path())?)?;
    }
    archive.finish()?;

    info!(
        "packaged {} crates into {}",
        artifacts.len(),
        zip_path.display()
    );
    Ok(zip_path)
}
