//! Registry trait for fetching crate metadata and artifacts

#[cfg(test)]
use mockall::automock;

use crate::fetch::error::FetchError;
use crate::resolve::error::RegistryError;

/// Kind of a declared dependency edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyKind {
    Normal,
    Build,
    Dev,
}

/// A dependency declared by a published version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    pub name: String,
    pub req: String,
    pub kind: DependencyKind,
}

/// A single published version of a crate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRecord {
    /// Version string as published (e.g. "1.0.197")
    pub num: String,
    /// Withdrawn from normal resolution, but still downloadable
    pub yanked: bool,
    /// Dependencies this version declares
    pub dependencies: Vec<Dependency>,
}

/// Trait for talking to a crate registry
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Registry: Send + Sync {
    /// Fetches every published version of a crate
    ///
    /// # Arguments
    /// * `crate_name` - The name of the crate (e.g. "serde")
    ///
    /// # Returns
    /// * `Ok(Vec<VersionRecord>)` - All published versions with their
    ///   declared dependencies and yanked flags
    /// * `Err(RegistryError)` - If the fetch fails
    async fn fetch_versions(&self, crate_name: &str) -> Result<Vec<VersionRecord>, RegistryError>;

    /// Downloads the packaged `.crate` artifact for an exact version
    ///
    /// The artifact is a gzip-compressed tar archive; it is returned (and
    /// later stored) as-is, never unpacked.
    async fn download_crate(&self, crate_name: &str, version: &str)
    -> Result<Vec<u8>, FetchError>;
}
