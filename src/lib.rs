//! Recursive crates.io dependency downloader
//!
//! Given the text of a Cargo `[dependencies]` section, resolves concrete
//! versions by talking directly to the crates.io HTTP API (no `cargo`
//! involved), walks the transitive dependency graph, downloads the
//! resolved `.crate` tarballs and bundles them into a single zip archive.
//!
//! # Architecture
//!
//! ```text
//! fragment ──▶ parser ──▶ {name: requirement}
//!                                │
//!                                ▼
//!        registry ◀──── resolve (worklist + per-task version cache)
//!                                │
//!                                ▼
//!                       {name: version} ──▶ fetch ──▶ bundle.zip
//! ```
//!
//! Resolution is deliberately approximate (see [`resolve::requirement`])
//! and tolerant: a crate that fails to resolve is logged and dropped from
//! the bundle. Artifact download is strict: one failed download fails the
//! whole bundle.

pub mod config;
pub mod fetch;
pub mod parser;
pub mod resolve;

use std::path::PathBuf;

use tracing::info;

use crate::fetch::error::FetchError;
use crate::parser::fragment::ParseError;
use crate::resolve::crates_io::CratesIoRegistry;
use crate::resolve::registry::Registry;
use crate::resolve::resolver::Resolver;

/// Error type for the whole bundling pipeline.
///
/// Per-crate resolution failures never surface here; they only shrink the
/// resolved set (see [`resolve::resolver::Resolver::resolve`]).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Resolve and download everything a `[dependencies]` fragment names,
/// returning the path of the produced zip archive.
pub async fn bundle_from_fragment(fragment: &str) -> Result<PathBuf, Error> {
    bundle_with_registry(&CratesIoRegistry::default(), fragment).await
}

/// Same as [`bundle_from_fragment`], against a caller-supplied registry
pub async fn bundle_with_registry<R: Registry>(
    registry: &R,
    fragment: &str,
) -> Result<PathBuf, Error> {
    let requirements = parser::fragment::parse_fragment(fragment)?;

    let mut resolver = Resolver::new(registry);
    let resolved = resolver.resolve(requirements).await;
    info!("Resolved {} crates", resolved.len());

    let archive = fetch::packager::package_crates(registry, &resolved).await?;
    Ok(archive)
}
