//! Worklist-based recursive dependency resolution

use std::collections::HashMap;
use std::sync::Arc;

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::resolve::error::{RegistryError, ResolveError};
use crate::resolve::registry::{Dependency, DependencyKind, Registry, VersionRecord};
use crate::resolve::requirement::MatchPolicy;
use crate::resolve::semver::compare_version_strings;

/// Resolves version requirements against a registry.
///
/// Owns a per-task memo of fetched version listings, so a crate that shows
/// up repeatedly in the dependency graph costs one metadata request. Build
/// one resolver per resolution task and drop it afterwards; the cache is
/// never invalidated.
pub struct Resolver<'a, R: Registry> {
    registry: &'a R,
    versions_cache: HashMap<String, Arc<Vec<VersionRecord>>>,
}

impl<'a, R: Registry> Resolver<'a, R> {
    pub fn new(registry: &'a R) -> Self {
        Self {
            registry,
            versions_cache: HashMap::new(),
        }
    }

    /// Fetch (or reuse) the version listing for a crate
    async fn versions(&mut self, crate_name: &str) -> Result<Arc<Vec<VersionRecord>>, RegistryError> {
        if let Some(cached) = self.versions_cache.get(crate_name) {
            debug!("version cache hit for '{}'", crate_name);
            return Ok(Arc::clone(cached));
        }

        let fetched = Arc::new(self.registry.fetch_versions(crate_name).await?);
        self.versions_cache
            .insert(crate_name.to_string(), Arc::clone(&fetched));
        Ok(fetched)
    }

    /// Pick the one version of `crate_name` that satisfies `requirement`.
    ///
    /// Yanked versions never qualify. Among the remaining candidates the
    /// policy filters and the newest match wins; an exact policy matches a
    /// single version or nothing.
    pub async fn resolve_one(
        &mut self,
        crate_name: &str,
        requirement: &str,
    ) -> Result<(String, Vec<Dependency>), ResolveError> {
        let versions = self.versions(crate_name).await?;
        let policy = MatchPolicy::from_requirement(requirement);

        let chosen = newest(
            versions
                .iter()
                .filter(|record| !record.yanked)
                .filter(|record| policy.matches(&record.num)),
        );

        let Some(record) = chosen else {
            return Err(ResolveError::NoMatchingVersion {
                name: crate_name.to_string(),
                requirement: requirement.to_string(),
            });
        };

        Ok((record.num.clone(), record.dependencies.clone()))
    }

    /// Resolve the full transitive dependency set for the initial
    /// requirements, returning crate name -> exact version.
    ///
    /// A crate resolves at most once: the first requirement processed for a
    /// name wins and every later requirement for it is ignored, so cycles
    /// and duplicate edges terminate. This is a simplification, not a
    /// conflict solver. A crate that fails to resolve is logged and left
    /// out; the rest of the run is unaffected.
    pub async fn resolve(&mut self, initial: IndexMap<String, String>) -> IndexMap<String, String> {
        let mut resolved: IndexMap<String, String> = IndexMap::new();
        let mut worklist: Vec<(String, String)> = initial.into_iter().collect();

        while let Some((name, requirement)) = worklist.pop() {
            if resolved.contains_key(&name) {
                continue;
            }

            let (version, dependencies) = match self.resolve_one(&name, &requirement).await {
                Ok(picked) => picked,
                Err(e) => {
                    warn!("Failed to resolve {} ({}): {}", name, requirement, e);
                    continue;
                }
            };

            debug!("resolved {} {} -> {}", name, requirement, version);
            resolved.insert(name, version);

            for dependency in dependencies {
                if dependency.kind == DependencyKind::Dev {
                    continue;
                }
                if !resolved.contains_key(&dependency.name) {
                    worklist.push((dependency.name, dependency.req));
                }
            }
        }

        resolved
    }
}

fn newest<'r>(
    candidates: impl Iterator<Item = &'r VersionRecord>,
) -> Option<&'r VersionRecord> {
    candidates.max_by(|a, b| compare_version_strings(&a.num, &b.num))
}
