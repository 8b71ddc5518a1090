//! crates.io registry API implementation

use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::{DOWNLOAD_TIMEOUT, METADATA_TIMEOUT, USER_AGENT};
use crate::fetch::error::FetchError;
use crate::resolve::error::RegistryError;
use crate::resolve::registry::{Dependency, DependencyKind, Registry, VersionRecord};

/// Default base URL for the crates.io API
const DEFAULT_API_BASE_URL: &str = "https://crates.io";

/// Default base URL for the static artifact host
const DEFAULT_DOWNLOAD_BASE_URL: &str = "https://static.crates.io";

/// Response from the crates.io crate endpoint
#[derive(Debug, Deserialize)]
struct CrateResponse {
    versions: Vec<VersionEntry>,
}

#[derive(Debug, Deserialize)]
struct VersionEntry {
    num: String,
    #[serde(default)]
    yanked: bool,
    #[serde(default)]
    dependencies: Vec<DependencyEntry>,
}

#[derive(Debug, Deserialize)]
struct DependencyEntry {
    crate_id: String,
    req: String,
    kind: Option<String>,
}

impl From<VersionEntry> for VersionRecord {
    fn from(entry: VersionEntry) -> Self {
        Self {
            num: entry.num,
            yanked: entry.yanked,
            dependencies: entry.dependencies.into_iter().map(Dependency::from).collect(),
        }
    }
}

impl From<DependencyEntry> for Dependency {
    fn from(entry: DependencyEntry) -> Self {
        // Absent or unknown kinds count as normal
        let kind = match entry.kind.as_deref() {
            Some("dev") => DependencyKind::Dev,
            Some("build") => DependencyKind::Build,
            _ => DependencyKind::Normal,
        };
        Self {
            name: entry.crate_id,
            req: entry.req,
            kind,
        }
    }
}

/// Registry implementation for the crates.io HTTP API
pub struct CratesIoRegistry {
    client: reqwest::Client,
    api_base_url: String,
    download_base_url: String,
}

impl CratesIoRegistry {
    /// Creates a new CratesIoRegistry with custom base URLs
    pub fn new(api_base_url: &str, download_base_url: &str) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent(USER_AGENT)
                .build()
                .expect("Failed to create HTTP client"),
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            download_base_url: download_base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl Default for CratesIoRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL, DEFAULT_DOWNLOAD_BASE_URL)
    }
}

#[async_trait::async_trait]
impl Registry for CratesIoRegistry {
    async fn fetch_versions(&self, crate_name: &str) -> Result<Vec<VersionRecord>, RegistryError> {
        let url = format!("{}/api/v1/crates/{}", self.api_base_url, crate_name);
        debug!("fetching crate metadata: {}", url);

        let response = self
            .client
            .get(&url)
            .timeout(METADATA_TIMEOUT)
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(RegistryError::NotFound(crate_name.to_string()));
        }

        if !status.is_success() {
            warn!("crates.io returned status {}: {}", status, url);
            return Err(RegistryError::InvalidResponse(format!(
                "Unexpected status: {}",
                status
            )));
        }

        let crate_info: CrateResponse = response.json().await.map_err(|e| {
            warn!("Failed to parse crates.io response: {}", e);
            RegistryError::InvalidResponse(e.to_string())
        })?;

        Ok(crate_info
            .versions
            .into_iter()
            .map(VersionRecord::from)
            .collect())
    }

    async fn download_crate(
        &self,
        crate_name: &str,
        version: &str,
    ) -> Result<Vec<u8>, FetchError> {
        let url = format!(
            "{}/crates/{}/{}-{}.crate",
            self.download_base_url, crate_name, crate_name, version
        );
        debug!("downloading crate: {}", url);

        let response = self
            .client
            .get(&url)
            .timeout(DOWNLOAD_TIMEOUT)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            warn!("artifact host returned status {}: {}", status, url);
            return Err(FetchError::Status {
                name: crate_name.to_string(),
                version: version.to_string(),
                status,
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}
