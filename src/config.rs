use std::time::Duration;

// =============================================================================
// Network constants
// =============================================================================

/// User agent sent with every registry request
pub const USER_AGENT: &str = concat!("crate-bundler/", env!("CARGO_PKG_VERSION"));

/// Timeout for metadata requests
pub const METADATA_TIMEOUT: Duration = Duration::from_secs(20);

/// Timeout for artifact downloads
pub const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// Maximum artifact downloads in flight at once
pub const DOWNLOAD_CONCURRENCY: usize = 4;
