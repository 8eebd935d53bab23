// src/config.rs
// =============================================================================
// Defaults and the settings needed to build an archive client.
//
// Every value here can be overridden from the command line (see cli.rs) or
// from the matching WAA_* environment variable.
// =============================================================================

use std::time::Duration;

use url::Url;

/// Wayback Machine CDX server
pub const DEFAULT_CDX_ENDPOINT: &str = "https://web.archive.org/cdx/search/cdx";

/// Where export files land when no --output-dir is given
pub const DEFAULT_OUTPUT_DIR: &str = "static/downloads";

/// CDX queries over large domains can be slow, so be generous
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// User-Agent sent to the archive
pub const USER_AGENT: &str = concat!("waa/", env!("CARGO_PKG_VERSION"));

// Settings for talking to the archive index
#[derive(Debug, Clone)]
pub struct ArchiveSettings {
    pub endpoint: Url,
    pub timeout: Duration,
    pub user_agent: String,
}

#[cfg(test)]
impl Default for ArchiveSettings {
    fn default() -> Self {
        Self {
            // The constant is a valid URL; parsing it cannot fail
            endpoint: Url::parse(DEFAULT_CDX_ENDPOINT).expect("default CDX endpoint is a valid URL"),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: USER_AGENT.to_string(),
        }
    }
}
