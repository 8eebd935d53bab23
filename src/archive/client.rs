// src/archive/client.rs
// =============================================================================
// The contract between the query pipeline and any archive index.
//
// The pipeline builds one ArchiveQuery per request and hands it to an
// ArchiveQueryClient. Whatever comes back (records, or an error) is passed on
// unchanged: no retries, no partial results.
//
// Rust concepts:
// - Traits: ArchiveQueryClient is an interface with one async method
// - async-trait: Lets trait methods be async (and lets tests provide a fake)
// - thiserror: Derives std::error::Error for our error enum
// =============================================================================

use async_trait::async_trait;
use thiserror::Error;

use super::record::SnapshotResultSet;

/// The structured request sent to an archive index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveQuery {
    /// URL or URL fragment to look up
    pub search_term: String,
    /// Match every path under the URL, not only the exact one
    pub include_subpages: bool,
    /// Match every subdomain of the host
    pub include_subdomains: bool,
    /// Inclusive lower bound, free-form date text
    pub start_date: Option<String>,
    /// Inclusive upper bound, free-form date text
    pub end_date: Option<String>,
    /// Leave out captures that were HTTP redirects
    pub filter_redirects: bool,
    /// Leave out revisit records
    pub filter_revisits: bool,
}

/// Everything that can go wrong while asking the index.
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// The request never got a response (DNS, connect, timeout, TLS...)
    #[error("archive index request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The index answered with a non-success status
    #[error("archive index returned HTTP {status}")]
    Status { status: u16 },

    /// The body was not the shape we expected
    #[error("malformed archive index response: {0}")]
    MalformedResponse(String),
}

// Anything that can answer an ArchiveQuery with an ordered result set
//
// Send + Sync so one client can be shared by concurrent requests.
#[async_trait]
pub trait ArchiveQueryClient: Send + Sync {
    async fn query(&self, query: &ArchiveQuery) -> Result<SnapshotResultSet, ArchiveError>;
}
