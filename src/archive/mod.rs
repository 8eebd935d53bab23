// src/archive/mod.rs
// =============================================================================
// This module talks to the web archive's snapshot index.
//
// Submodules:
// - record: The snapshot rows the index returns
// - client: The ArchiveQueryClient trait and the query it receives
// - cdx: A client for the Wayback Machine's CDX server
//
// The pipeline only depends on the trait, so tests can swap in a fake index.
// =============================================================================

mod cdx;
mod client;
mod record;

pub use cdx::CdxClient;
pub use client::{ArchiveError, ArchiveQuery, ArchiveQueryClient};
pub use record::{SnapshotRecord, SnapshotResultSet};

#[cfg(test)]
pub(crate) use record::tests::sample_record;
