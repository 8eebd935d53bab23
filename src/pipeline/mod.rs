// src/pipeline/mod.rs
// =============================================================================
// The search request pipeline.
//
// Submodules:
// - options: Raw form values -> typed QueryOptions (normalize)
// - naming: Deterministic export file names
// - export: Tab-separated export writer
// - summary: Display hints for the front end
// - run: SnapshotQueryPipeline, which ties the steps together per request
// - error: PipelineError
//
// Nothing here knows about the command line; any front end that can produce a
// RawForm can drive it.
// =============================================================================

mod error;
mod export;
mod naming;
mod options;
mod run;
mod summary;

pub use options::{
    QueryOptions, RawForm, END_DATE, FILTER_REDIRECTS, FILTER_REVISITS, INCLUDE_SUBDOMAINS,
    INCLUDE_SUBPAGES, QUERY, START_DATE,
};
pub use run::SnapshotQueryPipeline;
pub use summary::DisplaySummary;
