// src/pipeline/summary.rs
// =============================================================================
// What the front end should show after a request.
//
// Three things vary:
// - whether a "Results" section appears at all
// - the "<N> samples retrieved." line
// - the echo of the search parameters that were used
//
// Before anything is submitted all three are empty, which is how a front end
// knows to show only the blank search form.
// =============================================================================

use std::path::PathBuf;

use serde::Serialize;

use super::options::QueryOptions;
use crate::archive::SnapshotResultSet;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DisplaySummary {
    /// Show the results section
    pub show_results: bool,
    /// "<N> samples retrieved.", when a result set exists
    pub count: Option<String>,
    /// The options the query ran with, when one ran
    pub search_parameters: Option<QueryOptions>,
    /// Path of the export file, when one was written
    pub download: Option<PathBuf>,
}

/// Builds the display hints for one request. No side effects.
pub fn summarize(options: &QueryOptions, results: Option<&SnapshotResultSet>) -> DisplaySummary {
    let executed = options.has_query();

    DisplaySummary {
        show_results: executed || results.is_some(),
        count: results.map(|results| format!("{} samples retrieved.", results.len())),
        search_parameters: executed.then(|| options.clone()),
        download: None,
    }
}
