// src/pipeline/run.rs
// =============================================================================
// One search request from start to finish.
//
// Each request walks through these states:
//
//   Idle --(query non-empty)--> Queried --> Exported
//
// - Idle: nothing was submitted. No archive call, no file. Terminal.
// - Queried: the archive answered. Always followed by an export, even when
//   the answer has zero rows.
// - Exported: the file is on disk and the caller gets its path.
//
// Any archive failure or write failure ends the request with a PipelineError.
// There are no retries and no partial results.
// =============================================================================

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use log::info;

use super::error::PipelineError;
use super::export::{export, ExportArtifact};
use super::naming::name_export;
use super::options::{normalize, QueryOptions, RawForm};
use super::summary::{summarize, DisplaySummary};
use crate::archive::{ArchiveQueryClient, SnapshotResultSet};

// How a request ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestOutcome {
    /// No query was submitted
    Idle { options: QueryOptions },
    /// The query ran and its result set was written out
    Exported {
        options: QueryOptions,
        results: SnapshotResultSet,
        artifact: ExportArtifact,
    },
}

impl RequestOutcome {
    /// The normalized options, for re-displaying the form.
    pub fn options(&self) -> &QueryOptions {
        match self {
            RequestOutcome::Idle { options } => options,
            RequestOutcome::Exported { options, .. } => options,
        }
    }

    pub fn summary(&self) -> DisplaySummary {
        match self {
            RequestOutcome::Idle { options } => summarize(options, None),
            RequestOutcome::Exported {
                options,
                results,
                artifact,
            } => DisplaySummary {
                download: Some(artifact.path.clone()),
                ..summarize(options, Some(results))
            },
        }
    }
}

/// Runs search requests against an archive client and exports the results
/// into one flat output directory.
pub struct SnapshotQueryPipeline<C> {
    client: C,
    output_dir: PathBuf,
}

impl<C: ArchiveQueryClient> SnapshotQueryPipeline<C> {
    pub fn new(client: C, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            client,
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Asks the archive for the options' snapshots.
    ///
    /// Returns `Ok(None)` without touching the archive when the query is empty.
    pub async fn execute(
        &self,
        options: &QueryOptions,
    ) -> Result<Option<SnapshotResultSet>, PipelineError> {
        if !options.has_query() {
            return Ok(None);
        }

        let results = self.client.query(&options.to_archive_query()).await?;
        if results.is_empty() {
            info!("No snapshots archived for '{}'", options.query);
        } else {
            info!(
                "Archive returned {} snapshot(s) for '{}'",
                results.len(),
                options.query
            );
        }

        Ok(Some(results))
    }

    // Where the export for these options at this second goes
    pub fn export_path(&self, options: &QueryOptions, timestamp: &NaiveDateTime) -> PathBuf {
        self.output_dir.join(name_export(options, timestamp))
    }

    /// Handles one request: normalize, query, then export.
    ///
    /// `now` names the export file, so pass the local time of the request.
    pub async fn handle(
        &self,
        form: &RawForm,
        now: NaiveDateTime,
    ) -> Result<RequestOutcome, PipelineError> {
        let options = normalize(form);

        let results = match self.execute(&options).await? {
            Some(results) => results,
            None => return Ok(RequestOutcome::Idle { options }),
        };

        let path = self.export_path(&options, &now);
        let artifact = export(&results, &path)?;

        Ok(RequestOutcome::Exported {
            options,
            results,
            artifact,
        })
    }
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why is the pipeline generic over C?
//    - SnapshotQueryPipeline<C: ArchiveQueryClient> works with any archive
//    - main.rs plugs in the real CdxClient, tests plug in a fake
//    - The compiler generates one copy per client type (no dynamic dispatch)
//
// 2. Why does handle() take `now` instead of reading the clock?
//    - The export name depends on the time, so reading the clock inside
//      would make the file name impossible to test
//    - The caller passes Local::now(); tests pass a fixed time
// -----------------------------------------------------------------------------
