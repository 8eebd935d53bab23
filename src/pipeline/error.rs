// src/pipeline/error.rs
// =============================================================================
// Errors a search request can end with.
//
// An empty query is not one of them: it is the normal "nothing submitted yet"
// state. Same-second file name collisions are not reported either.
// =============================================================================

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::archive::ArchiveError;

#[derive(Error, Debug)]
pub enum PipelineError {
    /// The archive index could not answer (unreachable, bad status, bad body)
    #[error("query failed: {0}")]
    QueryFailure(#[from] ArchiveError),

    /// The export file could not be written
    #[error("export to {} failed: {source}", path.display())]
    ExportFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
