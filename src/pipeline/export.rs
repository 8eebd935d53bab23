// src/pipeline/export.rs
// =============================================================================
// Writes a result set to disk as tab-separated text.
//
// File layout:
//   urlkey<TAB>timestamp<TAB>original<TAB>mimetype<TAB>statuscode<TAB>digest<TAB>length
//   com,example)/<TAB>20190101000000<TAB>http://example.com/<TAB>...
//
// - Header row first, always (an empty result set gives a header-only file)
// - One record per line, no row index column
// - Platform line ending
//
// The rows go to a temporary file next to the target and the temp file is
// renamed over the target once everything is flushed. A failed write leaves
// no half-written export behind, and a same-name export from a later request
// simply replaces the old file.
// =============================================================================

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use csv::{Terminator, WriterBuilder};
use log::info;
use tempfile::NamedTempFile;

use super::error::PipelineError;
use crate::archive::{SnapshotRecord, SnapshotResultSet};

/// A written export file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub path: PathBuf,
    /// Data rows, header not included
    pub rows: usize,
}

fn line_terminator() -> Terminator {
    if cfg!(windows) {
        Terminator::CRLF
    } else {
        Terminator::Any(b'\n')
    }
}

/// Writes `results` to `path`, creating the parent directory when needed.
pub fn export(results: &SnapshotResultSet, path: &Path) -> Result<ExportArtifact, PipelineError> {
    write_atomically(results, path).map_err(|source| PipelineError::ExportFailure {
        path: path.to_path_buf(),
        source,
    })?;

    info!("Wrote {} record(s) to {}", results.len(), path.display());

    Ok(ExportArtifact {
        path: path.to_path_buf(),
        rows: results.len(),
    })
}

// NamedTempFile defaults to 0600; ask for the mode File::create uses so the
// export stays readable by whatever serves the download directory
fn temp_file_in(dir: &Path) -> io::Result<NamedTempFile> {
    let mut builder = tempfile::Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    builder.tempfile_in(dir)
}

fn write_atomically(results: &SnapshotResultSet, path: &Path) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    // create_dir_all succeeds when the directory already exists, including
    // when another request created it a moment ago
    fs::create_dir_all(dir)?;

    let temp = temp_file_in(dir)?;
    let mut writer = WriterBuilder::new()
        .delimiter(b'\t')
        .terminator(line_terminator())
        .from_writer(temp);

    writer.write_record(SnapshotRecord::FIELDS)?;
    for record in results.records() {
        writer.write_record(record.values())?;
    }
    writer.flush()?;

    let mut temp = writer.into_inner().map_err(|e| e.into_error())?;
    temp.flush()?;
    temp.persist(path)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::sample_record;
    use csv::ReaderBuilder;
    use tempfile::TempDir;

    fn three_records() -> SnapshotResultSet {
        SnapshotResultSet::new(vec![
            sample_record("20190101000000", "200", "text/html"),
            sample_record("20190601000000", "301", "text/html"),
            sample_record("20200101000000", "-", "warc/revisit"),
        ])
    }

    // Reads an export back as (header, rows)
    fn read_back(path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
        let mut reader = ReaderBuilder::new()
            .delimiter(b'\t')
            .from_path(path)
            .unwrap();
        let header = reader
            .headers()
            .unwrap()
            .iter()
            .map(str::to_string)
            .collect();
        let rows = reader
            .records()
            .map(|row| row.unwrap().iter().map(str::to_string).collect())
            .collect();
        (header, rows)
    }

    #[test]
    fn test_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");
        let results = three_records();

        let artifact = export(&results, &path).unwrap();
        assert_eq!(artifact.rows, 3);
        assert_eq!(artifact.path, path);

        let (header, rows) = read_back(&path);
        assert_eq!(header, SnapshotRecord::FIELDS.to_vec());
        assert_eq!(rows.len(), 3);
        for (row, record) in rows.iter().zip(results.records().iter()) {
            assert_eq!(row, &record.values().to_vec());
        }
    }

    #[test]
    fn test_file_is_tab_separated() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");
        export(&three_records(), &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let first_line = content.lines().next().unwrap();
        assert_eq!(
            first_line,
            "urlkey\ttimestamp\toriginal\tmimetype\tstatuscode\tdigest\tlength"
        );
        assert_eq!(content.lines().count(), 4);
        assert!(!first_line.contains(','));
    }

    #[test]
    fn test_empty_result_set_writes_header_only() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.csv");

        let artifact = export(&SnapshotResultSet::default(), &path).unwrap();
        assert_eq!(artifact.rows, 0);

        let (header, rows) = read_back(&path);
        assert_eq!(header.len(), SnapshotRecord::FIELDS.len());
        assert!(rows.is_empty());
    }

    #[test]
    fn test_creates_missing_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("static").join("downloads").join("out.csv");

        export(&three_records(), &path).unwrap();
        assert!(path.is_file());
    }

    #[test]
    fn test_second_export_into_existing_directory() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("downloads");

        export(&three_records(), &out.join("a.csv")).unwrap();
        export(&three_records(), &out.join("b.csv")).unwrap();
        assert!(out.join("a.csv").is_file());
        assert!(out.join("b.csv").is_file());
    }

    #[test]
    fn test_same_name_overwrites() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("same.csv");

        export(&three_records(), &path).unwrap();
        let one = SnapshotResultSet::new(vec![sample_record("20210101000000", "200", "text/html")]);
        export(&one, &path).unwrap();

        let (_, rows) = read_back(&path);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][1], "20210101000000");

        // No temp files left behind
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_fields_with_tabs_survive() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("odd.csv");
        let mut record = sample_record("20190101000000", "200", "text/html");
        record.original = "http://example.com/?q=a\tb".to_string();
        let results = SnapshotResultSet::new(vec![record.clone()]);

        export(&results, &path).unwrap();
        let (_, rows) = read_back(&path);
        assert_eq!(rows[0][2], record.original);
    }

    #[cfg(unix)]
    #[test]
    fn test_export_mode_matches_plain_file() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("export.csv");
        let plain = dir.path().join("plain.txt");

        export(&SnapshotResultSet::default(), &path).unwrap();
        fs::write(&plain, b"x").unwrap();

        let mode = |p: &Path| fs::metadata(p).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode(&path), mode(&plain));
    }

    #[test]
    fn test_unwritable_target_is_export_failure() {
        let dir = TempDir::new().unwrap();
        // A regular file where the parent directory should be
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"not a directory").unwrap();
        let path = blocker.join("out.csv");

        let err = export(&three_records(), &path).unwrap_err();
        match err {
            PipelineError::ExportFailure { path: failed, .. } => assert_eq!(failed, path),
            other => panic!("expected ExportFailure, got {:?}", other),
        }
    }
}
