// src/archive/record.rs
// =============================================================================
// Snapshot records as returned by the archive index.
//
// Each row of the CDX index describes one capture:
//   urlkey      - SURT form of the URL, used by the index for sorting
//   timestamp   - capture time, 14 digits (YYYYMMDDhhmmss)
//   original    - the URL as it was captured
//   mimetype    - content type, or "warc/revisit" for revisit records
//   statuscode  - HTTP status of the capture ("-" for revisits)
//   digest      - content hash
//   length      - size of the compressed record
//
// All values are kept as strings exactly as the index sent them. We never
// parse or reformat them, so the export matches the index byte for byte.
// =============================================================================

// The mimetype the index uses for revisit records
const REVISIT_MIMETYPE: &str = "warc/revisit";

/// One archived capture of a URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotRecord {
    pub urlkey: String,
    pub timestamp: String,
    pub original: String,
    pub mimetype: String,
    pub statuscode: String,
    pub digest: String,
    pub length: String,
}

impl SnapshotRecord {
    /// Field names in export order. Also the `fl` list sent to the CDX server.
    pub const FIELDS: [&'static str; 7] = [
        "urlkey",
        "timestamp",
        "original",
        "mimetype",
        "statuscode",
        "digest",
        "length",
    ];

    /// The record's values in the same order as `FIELDS`.
    pub fn values(&self) -> [&str; 7] {
        [
            self.urlkey.as_str(),
            self.timestamp.as_str(),
            self.original.as_str(),
            self.mimetype.as_str(),
            self.statuscode.as_str(),
            self.digest.as_str(),
            self.length.as_str(),
        ]
    }

    /// True when the capture was an HTTP redirect (3xx).
    pub fn is_redirect(&self) -> bool {
        let code = self.statuscode.as_bytes();
        code.len() == 3 && code[0] == b'3' && code.iter().all(u8::is_ascii_digit)
    }

    /// True when the crawler saw unchanged content and stored a reference.
    pub fn is_revisit(&self) -> bool {
        self.mimetype == REVISIT_MIMETYPE
    }
}

// An ordered list of snapshot records
//
// The archive index decides the order; nothing in this crate re-sorts it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnapshotResultSet {
    records: Vec<SnapshotRecord>,
}

impl SnapshotResultSet {
    pub fn new(records: Vec<SnapshotRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[SnapshotRecord] {
        &self.records
    }

    // Keeps only the records the predicate accepts, in their original order
    pub fn retain<F>(&mut self, keep: F)
    where
        F: FnMut(&SnapshotRecord) -> bool,
    {
        self.records.retain(keep);
    }
}
