// src/archive/cdx.rs
// =============================================================================
// A client for the Wayback Machine's CDX server.
//
// The CDX server is a plain HTTP endpoint that lists captures of a URL:
//   GET https://web.archive.org/cdx/search/cdx?url=example.com&output=json
//
// With output=json it answers with an array of rows, the first row being the
// header:
//   [["urlkey","timestamp","original",...],
//    ["com,example)/","20200101000000","https://example.com/",...]]
//
// How search options map onto CDX parameters:
// - include_subdomains -> matchType=domain (host, all subdomains, all paths)
// - include_subpages   -> matchType=prefix (every path under the URL)
// - neither            -> matchType=exact
// - start/end date     -> from/to (digits only, 1 to 14 of them)
// - filter_redirects   -> filter=!statuscode:3..
// - filter_revisits    -> filter=!mimetype:warc/revisit
//
// Rust concepts:
// - async/await: The request is network I/O
// - ? operator with From: reqwest errors convert into ArchiveError
// - Iterators and collect::<Result<_, _>>(): Stop at the first bad row
// =============================================================================

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::Client;
use url::Url;

use super::client::{ArchiveError, ArchiveQuery, ArchiveQueryClient};
use super::record::{SnapshotRecord, SnapshotResultSet};
use crate::config::ArchiveSettings;

const REDIRECT_FILTER: &str = "!statuscode:3..";
const REVISIT_FILTER: &str = "!mimetype:warc/revisit";

// CDX timestamps are at most YYYYMMDDhhmmss
const MAX_TIMESTAMP_DIGITS: usize = 14;

/// Archive client backed by a CDX server.
#[derive(Debug, Clone)]
pub struct CdxClient {
    http: Client,
    endpoint: Url,
}

impl CdxClient {
    // Builds the HTTP client once; reqwest pools connections internally
    pub fn new(settings: &ArchiveSettings) -> Result<Self, ArchiveError> {
        let http = Client::builder()
            .timeout(settings.timeout)
            .user_agent(settings.user_agent.as_str())
            .build()?;

        Ok(Self {
            http,
            endpoint: settings.endpoint.clone(),
        })
    }
}

#[async_trait]
impl ArchiveQueryClient for CdxClient {
    async fn query(&self, query: &ArchiveQuery) -> Result<SnapshotResultSet, ArchiveError> {
        let params = request_params(query);
        info!("Querying {} for '{}'", self.endpoint, query.search_term);
        debug!("CDX parameters: {:?}", params);

        let response = self
            .http
            .get(self.endpoint.clone())
            .query(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ArchiveError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let mut results = parse_rows(&body)?;

        // Some CDX deployments ignore `filter`; enforce it on our side too
        let before = results.len();
        results.retain(|record| {
            !(query.filter_redirects && record.is_redirect())
                && !(query.filter_revisits && record.is_revisit())
        });
        if results.len() < before {
            debug!(
                "Dropped {} record(s) the server should have filtered",
                before - results.len()
            );
        }

        Ok(results)
    }
}

// Picks the CDX matchType for the inclusion flags
fn match_type(query: &ArchiveQuery) -> &'static str {
    if query.include_subdomains {
        "domain"
    } else if query.include_subpages {
        "prefix"
    } else {
        "exact"
    }
}

// Turns free-form date text into a CDX timestamp by keeping its digits
//
// "2019-01-31" -> "20190131", "2019" -> "2019", "soon" -> None
fn cdx_timestamp(date: &str) -> Option<String> {
    let digits: String = date
        .chars()
        .filter(char::is_ascii_digit)
        .take(MAX_TIMESTAMP_DIGITS)
        .collect();

    if digits.is_empty() {
        None
    } else {
        Some(digits)
    }
}

// Builds the query string pairs; `filter` may appear twice
fn request_params(query: &ArchiveQuery) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("url", query.search_term.clone()),
        ("output", "json".to_string()),
        ("fl", SnapshotRecord::FIELDS.join(",")),
        ("matchType", match_type(query).to_string()),
    ];

    let bounds = [
        ("from", query.start_date.as_deref()),
        ("to", query.end_date.as_deref()),
    ];
    for (name, date) in bounds {
        let Some(date) = date else { continue };
        match cdx_timestamp(date) {
            Some(timestamp) => params.push((name, timestamp)),
            None => warn!("Ignoring date bound '{}': it contains no digits", date),
        }
    }

    if query.filter_redirects {
        params.push(("filter", REDIRECT_FILTER.to_string()));
    }
    if query.filter_revisits {
        params.push(("filter", REVISIT_FILTER.to_string()));
    }

    params
}

// Parses a CDX JSON body into records
//
// Columns are located by header name, so the server may order them freely.
fn parse_rows(body: &str) -> Result<SnapshotResultSet, ArchiveError> {
    let body = body.trim();
    if body.is_empty() {
        return Ok(SnapshotResultSet::default());
    }

    let rows: Vec<Vec<String>> = serde_json::from_str(body).map_err(|e| {
        ArchiveError::MalformedResponse(format!("expected a JSON array of string rows: {}", e))
    })?;

    let mut rows = rows.into_iter();
    let header = match rows.next() {
        Some(header) => header,
        None => return Ok(SnapshotResultSet::default()),
    };

    let positions = SnapshotRecord::FIELDS
        .iter()
        .map(|field| {
            header.iter().position(|name| name == field).ok_or_else(|| {
                ArchiveError::MalformedResponse(format!("header has no '{}' column", field))
            })
        })
        .collect::<Result<Vec<usize>, ArchiveError>>()?;

    let records = rows
        .enumerate()
        .map(|(index, row)| {
            if row.len() != header.len() {
                return Err(ArchiveError::MalformedResponse(format!(
                    "row {} has {} columns, header has {}",
                    index + 1,
                    row.len(),
                    header.len()
                )));
            }
            let column = |field: usize| row[positions[field]].clone();
            Ok(SnapshotRecord {
                urlkey: column(0),
                timestamp: column(1),
                original: column(2),
                mimetype: column(3),
                statuscode: column(4),
                digest: column(5),
                length: column(6),
            })
        })
        .collect::<Result<Vec<_>, ArchiveError>>()?;

    Ok(SnapshotResultSet::new(records))
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why Vec<(&str, String)> for the query string?
//    - reqwest's .query() takes anything serde can turn into key/value pairs
//    - A Vec of tuples keeps duplicate keys, which CDX needs for `filter`
//    - A HashMap would silently keep only one filter
//
// 2. Why look columns up by name?
//    - We ask for a fixed `fl` list, but the header row is the authority
//    - A server that reorders or adds columns still parses correctly
//
// 3. What does let-else do?
//    - `let Some(date) = date else { continue };` binds on success
//    - and runs the else block (which must diverge) otherwise
// -----------------------------------------------------------------------------
