// src/pipeline/naming.rs
// =============================================================================
// Export file names.
//
// A name encodes every active search option, so you can tell from a directory
// listing what each file contains:
//
//   waa-20240131-142501-example_com-subpages_included-_-_-_-2019_01_01-_.csv
//   |   |               |           |                 | | | |          |
//   |   timestamp       query       subpages          | | | start      end
//   prefix                                subdomains -+ | |
//                                         redirects ----+ |
//                                         revisits -------+
//
// Inactive options become a lone "_". Every run of non-word characters in a
// segment is squeezed into one "_", so a segment never contains the "-"
// separator.
//
// The content is tab-separated even though the suffix is ".csv"; existing
// users of these files rely on the name.
//
// Two requests in the same second with the same options get the same name
// and the later export replaces the earlier one.
// =============================================================================

use std::sync::OnceLock;

use chrono::NaiveDateTime;
use regex::Regex;

use super::options::QueryOptions;

const PREFIX: &str = "waa";
const SUFFIX: &str = ".csv";
const SEPARATOR: &str = "-";
const PLACEHOLDER: &str = "_";
const TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

// Compiled once; the pattern is a literal
fn non_word() -> &'static Regex {
    static NON_WORD: OnceLock<Regex> = OnceLock::new();
    NON_WORD.get_or_init(|| Regex::new(r"\W+").expect("literal regex is valid"))
}

// Replaces every run of non-word characters with a single underscore
fn sanitize(segment: &str) -> String {
    non_word().replace_all(segment, "_").into_owned()
}

// The flag's token when active, the placeholder when not
fn toggle(active: bool, token: &'static str) -> &'static str {
    if active {
        token
    } else {
        PLACEHOLDER
    }
}

// Free text when present and non-empty, the placeholder otherwise
fn text_or_placeholder(text: Option<&str>) -> &str {
    match text {
        Some(text) if !text.is_empty() => text,
        _ => PLACEHOLDER,
    }
}

/// Builds the export file name for `options` at `timestamp` (second
/// resolution). Pure: the same inputs always give the same name.
pub fn name_export(options: &QueryOptions, timestamp: &NaiveDateTime) -> String {
    let segments = [
        text_or_placeholder(Some(options.query.as_str())),
        toggle(options.include_subpages, "subpages_included"),
        toggle(options.include_subdomains, "subdomains_included"),
        toggle(options.filter_redirects, "redirects_filtered"),
        toggle(options.filter_revisits, "revisits_filtered"),
        text_or_placeholder(options.start_date.as_deref()),
        text_or_placeholder(options.end_date.as_deref()),
    ];

    let mut parts = Vec::with_capacity(segments.len() + 2);
    parts.push(PREFIX.to_string());
    parts.push(timestamp.format(TIMESTAMP_FORMAT).to_string());
    parts.extend(segments.iter().map(|segment| sanitize(segment)));

    format!("{}{}", parts.join(SEPARATOR), SUFFIX)
}
