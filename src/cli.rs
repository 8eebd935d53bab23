// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// The CLI is just a front end for the search pipeline. It mirrors a search
// form: a query box, four checkboxes and two date fields. Flags are turned
// into the same raw form values a web form would submit (a ticked box sends
// "on"), and the pipeline takes it from there.
//
// Settings that are not part of the search (endpoint, output directory,
// timeout) can also come from WAA_* environment variables.
// =============================================================================

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use url::Url;

use crate::config::{
    ArchiveSettings, DEFAULT_CDX_ENDPOINT, DEFAULT_OUTPUT_DIR, DEFAULT_TIMEOUT_SECS, USER_AGENT,
};
use crate::logging::LogLevel;
use crate::pipeline::{
    RawForm, END_DATE, FILTER_REDIRECTS, FILTER_REVISITS, INCLUDE_SUBDOMAINS, INCLUDE_SUBPAGES,
    QUERY, START_DATE,
};

// What a ticked checkbox submits
const CHECKED: &str = "on";

#[derive(Parser, Debug)]
#[command(
    name = "waa",
    version,
    about = "List the archived snapshots of a URL in the Wayback Machine",
    long_about = "waa (web archive availabilities) lists the snapshots the Wayback Machine holds \
                  for a URL and every page under it (or only the exact URL with --exact), \
                  optionally including subdomains, limited to a date range, and without \
                  redirects or revisits. The list is saved as a \
                  tab-separated file in the output directory."
)]
pub struct Cli {
    /// URL or URL fragment to look up (nothing is queried when omitted)
    #[arg(default_value = "")]
    pub query: String,

    /// Also match every subdomain of the host
    #[arg(long)]
    pub include_subdomains: bool,

    /// Only match the exact URL; by default every page under it is included
    #[arg(long)]
    pub exact: bool,

    /// Earliest capture to include, e.g. 2019 or 2019-01-31
    #[arg(long)]
    pub start_date: Option<String>,

    /// Latest capture to include, e.g. 2020 or 2020-12-31
    #[arg(long)]
    pub end_date: Option<String>,

    /// Leave out captures that were HTTP redirects
    #[arg(long)]
    pub filter_redirects: bool,

    /// Leave out revisits (captures whose content had not changed)
    #[arg(long)]
    pub filter_revisits: bool,

    /// Directory the export file is written to
    #[arg(long, env = "WAA_OUTPUT_DIR", default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// CDX server to query
    #[arg(long, env = "WAA_CDX_ENDPOINT", default_value = DEFAULT_CDX_ENDPOINT)]
    pub endpoint: Url,

    /// Request timeout in seconds
    #[arg(long, env = "WAA_TIMEOUT", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Print the outcome as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Log verbosity (logs go to stderr)
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,
}

impl Cli {
    // The search part of the command line, as form values
    pub fn to_raw_form(&self) -> RawForm {
        let mut form = RawForm::new();
        form.insert(QUERY, self.query.as_str());

        let checkboxes = [
            (INCLUDE_SUBDOMAINS, self.include_subdomains),
            (INCLUDE_SUBPAGES, !self.exact),
            (FILTER_REDIRECTS, self.filter_redirects),
            (FILTER_REVISITS, self.filter_revisits),
        ];
        for (name, checked) in checkboxes {
            if checked {
                form.insert(name, CHECKED);
            }
        }

        if let Some(date) = &self.start_date {
            form.insert(START_DATE, date.as_str());
        }
        if let Some(date) = &self.end_date {
            form.insert(END_DATE, date.as_str());
        }

        form
    }

    pub fn archive_settings(&self) -> ArchiveSettings {
        ArchiveSettings {
            endpoint: self.endpoint.clone(),
            timeout: Duration::from_secs(self.timeout),
            user_agent: USER_AGENT.to_string(),
        }
    }
}
