// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging
// 3. Hand the search options to the pipeline (query the archive, export)
// 4. Print what the pipeline reports, as text or JSON
// 5. Exit with proper code (0 = success, 2 = error)
//
// Not submitting a query is not an error: the pipeline stays idle and we just
// print a hint.
// =============================================================================

mod archive;
mod cli;
mod config;
mod logging;
mod pipeline;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use log::debug;

use archive::CdxClient;
use cli::Cli;
use pipeline::{DisplaySummary, QueryOptions, SnapshotQueryPipeline};

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    logging::init_logger(cli.log_level).context("Failed to initialize logger")?;

    let client = CdxClient::new(&cli.archive_settings()).context("Failed to create HTTP client")?;
    let pipeline = SnapshotQueryPipeline::new(client, &cli.output_dir);
    debug!("Exports go to {}", pipeline.output_dir().display());

    let outcome = pipeline
        .handle(&cli.to_raw_form(), Local::now().naive_local())
        .await?;
    debug!("Normalized options: {:?}", outcome.options());

    let summary = outcome.summary();
    if cli.json {
        let json_output = serde_json::to_string_pretty(&summary)?;
        println!("{}", json_output);
    } else {
        print_summary(&summary);
    }

    Ok(())
}

// Prints the summary the way the search page lays it out
fn print_summary(summary: &DisplaySummary) {
    if !summary.show_results {
        println!("Nothing to search for. Try: waa example.com");
        return;
    }

    if let Some(options) = &summary.search_parameters {
        print_search_parameters(options);
        println!();
    }

    println!("Results");
    println!("{}", "=".repeat(7));
    if let Some(count) = &summary.count {
        println!("{}", count);
    }
    if let Some(path) = &summary.download {
        println!("Download results: {}", path.display());
    }
}

fn print_search_parameters(options: &QueryOptions) {
    let or_blank = |date: &Option<String>| date.clone().unwrap_or_default();

    println!("Search parameters:");
    println!("  Search query:       {}", options.query);
    println!("  Include subdomains: {}", options.include_subdomains);
    println!("  Include subpages:   {}", options.include_subpages);
    println!("  Start date:         {}", or_blank(&options.start_date));
    println!("  End date:           {}", or_blank(&options.end_date));
    println!("  Filter revisits:    {}", options.filter_revisits);
    println!("  Filter redirects:   {}", options.filter_redirects);
}
