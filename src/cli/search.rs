//! Search command implementation.
//!
//! Runs the whole pipeline: validate flags, fetch every page, preview,
//! then save.

use crate::client::{HttpTransport, SearchClient, StopReason};
use crate::config::AppSettings;
use crate::error::{CliError, CliResult};
use crate::output;
use crate::storage::{ResultStore, WriteMode, DEFAULT_OUTPUT};
use crate::types::SearchMode;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;

/// Search arguments.
#[derive(Args, Debug)]
pub struct SearchCommand {
    /// API key sent with every request
    #[arg(short = 'k', long, env = "DEHASHED_API_KEY", hide_env_values = true)]
    pub key: String,

    /// Search value (domain, username, phone or email)
    #[arg(short = 'q', long)]
    pub query: String,

    /// Output file
    #[arg(short = 'o', long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Append to the output file instead of replacing it
    #[arg(short = 'a', long)]
    pub append: bool,

    /// Enable wildcard search
    #[arg(long)]
    pub wildcard: bool,

    /// Enable regex search
    #[arg(long)]
    pub regex: bool,

    /// Ask the API to remove duplicate results
    #[arg(long)]
    pub dedupe: bool,

    /// Stop after this many results (default from settings: 10000)
    #[arg(short = 'm', long, value_name = "COUNT")]
    pub max_results: Option<usize>,
}

impl SearchCommand {
    /// Execute the search command.
    pub async fn execute(&self, settings: &AppSettings, quiet: bool) -> CliResult<()> {
        // Checked before anything touches the network.
        let mode = SearchMode::from_flags(self.wildcard, self.regex)?;

        let mut options = settings.fetch_options().with_mode(mode);
        if let Some(max_results) = self.max_results {
            options = options.with_max_results(max_results);
        }
        if self.dedupe {
            options = options.with_dedupe();
        }

        let transport =
            HttpTransport::new(&self.key, &settings.api_endpoint, settings.request_timeout())?;
        let client = SearchClient::new(transport);

        if !quiet {
            output::print_search_header(&self.query, mode, self.dedupe);
        }

        let progress = spinner(quiet)?;
        let outcome = client
            .fetch_with(&self.query, &options, |report| {
                progress.set_message(format!(
                    "page {} fetched, {} results so far",
                    report.page, report.total
                ));
                let message = output::balance_message(report.balance.as_ref());
                progress.suspend(|| output::print_info(&message));
            })
            .await;
        progress.finish_and_clear();

        match outcome.stop {
            StopReason::Denied(err) => return Err(err.into()),
            StopReason::Failed(err) => output::print_warning(&format!(
                "{}; keeping {} results from {} page(s)",
                err,
                outcome.entries.len(),
                outcome.pages
            )),
            StopReason::Exhausted | StopReason::LimitReached => {}
        }

        let entries = outcome.entries;
        if entries.is_empty() {
            output::print_warning("No results found.");
            return Ok(());
        }

        if !quiet {
            output::print_preview(&entries, settings.preview_rows, settings.column_width)?;
        }

        let store = ResultStore::new(&self.output);
        let total = store.persist(&entries, WriteMode::from_append_flag(self.append))?;

        output::print_success(&format!(
            "Results saved to {} ({} new, {} total)",
            store.path().display(),
            entries.len(),
            total
        ));

        Ok(())
    }
}

/// Spinner shown while pages are fetched.
fn spinner(quiet: bool) -> CliResult<ProgressBar> {
    if quiet {
        return Ok(ProgressBar::hidden());
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .map_err(|e| CliError::Other(e.to_string()))?,
    );
    pb.set_message("requesting page 1");
    pb.enable_steady_tick(Duration::from_millis(120));
    Ok(pb)
}
