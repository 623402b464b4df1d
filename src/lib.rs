//! countries_browser library: browse a countries-information API
//!
//! The library lists countries, searches them by name and filters them by
//! region. Three independent queries (all countries, search, region filter)
//! go through an explicit query cache; a view picks which result set is shown
//! and surfaces fetch failures as a single user-facing message.
//!
//! # Example
//!
//! ```no_run
//! use countries_browser::{run_browser, Config};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     api_url: Some("http://localhost:5000/api".to_string()),
//!     ..Default::default()
//! };
//!
//! let input = tokio::io::BufReader::new(&b"search canada\nregion africa\n"[..]);
//! let report = run_browser(config, input, std::io::stdout()).await?;
//! println!("Processed {} commands", report.commands);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. A current-thread runtime is enough;
//! nothing is spawned.

#![warn(missing_docs)]

pub mod app;
pub mod cache;
pub mod config;
pub mod error_handling;
pub mod fetch;
pub mod initialization;
pub mod models;
pub mod region;
pub mod view;

// Re-export public API
pub use cache::{QueryCache, QueryOptions, QueryState};
pub use config::{Config, ConfigValidationError, LogFormat, LogLevel};
pub use error_handling::{FailureCause, FetchError};
pub use fetch::{fetch_countries, fetch_json, CountriesApi, CountriesQuery};
pub use models::Country;
pub use region::Region;
pub use run::{run_browser, SessionReport};
pub use view::{CountriesView, RenderedView};

// Internal run module (contains the interactive session loop)
mod run {
    use std::io::Write;
    use std::time::Instant;

    use anyhow::{Context, Result};
    use futures::stream::{FuturesUnordered, StreamExt};
    use log::{debug, info};
    use tokio::io::{AsyncBufRead, AsyncBufReadExt};

    use crate::app::{print_regions, print_view, Command, HELP_TEXT};
    use crate::config::Config;
    use crate::fetch::CountriesApi;
    use crate::initialization::init_client;
    use crate::view::{CountriesView, PendingFetch};

    /// Summary of a finished session.
    #[derive(Debug, Clone)]
    pub struct SessionReport {
        /// Number of commands executed (blank and invalid lines excluded)
        pub commands: usize,
        /// Cache entries held when the session ended
        pub cached_queries: usize,
        /// Elapsed time in seconds
        pub elapsed_seconds: f64,
    }

    /// Runs an interactive browsing session.
    ///
    /// Reads one command per line from `input` until `quit` or end of input.
    /// Fetches run in the background of the loop: commands keep being read
    /// while requests are in flight, and the view is rendered to `output`
    /// after every command and every completed fetch. At end of input the
    /// outstanding fetches are awaited; `quit` drops them. Fetch failures
    /// never end the session; they show up in the error banner.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, the HTTP client cannot
    /// be built, or reading `input` / writing `output` fails.
    pub async fn run_browser<R, W>(config: Config, input: R, mut output: W) -> Result<SessionReport>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let start = Instant::now();
        config.validate().context("Invalid configuration")?;
        let base = config.api_base().context("Invalid API base URL")?;
        let client = init_client(&config).context("Failed to initialize HTTP client")?;
        let api = CountriesApi::new(client, base).context("Invalid API base URL")?;
        info!("Using countries API at {}", api.base());

        let new_view = || CountriesView::new(api.clone(), config.query_options());
        let mut view = new_view();
        let mut pending: FuturesUnordered<PendingFetch> = view.begin_sync().into_iter().collect();
        print_view(&mut output, &view.render()).context("Failed to write output")?;

        let mut commands = 0usize;
        let mut lines = input.lines();
        let mut input_open = true;
        while input_open || !pending.is_empty() {
            tokio::select! {
                Some((key, result)) = pending.next(), if !pending.is_empty() => {
                    view.apply_result(key, result);
                }
                line = lines.next_line(), if input_open => {
                    let Some(line) = line.context("Failed to read command")? else {
                        debug!("End of input, {} fetches outstanding", pending.len());
                        input_open = false;
                        continue;
                    };
                    let command = match line.parse::<Command>() {
                        Ok(Command::Empty) => continue,
                        Ok(command) => command,
                        Err(e) => {
                            writeln!(output, "{}", e).context("Failed to write output")?;
                            continue;
                        }
                    };
                    debug!("Command: {:?}", command);
                    commands += 1;

                    match command {
                        Command::Quit => break,
                        Command::Help => {
                            writeln!(output, "{}", HELP_TEXT).context("Failed to write output")?;
                            continue;
                        }
                        Command::Regions => {
                            print_regions(&mut output).context("Failed to write output")?;
                            continue;
                        }
                        Command::Search(text) => {
                            if let Some(text) = text {
                                view.set_search_text(text);
                            }
                            if let Err(e) = view.submit_search() {
                                writeln!(output, "{}", e).context("Failed to write output")?;
                            }
                        }
                        Command::Type(text) => view.set_search_text(text),
                        Command::Clear => view.set_search_text(String::new()),
                        Command::Region(region) => view.select_region(region),
                        Command::Reload => {
                            info!("Reloading: all state dropped");
                            pending.clear();
                            view = new_view();
                        }
                        Command::Empty => continue,
                    }
                    pending.extend(view.begin_sync());
                }
            }
            print_view(&mut output, &view.render()).context("Failed to write output")?;
        }

        Ok(SessionReport {
            commands,
            cached_queries: view.cache().len(),
            elapsed_seconds: start.elapsed().as_secs_f64(),
        })
    }
}
