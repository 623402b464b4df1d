//! The countries view.
//!
//! Owns the user inputs (search text, selected region), the last surfaced
//! error, and the query cache behind the three countries queries. Deciding
//! what is shown is done on demand from the cache; nothing else mutates the
//! view's state.

mod precedence;
mod render;

use std::sync::Arc;

use futures::future::{join_all, LocalBoxFuture};
use futures::FutureExt;
use log::{debug, info, warn};

use crate::cache::{QueryCache, QueryOptions, QueryState};
use crate::error_handling::FetchError;
use crate::fetch::{CountriesApi, CountriesQuery};
use crate::models::Country;
use crate::region::Region;

pub use precedence::select_display;
pub use render::{controls_line, CountryCard, RenderedView, ViewBody};

/// Cache of countries lists keyed by query.
pub type CountriesCache = QueryCache<CountriesQuery, Vec<Country>, FetchError>;

/// A countries fetch started by [`CountriesView::begin_sync`], resolving to
/// its key and outcome.
pub type PendingFetch =
    LocalBoxFuture<'static, (CountriesQuery, Result<Vec<Country>, FetchError>)>;

/// The three query slots, in display-precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    All = 0,
    Search = 1,
    Region = 2,
}

const SLOTS: [Slot; 3] = [Slot::All, Slot::Search, Slot::Region];

/// Returned by [`CountriesView::submit_search`] when the search field is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Search text is required")]
pub struct EmptySearch;

/// Country list with search and region filter.
#[derive(Debug)]
pub struct CountriesView {
    api: CountriesApi,
    options: QueryOptions,
    cache: CountriesCache,
    search_text: String,
    current_region: Option<Region>,
    api_error: Option<String>,
    observed: [Option<CountriesQuery>; 3],
}

impl CountriesView {
    /// Creates a view with empty inputs. Nothing is fetched until the first sync.
    pub fn new(api: CountriesApi, options: QueryOptions) -> Self {
        Self {
            api,
            options,
            cache: CountriesCache::new(),
            search_text: String::new(),
            current_region: None,
            api_error: None,
            observed: [None, None, None],
        }
    }

    /// Current search text.
    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    /// Selected region; `None` means all regions.
    pub fn current_region(&self) -> Option<Region> {
        self.current_region
    }

    /// Last surfaced error message.
    pub fn api_error(&self) -> Option<&str> {
        self.api_error.as_deref()
    }

    /// The cache backing the queries.
    pub fn cache(&self) -> &CountriesCache {
        &self.cache
    }

    /// Replaces the search text, as on every keystroke.
    ///
    /// The search query key follows the text immediately; the next
    /// [`sync`](Self::sync) fetches the new term if it is not cached.
    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
    }

    /// Submits the search form, clearing the error banner.
    ///
    /// # Errors
    ///
    /// The search field is required: with empty text nothing happens and
    /// [`EmptySearch`] is returned.
    pub fn submit_search(&mut self) -> Result<(), EmptySearch> {
        if self.search_text.is_empty() {
            return Err(EmptySearch);
        }
        self.api_error = None;
        Ok(())
    }

    /// Selects a region (`None` for all regions) and clears the error banner.
    pub fn select_region(&mut self, region: Option<Region>) {
        self.current_region = region;
        self.api_error = None;
    }

    /// Key of the search query, `None` while it is disabled.
    pub fn search_query(&self) -> Option<CountriesQuery> {
        if self.search_text.is_empty() {
            None
        } else {
            Some(CountriesQuery::SearchCountry(self.search_text.clone()))
        }
    }

    /// Key of the region query, `None` while it is disabled.
    pub fn region_query(&self) -> Option<CountriesQuery> {
        self.current_region.map(CountriesQuery::FilterByRegion)
    }

    fn desired(&self, slot: Slot) -> Option<CountriesQuery> {
        match slot {
            Slot::All => Some(CountriesQuery::AllCountries),
            Slot::Search => self.search_query(),
            Slot::Region => self.region_query(),
        }
    }

    /// Starts observing the current keys and returns the fetches they call for.
    ///
    /// A query whose key changed since the last sync starts observing the new
    /// key and fetches it unless fresh data is cached or a fetch for it is
    /// already in flight. Keys that did not change are left alone. The
    /// returned futures borrow nothing from the view; feed each outcome back
    /// through [`apply_result`](Self::apply_result).
    pub fn begin_sync(&mut self) -> Vec<PendingFetch> {
        let evicted = self.cache.collect_garbage(self.options.cache_time);
        if evicted > 0 {
            debug!("Evicted {} unobserved queries", evicted);
        }

        let mut pending = Vec::new();
        for slot in SLOTS {
            let desired = self.desired(slot);
            let observed = &mut self.observed[slot as usize];
            if *observed == desired {
                continue;
            }
            if let Some(old) = observed.take() {
                self.cache.release(&old);
            }
            if let Some(key) = desired {
                self.cache.observe(&key);
                let api = self.api.clone();
                let fetch_key = key.clone();
                let fetcher = move || {
                    let api = api.clone();
                    let key = fetch_key.clone();
                    async move { api.fetch(&key).await }
                };
                if let Some(task) = self.cache.fetch_task(&key, &self.options, fetcher) {
                    info!("Fetching {}", key);
                    pending.push(task.boxed_local());
                }
                *observed = Some(key);
            }
        }
        pending
    }

    /// Records the outcome of a fetch started by [`begin_sync`](Self::begin_sync).
    ///
    /// The result always lands in the cache. A failure reaches the error
    /// banner only while its key is still observed; a superseded query fails
    /// silently apart from the log.
    pub fn apply_result(&mut self, key: CountriesQuery, result: Result<Vec<Country>, FetchError>) {
        if let Err(e) = &result {
            if self.observed.iter().flatten().any(|observed| *observed == key) {
                self.handle_error(e);
            } else {
                debug!("Query {} failed after it was superseded", key);
            }
        }
        self.cache.settle(&key, result);
    }

    /// Brings every enabled query up to date and waits for the fetches.
    ///
    /// Same as [`begin_sync`](Self::begin_sync) followed by applying every
    /// outcome; the fetches run concurrently.
    pub async fn sync(&mut self) {
        let results = join_all(self.begin_sync()).await;
        for (key, result) in results {
            self.apply_result(key, result);
        }
    }

    /// Shared error handler of the three queries.
    fn handle_error(&mut self, error: &FetchError) {
        warn!("Request to {} failed: {}", error.url(), error.cause());
        self.api_error = Some(error.to_string());
    }

    /// State of the query currently observed for the search input.
    pub fn search_state(&self) -> QueryState<Vec<Country>, FetchError> {
        self.slot_state(Slot::Search)
    }

    /// State of the query currently observed for the region input.
    pub fn region_state(&self) -> QueryState<Vec<Country>, FetchError> {
        self.slot_state(Slot::Region)
    }

    /// State of the all-countries query.
    pub fn all_countries_state(&self) -> QueryState<Vec<Country>, FetchError> {
        self.slot_state(Slot::All)
    }

    fn slot_state(&self, slot: Slot) -> QueryState<Vec<Country>, FetchError> {
        match self.desired(slot) {
            Some(key) => self.cache.state(&key),
            None => QueryState::Pending,
        }
    }

    /// The list currently displayed, chosen by display precedence.
    ///
    /// Each input contributes the data cached for its current key, so a
    /// result for a term the user has since changed is never shown.
    pub fn display_countries(&self) -> Arc<Vec<Country>> {
        let data = |slot| self.desired(slot).and_then(|key| self.cache.data(&key));
        select_display(data(Slot::All), data(Slot::Search), data(Slot::Region))
            .unwrap_or_default()
    }

    /// Renders the view: the error banner (if any) above either the loading
    /// indicator or one card per displayed country.
    pub fn render(&self) -> RenderedView {
        let countries = self.display_countries();
        let body = if countries.is_empty() {
            ViewBody::Loading
        } else {
            ViewBody::Countries {
                search_text: self.search_text.clone(),
                region: self.current_region,
                cards: countries.iter().map(CountryCard::from).collect(),
            }
        };
        RenderedView {
            error_banner: self.api_error.clone(),
            body,
        }
    }
}
