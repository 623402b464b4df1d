//! The three countries queries and the URLs they map to.

use std::fmt;

use url::Url;

use crate::config::{ALL_COUNTRIES_PATH, FILTER_BY_REGION_PATH, SEARCH_COUNTRY_PATH};
use crate::region::Region;

/// Cache key of a countries query.
///
/// Each variant carries exactly the inputs its request depends on, so two
/// equal keys always name the same request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CountriesQuery {
    /// `GET {base}/countries`
    AllCountries,
    /// `GET {base}/countries/{name}`
    SearchCountry(String),
    /// `GET {base}/regions/{region}`
    FilterByRegion(Region),
}

impl CountriesQuery {
    /// Builds the request URL below `base`.
    ///
    /// Segments are appended to the base path (a trailing slash on the base is
    /// ignored) and percent-encoded, so a search term can never escape its
    /// segment. A base that cannot carry a path is returned unchanged;
    /// [`crate::fetch::CountriesApi::new`] refuses such bases.
    pub fn url(&self, base: &Url) -> Url {
        let mut url = base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty();
            match self {
                CountriesQuery::AllCountries => {
                    segments.push(ALL_COUNTRIES_PATH);
                }
                CountriesQuery::SearchCountry(name) => {
                    segments.push(SEARCH_COUNTRY_PATH).push(name);
                }
                CountriesQuery::FilterByRegion(region) => {
                    segments.push(FILTER_BY_REGION_PATH).push(region.name());
                }
            }
        }
        url
    }
}

impl fmt::Display for CountriesQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CountriesQuery::AllCountries => write!(f, "allCountries"),
            CountriesQuery::SearchCountry(name) => write!(f, "searchCountry[{}]", name),
            CountriesQuery::FilterByRegion(region) => write!(f, "filterByRegion[{}]", region),
        }
    }
}
