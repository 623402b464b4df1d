//! Rendered form of the countries view.

use std::fmt;

use crate::config::{ALL_REGIONS_LABEL, LOADING_TEXT, SEARCH_PLACEHOLDER};
use crate::models::Country;
use crate::region::Region;

/// One country card.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryCard {
    /// Card key: the country's common name
    pub key: String,
    /// Official name, when the record has one
    pub official_name: Option<String>,
    /// First capital
    pub capital: Option<String>,
    /// Region reported by the API
    pub region: Option<String>,
    /// Population
    pub population: Option<u64>,
}

impl From<&Country> for CountryCard {
    fn from(country: &Country) -> Self {
        Self {
            key: country.common_name().to_string(),
            official_name: country.official_name().map(str::to_string),
            capital: country.capital().map(str::to_string),
            region: country.region().map(str::to_string),
            population: country.population(),
        }
    }
}

/// Body below the error banner.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewBody {
    /// No applicable result set has produced a non-empty list yet.
    Loading,
    /// The search and region controls plus one card per country.
    Countries {
        /// Current text of the search field
        search_text: String,
        /// Selected region, `None` for all regions
        region: Option<Region>,
        /// Cards in API order
        cards: Vec<CountryCard>,
    },
}

/// Everything the view shows at one point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedView {
    /// Error banner text
    pub error_banner: Option<String>,
    /// Loading indicator or country list
    pub body: ViewBody,
}

impl RenderedView {
    /// Whether the loading indicator is shown.
    pub fn is_loading(&self) -> bool {
        matches!(self.body, ViewBody::Loading)
    }

    /// Card keys in display order; empty while loading.
    pub fn card_keys(&self) -> Vec<&str> {
        match &self.body {
            ViewBody::Loading => Vec::new(),
            ViewBody::Countries { cards, .. } => cards.iter().map(|c| c.key.as_str()).collect(),
        }
    }
}

/// Formats a population with thousands separators.
fn format_population(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

impl CountryCard {
    /// Card title: the common name, followed by the official name when it differs.
    pub fn title(&self) -> String {
        match self.official_name.as_deref().filter(|o| *o != self.key) {
            Some(official) => format!("{} ({})", self.key, official),
            None => self.key.clone(),
        }
    }

    /// Detail lines below the title, in display order.
    pub fn details(&self) -> Vec<String> {
        let mut details = Vec::new();
        if let Some(population) = self.population {
            details.push(format!("Population: {}", format_population(population)));
        }
        if let Some(region) = &self.region {
            details.push(format!("Region: {}", region));
        }
        if let Some(capital) = &self.capital {
            details.push(format!("Capital: {}", capital));
        }
        details
    }
}

impl fmt::Display for CountryCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())?;
        for detail in self.details() {
            write!(f, "\n    {}", detail)?;
        }
        Ok(())
    }
}

/// The controls line above the cards.
pub fn controls_line(search_text: &str, region: Option<Region>) -> String {
    let search = if search_text.is_empty() {
        format!("<{}>", SEARCH_PLACEHOLDER)
    } else {
        search_text.to_string()
    };
    let region = region.map_or(ALL_REGIONS_LABEL, |r| r.name());
    format!("Search: {}   Region: {}", search, region)
}

impl fmt::Display for RenderedView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(banner) = &self.error_banner {
            writeln!(f, "! {}", banner)?;
        }
        match &self.body {
            ViewBody::Loading => writeln!(f, "{}", LOADING_TEXT),
            ViewBody::Countries {
                search_text,
                region,
                cards,
            } => {
                writeln!(f, "{}", controls_line(search_text, *region))?;
                writeln!(f, "{} countries", cards.len())?;
                for card in cards {
                    writeln!(f, "- {}", card)?;
                }
                Ok(())
            }
        }
    }
}
