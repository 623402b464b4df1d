//! The fixed set of regions used as a filter.

use strum_macros::{Display, EnumIter, EnumString};

/// One of the six geographic groupings the API can filter by.
///
/// Parsing is case-insensitive; `Display` gives the canonical name, which is
/// also the path segment sent to the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
#[allow(missing_docs)]
pub enum Region {
    Africa,
    Antarctic,
    Americas,
    Asia,
    Europe,
    Oceania,
}

impl Region {
    /// Canonical region name.
    pub fn name(&self) -> &'static str {
        match self {
            Region::Africa => "Africa",
            Region::Antarctic => "Antarctic",
            Region::Americas => "Americas",
            Region::Asia => "Asia",
            Region::Europe => "Europe",
            Region::Oceania => "Oceania",
        }
    }
}
