//! Country records returned by the countries API.
//!
//! A country is treated as an opaque JSON object. Only `name.common` is
//! required (it keys the rendered cards); everything else is carried through
//! untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The `name` object of a country record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryName {
    /// Common (short) name, unique across the list
    pub common: String,
    /// Any other name fields (`official`, `nativeName`, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A single country record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    /// Names of the country
    pub name: CountryName,
    /// Remaining fields, passed through unmodified
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Country {
    /// Common name, used as the card key.
    pub fn common_name(&self) -> &str {
        &self.name.common
    }

    /// Official name, if the record has one.
    pub fn official_name(&self) -> Option<&str> {
        self.name.extra.get("official").and_then(Value::as_str)
    }

    /// First listed capital. The API sends either a string or an array.
    pub fn capital(&self) -> Option<&str> {
        match self.fields.get("capital")? {
            Value::String(s) => Some(s.as_str()),
            Value::Array(items) => items.first().and_then(Value::as_str),
            _ => None,
        }
    }

    /// Region name as reported by the API.
    pub fn region(&self) -> Option<&str> {
        self.fields.get("region").and_then(Value::as_str)
    }

    /// Population, if present and numeric.
    pub fn population(&self) -> Option<u64> {
        self.fields.get("population").and_then(Value::as_u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_country_keeps_unknown_fields() {
        let raw = json!({
            "name": { "common": "Canada", "official": "Canada" },
            "cca2": "CA",
            "flags": { "png": "https://flagcdn.com/w320/ca.png" },
            "population": 38005238,
            "capital": ["Ottawa"],
            "region": "Americas"
        });
        let country: Country = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(country.common_name(), "Canada");
        assert_eq!(country.official_name(), Some("Canada"));
        assert_eq!(country.capital(), Some("Ottawa"));
        assert_eq!(country.region(), Some("Americas"));
        assert_eq!(country.population(), Some(38005238));

        // Pass-through: serializing gives back what came in
        assert_eq!(serde_json::to_value(&country).unwrap(), raw);
    }

    #[test]
    fn test_country_capital_as_string() {
        let country: Country = serde_json::from_value(json!({
            "name": { "common": "Kenya" },
            "capital": "Nairobi"
        }))
        .unwrap();
        assert_eq!(country.capital(), Some("Nairobi"));
        assert_eq!(country.official_name(), None);
        assert_eq!(country.population(), None);
    }

    #[test]
    fn test_country_requires_common_name() {
        let result: Result<Country, _> = serde_json::from_value(json!({ "name": "Canada" }));
        assert!(result.is_err());
    }
}
