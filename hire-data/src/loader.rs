use std::io::Read;

use hire_core::{AddressCandidate, Skip};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading fixture data.
#[derive(Debug, Error)]
pub enum CatalogLoadError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("cannot read {path}: {message}")]
    Io { path: String, message: String },
}

impl From<csv::Error> for CatalogLoadError {
    fn from(err: csv::Error) -> Self {
        CatalogLoadError::CsvParse(err.to_string())
    }
}

/// A single row of the skip catalog CSV.
///
/// - `transport_cost`, `per_tonne_cost`, `vat`: empty when not charged
/// - `area`: empty when the price applies to the whole postcode district
/// - `forbidden`, `allowed_on_road`, `allows_heavy_waste`: `true` / `false`
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SkipRecord {
    pub id: i64,
    pub size: u32,
    pub hire_period_days: u32,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub transport_cost: Option<Decimal>,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub per_tonne_cost: Option<Decimal>,
    pub price_before_vat: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub vat: Option<Decimal>,
    pub postcode: String,
    pub area: Option<String>,
    pub forbidden: bool,
    pub allowed_on_road: bool,
    pub allows_heavy_waste: bool,
}

impl From<SkipRecord> for Skip {
    fn from(record: SkipRecord) -> Self {
        Skip {
            id: record.id,
            size: record.size,
            hire_period_days: record.hire_period_days,
            transport_cost: record.transport_cost,
            per_tonne_cost: record.per_tonne_cost,
            price_before_vat: record.price_before_vat,
            vat: record.vat,
            postcode: record.postcode.trim().to_uppercase(),
            area: record.area.filter(|a| !a.trim().is_empty()),
            forbidden: record.forbidden,
            created_at: None,
            updated_at: None,
            allowed_on_road: record.allowed_on_road,
            allows_heavy_waste: record.allows_heavy_waste,
        }
    }
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Reads skip catalog rows from CSV.
pub struct SkipCatalogLoader;

impl SkipCatalogLoader {
    /// Parse skips from a CSV reader, in file order.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<Skip>, CatalogLoadError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut skips = Vec::new();

        for result in csv_reader.deserialize() {
            let record: SkipRecord = result?;
            skips.push(record.into());
        }

        Ok(skips)
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
struct AddressRecord {
    id: String,
    text: String,
    description: String,
}

/// Reads address book rows (`id,text,description`) from CSV.
pub struct AddressBookLoader;

impl AddressBookLoader {
    pub fn parse<R: Read>(reader: R) -> Result<Vec<AddressCandidate>, CatalogLoadError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut addresses = Vec::new();

        for result in csv_reader.deserialize() {
            let record: AddressRecord = result?;
            addresses.push(AddressCandidate {
                id: record.id,
                kind: "Address".to_string(),
                text: record.text,
                highlight: String::new(),
                description: record.description,
            });
        }

        Ok(addresses)
    }
}
