use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One priced skip offered for a location by the pricing service.
///
/// Field names follow the service's JSON so records deserialize directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skip {
    pub id: i64,
    /// Capacity in cubic yards.
    pub size: u32,
    pub hire_period_days: u32,
    #[serde(default)]
    pub transport_cost: Option<Decimal>,
    #[serde(default)]
    pub per_tonne_cost: Option<Decimal>,
    pub price_before_vat: Decimal,
    /// VAT percentage echoed by the service. Informational only; pricing
    /// always uses the fixed rate.
    #[serde(default)]
    pub vat: Option<Decimal>,
    #[serde(default)]
    pub postcode: String,
    #[serde(default)]
    pub area: Option<String>,
    #[serde(default)]
    pub forbidden: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub allowed_on_road: bool,
    #[serde(default)]
    pub allows_heavy_waste: bool,
}

impl Skip {
    pub fn display_name(&self) -> String {
        format!("{} Yard Skip", self.size)
    }
}

/// Location echoed back with a catalog response.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CatalogLocation {
    pub postcode: String,
    pub area: String,
}

/// Skips available at one location, in the order the service returned them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SkipListing {
    pub skips: Vec<Skip>,
    pub location: CatalogLocation,
}

impl SkipListing {
    /// Builds a listing from raw records.
    ///
    /// The echoed location comes from the first skip when there is one,
    /// otherwise from the request itself.
    pub fn from_records(
        skips: Vec<Skip>,
        requested_postcode: &str,
        requested_area: Option<&str>,
    ) -> Self {
        let location = match skips.first() {
            Some(first) => CatalogLocation {
                postcode: first.postcode.clone(),
                area: first.area.clone().unwrap_or_default(),
            },
            None => CatalogLocation {
                postcode: requested_postcode.to_string(),
                area: requested_area.unwrap_or_default().to_string(),
            },
        };
        Self { skips, location }
    }

    pub fn is_empty(&self) -> bool {
        self.skips.is_empty()
    }
}
