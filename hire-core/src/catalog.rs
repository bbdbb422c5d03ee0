//! Skip catalog presentation: sorting and load status.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::models::{CatalogLocation, Skip, SkipListing};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown sort order: {0}")]
pub struct UnknownSort(pub String);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkipSort {
    /// Order as returned by the pricing service.
    #[default]
    Recommended,
    PriceLow,
    PriceHigh,
    SizeLow,
    SizeHigh,
}

impl SkipSort {
    pub fn all() -> &'static [SkipSort] {
        &[
            SkipSort::Recommended,
            SkipSort::PriceLow,
            SkipSort::PriceHigh,
            SkipSort::SizeLow,
            SkipSort::SizeHigh,
        ]
    }

    pub fn id(&self) -> &'static str {
        match self {
            SkipSort::Recommended => "recommended",
            SkipSort::PriceLow => "price-low",
            SkipSort::PriceHigh => "price-high",
            SkipSort::SizeLow => "size-low",
            SkipSort::SizeHigh => "size-high",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SkipSort::Recommended => "Recommended",
            SkipSort::PriceLow => "Price: Low to High",
            SkipSort::PriceHigh => "Price: High to Low",
            SkipSort::SizeLow => "Size: Small to Large",
            SkipSort::SizeHigh => "Size: Large to Small",
        }
    }
}

impl fmt::Display for SkipSort {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SkipSort {
    type Err = UnknownSort;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        SkipSort::all()
            .iter()
            .copied()
            .find(|sort| sort.id() == wanted)
            .ok_or_else(|| UnknownSort(s.to_string()))
    }
}

/// Returns `skips` in `sort` order. The input is left untouched and equal
/// keys keep their relative order.
pub fn sort_skips(
    skips: &[Skip],
    sort: SkipSort,
) -> Vec<Skip> {
    let mut sorted = skips.to_vec();
    match sort {
        SkipSort::Recommended => {}
        SkipSort::PriceLow => sorted.sort_by(|a, b| a.price_before_vat.cmp(&b.price_before_vat)),
        SkipSort::PriceHigh => sorted.sort_by(|a, b| b.price_before_vat.cmp(&a.price_before_vat)),
        SkipSort::SizeLow => sorted.sort_by_key(|s| s.size),
        SkipSort::SizeHigh => sorted.sort_by(|a, b| b.size.cmp(&a.size)),
    }
    sorted
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogStatus {
    /// Nothing requested yet.
    Idle,
    Loading,
    Ready,
    /// The service answered with no skips for the location.
    Empty,
    Failed(String),
}

/// What the skip-selection step shows.
#[derive(Debug, Clone)]
pub struct CatalogView {
    skips: Vec<Skip>,
    location: Option<CatalogLocation>,
    sort: SkipSort,
    status: CatalogStatus,
}

impl Default for CatalogView {
    fn default() -> Self {
        Self {
            skips: Vec::new(),
            location: None,
            sort: SkipSort::default(),
            status: CatalogStatus::Idle,
        }
    }
}

impl CatalogView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> &CatalogStatus {
        &self.status
    }

    pub fn sort(&self) -> SkipSort {
        self.sort
    }

    pub fn location(&self) -> Option<&CatalogLocation> {
        self.location.as_ref()
    }

    /// Skips in the active sort order.
    pub fn skips(&self) -> Vec<Skip> {
        sort_skips(&self.skips, self.sort)
    }

    /// The skip at `index` in the displayed order.
    pub fn skip_at(
        &self,
        index: usize,
    ) -> Option<Skip> {
        self.skips().into_iter().nth(index)
    }

    pub fn set_sort(
        &mut self,
        sort: SkipSort,
    ) {
        self.sort = sort;
    }

    /// Previously shown skips are dropped while a new location loads.
    pub fn start_loading(&mut self) {
        self.skips.clear();
        self.location = None;
        self.status = CatalogStatus::Loading;
    }

    /// Shows `listing`. Forbidden skips are never offered.
    pub fn finish(
        &mut self,
        listing: SkipListing,
    ) {
        let total = listing.skips.len();
        self.skips = listing.skips.into_iter().filter(|s| !s.forbidden).collect();
        if self.skips.len() < total {
            debug!(hidden = total - self.skips.len(), "forbidden skips hidden");
        }
        self.status = if self.skips.is_empty() {
            CatalogStatus::Empty
        } else {
            CatalogStatus::Ready
        };
        self.location = Some(listing.location);
    }

    pub fn fail(
        &mut self,
        message: impl Into<String>,
    ) {
        self.skips.clear();
        self.status = CatalogStatus::Failed(message.into());
    }
}
