use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Returned when an id does not name a known waste category.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown waste type '{0}'")]
pub struct UnknownWasteType(pub String);

/// Broad waste category chosen on the waste type step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WasteType {
    Household,
    Construction,
    Garden,
    Commercial,
}

impl WasteType {
    pub fn all() -> &'static [WasteType] {
        &[
            Self::Household,
            Self::Construction,
            Self::Garden,
            Self::Commercial,
        ]
    }

    pub fn id(&self) -> &'static str {
        match self {
            Self::Household => "household",
            Self::Construction => "construction",
            Self::Garden => "garden",
            Self::Commercial => "commercial",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Household => "Household Waste",
            Self::Construction => "Construction Waste",
            Self::Garden => "Garden Waste",
            Self::Commercial => "Commercial Waste",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Household => "General household items and furniture",
            Self::Construction => "Building materials and renovation debris",
            Self::Garden => "Green waste and landscaping materials",
            Self::Commercial => "Business and office clearance",
        }
    }

    pub fn examples(&self) -> &'static [&'static str] {
        match self {
            Self::Household => &[
                "Furniture",
                "Appliances",
                "Garden waste",
                "General household items",
            ],
            Self::Construction => &["Bricks", "Concrete", "Timber", "Plasterboard"],
            Self::Garden => &["Soil", "Plants", "Branches", "Grass cuttings"],
            Self::Commercial => &[
                "Office furniture",
                "Equipment",
                "Shop fittings",
                "Commercial debris",
            ],
        }
    }

    /// Construction and garden loads may contain heavy material, so the
    /// customer has to say which kinds.
    pub fn triggers_heavy_waste(&self) -> bool {
        matches!(self, Self::Construction | Self::Garden)
    }
}

impl fmt::Display for WasteType {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for WasteType {
    type Err = UnknownWasteType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|t| t.id() == wanted)
            .ok_or_else(|| UnknownWasteType(s.to_string()))
    }
}

/// Heavy material declared when the load includes construction or garden waste.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeavyWasteType {
    Soil,
    Concrete,
    Bricks,
    Tiles,
    Sand,
    Gravel,
    Rubble,
}

impl HeavyWasteType {
    pub fn all() -> &'static [HeavyWasteType] {
        &[
            Self::Soil,
            Self::Concrete,
            Self::Bricks,
            Self::Tiles,
            Self::Sand,
            Self::Gravel,
            Self::Rubble,
        ]
    }

    pub fn id(&self) -> &'static str {
        match self {
            Self::Soil => "soil",
            Self::Concrete => "concrete",
            Self::Bricks => "bricks",
            Self::Tiles => "tiles",
            Self::Sand => "sand",
            Self::Gravel => "gravel",
            Self::Rubble => "rubble",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Soil => "Soil",
            Self::Concrete => "Concrete",
            Self::Bricks => "Bricks",
            Self::Tiles => "Tiles",
            Self::Sand => "Sand",
            Self::Gravel => "Gravel",
            Self::Rubble => "Rubble",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Soil => "Including topsoil and subsoil",
            Self::Concrete => "Blocks, slabs, and foundations",
            Self::Bricks => "Whole or broken bricks",
            Self::Tiles => "Ceramic, porcelain, or stone tiles",
            Self::Sand => "Building or garden sand",
            Self::Gravel => "Stone and aggregate",
            Self::Rubble => "Mixed construction debris",
        }
    }
}

impl fmt::Display for HeavyWasteType {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for HeavyWasteType {
    type Err = UnknownWasteType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|t| t.id() == wanted)
            .ok_or_else(|| UnknownWasteType(s.to_string()))
    }
}

/// True if any selected category requires a heavy-waste declaration.
pub fn needs_heavy_waste_declaration(types: &BTreeSet<WasteType>) -> bool {
    types.iter().any(WasteType::triggers_heavy_waste)
}
