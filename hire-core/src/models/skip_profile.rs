//! Presentation details derived from a skip's capacity.
//!
//! The pricing service only reports a size in cubic yards. Customers pick
//! by what fits on a driveway and what the skip is good for, so the card
//! shown for each skip is filled in from the size bands below.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Skip;
use super::SkipPlacement;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SizeLabel {
    Small,
    Medium,
    Large,
}

impl SizeLabel {
    pub fn for_size(size: u32) -> Self {
        match size {
            0..=4 => Self::Small,
            5..=8 => Self::Medium,
            _ => Self::Large,
        }
    }
}

impl fmt::Display for SizeLabel {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let label = match self {
            Self::Small => "Small",
            Self::Medium => "Medium",
            Self::Large => "Large",
        };
        f.write_str(label)
    }
}

/// Approximate outside dimensions in feet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub length: f64,
    pub width: f64,
    pub height: f64,
}

impl Dimensions {
    pub fn for_size(size: u32) -> Self {
        let (length, width, height) = match size {
            0..=2 => (4.0, 2.6, 2.9),
            3..=4 => (5.9, 3.3, 3.3),
            5..=6 => (9.8, 5.6, 3.9),
            7..=8 => (11.5, 5.6, 4.3),
            9..=12 => (13.1, 5.9, 5.9),
            13..=16 => (19.7, 7.2, 5.9),
            _ => (21.0, 7.5, 6.5),
        };
        Self {
            length,
            width,
            height,
        }
    }
}

impl fmt::Display for Dimensions {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(
            f,
            "{}ft × {}ft × {}ft",
            self.length, self.width, self.height
        )
    }
}

pub fn description_for_size(size: u32) -> &'static str {
    match size {
        0..=4 => {
            "Ideal for small household clearances and garden waste. Perfect for projects with limited space."
        }
        5..=8 => "Suitable for medium sized projects like kitchen renovations or garden clearances.",
        9..=12 => {
            "Perfect for larger residential projects or commercial waste. Great value for larger jobs."
        }
        13..=16 => "Our most popular skip size for construction projects and major home renovations.",
        _ => {
            "Designed for major commercial and industrial waste management. Maximum capacity for large-scale needs."
        }
    }
}

pub fn suitable_for(
    size: u32,
    allows_heavy_waste: bool,
) -> Vec<&'static str> {
    let mut items = match size {
        0..=12 => vec!["General waste", "Household clearance"],
        _ => Vec::new(),
    };
    match size {
        0..=4 => items.extend(["Small garden waste", "Small DIY projects"]),
        5..=8 => items.extend(["Home renovations", "Garden clearances", "Office clearouts"]),
        9..=12 => items.extend(["Large renovations", "Construction waste", "Retail clearances"]),
        _ => {
            items.extend([
                "Large commercial clearances",
                "Factory clearances",
                "Development projects",
            ]);
            if allows_heavy_waste {
                items.push("Heavy construction waste");
            }
        }
    }
    items
}

/// Everything a skip card shows besides the price.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkipProfile {
    pub name: String,
    pub size_label: SizeLabel,
    pub dimensions: Dimensions,
    pub description: &'static str,
    pub suitable_for: Vec<&'static str>,
}

impl Skip {
    pub fn profile(&self) -> SkipProfile {
        SkipProfile {
            name: self.display_name(),
            size_label: SizeLabel::for_size(self.size),
            dimensions: Dimensions::for_size(self.size),
            description: description_for_size(self.size),
            suitable_for: suitable_for(self.size, self.allows_heavy_waste),
        }
    }

    /// Advisory notes for this skip given the order so far.
    ///
    /// Restrictions never hide a skip; they are shown next to it.
    pub fn restrictions(
        &self,
        placement: SkipPlacement,
        has_heavy_waste: bool,
    ) -> Vec<SkipRestriction> {
        let mut notes = Vec::new();
        if placement.requires_permit() && !self.allowed_on_road {
            notes.push(SkipRestriction::NotAllowedOnRoad);
        }
        if has_heavy_waste && !self.allows_heavy_waste {
            notes.push(SkipRestriction::NoHeavyWaste);
        }
        notes
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipRestriction {
    NotAllowedOnRoad,
    NoHeavyWaste,
}

impl fmt::Display for SkipRestriction {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::NotAllowedOnRoad => f.write_str("Not allowed on the road"),
            Self::NoHeavyWaste => f.write_str("Not suitable for heavy waste"),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::test_support;

    #[test]
    fn size_labels_follow_bands() {
        assert_eq!(SizeLabel::for_size(4), SizeLabel::Small);
        assert_eq!(SizeLabel::for_size(5), SizeLabel::Medium);
        assert_eq!(SizeLabel::for_size(8), SizeLabel::Medium);
        assert_eq!(SizeLabel::for_size(10), SizeLabel::Large);
    }

    #[test]
    fn dimensions_display_in_feet() {
        assert_eq!(Dimensions::for_size(2).to_string(), "4ft × 2.6ft × 2.9ft");
        assert_eq!(Dimensions::for_size(40).to_string(), "21ft × 7.5ft × 6.5ft");
    }

    #[test]
    fn heavy_construction_listed_only_for_large_heavy_skips() {
        assert!(suitable_for(20, true).contains(&"Heavy construction waste"));
        assert!(!suitable_for(20, false).contains(&"Heavy construction waste"));
        assert!(!suitable_for(8, true).contains(&"Heavy construction waste"));
    }

    #[test]
    fn small_skip_profile() {
        let skip = test_support::skip(1, 4, dec!(211));

        let profile = skip.profile();

        assert_eq!(profile.name, "4 Yard Skip");
        assert_eq!(profile.size_label, SizeLabel::Small);
        assert_eq!(
            profile.suitable_for,
            vec![
                "General waste",
                "Household clearance",
                "Small garden waste",
                "Small DIY projects"
            ]
        );
    }

    #[test]
    fn road_restriction_only_applies_on_public_land() {
        let mut skip = test_support::skip(1, 20, dec!(900));
        skip.allowed_on_road = false;

        assert_eq!(skip.restrictions(SkipPlacement::Private, false), vec![]);
        assert_eq!(
            skip.restrictions(SkipPlacement::Public, false),
            vec![SkipRestriction::NotAllowedOnRoad]
        );
    }

    #[test]
    fn heavy_waste_restriction_needs_declared_heavy_waste() {
        let mut skip = test_support::skip(1, 20, dec!(900));
        skip.allows_heavy_waste = false;

        assert_eq!(skip.restrictions(SkipPlacement::Private, false), vec![]);
        assert_eq!(
            skip.restrictions(SkipPlacement::Private, true),
            vec![SkipRestriction::NoHeavyWaste]
        );
    }
}
