use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use hire_core::calculations::{PriceBreakdown, format_gbp};
use hire_core::{SkipCatalog, SkipSort, sort_skips};
use hire_data::FixtureCatalog;

/// Print the skips available in a postcode district.
///
/// The CSV file should have the columns
/// `id,size,hire_period_days,transport_cost,per_tonne_cost,price_before_vat,vat,postcode,area,forbidden,allowed_on_road,allows_heavy_waste`.
/// Without `--file` the bundled catalog is used.
#[derive(Parser, Debug)]
#[command(name = "hire-catalog")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to a skip catalog CSV file
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Postcode district, e.g. NR32
    #[arg(short, long)]
    postcode: String,

    /// Narrow the listing to one area of the district
    #[arg(short, long)]
    area: Option<String>,

    /// recommended, price-low, price-high, size-low or size-high
    #[arg(short, long, default_value = "recommended")]
    sort: SkipSort,

    /// Also list skips that cannot be booked
    #[arg(long, default_value_t = false)]
    include_forbidden: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let catalog = match &args.file {
        Some(path) => {
            let csv = fs::read_to_string(path)
                .with_context(|| format!("Failed to open: {}", path.display()))?;
            FixtureCatalog::from_csv(&csv)
                .with_context(|| format!("Failed to parse CSV: {}", path.display()))?
        }
        None => FixtureCatalog::bundled().context("Failed to parse bundled catalog")?,
    };

    let listing = catalog
        .skips_by_location(&args.postcode, args.area.as_deref())
        .await
        .with_context(|| format!("No skips for {}", args.postcode))?;

    if listing.is_empty() {
        println!("No skips available in {}.", args.postcode.to_uppercase());
        return Ok(());
    }

    let skips: Vec<_> = listing
        .skips
        .into_iter()
        .filter(|s| args.include_forbidden || !s.forbidden)
        .collect();

    let area = if listing.location.area.is_empty() {
        String::new()
    } else {
        format!(", {}", listing.location.area)
    };
    println!("Skips for {}{} ({}):", listing.location.postcode, area, args.sort);

    for skip in sort_skips(&skips, args.sort) {
        let price = PriceBreakdown::calculate(skip.price_before_vat, false);
        let mut notes = Vec::new();
        if !skip.allowed_on_road {
            notes.push("private land only");
        }
        if !skip.allows_heavy_waste {
            notes.push("no heavy waste");
        }
        if skip.forbidden {
            notes.push("not bookable");
        }
        println!(
            "  {:<16} {:>3} days  {:>10} inc VAT  {}",
            skip.display_name(),
            skip.hire_period_days,
            format_gbp(price.total),
            notes.join(", ")
        );
    }

    Ok(())
}
