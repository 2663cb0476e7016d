use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use floorheat_core::compose::format_value;
use floorheat_core::config::CancelPolicy;
use floorheat_core::geometry::Point;
use floorheat_core::heat::intensity::region_intensity;
use floorheat_core::region::RegionSummary;
use serde::Serialize;

#[derive(Args)]
pub struct InspectArgs {
    /// Region layout TOML
    #[arg(long)]
    pub layout: PathBuf,

    /// Value map TOML (name = number)
    #[arg(long)]
    pub values: Option<PathBuf>,

    /// Print machine-readable JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct RegionReport {
    #[serde(flatten)]
    summary: RegionSummary,
    centroid: Option<Point>,
    bounding_radius: f32,
    intensity: Option<f64>,
}

#[derive(Serialize)]
struct Report {
    max_value: f64,
    regions: Vec<RegionReport>,
}

pub fn run(args: &InspectArgs) -> Result<()> {
    let state = super::build_state(
        None,
        &args.layout,
        args.values.as_deref(),
        CancelPolicy::KeepAll,
    )?;
    let max_value = state.max_value();

    let regions = state
        .regions()
        .snapshot()
        .into_iter()
        .zip(state.regions().iter())
        .map(|(summary, region)| RegionReport {
            centroid: region.centroid(),
            bounding_radius: region.bounding_radius(),
            intensity: if region.is_complete() {
                region_intensity(region.value(), max_value)
            } else {
                None
            },
            summary,
        })
        .collect();
    let report = Report { max_value, regions };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Regions:     {}", report.regions.len());
    println!("Max value:   {}", format_value(report.max_value));
    println!();
    println!(
        "{:<4} {:<20} {:>6} {:>12} {:>18} {:>8} {:>9}",
        "id", "name", "points", "value", "centroid", "radius", "intensity"
    );
    for r in &report.regions {
        let centroid = r
            .centroid
            .map(|c| format!("({:.1}, {:.1})", c.x, c.y))
            .unwrap_or_else(|| "-".to_string());
        let intensity = r
            .intensity
            .map(|i| format!("{i:.3}"))
            .unwrap_or_else(|| "-".to_string());
        let marker = if r.summary.complete { "" } else { " (open)" };
        println!(
            "{:<4} {:<20} {:>6} {:>12} {:>18} {:>8.1} {:>9}{}",
            r.summary.id.0,
            r.summary.name,
            r.summary.point_count,
            format_value(r.summary.value),
            centroid,
            r.bounding_radius,
            intensity,
            marker
        );
    }

    Ok(())
}
