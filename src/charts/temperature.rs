use std::collections::BTreeMap;

use super::{Chart, ChartBody, PointGroup, RegressionLine, ScatterData};
use crate::analysis::LinearFit;
use crate::data::DayRecord;

const POINT_OPACITY: f32 = 0.3;

/// One least-squares line of total rentals vs temperature per year,
/// with every day overlaid as a faint scatter.
pub fn temperature_correlation(rows: &[DayRecord]) -> Chart {
    let mut by_year: BTreeMap<i32, Vec<[f64; 2]>> = BTreeMap::new();
    for rec in rows {
        by_year
            .entry(rec.year)
            .or_default()
            .push([rec.temperature, rec.total as f64]);
    }

    let fits = by_year
        .iter()
        .filter_map(|(year, points)| {
            let fit = LinearFit::fit(points)?;
            let (x_min, x_max) = points
                .iter()
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| (lo.min(p[0]), hi.max(p[0])));
            Some(RegressionLine {
                name: year.to_string(),
                slope: fit.slope,
                intercept: fit.intercept,
                x_min,
                x_max,
            })
        })
        .collect();

    let mut groups = Vec::new();
    if !rows.is_empty() {
        groups.push(PointGroup {
            name: "Daily rentals".to_string(),
            points: rows.iter().map(|r| [r.temperature, r.total as f64]).collect(),
            opacity: POINT_OPACITY,
        });
    }

    Chart::new(
        "Temperature vs Total Rentals by Year",
        "Normalized Temperature",
        "Total Rentals",
        ChartBody::Scatter(ScatterData { groups, fits }),
    )
}
