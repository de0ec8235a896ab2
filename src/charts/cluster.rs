use super::{Chart, ChartBody, PointGroup, ScatterData};
use crate::analysis::KMeans;
use crate::data::DayRecord;

pub const CLUSTER_COUNT: usize = 3;
pub const CLUSTER_SEED: u64 = 42;

/// Cluster label per row over (temperature, humidity, windspeed, total).
pub fn assign_clusters(rows: &[DayRecord]) -> Vec<usize> {
    let features: Vec<[f64; 4]> = rows
        .iter()
        .map(|r| [r.temperature, r.humidity, r.windspeed, r.total as f64])
        .collect();
    KMeans::new(CLUSTER_COUNT)
        .with_seed(CLUSTER_SEED)
        .fit(&features)
        .labels
}

pub fn cluster_name(label: usize) -> String {
    format!("Cluster {label}")
}

/// Scatter of temperature vs total rentals, one colour per k-means cluster.
pub fn cluster_view(rows: &[DayRecord]) -> Chart {
    // The label column lives only for the duration of this call.
    let labels = assign_clusters(rows);
    let k = labels.iter().max().map_or(0, |m| m + 1);

    let mut groups: Vec<PointGroup> = (0..k)
        .map(|c| PointGroup {
            name: cluster_name(c),
            points: Vec::new(),
            opacity: 1.0,
        })
        .collect();
    for (rec, &label) in rows.iter().zip(&labels) {
        groups[label].points.push([rec.temperature, rec.total as f64]);
    }

    Chart::new(
        "Bike Rentals Clusters based on Temperature and Count",
        "temp",
        "cnt",
        ChartBody::Scatter(ScatterData {
            groups,
            fits: Vec::new(),
        }),
    )
}
