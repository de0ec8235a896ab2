use std::collections::BTreeMap;

use super::{CategorySeries, Chart, ChartBody, Series};
use crate::data::{DayRecord, Weather};

pub const NO_DATA_MESSAGE: &str = "No data available for the selected filters";

/// Mean total rentals per weather situation, best weather first by mean.
pub fn weather_impact(rows: &[DayRecord]) -> Chart {
    if rows.is_empty() {
        return Chart::new("", "", "", ChartBody::Placeholder(NO_DATA_MESSAGE.to_string()));
    }

    let mut groups: BTreeMap<Weather, (f64, usize)> = BTreeMap::new();
    for rec in rows {
        let entry = groups.entry(rec.weather).or_default();
        entry.0 += rec.total as f64;
        entry.1 += 1;
    }

    let mut means: Vec<(Weather, f64)> = groups
        .into_iter()
        .map(|(w, (sum, n))| (w, sum / n as f64))
        .collect();
    means.sort_by(|a, b| b.1.total_cmp(&a.1));

    Chart::new(
        "Average Daily Rentals by Weather Situation",
        "Weather Situation",
        "Average Number of Rentals",
        ChartBody::Bars(CategorySeries {
            categories: means.iter().map(|(w, _)| w.label().to_string()).collect(),
            series: vec![Series {
                name: "Average Rentals".to_string(),
                values: means.iter().map(|(_, m)| Some(*m)).collect(),
            }],
            annotate_values: true,
        }),
    )
}

/// Text printed above a bar: the value rounded to the nearest integer.
pub fn value_label(value: f64) -> String {
    format!("{:.0}", value.round())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::tests::records;

    #[test]
    fn test_empty_input_is_text_placeholder() {
        let chart = weather_impact(&[]);
        assert_eq!(chart.body, ChartBody::Placeholder(NO_DATA_MESSAGE.to_string()));
        assert!(chart.title.is_empty());
        assert!(chart.x_label.is_empty() && chart.y_label.is_empty());
    }

    #[test]
    fn test_sorted_descending_by_mean() {
        let rows = records(&[
            ("2011-01-01", 0, 1, 1, 100, 900),
            ("2011-01-02", 0, 1, 1, 100, 1100),
            ("2011-01-03", 0, 1, 2, 500, 1500),
            ("2011-01-04", 0, 1, 3, 50, 150),
        ]);
        let chart = weather_impact(&rows);
        let ChartBody::Bars(cs) = &chart.body else {
            panic!("expected bars");
        };
        assert_eq!(cs.categories, vec!["Mist", "Clear", "Light Snow"]);
        assert_eq!(cs.series[0].values, vec![Some(2000.0), Some(1100.0), Some(200.0)]);
        assert!(cs.annotate_values);
    }

    #[test]
    fn test_value_label_rounds() {
        assert_eq!(value_label(4876.5), "4877");
        assert_eq!(value_label(1662.49), "1662");
    }
}
