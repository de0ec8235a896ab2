use std::collections::{BTreeMap, BTreeSet};

use super::{CategorySeries, Chart, ChartBody, Series};
use crate::data::{DayRecord, Season};

/// Total rentals per (season, year), bars grouped by season and split by year.
/// Bars show the sum over all matching days, not a per-day mean.
pub fn seasonal_totals(rows: &[DayRecord]) -> Chart {
    let mut totals: BTreeMap<(Season, i32), f64> = BTreeMap::new();
    for rec in rows {
        *totals.entry((rec.season, rec.year)).or_default() += rec.total as f64;
    }

    let seasons: BTreeSet<Season> = totals.keys().map(|(s, _)| *s).collect();
    let years: BTreeSet<i32> = totals.keys().map(|(_, y)| *y).collect();

    let series = years
        .iter()
        .map(|&year| Series {
            name: year.to_string(),
            values: seasons
                .iter()
                .map(|&season| totals.get(&(season, year)).copied())
                .collect(),
        })
        .collect();

    Chart::new(
        "Bike Rentals by Season and Year",
        "Season",
        "Total Rentals",
        ChartBody::Bars(CategorySeries {
            categories: seasons.iter().map(|s| s.label().to_string()).collect(),
            series,
            annotate_values: false,
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::tests::records;
    use crate::data::filter::{apply_filter, FilterSelection};
    use crate::data::RentalDataset;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeSet;

    #[test]
    fn test_two_row_example() {
        let rows = records(&[("2011-01-01", 0, 1, 1, 10, 20), ("2012-05-01", 1, 2, 2, 5, 15)]);
        let ds = RentalDataset::from_records(rows);
        let mut sel = FilterSelection::all(&ds);
        sel.years = BTreeSet::from([2011]);
        let view = apply_filter(&ds.records, &sel);

        let chart = seasonal_totals(&view);
        assert_eq!(
            chart.body,
            ChartBody::Bars(CategorySeries {
                categories: vec!["Spring".to_string()],
                series: vec![Series {
                    name: "2011".to_string(),
                    values: vec![Some(30.0)],
                }],
                annotate_values: false,
            })
        );
    }

    #[test]
    fn test_sums_and_missing_combinations() {
        let rows = records(&[
            ("2011-12-30", 0, 4, 1, 1, 9),
            ("2011-01-01", 0, 1, 1, 10, 20),
            ("2011-01-02", 0, 1, 2, 5, 5),
            ("2012-01-05", 1, 1, 1, 100, 100),
        ]);
        let chart = seasonal_totals(&rows);
        let ChartBody::Bars(cs) = &chart.body else {
            panic!("expected bars");
        };
        assert_eq!(cs.categories, vec!["Spring", "Winter"]);
        assert_eq!(chart.series("2011").unwrap().values, vec![Some(40.0), Some(10.0)]);
        assert_eq!(chart.series("2012").unwrap().values, vec![Some(200.0), None]);
    }

    #[test]
    fn test_bars_are_sums_not_means() {
        let rows = records(&[("2011-01-01", 0, 1, 1, 10, 20), ("2011-01-02", 0, 1, 1, 20, 30)]);
        let chart = seasonal_totals(&rows);
        assert_eq!(chart.series("2011").unwrap().values, vec![Some(80.0)]);
    }

    #[test]
    fn test_empty_input() {
        let chart = seasonal_totals(&[]);
        let ChartBody::Bars(cs) = chart.body else {
            panic!("expected bars");
        };
        assert!(cs.categories.is_empty());
        assert!(cs.series.is_empty());
    }
}
