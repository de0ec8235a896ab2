use super::{user_type_series, CategorySeries, Chart, ChartBody, UserTypeMean};
use crate::data::DayRecord;

/// Mean casual / registered rentals on working days vs holidays.
pub fn holiday_comparison(rows: &[DayRecord]) -> Chart {
    let title = "Average Rentals by User Type: Holiday vs Non-Holiday";
    if rows.is_empty() {
        return Chart::new(title, "", "", ChartBody::Empty);
    }

    // [non-holiday, holiday]
    let mut groups = [UserTypeMean::default(); 2];
    for rec in rows {
        groups[rec.is_holiday as usize].add(rec);
    }

    Chart::new(
        title,
        "Comparison",
        "Average Rentals",
        ChartBody::Bars(CategorySeries {
            categories: vec!["Non-Holiday".to_string(), "Holiday".to_string()],
            series: user_type_series(&groups),
            annotate_values: false,
        }),
    )
}
