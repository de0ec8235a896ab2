use chrono::Datelike;

use super::{user_type_series, CategorySeries, Chart, ChartBody, UserTypeMean};
use crate::data::DayRecord;

pub const WEEKDAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Mean casual / registered rentals per day of week, Monday first.
pub fn weekly_pattern(rows: &[DayRecord]) -> Chart {
    let mut days = [UserTypeMean::default(); 7];
    for rec in rows {
        days[rec.date.weekday().num_days_from_monday() as usize].add(rec);
    }

    Chart::new(
        "Average Daily Rentals by Day of Week and User Type",
        "Day of Week (0 = Monday, 6 = Sunday)",
        "Average Rentals",
        ChartBody::Lines(CategorySeries {
            categories: WEEKDAY_LABELS.iter().map(|d| d.to_string()).collect(),
            series: user_type_series(&days),
            annotate_values: false,
        }),
    )
}
