use super::{user_type_series, CategorySeries, Chart, ChartBody, UserTypeMean};
use crate::data::DayRecord;

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Mean casual / registered rentals per calendar month.
/// Always twelve categories; months without rows are gaps.
pub fn monthly_user_trend(rows: &[DayRecord]) -> Chart {
    let mut months = [UserTypeMean::default(); 12];
    for rec in rows {
        match (rec.month as usize).checked_sub(1).and_then(|i| months.get_mut(i)) {
            Some(slot) => slot.add(rec),
            None => log::warn!("Skipping {} with month {}", rec.date, rec.month),
        }
    }

    Chart::new(
        "Average Daily Rentals by User Type and Month",
        "Month",
        "Average Rentals",
        ChartBody::Lines(CategorySeries {
            categories: MONTH_NAMES.iter().map(|m| m.to_string()).collect(),
            series: user_type_series(&months),
            annotate_values: false,
        }),
    )
}
