use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::charts::weekly::WEEKDAY_LABELS;
use crate::data::DayRecord;

const HEADERS: [&str; 13] = [
    "dteday",
    "year",
    "season",
    "weathersit",
    "holiday",
    "mnth",
    "weekday",
    "temp",
    "hum",
    "windspeed",
    "casual",
    "registered",
    "cnt",
];

/// One table row as display strings, in `HEADERS` order.
fn row_cells(rec: &DayRecord) -> [String; 13] {
    [
        rec.date.format("%Y-%m-%d").to_string(),
        rec.year.to_string(),
        rec.season.to_string(),
        rec.weather.to_string(),
        rec.is_holiday.to_string(),
        rec.month.to_string(),
        WEEKDAY_LABELS[rec.day_of_week as usize % 7].to_string(),
        format!("{:.4}", rec.temperature),
        format!("{:.4}", rec.humidity),
        format!("{:.4}", rec.windspeed),
        rec.casual.to_string(),
        rec.registered.to_string(),
        rec.total.to_string(),
    ]
}

/// Render the filtered rows as a striped, scrollable table.
pub fn raw_table(ui: &mut Ui, rows: &[DayRecord]) {
    if rows.is_empty() {
        ui.label("No rows match the selected filters.");
        return;
    }

    TableBuilder::new(ui)
        .id_salt("filtered_data")
        .striped(true)
        .resizable(true)
        .max_scroll_height(300.0)
        .columns(Column::auto().at_least(60.0), HEADERS.len())
        .header(20.0, |mut header| {
            for title in HEADERS {
                header.col(|ui: &mut Ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, rows.len(), |mut row| {
                let cells = row_cells(&rows[row.index()]);
                for cell in cells {
                    row.col(|ui: &mut Ui| {
                        ui.label(cell);
                    });
                }
            });
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::tests::records;

    #[test]
    fn test_row_cells() {
        let rows = records(&[("2011-01-08", 0, 1, 2, 68, 891)]);
        let cells = row_cells(&rows[0]);
        assert_eq!(cells[0], "2011-01-08");
        assert_eq!(cells[2], "Spring");
        assert_eq!(cells[3], "Mist");
        assert_eq!(cells[6], "Sat");
        assert_eq!(cells[12], "959");
    }
}
