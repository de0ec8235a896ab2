use std::collections::BTreeSet;
use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::error::DataLoadError;

// ---------------------------------------------------------------------------
// Season / Weather – categorical labels derived from coded columns
// ---------------------------------------------------------------------------

/// Meteorological season, decoded from the 1..=4 `season` column.
/// Variant order is the display order used by the charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    pub const ALL: [Season; 4] = [Season::Spring, Season::Summer, Season::Fall, Season::Winter];

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Season::Spring),
            2 => Some(Season::Summer),
            3 => Some(Season::Fall),
            4 => Some(Season::Winter),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Fall => "Fall",
            Season::Winter => "Winter",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Weather situation, decoded from the 1..=4 `weathersit` column.
/// Higher codes denote worse weather.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Weather {
    Clear,
    Mist,
    LightSnow,
    HeavyRain,
}

impl Weather {
    pub const ALL: [Weather; 4] = [
        Weather::Clear,
        Weather::Mist,
        Weather::LightSnow,
        Weather::HeavyRain,
    ];

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Weather::Clear),
            2 => Some(Weather::Mist),
            3 => Some(Weather::LightSnow),
            4 => Some(Weather::HeavyRain),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Weather::Clear => "Clear",
            Weather::Mist => "Mist",
            Weather::LightSnow => "Light Snow",
            Weather::HeavyRain => "Heavy Rain, Snow-Fog",
        }
    }
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Map the binary `yr` code onto a calendar year.
pub fn year_from_code(code: i64) -> i32 {
    if code == 0 {
        2011
    } else {
        2012
    }
}

// ---------------------------------------------------------------------------
// RawDayRow – one row exactly as it appears in the source file
// ---------------------------------------------------------------------------

/// Column names every source file must provide.
pub const REQUIRED_COLUMNS: [&str; 12] = [
    "dteday",
    "season",
    "yr",
    "mnth",
    "holiday",
    "weathersit",
    "temp",
    "hum",
    "windspeed",
    "casual",
    "registered",
    "cnt",
];

/// Undecoded daily row. Extra source columns (`instant`, `atemp`, …) are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDayRow {
    pub dteday: String,
    pub season: i64,
    pub yr: i64,
    pub mnth: i64,
    pub holiday: i64,
    pub weathersit: i64,
    pub temp: f64,
    pub hum: f64,
    pub windspeed: f64,
    pub casual: i64,
    pub registered: i64,
    pub cnt: i64,
}

// ---------------------------------------------------------------------------
// DayRecord – one decoded row of the rental table
// ---------------------------------------------------------------------------

/// A single day of rentals with derived labels populated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayRecord {
    pub date: NaiveDate,
    pub year: i32,
    pub season: Season,
    pub weather: Weather,
    pub is_holiday: bool,
    /// Calendar month, 1..=12.
    pub month: u32,
    /// 0 = Monday .. 6 = Sunday.
    pub day_of_week: u32,
    pub temperature: f64,
    pub humidity: f64,
    pub windspeed: f64,
    pub casual: u32,
    pub registered: u32,
    pub total: u32,
}

impl DayRecord {
    /// Decode a raw row. `row` is the zero-based data row used in error messages.
    pub fn from_raw(raw: &RawDayRow, row: usize) -> Result<Self, DataLoadError> {
        let date = NaiveDate::parse_from_str(raw.dteday.trim(), "%Y-%m-%d").map_err(|_| {
            DataLoadError::InvalidDate {
                row,
                value: raw.dteday.clone(),
            }
        })?;

        let season = Season::from_code(raw.season)
            .ok_or_else(|| invalid(row, "season", format!("unknown season code {}", raw.season)))?;
        let weather = Weather::from_code(raw.weathersit).ok_or_else(|| {
            invalid(row, "weathersit", format!("unknown weather code {}", raw.weathersit))
        })?;

        if !(1..=12).contains(&raw.mnth) {
            return Err(invalid(row, "mnth", format!("month {} out of range", raw.mnth)));
        }
        let is_holiday = match raw.holiday {
            0 => false,
            1 => true,
            other => return Err(invalid(row, "holiday", format!("expected 0 or 1, got {other}"))),
        };

        let casual = count(raw.casual, row, "casual")?;
        let registered = count(raw.registered, row, "registered")?;
        let total = count(raw.cnt, row, "cnt")?;
        if casual as u64 + registered as u64 != total as u64 {
            return Err(invalid(
                row,
                "cnt",
                format!("{casual} casual + {registered} registered != {total}"),
            ));
        }

        Ok(DayRecord {
            date,
            year: year_from_code(raw.yr),
            season,
            weather,
            is_holiday,
            month: raw.mnth as u32,
            day_of_week: date.weekday().num_days_from_monday(),
            temperature: raw.temp,
            humidity: raw.hum,
            windspeed: raw.windspeed,
            casual,
            registered,
            total,
        })
    }
}

fn invalid(row: usize, column: &'static str, message: String) -> DataLoadError {
    DataLoadError::InvalidValue {
        row,
        column,
        message,
    }
}

fn count(value: i64, row: usize, column: &'static str) -> Result<u32, DataLoadError> {
    u32::try_from(value).map_err(|_| invalid(row, column, format!("{value} is not a valid count")))
}

// ---------------------------------------------------------------------------
// RentalDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full decoded dataset with the filter options pre-computed.
#[derive(Debug, Clone, Default)]
pub struct RentalDataset {
    /// All records, in source order.
    pub records: Vec<DayRecord>,
    pub years: BTreeSet<i32>,
    pub weathers: BTreeSet<Weather>,
    pub seasons: BTreeSet<Season>,
}

impl RentalDataset {
    /// Decode every raw row; the first bad row aborts the whole load.
    pub fn from_raw_rows(rows: &[RawDayRow]) -> Result<Self, DataLoadError> {
        let records = rows
            .iter()
            .enumerate()
            .map(|(i, raw)| DayRecord::from_raw(raw, i))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_records(records))
    }

    pub fn from_records(records: Vec<DayRecord>) -> Self {
        let years = records.iter().map(|r| r.year).collect();
        let weathers = records.iter().map(|r| r.weather).collect();
        let seasons = records.iter().map(|r| r.season).collect();
        RentalDataset {
            records,
            years,
            weathers,
            seasons,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
