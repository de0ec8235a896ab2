use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use bike_dashboard::data::model::RawDayRow;
use chrono::{Datelike, NaiveDate};
use parquet::arrow::ArrowWriter;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Box-Muller transform for normal distribution
fn gauss(rng: &mut StdRng, mean: f64, std_dev: f64) -> f64 {
    let u1 = rng.gen::<f64>().max(1e-15);
    let u2 = rng.gen::<f64>();
    let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
    mean + std_dev * z
}

/// Season code from the calendar: winter solstice → spring equinox is code 1.
fn season_code(date: NaiveDate) -> i64 {
    let md = date.month() * 100 + date.day();
    match md {
        321..=620 => 2,
        621..=922 => 3,
        923..=1220 => 4,
        _ => 1,
    }
}

fn generate_day(date: NaiveDate, rng: &mut StdRng) -> RawDayRow {
    let yr = (date.year() - 2011) as i64;
    let doy = date.ordinal() as f64;

    // Warmest around day 200
    let temp = (0.5 - 0.3 * ((doy - 15.0) / 365.0 * 2.0 * std::f64::consts::PI).cos()
        + gauss(rng, 0.0, 0.05))
    .clamp(0.05, 0.95);
    let hum = gauss(rng, 0.62, 0.14).clamp(0.1, 0.97);
    let windspeed = gauss(rng, 0.19, 0.07).clamp(0.02, 0.5);

    let roll: f64 = rng.gen();
    let weathersit = if roll < 0.63 {
        1
    } else if roll < 0.94 {
        2
    } else if roll < 0.995 {
        3
    } else {
        4
    };
    let holiday = i64::from(rng.gen_bool(0.03));
    let weekend = date.weekday().num_days_from_monday() >= 5;

    let weather_factor = [1.0, 0.85, 0.45, 0.2][weathersit as usize - 1];
    let growth = if yr == 0 { 1.0 } else { 1.6 };
    let base = 1500.0 + 5000.0 * temp - 1500.0 * (hum - 0.6).max(0.0) - 2000.0 * windspeed;

    let casual_share = if weekend || holiday == 1 { 0.35 } else { 0.12 };
    let total = (base * weather_factor * growth + gauss(rng, 0.0, 250.0)).max(20.0);
    let casual = (total * casual_share).round() as i64;
    let registered = total.round() as i64 - casual;

    RawDayRow {
        dteday: date.format("%Y-%m-%d").to_string(),
        season: season_code(date),
        yr,
        mnth: date.month() as i64,
        holiday,
        weathersit,
        temp,
        hum,
        windspeed,
        casual,
        registered,
        cnt: casual + registered,
    }
}

fn write_csv(rows: &[RawDayRow], path: &str) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(rows: &[RawDayRow], path: &str) -> Result<()> {
    let ints = |f: fn(&RawDayRow) -> i64| -> ArrayRef {
        Arc::new(Int64Array::from(rows.iter().map(f).collect::<Vec<_>>()))
    };
    let floats = |f: fn(&RawDayRow) -> f64| -> ArrayRef {
        Arc::new(Float64Array::from(rows.iter().map(f).collect::<Vec<_>>()))
    };

    let schema = Arc::new(Schema::new(vec![
        Field::new("dteday", DataType::Utf8, false),
        Field::new("season", DataType::Int64, false),
        Field::new("yr", DataType::Int64, false),
        Field::new("mnth", DataType::Int64, false),
        Field::new("holiday", DataType::Int64, false),
        Field::new("weathersit", DataType::Int64, false),
        Field::new("temp", DataType::Float64, false),
        Field::new("hum", DataType::Float64, false),
        Field::new("windspeed", DataType::Float64, false),
        Field::new("casual", DataType::Int64, false),
        Field::new("registered", DataType::Int64, false),
        Field::new("cnt", DataType::Int64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from(
                rows.iter().map(|r| r.dteday.as_str()).collect::<Vec<_>>(),
            )) as ArrayRef,
            ints(|r| r.season),
            ints(|r| r.yr),
            ints(|r| r.mnth),
            ints(|r| r.holiday),
            ints(|r| r.weathersit),
            floats(|r| r.temp),
            floats(|r| r.hum),
            floats(|r| r.windspeed),
            ints(|r| r.casual),
            ints(|r| r.registered),
            ints(|r| r.cnt),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = StdRng::seed_from_u64(42);

    let start = NaiveDate::from_ymd_opt(2011, 1, 1).context("invalid start date")?;
    let end = NaiveDate::from_ymd_opt(2012, 12, 31).context("invalid end date")?;
    let rows: Vec<RawDayRow> = start
        .iter_days()
        .take_while(|d| *d <= end)
        .map(|d| generate_day(d, &mut rng))
        .collect();

    write_csv(&rows, "sample_day.csv")?;
    write_parquet(&rows, "sample_day.parquet")?;

    println!(
        "Wrote {} daily records to sample_day.csv and sample_day.parquet",
        rows.len()
    );
    Ok(())
}
