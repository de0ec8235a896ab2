use std::path::Path;

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{
    DataType, Date32Type, Float32Type, Float64Type, Int16Type, Int32Type, Int64Type,
    Int8Type, UInt16Type, UInt32Type, UInt8Type,
};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::error::DataLoadError;
use super::model::{RawDayRow, RentalDataset, REQUIRED_COLUMNS};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the daily rental table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the standard day-table column names
/// * `.json`    – `[{ "dteday": "2011-01-01", "season": 1, ... }, ...]`
/// * `.parquet` – same columns, integer / float / string-or-date typed
pub fn load_file(path: &Path) -> Result<RentalDataset, DataLoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let rows = match ext.as_str() {
        "csv" => read_csv(path)?,
        "json" => read_json(path)?,
        "parquet" | "pq" => read_parquet(path)?,
        other => return Err(DataLoadError::UnsupportedFormat(other.to_string())),
    };

    RentalDataset::from_raw_rows(&rows)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn read_csv(path: &Path) -> Result<Vec<RawDayRow>, DataLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_path(path)?;
    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    for required in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == required) {
            return Err(DataLoadError::MissingColumn(required.to_string()));
        }
    }

    let mut rows = Vec::new();
    for result in reader.deserialize::<RawDayRow>() {
        rows.push(result?);
    }
    Ok(rows)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')` layout.
fn read_json(path: &Path) -> Result<Vec<RawDayRow>, DataLoadError> {
    let text = std::fs::read_to_string(path)?;
    let root: JsonValue = serde_json::from_str(&text)?;

    let records = match root {
        JsonValue::Array(records) => records,
        _ => {
            return Err(DataLoadError::InvalidValue {
                row: 0,
                column: "<root>",
                message: "expected top-level JSON array".to_string(),
            })
        }
    };

    records
        .into_iter()
        .enumerate()
        .map(|(i, rec)| {
            let obj = rec.as_object().ok_or_else(|| DataLoadError::InvalidValue {
                row: i,
                column: "<record>",
                message: "not a JSON object".to_string(),
            })?;
            if let Some(missing) = REQUIRED_COLUMNS.iter().find(|c| !obj.contains_key(**c)) {
                return Err(DataLoadError::MissingColumn(missing.to_string()));
            }
            Ok(serde_json::from_value(rec)?)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`); `dteday` may be a string, date or
/// timestamp column.
fn read_parquet(path: &Path) -> Result<Vec<RawDayRow>, DataLoadError> {
    let file = std::fs::File::open(path)?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;

    let mut rows = Vec::new();
    for batch_result in reader {
        let batch = batch_result?;
        rows.extend(batch_to_rows(&batch, rows.len())?);
    }
    Ok(rows)
}

fn batch_to_rows(batch: &RecordBatch, row_offset: usize) -> Result<Vec<RawDayRow>, DataLoadError> {
    let dates = date_column(batch, "dteday", row_offset)?;
    let season = int_column(batch, "season", row_offset)?;
    let yr = int_column(batch, "yr", row_offset)?;
    let mnth = int_column(batch, "mnth", row_offset)?;
    let holiday = int_column(batch, "holiday", row_offset)?;
    let weathersit = int_column(batch, "weathersit", row_offset)?;
    let temp = float_column(batch, "temp", row_offset)?;
    let hum = float_column(batch, "hum", row_offset)?;
    let windspeed = float_column(batch, "windspeed", row_offset)?;
    let casual = int_column(batch, "casual", row_offset)?;
    let registered = int_column(batch, "registered", row_offset)?;
    let cnt = int_column(batch, "cnt", row_offset)?;

    Ok((0..batch.num_rows())
        .map(|i| RawDayRow {
            dteday: dates[i].clone(),
            season: season[i],
            yr: yr[i],
            mnth: mnth[i],
            holiday: holiday[i],
            weathersit: weathersit[i],
            temp: temp[i],
            hum: hum[i],
            windspeed: windspeed[i],
            casual: casual[i],
            registered: registered[i],
            cnt: cnt[i],
        })
        .collect())
}

// -- Parquet / Arrow helpers --

fn column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a ArrayRef, DataLoadError> {
    let idx = batch
        .schema()
        .index_of(name)
        .map_err(|_| DataLoadError::MissingColumn(name.to_string()))?;
    Ok(batch.column(idx))
}

fn null_error(name: &str, row: usize) -> DataLoadError {
    DataLoadError::InvalidValue {
        row,
        column: required_name(name),
        message: "null value".to_string(),
    }
}

/// Map a column name back onto its `'static` spelling for error reporting.
fn required_name(name: &str) -> &'static str {
    REQUIRED_COLUMNS
        .iter()
        .find(|c| **c == name)
        .copied()
        .unwrap_or("<unknown>")
}

fn unsupported(name: &str, data_type: &DataType) -> DataLoadError {
    DataLoadError::UnsupportedColumnType {
        column: name.to_string(),
        data_type: format!("{data_type:?}"),
    }
}

fn int_column(batch: &RecordBatch, name: &str, row_offset: usize) -> Result<Vec<i64>, DataLoadError> {
    let col = column(batch, name)?;
    if let Some(row) = (0..col.len()).find(|&i| col.is_null(i)) {
        return Err(null_error(name, row_offset + row));
    }

    let values: Vec<i64> = match col.data_type() {
        DataType::Int8 => col.as_primitive::<Int8Type>().values().iter().map(|&v| v as i64).collect(),
        DataType::Int16 => col.as_primitive::<Int16Type>().values().iter().map(|&v| v as i64).collect(),
        DataType::Int32 => col.as_primitive::<Int32Type>().values().iter().map(|&v| v as i64).collect(),
        DataType::Int64 => col.as_primitive::<Int64Type>().values().to_vec(),
        DataType::UInt8 => col.as_primitive::<UInt8Type>().values().iter().map(|&v| v as i64).collect(),
        DataType::UInt16 => col.as_primitive::<UInt16Type>().values().iter().map(|&v| v as i64).collect(),
        DataType::UInt32 => col.as_primitive::<UInt32Type>().values().iter().map(|&v| v as i64).collect(),
        other => return Err(unsupported(name, other)),
    };
    Ok(values)
}

fn float_column(batch: &RecordBatch, name: &str, row_offset: usize) -> Result<Vec<f64>, DataLoadError> {
    let col = column(batch, name)?;
    if let Some(row) = (0..col.len()).find(|&i| col.is_null(i)) {
        return Err(null_error(name, row_offset + row));
    }

    let values: Vec<f64> = match col.data_type() {
        DataType::Float32 => col.as_primitive::<Float32Type>().values().iter().map(|&v| v as f64).collect(),
        DataType::Float64 => col.as_primitive::<Float64Type>().values().to_vec(),
        other => return Err(unsupported(name, other)),
    };
    Ok(values)
}

/// Dates come back as `YYYY-MM-DD` text so every format shares one parser.
fn date_column(batch: &RecordBatch, name: &str, row_offset: usize) -> Result<Vec<String>, DataLoadError> {
    let col = column(batch, name)?;
    if let Some(row) = (0..col.len()).find(|&i| col.is_null(i)) {
        return Err(null_error(name, row_offset + row));
    }

    let values: Vec<String> = match col.data_type() {
        DataType::Utf8 => {
            let s = col.as_string::<i32>();
            (0..s.len()).map(|i| s.value(i).to_string()).collect()
        }
        DataType::LargeUtf8 => {
            let s = col.as_string::<i64>();
            (0..s.len()).map(|i| s.value(i).to_string()).collect()
        }
        DataType::Date32 | DataType::Date64 | DataType::Timestamp(_, _) => {
            // Pandas stores parsed dates as nanosecond timestamps
            let days = cast(col, &DataType::Date32)?;
            let d = days.as_primitive::<Date32Type>();
            (0..d.len())
                .map(|i| {
                    d.value_as_date(i)
                        .map(|date| date.format("%Y-%m-%d").to_string())
                        .unwrap_or_default()
                })
                .collect()
        }
        other => return Err(unsupported(name, other)),
    };
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Arc;

    use arrow::array::{
        Date32Array, Float64Array, Int32Array, Int64Array, StringArray, TimestampNanosecondArray,
    };
    use arrow::datatypes::{Field, Schema, TimeUnit};
    use parquet::arrow::ArrowWriter;
    use tempfile::{Builder, NamedTempFile};

    const HEADER: &str = "instant,dteday,season,yr,mnth,holiday,weekday,workingday,weathersit,temp,atemp,hum,windspeed,casual,registered,cnt";

    fn temp_with_suffix(suffix: &str) -> NamedTempFile {
        Builder::new().suffix(suffix).tempfile().unwrap()
    }

    #[test]
    fn test_load_csv() {
        let mut file = temp_with_suffix(".csv");
        writeln!(file, "{HEADER}").unwrap();
        writeln!(file, "1,2011-01-01,1,0,1,0,6,0,2,0.344167,0.363625,0.805833,0.160446,331,654,985").unwrap();
        writeln!(file, "2,2011-01-02,1,0,1,0,0,0,2,0.363478,0.353739,0.696087,0.248539,131,670,801").unwrap();

        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].total, 985);
        assert_eq!(ds.records[1].weather.label(), "Mist");
        // 2011-01-02 was a Sunday
        assert_eq!(ds.records[1].day_of_week, 6);
    }

    #[test]
    fn test_csv_headers_with_padding() {
        let mut file = temp_with_suffix(".csv");
        writeln!(file, "dteday, season,yr,mnth,holiday,weathersit,temp,hum,windspeed,casual,registered, cnt").unwrap();
        writeln!(file, "2011-01-01,1,0,1,0,2,0.34,0.8,0.16,331,654,985").unwrap();

        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records[0].total, 985);
        assert_eq!(ds.records[0].season.label(), "Spring");
    }

    #[test]
    fn test_csv_missing_column() {
        let mut file = temp_with_suffix(".csv");
        writeln!(file, "dteday,season,yr,mnth,holiday,weathersit,temp,hum,windspeed,casual,registered").unwrap();
        writeln!(file, "2011-01-01,1,0,1,0,2,0.34,0.8,0.16,331,654").unwrap();

        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(err, DataLoadError::MissingColumn(ref c) if c == "cnt"));
    }

    #[test]
    fn test_csv_bad_date() {
        let mut file = temp_with_suffix(".csv");
        writeln!(file, "{HEADER}").unwrap();
        writeln!(file, "1,01/01/2011,1,0,1,0,6,0,2,0.34,0.36,0.8,0.16,331,654,985").unwrap();

        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(err, DataLoadError::InvalidDate { row: 0, .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = load_file(Path::new("/nonexistent/day.csv")).unwrap_err();
        assert!(matches!(err, DataLoadError::Csv(_)));
    }

    #[test]
    fn test_unsupported_extension() {
        let err = load_file(Path::new("day.xlsx")).unwrap_err();
        assert!(matches!(err, DataLoadError::UnsupportedFormat(ref e) if e == "xlsx"));
    }

    #[test]
    fn test_load_json_records() {
        let mut file = temp_with_suffix(".json");
        write!(
            file,
            r#"[{{"dteday":"2012-03-05","season":1,"yr":1,"mnth":3,"holiday":0,"weathersit":1,
                "temp":0.2,"hum":0.4,"windspeed":0.3,"casual":120,"registered":2000,"cnt":2120}}]"#
        )
        .unwrap();

        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records[0].year, 2012);
        assert_eq!(ds.records[0].day_of_week, 0);
    }

    /// One-row day table with `dteday` stored as `date` and 2294 rentals on a
    /// snowy holiday.
    fn write_parquet_day(file: &NamedTempFile, dteday: DataType, date: ArrayRef) {
        let schema = Arc::new(Schema::new(vec![
            Field::new("dteday", dteday, false),
            Field::new("season", DataType::Int64, false),
            Field::new("yr", DataType::Int64, false),
            Field::new("mnth", DataType::Int64, false),
            Field::new("holiday", DataType::Int64, false),
            Field::new("weathersit", DataType::Int32, false),
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
                date,
                Arc::new(Int64Array::from(vec![1])),
                Arc::new(Int64Array::from(vec![0])),
                Arc::new(Int64Array::from(vec![1])),
                Arc::new(Int64Array::from(vec![1])),
                Arc::new(Int32Array::from(vec![3])),
                Arc::new(Float64Array::from(vec![0.37])),
                Arc::new(Float64Array::from(vec![0.69])),
                Arc::new(Float64Array::from(vec![0.19])),
                Arc::new(Int64Array::from(vec![686])),
                Arc::new(Int64Array::from(vec![1608])),
                Arc::new(Int64Array::from(vec![2294])),
            ],
        )
        .unwrap();
        let mut writer = ArrowWriter::try_new(file.reopen().unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();
    }

    #[test]
    fn test_load_parquet_with_date_column() {
        let file = temp_with_suffix(".parquet");
        // 14975 days after the epoch is 2011-01-01
        write_parquet_day(&file, DataType::Date32, Arc::new(Date32Array::from(vec![14975])));

        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 1);
        let rec = ds.records[0];
        assert_eq!(rec.date.to_string(), "2011-01-01");
        assert_eq!(rec.year, 2011);
        assert!(rec.is_holiday);
        assert_eq!(rec.weather.label(), "Light Snow");
    }

    #[test]
    fn test_load_parquet_with_string_dates() {
        let file = temp_with_suffix(".parquet");
        write_parquet_day(&file, DataType::Utf8, Arc::new(StringArray::from(vec!["2011-01-01"])));

        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records[0].date.to_string(), "2011-01-01");
        assert_eq!(ds.records[0].total, 2294);
    }

    #[test]
    fn test_load_parquet_with_nanosecond_timestamps() {
        let file = temp_with_suffix(".parquet");
        // 2011-01-01T00:00:00 in nanoseconds since the epoch
        write_parquet_day(
            &file,
            DataType::Timestamp(TimeUnit::Nanosecond, None),
            Arc::new(TimestampNanosecondArray::from(vec![1_293_840_000_000_000_000])),
        );

        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 1);
        let rec = ds.records[0];
        assert_eq!(rec.date.to_string(), "2011-01-01");
        // 2011-01-01 was a Saturday
        assert_eq!(rec.day_of_week, 5);
    }

    #[test]
    fn test_parquet_rejects_unsupported_date_type() {
        let file = temp_with_suffix(".parquet");
        write_parquet_day(&file, DataType::Float64, Arc::new(Float64Array::from(vec![1.0])));

        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(err, DataLoadError::UnsupportedColumnType { ref column, .. } if column == "dteday"));
    }
}
