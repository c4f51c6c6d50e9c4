//! Flat CSV persistence for sleep tables.

use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

use chrono::{DateTime, Utc};
use polars::prelude::{
    Column, CsvReadOptions, CsvWriter, DataFrame, DataType, IntoColumn, NamedFrom, SerReader,
    SerWriter, Series,
};
use tracing::debug;

use somno_model::{Biosignal, Result, SignalValues, SleepError, SleepTable, TimezoneSpec};

const TIME_COLUMN: &str = "time";

/// Write `table` as CSV with the `time` column as row key.
///
/// Times are rendered in the table's display timezone; integer columns
/// stay integers and missing cells stay empty. Saving the same in-memory
/// table twice produces byte-identical files.
pub fn save_sleep_data(path: &Path, table: &SleepTable) -> Result<()> {
    let mut df = to_data_frame(table)?;
    let mut file = File::create(path).map_err(|source| SleepError::FileWrite {
        path: path.to_path_buf(),
        source,
    })?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df)
        .map_err(|error| SleepError::Table {
            message: error.to_string(),
        })?;
    debug!(path = %path.display(), rows = table.height(), "saved sleep data");
    Ok(())
}

/// Read a table previously written by [`save_sleep_data`].
///
/// Column types are restored from the file: integer-typed columns come
/// back as integers, interpolated columns as floats. The timezone is a
/// caller-supplied rendering choice, as everywhere else.
pub fn load_sleep_data(path: &Path, timezone: TimezoneSpec) -> Result<SleepTable> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|error| parse_error(path, error.to_string()))?
        .finish()
        .map_err(|error| parse_error(path, error.to_string()))?;
    from_data_frame(&df, path, timezone)
}

fn to_data_frame(table: &SleepTable) -> Result<DataFrame> {
    let times: Vec<String> = table
        .times()
        .iter()
        .map(|time| table.timezone().format_rfc3339(*time))
        .collect();
    let mut columns: Vec<Column> = Vec::with_capacity(table.width() + 1);
    columns.push(Series::new(TIME_COLUMN.into(), times).into_column());
    for (signal, values) in table.columns() {
        let column = match values {
            SignalValues::Int(cells) => {
                Series::new(signal.column_name().into(), cells.clone()).into_column()
            }
            SignalValues::Float(cells) => {
                Series::new(signal.column_name().into(), cells.clone()).into_column()
            }
        };
        columns.push(column);
    }
    DataFrame::new(columns).map_err(|error| SleepError::Table {
        message: error.to_string(),
    })
}

fn from_data_frame(df: &DataFrame, path: &Path, timezone: TimezoneSpec) -> Result<SleepTable> {
    let time_column = df
        .column(TIME_COLUMN)
        .map_err(|_| parse_error(path, format!("missing '{TIME_COLUMN}' column")))?;
    let time_ca = time_column
        .str()
        .map_err(|error| parse_error(path, error.to_string()))?;

    let mut times: Vec<DateTime<Utc>> = Vec::with_capacity(df.height());
    for value in time_ca {
        let text = value.ok_or_else(|| parse_error(path, "empty time cell".to_string()))?;
        let parsed = DateTime::parse_from_rfc3339(text)
            .map_err(|error| parse_error(path, format!("bad timestamp '{text}': {error}")))?;
        times.push(parsed.with_timezone(&Utc));
    }

    let mut columns: BTreeMap<Biosignal, SignalValues> = BTreeMap::new();
    for column in df.get_columns() {
        let name = column.name().as_str();
        if name == TIME_COLUMN {
            continue;
        }
        let signal = Biosignal::from_name(name)
            .map_err(|_| parse_error(path, format!("unknown column '{name}'")))?;
        let values = read_signal_column(column, name, path)?;
        columns.insert(signal, values);
    }
    SleepTable::from_columns(timezone, times, columns)
}

fn read_signal_column(column: &Column, name: &str, path: &Path) -> Result<SignalValues> {
    match column.dtype() {
        DataType::Int64 => Ok(SignalValues::Int(
            column
                .i64()
                .map_err(|error| parse_error(path, error.to_string()))?
                .into_iter()
                .collect(),
        )),
        DataType::Float64 => Ok(SignalValues::Float(
            column
                .f64()
                .map_err(|error| parse_error(path, error.to_string()))?
                .into_iter()
                .collect(),
        )),
        // A column with no values at all reads back as all-null.
        DataType::Null => Ok(SignalValues::Int(vec![None; column.len()])),
        DataType::String => {
            let ca = column
                .str()
                .map_err(|error| parse_error(path, error.to_string()))?;
            if ca.into_iter().any(|cell| cell.is_some()) {
                return Err(parse_error(
                    path,
                    format!("non-numeric values in column '{name}'"),
                ));
            }
            Ok(SignalValues::Int(vec![None; column.len()]))
        }
        other => Err(parse_error(
            path,
            format!("unsupported dtype {other:?} in column '{name}'"),
        )),
    }
}

fn parse_error(path: &Path, message: String) -> SleepError {
    SleepError::Parse {
        path: path.to_path_buf(),
        message,
    }
}
