//! CSV Data Loader Module
//! Handles CSV file loading and conversion into typed records using Polars.

use crate::data::record::{FieldValue, Record};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV '{path}': {source}")]
    CsvError {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },
    #[error("Failed to convert column '{column}': {source}")]
    ColumnError {
        column: String,
        #[source]
        source: PolarsError,
    },
    #[error("No data loaded")]
    NoData,
}

/// Handles CSV file loading with Polars.
pub struct DataLoader {
    df: Option<DataFrame>,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DataLoader {
    pub fn new() -> Self {
        Self { df: None }
    }

    /// Load a CSV file using Polars. Unparseable cells become nulls.
    pub fn load_csv(&mut self, file_path: &Path) -> Result<&DataFrame, LoaderError> {
        let csv_error = |source| LoaderError::CsvError {
            path: file_path.to_path_buf(),
            source,
        };

        let df = LazyCsvReader::new(file_path)
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .finish()
            .map_err(csv_error)?
            .collect()
            .map_err(csv_error)?;

        tracing::debug!(
            "Read {} rows x {} columns from {}",
            df.height(),
            df.width(),
            file_path.display()
        );

        self.df = Some(df);
        self.df.as_ref().ok_or(LoaderError::NoData)
    }

    /// Get list of column names from loaded DataFrame.
    pub fn get_columns(&self) -> Vec<String> {
        self.df
            .as_ref()
            .map(|df| {
                df.get_column_names()
                    .iter()
                    .map(|s| s.to_string())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Get the number of rows in the DataFrame.
    pub fn get_row_count(&self) -> usize {
        self.df.as_ref().map(|df| df.height()).unwrap_or(0)
    }

    /// Convert the loaded DataFrame into records, preserving row order.
    pub fn records(&self) -> Result<Vec<Record>, LoaderError> {
        let df = self.df.as_ref().ok_or(LoaderError::NoData)?;
        dataframe_to_records(df)
    }
}

/// Load a CSV file straight into records. Used by the background loaders.
pub fn load_records(path: &Path) -> Result<Vec<Record>, LoaderError> {
    let mut loader = DataLoader::new();
    loader.load_csv(path)?;
    let records = loader.records()?;
    tracing::info!(
        "Loaded {} records ({} columns) from {}",
        loader.get_row_count(),
        loader.get_columns().len(),
        path.display()
    );
    Ok(records)
}

fn is_numeric(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Float32
            | DataType::Float64
            | DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
    )
}

/// Numeric columns become `Number`, string columns `Text`, nulls and
/// anything else `Missing`.
pub fn dataframe_to_records(df: &DataFrame) -> Result<Vec<Record>, LoaderError> {
    let mut records = vec![Record::new(); df.height()];

    for column in df.get_columns() {
        let name = column.name().to_string();
        let series = column.as_materialized_series();
        let column_error = |source| LoaderError::ColumnError {
            column: name.clone(),
            source,
        };

        match series.dtype() {
            DataType::String => {
                let ca = series.str().map_err(column_error)?;
                for (record, value) in records.iter_mut().zip(ca.into_iter()) {
                    let value = match value {
                        Some(s) => FieldValue::Text(s.trim().to_string()),
                        None => FieldValue::Missing,
                    };
                    record.insert(&name, value);
                }
            }
            dtype if is_numeric(dtype) => {
                let cast = series.cast(&DataType::Float64).map_err(column_error)?;
                let ca = cast.f64().map_err(column_error)?;
                for (record, value) in records.iter_mut().zip(ca.into_iter()) {
                    let value = value.map(FieldValue::Number).unwrap_or(FieldValue::Missing);
                    record.insert(&name, value);
                }
            }
            _ => {
                for record in records.iter_mut() {
                    record.insert(&name, FieldValue::Missing);
                }
            }
        }
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".csv")
            .tempfile()
            .expect("failed creating temp csv");
        file.write_all(body.as_bytes()).expect("failed writing temp csv");
        file
    }

    #[test]
    fn test_load_records_types_columns() {
        let file = write_csv(
            "region,decade,\"average_value_School enrollment, secondary, female (% net)\"\n\
             South Asia,2000,40.5\n\
             North America,2010,\n",
        );

        let records = load_records(file.path()).expect("csv should load");
        assert_eq!(records.len(), 2);

        let first = &records[0];
        assert_eq!(first.text("region"), Some("South Asia"));
        assert_eq!(first.number("decade"), Some(2000.0));
        assert_eq!(
            first.number("average_value_School enrollment, secondary, female (% net)"),
            Some(40.5)
        );

        let second = &records[1];
        assert_eq!(
            second.number("average_value_School enrollment, secondary, female (% net)"),
            None
        );
    }

    #[test]
    fn test_loader_reports_columns_and_rows() {
        let file = write_csv("a,b\n1,x\n2,y\n3,z\n");
        let mut loader = DataLoader::new();
        loader.load_csv(file.path()).expect("csv should load");

        assert_eq!(loader.get_row_count(), 3);
        assert_eq!(loader.get_columns(), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_records_without_load_is_no_data() {
        let loader = DataLoader::new();
        assert!(matches!(loader.records(), Err(LoaderError::NoData)));
    }

    #[test]
    fn test_missing_file_is_error() {
        let result = load_records(Path::new("definitely/not/here.csv"));
        assert!(result.is_err());
    }
}
