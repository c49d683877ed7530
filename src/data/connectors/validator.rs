use super::types::SPIN_COLUMN_ALIASES;
use crate::error::{Result, SpinbiasError};
use polars::prelude::*;

pub struct SpinLogValidator;

impl SpinLogValidator {
    /// Locate the spin column and check that it is numeric.
    pub fn validate(df: &DataFrame) -> Result<String> {
        let column = Self::find_column(df).ok_or_else(|| {
            SpinbiasError::DataLoading(format!(
                "Missing spin column (tried aliases: {:?})",
                SPIN_COLUMN_ALIASES
            ))
        })?;

        let series = df.column(column)?;
        if !matches!(
            series.dtype(),
            DataType::Int64
                | DataType::Int32
                | DataType::Int16
                | DataType::Int8
                | DataType::UInt64
                | DataType::UInt32
                | DataType::UInt16
                | DataType::UInt8
                | DataType::Float64
                | DataType::Float32
        ) {
            return Err(SpinbiasError::DataLoading(format!(
                "Column '{}' must be numeric, found {:?}",
                column,
                series.dtype()
            )));
        }

        Ok(column.to_string())
    }

    fn find_column(df: &DataFrame) -> Option<&'static str> {
        let columns = df.get_column_names();
        SPIN_COLUMN_ALIASES
            .iter()
            .find(|alias| columns.iter().any(|col| col.as_str() == **alias))
            .copied()
    }

    pub fn null_count(df: &DataFrame, column: &str) -> Result<usize> {
        Ok(df.column(column)?.null_count())
    }
}
