use super::{types::SpinLogMetadata, validator::SpinLogValidator};
use crate::data::SpinSequence;
use crate::error::{Result, SpinbiasError};
use crate::types::InvalidSymbolPolicy;
use polars::prelude::*;
use std::path::Path;

// Largest magnitude a float column can carry as an exact integer.
const MAX_EXACT_FLOAT: f64 = 9_007_199_254_740_992.0;

/// Reads spin logs written by the recording front ends: a CSV with one
/// `Number` column, one row per spin, oldest first.
pub struct SpinLogConnector;

impl SpinLogConnector {
    /// Load CSV file into DataFrame
    pub fn load<P: AsRef<Path>>(path: P) -> Result<DataFrame> {
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .try_into_reader_with_file_path(Some(path.as_ref().to_path_buf()))?
            .finish()
            .map_err(|e| SpinbiasError::DataLoading(format!("Failed to read CSV: {}", e)))?;

        Ok(df)
    }

    /// Raw spin values in file order; null cells are dropped.
    ///
    /// Float cells that are not whole numbers never become spins: they are
    /// rejected or skipped under `policy`, with `index` counted over the
    /// non-null cells as `SpinSequence::from_raw` counts them.
    pub fn load_raw<P: AsRef<Path>>(
        path: P,
        policy: InvalidSymbolPolicy,
    ) -> Result<(Vec<i64>, SpinLogMetadata)> {
        let df = Self::load(&path)?;
        let column = SpinLogValidator::validate(&df)?;

        let null_rows = SpinLogValidator::null_count(&df, &column)?;
        if null_rows > 0 {
            log::warn!("Dropping {} empty rows from '{}'", null_rows, column);
        }

        let values = df.column(&column)?;
        let raw = if values.dtype().is_float() {
            Self::whole_numbers(values, policy)?
        } else {
            let values = values.strict_cast(&DataType::Int64)?;
            values.i64()?.into_iter().flatten().collect()
        };

        let metadata = SpinLogMetadata {
            file_path: path.as_ref().to_string_lossy().to_string(),
            column,
            num_rows: df.height(),
            null_rows,
            loaded_at: chrono::Utc::now(),
        };

        Ok((raw, metadata))
    }

    fn whole_numbers(values: &Column, policy: InvalidSymbolPolicy) -> Result<Vec<i64>> {
        let values = values.cast(&DataType::Float64)?;
        let mut raw = Vec::with_capacity(values.len());
        let mut skipped = 0;

        for (index, value) in values.f64()?.into_iter().flatten().enumerate() {
            if value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_EXACT_FLOAT {
                raw.push(value as i64);
                continue;
            }
            match policy {
                InvalidSymbolPolicy::Reject => {
                    return Err(SpinbiasError::Data {
                        index,
                        value: value as i64,
                    });
                }
                InvalidSymbolPolicy::Skip => skipped += 1,
            }
        }

        if skipped > 0 {
            log::warn!("Skipped {} spins that are not whole numbers", skipped);
        }

        Ok(raw)
    }

    pub fn load_sequence<P: AsRef<Path>>(
        path: P,
        policy: InvalidSymbolPolicy,
    ) -> Result<(SpinSequence, SpinLogMetadata)> {
        let (raw, metadata) = Self::load_raw(path, policy)?;
        let sequence = SpinSequence::from_raw(&raw, policy)?;

        log::info!(
            "Loaded {} spins from {}",
            sequence.len(),
            metadata.file_path
        );

        Ok((sequence, metadata))
    }
}
