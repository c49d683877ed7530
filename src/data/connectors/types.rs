use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Accepted spellings of the spin column header, checked in order
pub const SPIN_COLUMN_ALIASES: [&str; 5] = ["Number", "number", "NUMBER", "spin", "Spin"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpinLogMetadata {
    pub file_path: String,
    pub column: String,
    pub num_rows: usize,
    pub null_rows: usize,
    pub loaded_at: DateTime<Utc>,
}
