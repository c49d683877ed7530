mod csv;
mod types;
mod validator;

pub use csv::SpinLogConnector;
pub use types::{SpinLogMetadata, SPIN_COLUMN_ALIASES};
pub use validator::SpinLogValidator;
