pub mod connectors;
pub mod sequence;

pub use connectors::{SpinLogConnector, SpinLogMetadata};
pub use sequence::SpinSequence;
