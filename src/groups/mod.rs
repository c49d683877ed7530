pub mod presets;
pub mod registry;

pub use presets::{Color, Sector, EUROPEAN_WHEEL};
pub use registry::{GroupRegistry, SharedRegistry};
