pub mod traits;
pub mod analysis;
pub mod wager;
pub mod groups;
pub mod manager;

pub use manager::{ConfigManager, AppConfig};
pub use analysis::AnalysisConfig;
pub use wager::WagerConfig;
pub use groups::GroupsConfig;
