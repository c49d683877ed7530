pub mod bet;
pub mod metrics;
pub mod wager;

pub use bet::{BetPhase, BetState};
pub use metrics::WagerMetrics;
pub use wager::{simulate_wager, WagerSimulator};
