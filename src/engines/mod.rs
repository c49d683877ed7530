pub mod analysis;
pub mod analyzer;
pub mod report;
pub mod simulation;

pub use analyzer::SpinAnalyzer;
pub use report::AnalysisReport;
