pub mod data_loading;
pub mod imports;
pub mod modeling;
pub mod runner;

pub use crate::domain::model::{CheckOutcome, CheckReport, ModelingMetrics, RunSummary, TableShape};
pub use crate::domain::ports::Check;
pub use crate::utils::error::Result;
