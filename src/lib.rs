pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::{toml_config::TomlConfig, Settings};

pub use crate::core::data_loading::{load_table_shape, DataLoadingCheck, DataTable};
pub use crate::core::imports::{default_components, Component, ImportCheck};
pub use crate::core::modeling::{run_basic_model, ModelingCheck, ModelingParams};
pub use crate::core::runner::{default_checks, CheckRunner};
pub use crate::domain::model::{CheckOutcome, CheckReport, ModelingMetrics, RunSummary, TableShape};
pub use crate::domain::ports::Check;
pub use crate::utils::error::{CheckError, Result};
