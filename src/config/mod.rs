pub mod toml_config;

use crate::core::data_loading::{default_tables, DataTable, DEFAULT_DATA_DIR};
use crate::core::modeling::ModelingParams;
use crate::utils::error::{CheckError, Result};
use crate::utils::validation::{
    validate_file_extensions, validate_open_range, validate_path, validate_positive_number,
    Validate,
};
#[cfg(feature = "cli")]
use clap::Parser;
use std::path::PathBuf;
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "setup-check")]
#[command(about = "Check that the modeling stack and the fraud datasets are ready")]
pub struct CliConfig {
    #[arg(long, help = "Directory holding the CSV files (default: data)")]
    pub data_dir: Option<String>,

    #[arg(long, help = "TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Seed for the synthetic modeling data")]
    pub seed: Option<u64>,

    #[arg(long, help = "Print the run summary as JSON")]
    pub json: bool,

    #[arg(long, help = "Exit with status 1 when a check fails")]
    pub strict: bool,

    #[arg(long, help = "Log elapsed time and memory after each check")]
    pub monitor: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

/// Effective settings: defaults, then the TOML file, then CLI flags.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub tables: Vec<DataTable>,
    pub modeling: ModelingParams,
    pub json: bool,
    pub strict: bool,
    pub monitor: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            tables: default_tables(),
            modeling: ModelingParams::default(),
            json: false,
            strict: false,
            monitor: false,
        }
    }
}

impl Settings {
    pub fn from_toml(config: &TomlConfig) -> Self {
        let mut settings = Self::default();
        settings.apply_toml(config);
        settings
    }

    fn apply_toml(&mut self, config: &TomlConfig) {
        if let Some(data) = &config.data {
            if let Some(dir) = &data.dir {
                self.data_dir = PathBuf::from(dir);
            }
            // 表格順序固定：Fraud、IP Country、Credit Card
            let overrides = [&data.fraud, &data.ip_country, &data.credit_card];
            for (table, file_name) in self.tables.iter_mut().zip(overrides) {
                if let Some(file_name) = file_name {
                    table.file_name = file_name.clone();
                }
            }
        }

        if let Some(modeling) = &config.modeling {
            let params = &mut self.modeling;
            params.seed = modeling.seed.unwrap_or(params.seed);
            params.n_samples = modeling.n_samples.unwrap_or(params.n_samples);
            params.n_features = modeling.n_features.unwrap_or(params.n_features);
            params.test_size = modeling.test_size.unwrap_or(params.test_size);
            params.n_trees = modeling.n_trees.unwrap_or(params.n_trees);
        }

        if let Some(output) = &config.output {
            self.json = output.json.unwrap_or(self.json);
            self.strict = output.strict.unwrap_or(self.strict);
            self.monitor = output.monitor.unwrap_or(self.monitor);
        }
    }

    #[cfg(feature = "cli")]
    pub fn resolve(cli: &CliConfig) -> Result<Self> {
        let mut settings = match &cli.config {
            Some(path) => {
                tracing::debug!("Loading config file {}", path.display());
                Self::from_toml(&TomlConfig::from_file(path)?)
            }
            None => Self::default(),
        };

        if let Some(dir) = &cli.data_dir {
            settings.data_dir = PathBuf::from(dir);
        }
        if let Some(seed) = cli.seed {
            settings.modeling.seed = seed;
        }
        settings.json |= cli.json;
        settings.strict |= cli.strict;
        settings.monitor |= cli.monitor;

        settings.validate()?;
        Ok(settings)
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_path("data.dir", &self.data_dir.to_string_lossy())?;

        let files: Vec<String> = self.tables.iter().map(|t| t.file_name.clone()).collect();
        for file in &files {
            validate_path("data.files", file)?;
        }
        validate_file_extensions("data.files", &files, &["csv"])?;

        let params = &self.modeling;
        validate_positive_number("modeling.n_samples", params.n_samples, 10)?;
        validate_positive_number("modeling.n_features", params.n_features, 1)?;
        validate_positive_number("modeling.n_trees", params.n_trees as usize, 1)?;
        validate_open_range("modeling.test_size", params.test_size, 0.0, 1.0)?;

        // 兩邊切分都至少要有一筆
        let n_test = (params.n_samples as f32 * params.test_size) as usize;
        if n_test == 0 || n_test >= params.n_samples {
            return Err(CheckError::InvalidConfigValueError {
                field: "modeling.test_size".to_string(),
                value: params.test_size.to_string(),
                reason: format!(
                    "leaves an empty split for {} samples",
                    params.n_samples
                ),
            });
        }

        Ok(())
    }
}
