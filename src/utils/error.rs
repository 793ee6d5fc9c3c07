use thiserror::Error;

#[derive(Error, Debug)]
pub enum CheckError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("{name}: {message}")]
    ComponentError { name: String, message: String },

    #[error("No columns to parse from file: {path}")]
    EmptyTableError { path: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("Model error: {message}")]
    ModelError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl CheckError {
    /// 設定錯誤會在執行檢查前中止程式
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            CheckError::ConfigError { .. } | CheckError::InvalidConfigValueError { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, CheckError>;
