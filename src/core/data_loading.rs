use crate::domain::model::TableShape;
use crate::domain::ports::Check;
use crate::utils::error::{CheckError, Result};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataTable {
    pub label: String,
    pub file_name: String,
}

impl DataTable {
    pub fn new(label: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            file_name: file_name.into(),
        }
    }
}

pub const DEFAULT_DATA_DIR: &str = "data";

pub fn default_tables() -> Vec<DataTable> {
    vec![
        DataTable::new("Fraud Data", "Fraud_Data.csv"),
        DataTable::new("IP Country Data", "IpAddress_to_Country.csv"),
        DataTable::new("Credit Card Data", "creditcard.csv"),
    ]
}

/// Reads a CSV file with a header line and returns its shape.
///
/// Records shorter than the header are accepted (missing trailing values).
/// When the first record has exactly one field more than the header, that
/// leading field is a row index and does not count as a column. Any record
/// wider than that is a parse error, as is text that is not valid UTF-8.
pub fn load_table_shape(path: &Path) -> Result<TableShape> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;

    let columns = reader.headers()?.len();
    if columns == 0 {
        return Err(CheckError::EmptyTableError {
            path: path.display().to_string(),
        });
    }

    let mut record = csv::StringRecord::new();
    let mut rows = 0;
    let mut max_fields = columns;
    while reader.read_record(&mut record)? {
        if rows == 0 && record.len() == columns + 1 {
            tracing::debug!("{}: first field is a row index", path.display());
            max_fields = columns + 1;
        }
        rows += 1;
        if record.len() > max_fields {
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            return Err(CheckError::ProcessingError {
                message: format!(
                    "Error tokenizing {}: expected {} fields in line {}, saw {}",
                    path.display(),
                    max_fields,
                    line,
                    record.len()
                ),
            });
        }
    }

    Ok(TableShape { rows, columns })
}

#[derive(Debug, Clone)]
pub struct DataLoadingCheck {
    data_dir: PathBuf,
    tables: Vec<DataTable>,
}

impl DataLoadingCheck {
    pub fn new(data_dir: impl Into<PathBuf>, tables: Vec<DataTable>) -> Self {
        Self {
            data_dir: data_dir.into(),
            tables,
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Loads every table; stops at the first one that fails.
    pub fn load_all(&self) -> Result<Vec<(&DataTable, TableShape)>> {
        let mut shapes = Vec::with_capacity(self.tables.len());
        for table in &self.tables {
            let path = self.data_dir.join(&table.file_name);
            tracing::debug!("Loading {}", path.display());
            let shape = load_table_shape(&path)?;
            tracing::debug!("{} -> {}", table.label, shape);
            shapes.push((table, shape));
        }
        Ok(shapes)
    }
}

impl Default for DataLoadingCheck {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_DIR, default_tables())
    }
}

impl Check for DataLoadingCheck {
    fn name(&self) -> &str {
        "Data Loading Test"
    }

    fn failure_label(&self) -> &str {
        "Data loading error"
    }

    fn run(&self) -> Result<Vec<String>> {
        // 全部載入成功後才輸出各表的形狀
        let shapes = self.load_all()?;

        let mut lines = vec!["✅ Data loading successful!".to_string()];
        lines.extend(
            shapes
                .iter()
                .map(|(table, shape)| format!("   - {}: {}", table.label, shape)),
        );
        Ok(lines)
    }
}
