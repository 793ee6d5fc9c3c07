use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Pass/fail result of one check. Failure carries the message printed for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "message", rename_all = "snake_case")]
pub enum CheckOutcome {
    Passed,
    Failed(String),
}

impl CheckOutcome {
    pub fn is_passed(&self) -> bool {
        matches!(self, CheckOutcome::Passed)
    }
}

/// Rows exclude the header line; columns are the header field count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableShape {
    pub rows: usize,
    pub columns: usize,
}

impl fmt::Display for TableShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.rows, self.columns)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelingMetrics {
    pub train_size: usize,
    pub test_size: usize,
    pub accuracy: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckReport {
    pub name: String,
    pub outcome: CheckOutcome,
    /// Status lines exactly as printed to stdout.
    pub lines: Vec<String>,
    #[serde(with = "duration_millis")]
    pub elapsed: Duration,
}

impl CheckReport {
    pub fn passed(&self) -> bool {
        self.outcome.is_passed()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub reports: Vec<CheckReport>,
    pub all_passed: bool,
}

impl RunSummary {
    pub fn new(started_at: DateTime<Utc>, reports: Vec<CheckReport>) -> Self {
        let all_passed = reports.iter().all(CheckReport::passed);
        Self {
            started_at,
            reports,
            all_passed,
        }
    }

    pub fn failed_checks(&self) -> impl Iterator<Item = &str> {
        self.reports
            .iter()
            .filter(|r| !r.passed())
            .map(|r| r.name.as_str())
    }
}

mod duration_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_millis(u64::deserialize(d)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(name: &str, outcome: CheckOutcome) -> CheckReport {
        CheckReport {
            name: name.to_string(),
            outcome,
            lines: vec![],
            elapsed: Duration::from_millis(3),
        }
    }

    #[test]
    fn test_table_shape_display() {
        let shape = TableShape {
            rows: 151112,
            columns: 11,
        };
        assert_eq!(shape.to_string(), "(151112, 11)");
    }

    #[test]
    fn test_summary_is_logical_and() {
        let all_ok = RunSummary::new(
            Utc::now(),
            vec![
                report("Import Test", CheckOutcome::Passed),
                report("Data Loading Test", CheckOutcome::Passed),
            ],
        );
        assert!(all_ok.all_passed);
        assert_eq!(all_ok.failed_checks().count(), 0);

        let one_failed = RunSummary::new(
            Utc::now(),
            vec![
                report("Import Test", CheckOutcome::Passed),
                report("Data Loading Test", CheckOutcome::Failed("boom".into())),
            ],
        );
        assert!(!one_failed.all_passed);
        assert_eq!(
            one_failed.failed_checks().collect::<Vec<_>>(),
            vec!["Data Loading Test"]
        );
    }

    #[test]
    fn test_report_serializes_outcome_and_millis() {
        let json = serde_json::to_value(report("X", CheckOutcome::Failed("bad".into()))).unwrap();
        assert_eq!(json["outcome"]["status"], "failed");
        assert_eq!(json["outcome"]["message"], "bad");
        assert_eq!(json["elapsed"], 3);
    }
}
