//! Component probes for the libraries the modeling workflow links against.
//!
//! A Rust binary cannot be missing a library at runtime, so "importable"
//! means the component answers one minimal call with the expected result.

use crate::domain::ports::Check;
use crate::utils::error::{CheckError, Result};
use anyhow::{ensure, Context};
use rand::{rngs::StdRng, Rng, SeedableRng};
use smartcore::api::{Transformer, UnsupervisedEstimator};
use smartcore::ensemble::random_forest_classifier::{
    RandomForestClassifier, RandomForestClassifierParameters,
};
use smartcore::linalg::basic::arrays::{Array, Array2};
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::linear::logistic_regression::{LogisticRegression, LogisticRegressionParameters};
use smartcore::metrics::{accuracy, f1, precision, recall};
use smartcore::model_selection::train_test_split;
use smartcore::preprocessing::numerical::{StandardScaler, StandardScalerParameters};

pub type Probe = fn() -> anyhow::Result<()>;

#[derive(Clone, Copy)]
pub struct Component {
    pub name: &'static str,
    pub probe: Probe,
}

impl Component {
    pub const fn new(name: &'static str, probe: Probe) -> Self {
        Self { name, probe }
    }
}

impl std::fmt::Debug for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Component").field("name", &self.name).finish()
    }
}

pub fn default_components() -> Vec<Component> {
    vec![
        Component::new("csv", probe_csv),
        Component::new("serde_json", probe_serde_json),
        Component::new("rand", probe_rand),
        Component::new("smartcore::linalg", probe_dense_matrix),
        Component::new("smartcore::model_selection", probe_train_test_split),
        Component::new("smartcore::preprocessing", probe_standard_scaler),
        Component::new("smartcore::linear", probe_logistic_regression),
        Component::new("smartcore::ensemble", probe_random_forest),
        Component::new("smartcore::metrics", probe_metrics),
        Component::new("smartcore::metrics::classification_report", probe_classification_report),
    ]
}

#[derive(Debug)]
pub struct ImportCheck {
    components: Vec<Component>,
}

impl ImportCheck {
    pub fn new(components: Vec<Component>) -> Self {
        Self { components }
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }
}

impl Default for ImportCheck {
    fn default() -> Self {
        Self::new(default_components())
    }
}

impl Check for ImportCheck {
    fn name(&self) -> &str {
        "Import Test"
    }

    fn failure_label(&self) -> &str {
        "Import error"
    }

    fn run(&self) -> Result<Vec<String>> {
        // 遇到第一個失敗就停止
        for component in &self.components {
            tracing::debug!("Probing component {}", component.name);
            (component.probe)().map_err(|e| CheckError::ComponentError {
                name: component.name.to_string(),
                message: format!("{:#}", e),
            })?;
        }

        tracing::debug!("{} components probed", self.components.len());
        Ok(vec!["✅ All imports successful!".to_string()])
    }
}

/// Two well separated clusters, labels 0 and 1.
fn separable_data() -> (DenseMatrix<f64>, Vec<u32>) {
    let rows = vec![
        vec![0.0, 0.1],
        vec![0.1, 0.0],
        vec![0.2, 0.1],
        vec![0.1, 0.2],
        vec![0.0, 0.2],
        vec![1.0, 0.9],
        vec![0.9, 1.0],
        vec![0.8, 0.9],
        vec![0.9, 0.8],
        vec![1.0, 0.8],
    ];
    let labels = vec![0, 0, 0, 0, 0, 1, 1, 1, 1, 1];
    (DenseMatrix::from_2d_vec(&rows), labels)
}

fn probe_csv() -> anyhow::Result<()> {
    let mut reader = csv::Reader::from_reader("user_id,purchase_value\n1,34\n2,16\n".as_bytes());
    let columns = reader.headers()?.len();
    let rows = reader.records().collect::<std::result::Result<Vec<_>, _>>()?;
    ensure!(
        columns == 2 && rows.len() == 2,
        "unexpected shape ({}, {})",
        rows.len(),
        columns
    );
    Ok(())
}

fn probe_serde_json() -> anyhow::Result<()> {
    let value: serde_json::Value = serde_json::from_str(r#"{"class": 1, "source": "SEO"}"#)?;
    ensure!(value["class"] == 1, "unexpected value {}", value);
    Ok(())
}

fn probe_rand() -> anyhow::Result<()> {
    let a: f64 = StdRng::seed_from_u64(7).gen();
    let b: f64 = StdRng::seed_from_u64(7).gen();
    ensure!(a == b, "seeded generators diverged");
    ensure!((0.0..1.0).contains(&a), "sample {} outside [0, 1)", a);
    Ok(())
}

fn probe_dense_matrix() -> anyhow::Result<()> {
    let (x, _) = separable_data();
    let shape = x.shape();
    ensure!(shape == (10, 2), "unexpected shape {:?}", shape);
    Ok(())
}

fn probe_train_test_split() -> anyhow::Result<()> {
    let (x, y) = separable_data();
    let (x_train, x_test, y_train, y_test) = train_test_split(&x, &y, 0.2, true, Some(42));
    ensure!(
        x_train.shape().0 == 8 && x_test.shape().0 == 2,
        "unexpected split sizes"
    );
    ensure!(y_train.len() == 8 && y_test.len() == 2, "labels not split");
    Ok(())
}

fn probe_standard_scaler() -> anyhow::Result<()> {
    let (x, _) = separable_data();
    let scaler = StandardScaler::<f64>::fit(&x, StandardScalerParameters::default())
        .context("fit failed")?;
    let scaled: DenseMatrix<f64> = scaler.transform(&x).context("transform failed")?;
    ensure!(scaled.shape() == x.shape(), "transform changed the shape");
    for (column, mean) in scaled.column_mean().iter().enumerate() {
        ensure!(mean.abs() < 1e-9, "column {} mean {} after scaling", column, mean);
    }
    Ok(())
}

fn probe_logistic_regression() -> anyhow::Result<()> {
    let (x, y) = separable_data();
    let model = LogisticRegression::fit(&x, &y, LogisticRegressionParameters::default())
        .context("fit failed")?;
    let predicted: Vec<u32> = model.predict(&x).context("predict failed")?;
    ensure!(predicted.len() == y.len(), "prediction length mismatch");
    Ok(())
}

fn probe_random_forest() -> anyhow::Result<()> {
    let (x, y) = separable_data();
    let params = RandomForestClassifierParameters::default()
        .with_n_trees(1)
        .with_seed(42);
    let model = RandomForestClassifier::fit(&x, &y, params).context("fit failed")?;
    let predicted: Vec<u32> = model.predict(&x).context("predict failed")?;
    ensure!(predicted.len() == y.len(), "prediction length mismatch");
    Ok(())
}

fn probe_metrics() -> anyhow::Result<()> {
    let y_true: Vec<u32> = vec![0, 1, 1, 0];
    let y_pred: Vec<u32> = vec![0, 1, 0, 0];
    let score = accuracy(&y_true, &y_pred);
    ensure!((score - 0.75).abs() < 1e-9, "accuracy {} != 0.75", score);
    Ok(())
}

/// Per-class scores behind a classification report. These metrics take float labels.
fn probe_classification_report() -> anyhow::Result<()> {
    let y_true: Vec<f64> = vec![0., 1., 1., 0.];
    let y_pred: Vec<f64> = vec![0., 0., 1., 1.];
    let scores = [
        ("precision", precision(&y_true, &y_pred)),
        ("recall", recall(&y_true, &y_pred)),
        ("f1", f1(&y_true, &y_pred, 1.0)),
    ];
    for (metric, score) in scores {
        ensure!((score - 0.5).abs() < 1e-9, "{} {} != 0.5", metric, score);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failing_probe() -> anyhow::Result<()> {
        anyhow::bail!("library not linked")
    }

    fn ok_probe() -> anyhow::Result<()> {
        Ok(())
    }

    #[test]
    fn test_default_components_all_pass() {
        for component in default_components() {
            assert!(
                (component.probe)().is_ok(),
                "probe {} failed",
                component.name
            );
        }
    }

    #[test]
    fn test_default_registry_covers_scaler_and_report_metrics() {
        let names: Vec<&str> = default_components().iter().map(|c| c.name).collect();
        assert!(names.contains(&"smartcore::preprocessing"));
        assert!(names.contains(&"smartcore::metrics::classification_report"));
        assert!(probe_standard_scaler().is_ok());
        assert!(probe_classification_report().is_ok());
    }

    #[test]
    fn test_import_check_passes_when_all_components_load() {
        let lines = ImportCheck::default().run().unwrap();
        assert_eq!(lines, vec!["✅ All imports successful!".to_string()]);
    }

    #[test]
    fn test_import_check_reports_first_failure() {
        let check = ImportCheck::new(vec![
            Component::new("ok", ok_probe),
            Component::new("shap", failing_probe),
            Component::new("xgboost", failing_probe),
        ]);

        let err = check.run().unwrap_err();
        match err {
            CheckError::ComponentError { name, message } => {
                assert_eq!(name, "shap");
                assert_eq!(message, "library not linked");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_empty_component_list_passes() {
        assert!(ImportCheck::new(vec![]).run().is_ok());
    }
}
