use crate::domain::model::ModelingMetrics;
use crate::domain::ports::Check;
use crate::utils::error::{CheckError, Result};
use rand::{rngs::StdRng, Rng, SeedableRng};
use smartcore::ensemble::random_forest_classifier::{
    RandomForestClassifier, RandomForestClassifierParameters,
};
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::metrics::accuracy;
use smartcore::model_selection::train_test_split;

#[derive(Debug, Clone, PartialEq)]
pub struct ModelingParams {
    /// Seeds the synthetic data, the split shuffle and the forest.
    pub seed: u64,
    pub n_samples: usize,
    pub n_features: usize,
    pub test_size: f32,
    pub n_trees: u16,
}

impl Default for ModelingParams {
    fn default() -> Self {
        Self {
            seed: 42,
            n_samples: 100,
            n_features: 5,
            test_size: 0.2,
            n_trees: 10,
        }
    }
}

/// Uniform features in `[0, 1)` and 0/1 labels.
pub fn synthetic_data(params: &ModelingParams) -> (Vec<Vec<f64>>, Vec<u32>) {
    let mut rng = StdRng::seed_from_u64(params.seed);
    let features = (0..params.n_samples)
        .map(|_| (0..params.n_features).map(|_| rng.gen::<f64>()).collect())
        .collect();
    let labels = (0..params.n_samples).map(|_| rng.gen_range(0..2)).collect();
    (features, labels)
}

/// Split, fit a small random forest, predict the held-out rows and score them.
pub fn run_basic_model(params: &ModelingParams) -> Result<ModelingMetrics> {
    let (features, labels) = synthetic_data(params);
    let x = DenseMatrix::from_2d_vec(&features);

    let (x_train, x_test, y_train, y_test) =
        train_test_split(&x, &labels, params.test_size, true, Some(params.seed));
    tracing::debug!(
        "Split {} samples into {} train / {} test",
        params.n_samples,
        y_train.len(),
        y_test.len()
    );

    let forest_params = RandomForestClassifierParameters::default()
        .with_n_trees(params.n_trees)
        .with_seed(params.seed);
    let model = RandomForestClassifier::fit(&x_train, &y_train, forest_params).map_err(|e| {
        CheckError::ModelError {
            message: format!("fit failed: {}", e),
        }
    })?;

    let y_pred: Vec<u32> = model.predict(&x_test).map_err(|e| CheckError::ModelError {
        message: format!("predict failed: {}", e),
    })?;

    Ok(ModelingMetrics {
        train_size: y_train.len(),
        test_size: y_test.len(),
        accuracy: accuracy(&y_test, &y_pred),
    })
}

#[derive(Debug, Clone, Default)]
pub struct ModelingCheck {
    params: ModelingParams,
}

impl ModelingCheck {
    pub fn new(params: ModelingParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &ModelingParams {
        &self.params
    }
}

impl Check for ModelingCheck {
    fn name(&self) -> &str {
        "Basic Modeling Test"
    }

    fn failure_label(&self) -> &str {
        "Modeling test error"
    }

    fn run(&self) -> Result<Vec<String>> {
        let metrics = run_basic_model(&self.params)?;
        tracing::debug!("Modeling metrics: {:?}", metrics);
        Ok(vec![format!(
            "✅ Basic modeling test successful! Accuracy: {:.3}",
            metrics.accuracy
        )])
    }
}
