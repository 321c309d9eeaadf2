//! Fitted preprocessing steps followed by a linear estimator.

use genre_core::{Classifier, EncodedLabel, ModelError};
use ndarray::{Array1, Array2, ArrayView2, Axis};
use serde::{Deserialize, Serialize};

use crate::ArtifactError;

// ─────────────────────────────────────────────────────────────────────────────
// Exported form
// ─────────────────────────────────────────────────────────────────────────────

/// A fitted preprocessing step as written by the exporter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Transform {
    /// `(x - mean) / scale`
    StandardScaler { mean: Vec<f64>, scale: Vec<f64> },
    /// `x * scale + min`
    MinMaxScaler { min: Vec<f64>, scale: Vec<f64> },
}

/// The final estimator of the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Estimator {
    /// One weight row per class; the highest decision score wins.
    Linear {
        coef: Vec<Vec<f64>>,
        intercept: Vec<f64>,
        classes: Vec<EncodedLabel>,
    },
}

/// Pipeline artifact exactly as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineSpec {
    #[serde(default)]
    pub steps: Vec<Transform>,
    pub estimator: Estimator,
}

// ─────────────────────────────────────────────────────────────────────────────
// Runtime form
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Step {
    Standardize { mean: Array1<f64>, scale: Array1<f64> },
    Rescale { min: Array1<f64>, scale: Array1<f64> },
}

impl Step {
    fn apply(&self, x: &mut Array2<f64>) {
        match self {
            Step::Standardize { mean, scale } => {
                *x -= mean;
                *x /= scale;
            }
            Step::Rescale { min, scale } => {
                *x *= scale;
                *x += min;
            }
        }
    }
}

#[derive(Debug, Clone)]
struct Linear {
    coef: Array2<f64>,
    intercept: Array1<f64>,
    classes: Vec<EncodedLabel>,
}

impl Linear {
    fn predict(&self, x: &Array2<f64>) -> Result<Vec<EncodedLabel>, ModelError> {
        let mut scores = x.dot(&self.coef.t());
        scores += &self.intercept;

        scores
            .axis_iter(Axis(0))
            .map(|row| {
                if row.iter().any(|s| !s.is_finite()) {
                    return Err(ModelError::Internal(
                        "decision function produced non-finite scores".to_string(),
                    ));
                }
                let best = row
                    .iter()
                    .enumerate()
                    .fold(0, |best, (i, &s)| if s > row[best] { i } else { best });
                Ok(self.classes[best])
            })
            .collect()
    }
}

/// A validated pipeline ready to serve predictions.
///
/// Immutable once built, so one instance is shared by all requests.
#[derive(Debug, Clone)]
pub struct ClassifierPipeline {
    steps: Vec<Step>,
    estimator: Linear,
}

impl ClassifierPipeline {
    /// Width of the input rows the pipeline was fitted on.
    pub fn n_features(&self) -> usize {
        self.estimator.coef.ncols()
    }

    /// Encoded labels the estimator can emit.
    pub fn classes(&self) -> &[EncodedLabel] {
        &self.estimator.classes
    }
}

impl TryFrom<PipelineSpec> for ClassifierPipeline {
    type Error = ArtifactError;

    fn try_from(spec: PipelineSpec) -> Result<Self, Self::Error> {
        let Estimator::Linear { coef, intercept, classes } = spec.estimator;

        let n_classes = coef.len();
        if n_classes == 0 {
            return Err(ArtifactError("estimator has no classes".to_string()));
        }
        if intercept.len() != n_classes || classes.len() != n_classes {
            return Err(ArtifactError(format!(
                "estimator has {} coef rows, {} intercepts and {} classes",
                n_classes,
                intercept.len(),
                classes.len()
            )));
        }

        let n_features = coef[0].len();
        if n_features == 0 || coef.iter().any(|row| row.len() != n_features) {
            return Err(ArtifactError("coef rows must share one non-zero width".to_string()));
        }

        let flat: Vec<f64> = coef.into_iter().flatten().collect();
        let coef = Array2::from_shape_vec((n_classes, n_features), flat)
            .map_err(|e| ArtifactError(e.to_string()))?;

        let steps = spec
            .steps
            .into_iter()
            .enumerate()
            .map(|(i, step)| build_step(i, step, n_features))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            steps,
            estimator: Linear {
                coef,
                intercept: Array1::from(intercept),
                classes,
            },
        })
    }
}

fn build_step(index: usize, step: Transform, n_features: usize) -> Result<Step, ArtifactError> {
    let check = |name: &str, values: &[f64]| {
        if values.len() == n_features {
            Ok(())
        } else {
            Err(ArtifactError(format!(
                "step {} {} has {} values, expected {}",
                index,
                name,
                values.len(),
                n_features
            )))
        }
    };

    match step {
        Transform::StandardScaler { mean, scale } => {
            check("mean", &mean)?;
            check("scale", &scale)?;
            // Constant features are fitted with a zero scale; leave them unscaled.
            let scale = scale.into_iter().map(|s| if s == 0.0 { 1.0 } else { s });
            Ok(Step::Standardize {
                mean: Array1::from(mean),
                scale: scale.collect(),
            })
        }
        Transform::MinMaxScaler { min, scale } => {
            check("min", &min)?;
            check("scale", &scale)?;
            Ok(Step::Rescale {
                min: Array1::from(min),
                scale: Array1::from(scale),
            })
        }
    }
}

impl Classifier for ClassifierPipeline {
    fn predict(&self, x: ArrayView2<'_, f64>) -> Result<Vec<EncodedLabel>, ModelError> {
        if x.ncols() != self.n_features() {
            return Err(ModelError::FeatureMismatch {
                expected: self.n_features(),
                actual: x.ncols(),
            });
        }

        let mut z = x.to_owned();
        for step in &self.steps {
            step.apply(&mut z);
        }

        self.estimator.predict(&z)
    }
}
