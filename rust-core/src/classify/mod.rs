//! Classifiers for band-energy feature vectors

pub mod knn;
pub mod metrics;
pub mod mlp;

pub use knn::KNearestNeighbors;
pub use metrics::{accuracy, confusion_counts};
pub use mlp::{Mlp, MlpOptions};

use crate::error::ClassifierError;
use ndarray::ArrayView2;

/// Supervised classifier over feature rows
///
/// `predict` only ever returns labels seen during `fit`.
pub trait Classifier<L> {
    fn fit(&mut self, features: ArrayView2<'_, f64>, labels: &[L]) -> Result<(), ClassifierError>;

    fn predict(&self, features: ArrayView2<'_, f64>) -> Result<Vec<L>, ClassifierError>;
}

fn check_training_set<L>(features: &ArrayView2<'_, f64>, labels: &[L]) -> Result<(), ClassifierError> {
    if features.nrows() == 0 {
        return Err(ClassifierError::EmptyTrainingSet);
    }
    if features.nrows() != labels.len() {
        return Err(ClassifierError::LabelCountMismatch {
            features: features.nrows(),
            labels: labels.len(),
        });
    }
    Ok(())
}

fn check_width(features: &ArrayView2<'_, f64>, expected: usize) -> Result<(), ClassifierError> {
    if features.ncols() != expected {
        return Err(ClassifierError::FeatureWidthMismatch {
            expected,
            actual: features.ncols(),
        });
    }
    Ok(())
}
