//! Feed-forward network with one ReLU hidden layer
//!
//! Inputs are standardised with the training mean and standard deviation,
//! the output layer is a softmax over the classes seen during `fit`, and
//! training is mini-batch SGD on cross-entropy with an L2 penalty.

use super::{check_training_set, check_width, Classifier};
use crate::error::ClassifierError;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MlpOptions {
    pub hidden_size: usize,
    pub epochs: usize,
    pub batch_size: usize,
    pub learning_rate: f64,
    pub l2_penalty: f64,
    /// Seed for weight initialisation and batch shuffling
    pub seed: u64,
}

impl Default for MlpOptions {
    fn default() -> Self {
        Self {
            hidden_size: 16,
            epochs: 200,
            batch_size: 16,
            learning_rate: 0.05,
            l2_penalty: 1e-4,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone)]
struct Weights {
    w1: Array2<f64>,
    b1: Array1<f64>,
    w2: Array2<f64>,
    b2: Array1<f64>,
    mean: Array1<f64>,
    std: Array1<f64>,
}

/// Multilayer perceptron classifier
#[derive(Debug, Clone)]
pub struct Mlp<L> {
    options: MlpOptions,
    classes: Vec<L>,
    weights: Option<Weights>,
}

fn softmax(logits: &Array1<f64>) -> Array1<f64> {
    let max = logits.fold(f64::NEG_INFINITY, |m, &v| m.max(v));
    let exp = logits.mapv(|v| (v - max).exp());
    let sum = exp.sum();
    exp / sum
}

impl Weights {
    fn standardize(&self, row: ArrayView1<'_, f64>) -> Array1<f64> {
        (&row - &self.mean) / &self.std
    }

    /// Returns (hidden pre-activation, hidden activation, class probabilities)
    fn forward(&self, x: &Array1<f64>) -> (Array1<f64>, Array1<f64>, Array1<f64>) {
        let pre = self.w1.dot(x) + &self.b1;
        let act = pre.mapv(|v| v.max(0.0));
        let logits = self.w2.dot(&act) + &self.b2;
        (pre, act, softmax(&logits))
    }
}

impl<L: Copy + Ord> Mlp<L> {
    pub fn new(options: MlpOptions) -> Self {
        Self {
            options,
            classes: Vec::new(),
            weights: None,
        }
    }

    pub fn options(&self) -> &MlpOptions {
        &self.options
    }

    /// Classes in output-unit order
    pub fn classes(&self) -> &[L] {
        &self.classes
    }

    /// Class probabilities for every row, columns ordered as [`Mlp::classes`]
    pub fn predict_proba(&self, features: ArrayView2<'_, f64>) -> Result<Array2<f64>, ClassifierError> {
        let weights = self.weights.as_ref().ok_or(ClassifierError::NotFitted)?;
        check_width(&features, weights.mean.len())?;

        let mut probs = Array2::<f64>::zeros((features.nrows(), self.classes.len()));
        for (row, mut out) in features.rows().into_iter().zip(probs.rows_mut()) {
            let (_, _, p) = weights.forward(&weights.standardize(row));
            out.assign(&p);
        }
        Ok(probs)
    }
}

impl<L: Copy + Ord> Classifier<L> for Mlp<L> {
    fn fit(&mut self, features: ArrayView2<'_, f64>, labels: &[L]) -> Result<(), ClassifierError> {
        check_training_set(&features, labels)?;

        let mut classes = labels.to_vec();
        classes.sort();
        classes.dedup();
        if classes.len() < 2 {
            return Err(ClassifierError::TooFewClasses(classes.len()));
        }
        let targets: Vec<usize> = labels
            .iter()
            .map(|l| classes.binary_search(l).unwrap_or(0))
            .collect();

        let n = features.nrows();
        let d = features.ncols();
        let hidden = self.options.hidden_size.max(1);
        let n_classes = classes.len();
        let batch_size = self.options.batch_size.max(1);

        let mean = features.mean_axis(Axis(0)).unwrap_or_else(|| Array1::zeros(d));
        let std = features.std_axis(Axis(0), 0.0).mapv(|s| s.max(1e-9));

        let mut rng = StdRng::seed_from_u64(self.options.seed);
        let limit1 = (6.0 / (d + hidden) as f64).sqrt();
        let limit2 = (6.0 / (hidden + n_classes) as f64).sqrt();

        let mut w = Weights {
            w1: Array2::from_shape_fn((hidden, d), |_| rng.gen_range(-limit1..limit1)),
            b1: Array1::zeros(hidden),
            w2: Array2::from_shape_fn((n_classes, hidden), |_| rng.gen_range(-limit2..limit2)),
            b2: Array1::zeros(n_classes),
            mean,
            std,
        };

        let inputs: Vec<Array1<f64>> = features.rows().into_iter().map(|row| w.standardize(row)).collect();
        let mut order: Vec<usize> = (0..n).collect();

        debug!(
            samples = n,
            features = d,
            hidden,
            classes = n_classes,
            epochs = self.options.epochs,
            "Training MLP"
        );

        for epoch in 0..self.options.epochs {
            order.shuffle(&mut rng);
            let mut loss = 0.0;

            for batch in order.chunks(batch_size) {
                let mut d_w1 = Array2::<f64>::zeros(w.w1.raw_dim());
                let mut d_b1 = Array1::<f64>::zeros(hidden);
                let mut d_w2 = Array2::<f64>::zeros(w.w2.raw_dim());
                let mut d_b2 = Array1::<f64>::zeros(n_classes);

                for &idx in batch {
                    let x = &inputs[idx];
                    let (pre, act, probs) = w.forward(x);
                    let target = targets[idx];
                    loss -= probs[target].max(1e-12).ln();

                    // dL/dlogits = p - onehot
                    let mut dz2 = probs;
                    dz2[target] -= 1.0;

                    let mut dh = w.w2.t().dot(&dz2);
                    dh.zip_mut_with(&pre, |g, &p| {
                        if p <= 0.0 {
                            *g = 0.0;
                        }
                    });

                    for (c, &g) in dz2.iter().enumerate() {
                        d_w2.row_mut(c).scaled_add(g, &act);
                    }
                    d_b2 += &dz2;
                    for (h, &g) in dh.iter().enumerate() {
                        d_w1.row_mut(h).scaled_add(g, x);
                    }
                    d_b1 += &dh;
                }

                let scale = self.options.learning_rate / batch.len() as f64;
                let l2 = self.options.l2_penalty;
                w.w1.zip_mut_with(&d_w1, |p, &g| *p -= scale * (g + l2 * *p));
                w.w2.zip_mut_with(&d_w2, |p, &g| *p -= scale * (g + l2 * *p));
                w.b1.scaled_add(-scale, &d_b1);
                w.b2.scaled_add(-scale, &d_b2);
            }

            if epoch + 1 == self.options.epochs {
                debug!(epoch, mean_loss = loss / n as f64, "MLP training finished");
            }
        }

        self.classes = classes;
        self.weights = Some(w);
        Ok(())
    }

    fn predict(&self, features: ArrayView2<'_, f64>) -> Result<Vec<L>, ClassifierError> {
        let probs = self.predict_proba(features)?;
        Ok(probs
            .rows()
            .into_iter()
            .map(|row| {
                let best = row
                    .iter()
                    .enumerate()
                    .max_by(|(_, a), (_, b)| a.total_cmp(b))
                    .map(|(i, _)| i)
                    .unwrap_or(0);
                self.classes[best]
            })
            .collect())
    }
}
