//! k-nearest-neighbour classifier (Euclidean distance, majority vote)

use super::{check_training_set, check_width, Classifier};
use crate::error::ClassifierError;
use ndarray::{Array2, ArrayView1, ArrayView2};
use std::collections::BTreeMap;

/// Lazy classifier that memorises the training set
#[derive(Debug, Clone)]
pub struct KNearestNeighbors<L> {
    k: usize,
    train_features: Option<Array2<f64>>,
    train_labels: Vec<L>,
}

impl<L: Copy + Ord> KNearestNeighbors<L> {
    pub fn new(k: usize) -> Result<Self, ClassifierError> {
        if k == 0 {
            return Err(ClassifierError::ZeroNeighbors);
        }
        Ok(Self {
            k,
            train_features: None,
            train_labels: Vec::new(),
        })
    }

    pub fn k(&self) -> usize {
        self.k
    }

    /// Majority label among the k closest rows
    ///
    /// A tied vote goes to the tied label whose nearest member is closest.
    fn vote(&self, train: &Array2<f64>, query: ArrayView1<'_, f64>) -> L {
        let mut neighbours: Vec<(f64, usize)> = train
            .rows()
            .into_iter()
            .enumerate()
            .map(|(idx, row)| {
                let dist_sq: f64 = row
                    .iter()
                    .zip(query.iter())
                    .map(|(a, b)| (a - b) * (a - b))
                    .sum();
                (dist_sq, idx)
            })
            .collect();
        neighbours.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

        // label -> (votes, rank of nearest member)
        let mut tally: BTreeMap<L, (usize, usize)> = BTreeMap::new();
        for (rank, &(_, idx)) in neighbours.iter().take(self.k).enumerate() {
            let entry = tally.entry(self.train_labels[idx]).or_insert((0, rank));
            entry.0 += 1;
        }

        tally
            .into_iter()
            .max_by(|(_, (votes_a, rank_a)), (_, (votes_b, rank_b))| {
                votes_a.cmp(votes_b).then(rank_b.cmp(rank_a))
            })
            .map(|(label, _)| label)
            .unwrap_or(self.train_labels[neighbours[0].1])
    }
}

impl<L: Copy + Ord> Classifier<L> for KNearestNeighbors<L> {
    fn fit(&mut self, features: ArrayView2<'_, f64>, labels: &[L]) -> Result<(), ClassifierError> {
        check_training_set(&features, labels)?;
        self.train_features = Some(features.to_owned());
        self.train_labels = labels.to_vec();
        Ok(())
    }

    fn predict(&self, features: ArrayView2<'_, f64>) -> Result<Vec<L>, ClassifierError> {
        let train = self
            .train_features
            .as_ref()
            .ok_or(ClassifierError::NotFitted)?;
        check_width(&features, train.ncols())?;

        Ok(features.rows().into_iter().map(|row| self.vote(train, row)).collect())
    }
}
