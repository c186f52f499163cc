//! Evaluation helpers

use std::collections::BTreeMap;

/// Fraction of positions where `predicted` equals `truth`
///
/// Compares up to the shorter length; returns 0 when either is empty.
pub fn accuracy<L: PartialEq>(predicted: &[L], truth: &[L]) -> f64 {
    let n = predicted.len().min(truth.len());
    if n == 0 {
        return 0.0;
    }
    let correct = predicted.iter().zip(truth).filter(|(p, t)| p == t).count();
    correct as f64 / n as f64
}

/// Counts keyed by (true label, predicted label)
pub fn confusion_counts<L: Copy + Ord>(predicted: &[L], truth: &[L]) -> BTreeMap<(L, L), usize> {
    let mut counts = BTreeMap::new();
    for (&p, &t) in predicted.iter().zip(truth) {
        *counts.entry((t, p)).or_insert(0) += 1;
    }
    counts
}
