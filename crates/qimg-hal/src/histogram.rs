//! Probability histograms over computational basis states.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{HalError, HalResult};

/// Tolerance on the total probability of a histogram.
pub const MASS_TOLERANCE: f64 = 1e-8;

/// Probability of each basis state, keyed by basis index.
///
/// Bit `k` of a key is the value of qubit `k`. States absent from the map have
/// probability zero. Keys are ordered, so folds over a histogram are
/// reproducible.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Histogram {
    probabilities: BTreeMap<u64, f64>,
}

impl Histogram {
    /// Create an empty histogram.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a histogram from `(index, probability)` pairs.
    ///
    /// Repeated indices accumulate.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (u64, f64)>) -> Self {
        let mut histogram = Self::new();
        for (index, p) in pairs {
            histogram.add(index, p);
        }
        histogram
    }

    /// Add `p` to the probability of `index`.
    pub fn add(&mut self, index: u64, p: f64) {
        *self.probabilities.entry(index).or_insert(0.0) += p;
    }

    /// Probability of `index`.
    pub fn get(&self, index: u64) -> f64 {
        self.probabilities.get(&index).copied().unwrap_or(0.0)
    }

    /// Iterate `(index, probability)` in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, f64)> + '_ {
        self.probabilities.iter().map(|(&i, &p)| (i, p))
    }

    /// Number of states with recorded probability.
    pub fn len(&self) -> usize {
        self.probabilities.len()
    }

    /// Whether no state has recorded probability.
    pub fn is_empty(&self) -> bool {
        self.probabilities.is_empty()
    }

    /// Sum of all probabilities.
    pub fn total_mass(&self) -> f64 {
        self.probabilities.values().sum()
    }

    /// Most probable state. Ties go to the lowest index.
    pub fn most_probable(&self) -> Option<(u64, f64)> {
        self.iter()
            .fold(None, |best: Option<(u64, f64)>, (i, p)| match best {
                Some((_, bp)) if bp >= p => best,
                _ => Some((i, p)),
            })
    }

    /// Check that every probability is finite and non-negative and that they
    /// sum to one within [`MASS_TOLERANCE`].
    pub fn validate(&self) -> HalResult<()> {
        let total = self.total_mass();
        let well_formed = self.probabilities.values().all(|p| p.is_finite() && *p >= 0.0);
        if !well_formed || (total - 1.0).abs() > MASS_TOLERANCE {
            return Err(HalError::InvalidHistogram { total });
        }
        Ok(())
    }
}

impl FromIterator<(u64, f64)> for Histogram {
    fn from_iter<T: IntoIterator<Item = (u64, f64)>>(iter: T) -> Self {
        Self::from_pairs(iter)
    }
}
