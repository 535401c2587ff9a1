//! K-fold cross-validation splitter.

use crate::core::error::{EvalError, Result};
use crate::ensure;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// K-fold splitter over sample indices.
///
/// Folds are contiguous chunks of the (optionally shuffled) index range,
/// sized as evenly as the sample count allows. Splitting is deterministic
/// when a seed is set; unseeded shuffling draws from entropy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KFold {
    /// Number of folds
    pub n_splits: usize,
    /// Whether to shuffle indices before folding
    pub shuffle: bool,
    /// Seed for deterministic shuffling
    pub seed: Option<u64>,
}

impl KFold {
    /// Create a splitter with the given fold count, no shuffling.
    pub fn new(n_splits: usize) -> Self {
        Self {
            n_splits,
            shuffle: false,
            seed: None,
        }
    }

    /// Enable or disable shuffling.
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// Set the shuffle seed (implies shuffling).
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.shuffle = true;
        self.seed = Some(seed);
        self
    }

    /// Produce `(train_indices, test_indices)` pairs, one per fold.
    pub fn split(&self, n_samples: usize) -> Result<Vec<(Vec<usize>, Vec<usize>)>> {
        ensure!(
            self.n_splits >= 2,
            EvalError::invalid_parameter(
                "n_splits",
                format!("{}", self.n_splits),
                "cross-validation needs at least two folds",
            )
        );
        ensure!(
            n_samples >= self.n_splits,
            EvalError::invalid_parameter(
                "n_samples",
                format!("{}", n_samples),
                format!("cannot split into {} folds", self.n_splits),
            )
        );

        let mut indices: Vec<usize> = (0..n_samples).collect();
        if self.shuffle {
            let mut rng = match self.seed {
                Some(seed) => rand::rngs::StdRng::seed_from_u64(seed),
                None => rand::rngs::StdRng::from_entropy(),
            };
            indices.shuffle(&mut rng);
        }

        let base = n_samples / self.n_splits;
        let remainder = n_samples % self.n_splits;

        let mut splits = Vec::with_capacity(self.n_splits);
        let mut start = 0;
        for fold in 0..self.n_splits {
            let size = base + usize::from(fold < remainder);
            let stop = start + size;
            let test: Vec<usize> = indices[start..stop].to_vec();
            let train: Vec<usize> = indices[..start]
                .iter()
                .chain(indices[stop..].iter())
                .copied()
                .collect();
            splits.push((train, test));
            start = stop;
        }
        Ok(splits)
    }
}
