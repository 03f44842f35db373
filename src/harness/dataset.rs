//! Dataset generation
//!
//! Deterministic per (size, order, seed).

use super::{DatasetOrder, HarnessConfig};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Generate the insertion sequence described by `config`
pub fn generate_dataset(config: &HarnessConfig) -> Vec<u64> {
    let n = config.size as u64;
    let mut rng = StdRng::seed_from_u64(config.seed);

    match config.order {
        DatasetOrder::Ascending => (0..n).collect(),
        DatasetOrder::Descending => (0..n).rev().collect(),
        DatasetOrder::Shuffled => {
            let mut values: Vec<u64> = (0..n).collect();
            values.shuffle(&mut rng);
            values
        }
        // Range 0..2n keeps some duplicates in play
        DatasetOrder::Random => (0..n).map(|_| rng.gen_range(0..2 * n)).collect(),
    }
}

/// Values guaranteed absent from `dataset` (used for miss lookups)
pub fn absent_values(dataset: &[u64], count: usize) -> Vec<u64> {
    let ceiling = dataset.iter().copied().max().map_or(0, |max| max + 1);
    (ceiling..ceiling + count as u64).collect()
}
