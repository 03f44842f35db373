//! Harness configuration
//!
//! Dataset shape + workload knobs. Populated by the CLI or directly.

use crate::HarnessError;
use std::fmt;
use std::str::FromStr;

/// Order in which the generated values are fed to the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetOrder {
    /// 0, 1, 2, ...
    Ascending,
    /// n-1, n-2, ..., 0 (worst case for an unbalanced BST)
    Descending,
    /// Seeded permutation of 0..n
    Shuffled,
    /// Seeded uniform draws; values may repeat
    Random,
}

impl FromStr for DatasetOrder {
    type Err = HarnessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ascending" | "asc" => Ok(Self::Ascending),
            "descending" | "desc" => Ok(Self::Descending),
            "shuffled" | "shuffle" => Ok(Self::Shuffled),
            "random" => Ok(Self::Random),
            other => Err(HarnessError::UnknownOrder(other.to_string())),
        }
    }
}

impl fmt::Display for DatasetOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Ascending => "ascending",
            Self::Descending => "descending",
            Self::Shuffled => "shuffled",
            Self::Random => "random",
        };
        f.write_str(name)
    }
}

/// Parameters for one harness run
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Number of values generated
    pub size: usize,

    /// Order the values are inserted in
    pub order: DatasetOrder,

    /// Seed for shuffled/random datasets
    pub seed: u64,

    /// Share of the dataset removed in the removal phase, in [0, 1]
    pub removal_ratio: f64,
}

impl HarnessConfig {
    /// Shuffled dataset of `size` values, seed 0, half removed
    pub fn new(size: usize) -> Self {
        Self {
            size,
            order: DatasetOrder::Shuffled,
            seed: 0,
            removal_ratio: 0.5,
        }
    }

    /// Override the dataset order
    pub fn with_order(mut self, order: DatasetOrder) -> Self {
        self.order = order;
        self
    }

    /// Override the seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Override the removal share
    pub fn with_removal_ratio(mut self, removal_ratio: f64) -> Self {
        self.removal_ratio = removal_ratio;
        self
    }

    /// Reject empty datasets and out-of-range ratios
    pub fn validate(&self) -> Result<(), HarnessError> {
        if self.size == 0 {
            return Err(HarnessError::EmptyDataset);
        }
        if !(0.0..=1.0).contains(&self.removal_ratio) {
            return Err(HarnessError::InvalidRemovalRatio(self.removal_ratio));
        }
        Ok(())
    }

    /// Number of dataset entries visited by the removal phase
    pub fn removal_count(&self) -> usize {
        ((self.size as f64) * self.removal_ratio).round() as usize
    }
}
