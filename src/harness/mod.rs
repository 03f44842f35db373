//! Workload harness
//!
//! Feeds a generated dataset through the tree in three timed phases:
//!   1. insert every value
//!   2. look up every value plus as many known-absent values
//!   3. remove a prefix of the dataset
//!
//! Every phase is cross-checked against a `BTreeSet` reference.

mod config;
mod dataset;

pub use config::{DatasetOrder, HarnessConfig};
pub use dataset::{absent_values, generate_dataset};

use crate::{AaTree, HarnessError};
use std::collections::BTreeSet;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Outcome of one harness run
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Configuration the run used
    pub config: HarnessConfig,

    /// Distinct values after the insert phase
    pub distinct_inserted: usize,

    /// Tree height after the insert phase
    pub height_after_insert: usize,

    /// Height bound 2·log₂(n+1) after the insert phase
    pub height_bound: usize,

    /// Lookups performed (hits + misses)
    pub lookups: usize,

    /// Values actually removed in the removal phase
    pub removed: usize,

    /// Tree size after the removal phase
    pub final_size: usize,

    /// Wall time of the insert phase
    pub insert_time: Duration,

    /// Wall time of the lookup phase
    pub lookup_time: Duration,

    /// Wall time of the removal phase
    pub remove_time: Duration,
}

impl RunReport {
    /// Check the post-insert height against the balance bound
    pub fn satisfies_height_bound(&self) -> bool {
        self.height_after_insert <= self.height_bound
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "dataset: {} values, order={}, seed={}",
            self.config.size, self.config.order, self.config.seed
        )?;
        writeln!(
            f,
            "insert:  {:.3?}  distinct={} height={} (bound {})",
            self.insert_time, self.distinct_inserted, self.height_after_insert, self.height_bound
        )?;
        writeln!(f, "lookup:  {:.3?}  queries={}", self.lookup_time, self.lookups)?;
        write!(
            f,
            "remove:  {:.3?}  removed={} final size={}",
            self.remove_time, self.removed, self.final_size
        )
    }
}

/// Run the three-phase workload described by `config`
pub fn run(config: &HarnessConfig) -> Result<RunReport, HarnessError> {
    config.validate()?;

    let dataset = generate_dataset(config);
    let misses = absent_values(&dataset, dataset.len());
    info!(size = config.size, order = %config.order, seed = config.seed, "starting harness run");

    let mut tree = AaTree::new();
    let mut reference = BTreeSet::new();

    // Phase 1: insert
    let start = Instant::now();
    for &value in &dataset {
        tree.add(value);
    }
    let insert_time = start.elapsed();

    reference.extend(dataset.iter().copied());
    expect_size(&tree, &reference, "insert")?;
    tree.check_invariants()?;
    let distinct_inserted = tree.size();
    let height_after_insert = tree.height();
    let height_bound = tree.height_bound();
    debug!(height_after_insert, height_bound, "insert phase done");

    // Phase 2: lookups
    let start = Instant::now();
    let hits = dataset.iter().filter(|value| tree.contains(value)).count();
    let false_hits = misses.iter().filter(|value| tree.contains(value)).count();
    let lookup_time = start.elapsed();

    if hits != dataset.len() || false_hits != 0 {
        return Err(HarnessError::MembershipMismatch {
            phase: "lookup",
            detail: format!(
                "{} of {} present values found, {} absent values reported present",
                hits,
                dataset.len(),
                false_hits
            ),
        });
    }
    debug!(hits, misses = misses.len(), "lookup phase done");

    // Phase 3: removals
    let doomed = &dataset[..config.removal_count()];
    let start = Instant::now();
    let removed = doomed.iter().filter(|value| tree.remove(value)).count();
    let remove_time = start.elapsed();

    for value in doomed {
        reference.remove(value);
    }
    expect_size(&tree, &reference, "remove")?;
    tree.check_invariants()?;

    if let Some(value) = doomed.iter().find(|value| tree.contains(value)) {
        return Err(HarnessError::MembershipMismatch {
            phase: "remove",
            detail: format!("{} still present after removal", value),
        });
    }
    if let Some(value) = reference.iter().find(|value| !tree.contains(value)) {
        return Err(HarnessError::MembershipMismatch {
            phase: "remove",
            detail: format!("{} lost by an unrelated removal", value),
        });
    }
    debug!(removed, final_size = tree.size(), "remove phase done");

    let report = RunReport {
        config: config.clone(),
        distinct_inserted,
        height_after_insert,
        height_bound,
        lookups: dataset.len() + misses.len(),
        removed,
        final_size: tree.size(),
        insert_time,
        lookup_time,
        remove_time,
    };
    info!(
        insert_ms = report.insert_time.as_millis() as u64,
        lookup_ms = report.lookup_time.as_millis() as u64,
        remove_ms = report.remove_time.as_millis() as u64,
        "harness run complete"
    );
    Ok(report)
}

fn expect_size(
    tree: &AaTree<u64>,
    reference: &BTreeSet<u64>,
    phase: &'static str,
) -> Result<(), HarnessError> {
    if tree.size() != reference.len() {
        return Err(HarnessError::SizeMismatch {
            phase,
            expected: reference.len(),
            actual: tree.size(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_shuffled() {
        let report = run(&HarnessConfig::new(500).with_seed(11)).expect("run succeeds");
        assert_eq!(report.distinct_inserted, 500);
        assert_eq!(report.removed, 250);
        assert_eq!(report.final_size, 250);
        assert_eq!(report.lookups, 1000);
        assert!(report.satisfies_height_bound());
    }

    #[test]
    fn test_run_rejects_empty() {
        assert!(matches!(
            run(&HarnessConfig::new(0)),
            Err(HarnessError::EmptyDataset)
        ));
    }

    #[test]
    fn test_report_display() {
        let report = run(&HarnessConfig::new(10).with_order(DatasetOrder::Ascending))
            .expect("run succeeds");
        let text = report.to_string();
        assert!(text.starts_with("dataset: 10 values, order=ascending, seed=0"));
        assert!(text.contains("removed=5 final size=5"));
    }
}
