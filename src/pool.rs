//
// pool.rs
// dicom-anonymizer
//
// Pool-kind selection and a generic executor for one batch of units.
// Small batches run on one scoped OS thread per unit; large batches go
// through a dedicated rayon pool capped at the host's parallelism so
// thousands of units cannot exhaust OS resources.
//

use std::thread::available_parallelism;

use rayon::prelude::*;
use tracing::warn;

/// Unit count at which the bounded pool takes over from per-unit threads.
pub const DEFAULT_POOL_THRESHOLD: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolKind {
    Sequential,
    Lightweight,
    Bounded,
}

/// Select the pool kind for a batch. The threshold is passed in rather
/// than read from a constant so callers can tune it per site.
pub fn choose_pool_kind(unit_count: usize, parallel_enabled: bool, threshold: usize) -> PoolKind {
    if !parallel_enabled || unit_count <= 1 {
        PoolKind::Sequential
    } else if unit_count >= threshold {
        PoolKind::Bounded
    } else {
        PoolKind::Lightweight
    }
}

/// Run `op` over every unit under the chosen pool. No ordering is
/// guaranteed between units; `op` must handle its own failures, a bad
/// unit never tears down the batch.
pub fn run_units<T, F>(kind: PoolKind, units: &[T], op: F)
where
    T: Sync,
    F: Fn(&T) + Send + Sync,
{
    match kind {
        PoolKind::Sequential => units.iter().for_each(&op),
        PoolKind::Lightweight => std::thread::scope(|scope| {
            let op = &op;
            for unit in units {
                scope.spawn(move || op(unit));
            }
        }),
        PoolKind::Bounded => {
            let workers = available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
                .min(units.len().max(1));
            match rayon::ThreadPoolBuilder::new().num_threads(workers).build() {
                Ok(pool) => pool.install(|| units.par_iter().for_each(|unit| op(unit))),
                Err(err) => {
                    warn!("could not build worker pool ({}), running sequentially", err);
                    units.iter().for_each(&op);
                }
            }
        }
    }
}
