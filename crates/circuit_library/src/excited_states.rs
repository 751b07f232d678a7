// This code is part of Qiskit.
//
// (C) Copyright IBM 2024
//
// This code is licensed under the Apache License, Version 2.0. You may
// obtain a copy of this license in the LICENSE.txt file in the root directory
// of this source tree or at http://www.apache.org/licenses/LICENSE-2.0.
//
// Any modifications or derivative works of this code must retain this
// copyright notice, and modified files need to carry a notice indicating
// that they have been altered from the originals.

//! Bookkeeping for excited-state VQE.
//!
//! Level ``k`` is found by minimizing the energy plus a penalty on the overlap with the optimal
//! states of the levels ``0..k``, so the ledger keeps the optimal parameters and the cost
//! history of every level that was optimized so far. Energies and overlaps are measured
//! elsewhere and only combined here.

use hashbrown::HashMap;
use tracing::debug;

use crate::error::LedgerError;

/// Penalty weight of an overlap with a lower level.
pub const DEFAULT_SHIFT_ENERGY: f64 = 100.0;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LevelRecord {
    cost_history: Vec<f64>,
    optimal_parameters: Option<Vec<f64>>,
}

impl LevelRecord {
    /// All costs seen on this level, starting with the cost of the very first initial point.
    pub fn cost_history(&self) -> &[f64] {
        &self.cost_history
    }

    pub fn optimal_parameters(&self) -> Option<&[f64]> {
        self.optimal_parameters.as_deref()
    }

    pub fn best_cost(&self) -> Option<f64> {
        self.cost_history.iter().copied().reduce(f64::min)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExcitedStateLedger {
    shift_energy: f64,
    levels: HashMap<usize, LevelRecord>,
}

impl Default for ExcitedStateLedger {
    fn default() -> Self {
        Self::new(DEFAULT_SHIFT_ENERGY)
    }
}

impl ExcitedStateLedger {
    pub fn new(shift_energy: f64) -> Self {
        ExcitedStateLedger {
            shift_energy,
            levels: HashMap::new(),
        }
    }

    pub fn shift_energy(&self) -> f64 {
        self.shift_energy
    }

    pub fn level(&self, level: usize) -> Option<&LevelRecord> {
        self.levels.get(&level)
    }

    pub fn num_levels(&self) -> usize {
        self.levels.len()
    }

    /// The point a new optimizer run on ``level`` should start from, if the level was
    /// optimized before.
    pub fn resume_point(&self, level: usize) -> Option<&[f64]> {
        self.levels
            .get(&level)
            .and_then(|record| record.optimal_parameters())
    }

    /// Record the outcome of an optimizer run.
    ///
    /// The first run on a level seeds its history with ``initial_cost``. The run's
    /// ``parameters`` become the level's optimum if its final cost is no larger than any cost
    /// seen on the level. Returns whether the optimum was replaced.
    pub fn record_run(
        &mut self,
        level: usize,
        initial_cost: f64,
        run_costs: &[f64],
        parameters: Vec<f64>,
    ) -> Result<bool, LedgerError> {
        let Some(&final_cost) = run_costs.last() else {
            return Err(LedgerError::EmptyRun(level));
        };

        let record = self.levels.entry(level).or_insert_with(|| LevelRecord {
            cost_history: vec![initial_cost],
            optimal_parameters: None,
        });
        record.cost_history.extend_from_slice(run_costs);

        let improved = record
            .best_cost()
            .is_some_and(|best| final_cost <= best);
        if improved {
            debug!(level, cost = final_cost, "new optimal parameters");
            record.optimal_parameters = Some(parameters);
        }
        Ok(improved)
    }

    /// The optimal parameters of every level below ``level``, in order. These are the states
    /// whose overlap with the trial state is penalized.
    pub fn reference_states(&self, level: usize) -> Result<Vec<&[f64]>, LedgerError> {
        (0..level)
            .map(|lower| {
                self.resume_point(lower)
                    .ok_or(LedgerError::MissingLevel(lower))
            })
            .collect()
    }

    /// The cost minimized on ``level``: ``energy + shift_energy * sum(overlaps)``, with one
    /// overlap per lower level.
    pub fn penalized_cost(
        &self,
        level: usize,
        energy: f64,
        overlaps: &[f64],
    ) -> Result<f64, LedgerError> {
        if overlaps.len() != level {
            return Err(LedgerError::OverlapCountMismatch {
                level,
                actual: overlaps.len(),
            });
        }
        self.reference_states(level)?;
        Ok(energy + self.shift_energy * overlaps.iter().sum::<f64>())
    }
}

/// The variance of a penalized cost: the energy variance plus the variances of the overlaps.
pub fn penalized_variance(energy_variance: f64, overlap_variances: &[f64]) -> f64 {
    energy_variance + overlap_variances.iter().sum::<f64>()
}

/// The standard error of a sampled estimate. ``shots == None`` stands for exact evaluation,
/// which has no error, while an estimate from zero shots has an unbounded one.
pub fn standard_error(variance: f64, shots: Option<u32>) -> f64 {
    match shots {
        None => 0.0,
        Some(0) => f64::INFINITY,
        Some(shots) => (variance / shots as f64).sqrt(),
    }
}
