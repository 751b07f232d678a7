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

use thiserror::Error;

/// Errors raised while resolving an entanglement topology.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TopologyError {
    #[error("Unsupported entanglement: {0}")]
    InvalidTopology(String),
    #[error("Unsupported interaction basis: {0}")]
    InvalidInteractionBasis(String),
}

/// Errors raised while building or binding a feature-map ansatz.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnsatzError {
    #[error("ansatz needs {expected} parameters, but {actual} were given")]
    ParameterCountMismatch { expected: usize, actual: usize },
}

/// Errors raised by the excited-state bookkeeping.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("an optimizer run on level {0} must report at least one cost")]
    EmptyRun(usize),
    #[error("level {0} has no optimal parameters yet")]
    MissingLevel(usize),
    #[error("level {level} needs one overlap per lower level ({level}), got {actual}")]
    OverlapCountMismatch { level: usize, actual: usize },
}
