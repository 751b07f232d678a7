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

pub mod entanglement;
pub mod error;
pub mod excited_states;
pub mod feature_map;
pub mod parameter_ledger;

pub use entanglement::{enumerate_topology, EntanglementPattern};
pub use error::{AnsatzError, LedgerError, TopologyError};
pub use feature_map::{FeatureMapAnsatz, FeatureMapConfig};
pub use parameter_ledger::count_parameters;
