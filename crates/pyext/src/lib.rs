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

use pyo3::create_exception;
use pyo3::exceptions::PyException;
use pyo3::prelude::*;

use vqe_circuit_library::feature_map::{AnsatzParam, FeatureMapAnsatz, FeatureMapConfig};
use vqe_circuit_library::{count_parameters, enumerate_topology, TopologyError};

create_exception!(_accelerate.circuit_library, InvalidTopologyError, PyException);

/// Gate name, trainable parameter index, fixed angle and qubits of one instruction.
type PyAnsatzInstruction = (&'static str, Option<usize>, Option<f64>, Vec<u32>);

fn topology_error(err: TopologyError) -> PyErr {
    InvalidTopologyError::new_err(err.to_string())
}

/// Get the interaction chains of one entangling block.
///
/// Args:
///     entanglement: The entanglement pattern, one of ``"linear"``, ``"circular"`` or ``"full"``.
///     interaction_length: The maximal number of links in a chain.
///     num_qubits: The number of qubits.
///
/// Returns:
///     The interaction chains as list of lists of qubit indices, in gate order.
///
/// Raises:
///     InvalidTopologyError: If the entanglement pattern is not known.
#[pyfunction]
#[pyo3(signature = (entanglement, interaction_length, num_qubits))]
fn entangler_topology(
    entanglement: &str,
    interaction_length: u32,
    num_qubits: u32,
) -> PyResult<Vec<Vec<u32>>> {
    enumerate_topology(entanglement, interaction_length, num_qubits).map_err(topology_error)
}

/// Compute the number of free parameters of a feature-map ansatz. Unknown entanglement
/// patterns are counted as a single interaction per layer.
#[pyfunction]
#[pyo3(signature = (num_qubits, reps, interaction_length, entanglement="full", symmetric=false, full_rotation=false))]
fn num_parameters(
    num_qubits: u32,
    reps: usize,
    interaction_length: u32,
    entanglement: &str,
    symmetric: bool,
    full_rotation: bool,
) -> usize {
    count_parameters(
        num_qubits,
        reps,
        interaction_length,
        entanglement,
        symmetric,
        full_rotation,
    )
}

/// Get the instructions of a feature-map ansatz.
///
/// Returns:
///     A list of ``(name, parameter_index, angle, qubits)`` tuples. ``parameter_index`` is set
///     for trainable gates and indexes the flat parameter vector, ``angle`` is set for gates
///     with a fixed angle.
#[pyfunction]
#[pyo3(signature = (num_qubits, reps, entanglement="full", interaction_basis="z", interaction_length=2, full_rotation=false, symmetric=false, entangle=true))]
#[allow(clippy::too_many_arguments)]
fn feature_map_instructions(
    num_qubits: u32,
    reps: usize,
    entanglement: &str,
    interaction_basis: &str,
    interaction_length: u32,
    full_rotation: bool,
    symmetric: bool,
    entangle: bool,
) -> PyResult<Vec<PyAnsatzInstruction>> {
    let config = FeatureMapConfig {
        full_rotation,
        symmetric,
        entangle,
        ..FeatureMapConfig::from_names(
            num_qubits,
            reps,
            entanglement,
            interaction_basis,
            interaction_length,
        )
        .map_err(topology_error)?
    };
    let ansatz = FeatureMapAnsatz::new(config);
    Ok(ansatz
        .instructions()
        .map(|(gate, params, qubits)| {
            let (index, angle) = match params.first() {
                Some(AnsatzParam::Trainable(index)) => (Some(*index), None),
                Some(AnsatzParam::Fixed(angle)) => (None, Some(*angle)),
                None => (None, None),
            };
            (gate.name(), index, angle, qubits.into_vec())
        })
        .collect())
}

pub fn circuit_library(m: &Bound<PyModule>) -> PyResult<()> {
    m.add(
        "InvalidTopologyError",
        m.py().get_type_bound::<InvalidTopologyError>(),
    )?;
    m.add_wrapped(wrap_pyfunction!(entangler_topology))?;
    m.add_wrapped(wrap_pyfunction!(num_parameters))?;
    m.add_wrapped(wrap_pyfunction!(feature_map_instructions))?;
    Ok(())
}

#[inline(always)]
#[doc(hidden)]
fn add_submodule<F>(m: &Bound<PyModule>, constructor: F, name: &str) -> PyResult<()>
where
    F: FnOnce(&Bound<PyModule>) -> PyResult<()>,
{
    let new_mod = PyModule::new_bound(m.py(), name)?;
    constructor(&new_mod)?;
    m.add_submodule(&new_mod)
}

#[pymodule]
fn _accelerate(m: &Bound<PyModule>) -> PyResult<()> {
    add_submodule(m, circuit_library, "circuit_library")?;
    Ok(())
}
