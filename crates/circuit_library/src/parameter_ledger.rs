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

use std::ops::Range;

use tracing::warn;

use crate::entanglement::enumerate_topology;

/// Enum to determine the type of circuit layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerType {
    Rotation,
    Entangle,
}

/// The ParameterLedger knows which slots of the flat parameter vector belong to which layer
/// of the feature-map ansatz.
///
/// The parameters are stored in a 1-D vector, with the rotation and the entanglement block of
/// each repetition following each other. For example, 2 qubits with a single interaction and
/// no full rotation use
///
///     [x0 x1 x2 x3 x4 x5 ....]
///      ----- -- ----- --
///      rep0  r0 rep1  r1
///      rot   ent rot  ent
///
/// In symmetric mode every block holds exactly one shared parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterLedger {
    num_parameters: usize,
    rotation_indices: Vec<usize>, // indices where rotation blocks start
    entangle_indices: Vec<usize>,
    rotation_params_per_layer: usize,
    entangle_params_per_layer: usize,
}

impl ParameterLedger {
    /// Lay out the parameters of a feature-map ansatz.
    ///
    /// ``num_interactions`` is the number of interaction chains in one entangling block; it is
    /// ignored in symmetric mode, where the block shares a single parameter.
    pub fn from_feature_map(
        num_qubits: u32,
        reps: usize,
        num_interactions: usize,
        full_rotation: bool,
        symmetric: bool,
        entangle: bool,
    ) -> Self {
        let gates_per_qubit = if full_rotation { 3 } else { 1 };
        let (rotation_params_per_layer, entangle_params_per_layer) = match (symmetric, entangle) {
            (true, true) => (1, 1),
            (true, false) => (1, 0),
            (false, true) => (gates_per_qubit * num_qubits as usize, num_interactions),
            (false, false) => (gates_per_qubit * num_qubits as usize, 0),
        };

        let mut rotation_indices: Vec<usize> = Vec::with_capacity(reps);
        let mut entangle_indices: Vec<usize> = Vec::with_capacity(reps);
        let mut index: usize = 0;
        for _ in 0..reps {
            rotation_indices.push(index);
            index += rotation_params_per_layer;
            entangle_indices.push(index);
            index += entangle_params_per_layer;
        }

        ParameterLedger {
            num_parameters: index,
            rotation_indices,
            entangle_indices,
            rotation_params_per_layer,
            entangle_params_per_layer,
        }
    }

    /// The total number of free parameters.
    pub fn num_parameters(&self) -> usize {
        self.num_parameters
    }

    /// Get the slots of the flat parameter vector used by the rotation or entanglement block
    /// of ``layer``, or ``None`` if the layer does not exist.
    pub fn get_parameters(&self, kind: LayerType, layer: usize) -> Option<Range<usize>> {
        let (indices, per_layer) = match kind {
            LayerType::Rotation => (&self.rotation_indices, self.rotation_params_per_layer),
            LayerType::Entangle => (&self.entangle_indices, self.entangle_params_per_layer),
        };
        indices.get(layer).map(|start| *start..*start + per_layer)
    }

    /// The first slot of the rotation or entanglement block of ``layer``.
    ///
    /// Panics if ``layer`` is not one of the ledger's layers.
    pub fn block_start(&self, kind: LayerType, layer: usize) -> usize {
        match kind {
            LayerType::Rotation => self.rotation_indices[layer],
            LayerType::Entangle => self.entangle_indices[layer],
        }
    }
}

/// Compute the number of free parameters of a feature-map ansatz.
///
/// Args:
///     num_qubits: The number of qubits.
///     reps: The number of layers.
///     max_length: The maximal interaction length, see [enumerate_topology].
///     entanglement: The entanglement pattern as string.
///     symmetric: Whether every block of a layer shares a single parameter, in which case each
///         layer has exactly 2 parameters.
///     full_rotation: Whether every qubit is rotated about three axes instead of one.
///
/// Returns:
///     ``((1 + 2 * full_rotation) * num_qubits + num_interactions) * reps``, or ``2 * reps`` in
///     symmetric mode.
///
/// This never fails. If ``entanglement`` is not a known pattern, the entangling block is
/// counted as holding a single parameter and a warning is emitted. Callers which need the
/// error should call [enumerate_topology] themselves.
pub fn count_parameters(
    num_qubits: u32,
    reps: usize,
    max_length: u32,
    entanglement: &str,
    symmetric: bool,
    full_rotation: bool,
) -> usize {
    let num_interactions = if symmetric {
        1
    } else {
        match enumerate_topology(entanglement, max_length, num_qubits) {
            Ok(interactions) => interactions.len(),
            Err(err) => {
                warn!(%err, "counting a single interaction parameter per layer");
                1
            }
        }
    };
    ParameterLedger::from_feature_map(
        num_qubits,
        reps,
        num_interactions,
        full_rotation,
        symmetric,
        true,
    )
    .num_parameters()
}
