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

use std::f64::consts::FRAC_PI_2;
use std::fmt;
use std::str::FromStr;

use itertools::Either;
use smallvec::{smallvec, SmallVec};

use crate::entanglement::EntanglementPattern;
use crate::error::{AnsatzError, TopologyError};
use crate::parameter_ledger::{LayerType, ParameterLedger};

/// The gates a feature-map ansatz is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnsatzGate {
    H,
    RX,
    RY,
    RZ,
    CX,
}

impl AnsatzGate {
    pub fn name(&self) -> &'static str {
        match self {
            Self::H => "h",
            Self::RX => "rx",
            Self::RY => "ry",
            Self::RZ => "rz",
            Self::CX => "cx",
        }
    }
}

/// A gate angle: either a slot of the flat parameter vector, or a constant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnsatzParam {
    Trainable(usize),
    Fixed(f64),
}

pub type AnsatzInstruction = (AnsatzGate, SmallVec<[AnsatzParam; 1]>, SmallVec<[u32; 2]>);
pub type BoundInstruction = (AnsatzGate, SmallVec<[f64; 1]>, SmallVec<[u32; 2]>);

/// The Pauli basis of the trainable coupling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InteractionBasis {
    X,
    Y,
    Z,
}

impl InteractionBasis {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Z => "z",
        }
    }
}

impl FromStr for InteractionBasis {
    type Err = TopologyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x" => Ok(Self::X),
            "y" => Ok(Self::Y),
            "z" => Ok(Self::Z),
            _ => Err(TopologyError::InvalidInteractionBasis(s.to_string())),
        }
    }
}

impl fmt::Display for InteractionBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which single-qubit rotation opens each qubit's rotation block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotationScheme {
    /// ``RY`` on every qubit.
    Y,
    /// ``RX``, ``RY``, ``RZ`` on qubits ``0, 1, 2 (mod 3)``.
    Cyclic,
}

/// Shape of a feature-map ansatz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureMapConfig {
    pub num_qubits: u32,
    pub reps: usize,
    pub entanglement: EntanglementPattern,
    pub interaction_basis: InteractionBasis,
    pub interaction_length: u32,
    /// Rotate about three axes (``RY RX RY``) instead of one.
    pub full_rotation: bool,
    /// Share one parameter between all rotations, and one between all interactions, of a layer.
    pub symmetric: bool,
    pub rotation_scheme: RotationScheme,
    /// Whether the trainable entangling block is emitted at all.
    pub entangle: bool,
}

impl FeatureMapConfig {
    /// A configuration with the usual defaults: full entanglement of length 2 in the Z basis,
    /// a single ``RY`` per qubit and independent parameters.
    pub fn new(num_qubits: u32, reps: usize) -> Self {
        FeatureMapConfig {
            num_qubits,
            reps,
            entanglement: EntanglementPattern::Full,
            interaction_basis: InteractionBasis::Z,
            interaction_length: 2,
            full_rotation: false,
            symmetric: false,
            rotation_scheme: RotationScheme::Y,
            entangle: true,
        }
    }

    /// Like [FeatureMapConfig::new], with the entanglement pattern and interaction basis given
    /// by name.
    pub fn from_names(
        num_qubits: u32,
        reps: usize,
        entanglement: &str,
        interaction_basis: &str,
        interaction_length: u32,
    ) -> Result<Self, TopologyError> {
        Ok(FeatureMapConfig {
            entanglement: entanglement.parse()?,
            interaction_basis: interaction_basis.parse()?,
            interaction_length,
            ..FeatureMapConfig::new(num_qubits, reps)
        })
    }

    fn rotation_gates_per_qubit(&self) -> usize {
        if self.full_rotation {
            3
        } else {
            1
        }
    }
}

/// A feature-map ansatz: layers of single-qubit rotations followed by trainable couplings
/// along the chains of an entanglement topology.
///
/// The ansatz only describes the circuit. [FeatureMapAnsatz::instructions] yields the gates
/// together with the slot of the flat parameter vector each angle is read from, and
/// [FeatureMapAnsatz::assign_parameters] binds such a vector after checking its length.
#[derive(Debug, Clone)]
pub struct FeatureMapAnsatz {
    config: FeatureMapConfig,
    interactions: Vec<Vec<u32>>,
    ledger: ParameterLedger,
}

impl FeatureMapAnsatz {
    pub fn new(config: FeatureMapConfig) -> Self {
        let interactions = config
            .entanglement
            .interactions(config.interaction_length, config.num_qubits);
        let ledger = ParameterLedger::from_feature_map(
            config.num_qubits,
            config.reps,
            interactions.len(),
            config.full_rotation,
            config.symmetric,
            config.entangle,
        );
        FeatureMapAnsatz {
            config,
            interactions,
            ledger,
        }
    }

    pub fn config(&self) -> &FeatureMapConfig {
        &self.config
    }

    /// The interaction chains of one entangling block, in gate order.
    pub fn interactions(&self) -> &[Vec<u32>] {
        &self.interactions
    }

    pub fn ledger(&self) -> &ParameterLedger {
        &self.ledger
    }

    pub fn num_parameters(&self) -> usize {
        self.ledger.num_parameters()
    }

    /// Circuit name, e.g. ``full_z_2``.
    pub fn name(&self) -> String {
        format!(
            "{}_{}_{}",
            self.config.entanglement,
            self.config.interaction_basis,
            self.config.interaction_length
        )
    }

    /// Iterate over the instructions of the whole ansatz, layer by layer.
    pub fn instructions(&self) -> impl Iterator<Item = AnsatzInstruction> + '_ {
        (0..self.config.reps).flat_map(move |layer| {
            self.rotation_layer(layer).chain(self.entanglement_layer(layer))
        })
    }

    /// Bind a flat parameter vector to the instructions.
    pub fn assign_parameters(
        &self,
        values: &[f64],
    ) -> Result<Vec<BoundInstruction>, AnsatzError> {
        let mismatch = AnsatzError::ParameterCountMismatch {
            expected: self.num_parameters(),
            actual: values.len(),
        };
        if values.len() != self.num_parameters() {
            return Err(mismatch);
        }

        self.instructions()
            .map(|(gate, params, qubits)| -> Result<BoundInstruction, AnsatzError> {
                let bound = params
                    .iter()
                    .map(|param| match param {
                        AnsatzParam::Trainable(index) => values.get(*index).copied(),
                        AnsatzParam::Fixed(angle) => Some(*angle),
                    })
                    .collect::<Option<SmallVec<[f64; 1]>>>()
                    .ok_or_else(|| mismatch.clone())?;
                Ok((gate, bound, qubits))
            })
            .collect()
    }

    /// Construct the rotation block of ``layer``.
    fn rotation_layer(&self, layer: usize) -> impl Iterator<Item = AnsatzInstruction> + '_ {
        let start = self.ledger.block_start(LayerType::Rotation, layer);
        let symmetric = self.config.symmetric;
        let per_qubit = self.config.rotation_gates_per_qubit();

        (0..self.config.num_qubits).flat_map(move |qubit| {
            self.rotation_gates(qubit)
                .into_iter()
                .enumerate()
                .map(move |(offset, gate)| -> AnsatzInstruction {
                    let index = if symmetric {
                        start
                    } else {
                        start + qubit as usize * per_qubit + offset
                    };
                    (
                        gate,
                        smallvec![AnsatzParam::Trainable(index)],
                        smallvec![qubit],
                    )
                })
        })
    }

    fn rotation_gates(&self, qubit: u32) -> SmallVec<[AnsatzGate; 3]> {
        let mut gates: SmallVec<[AnsatzGate; 3]> = match self.config.rotation_scheme {
            RotationScheme::Y => smallvec![AnsatzGate::RY],
            RotationScheme::Cyclic => match qubit % 3 {
                0 => smallvec![AnsatzGate::RX],
                1 => smallvec![AnsatzGate::RY],
                _ => smallvec![AnsatzGate::RZ],
            },
        };
        if self.config.full_rotation {
            gates.push(AnsatzGate::RX);
            gates.push(AnsatzGate::RY);
        }
        gates
    }

    /// Construct the entangling block of ``layer``. Each chain ``(q0, ..., qk)`` becomes a
    /// ladder of CX gates up to ``qk``, an RZ on ``qk`` and the same ladder back down:
    ///
    /// q0: ──■───────────────────■──
    ///     ┌─┴─┐               ┌─┴─┐
    /// q1: ┤ X ├──■─────────■──┤ X ├
    ///     └───┘┌─┴─┐┌─────┐┌─┴─┐└───┘
    /// q2: ─────┤ X ├┤ Rz  ├┤ X ├─────
    ///          └───┘└─────┘└───┘
    fn entanglement_layer(&self, layer: usize) -> impl Iterator<Item = AnsatzInstruction> + '_ {
        if !self.config.entangle {
            return Either::Left(std::iter::empty::<AnsatzInstruction>());
        }

        let start = self.ledger.block_start(LayerType::Entangle, layer);
        let symmetric = self.config.symmetric;

        let couplings = self
            .interactions
            .iter()
            .enumerate()
            .flat_map(move |(i, chain)| {
                let index = if symmetric { start } else { start + i };
                let target = chain[chain.len() - 1];
                let rz: AnsatzInstruction = (
                    AnsatzGate::RZ,
                    smallvec![AnsatzParam::Trainable(index)],
                    smallvec![target],
                );
                chain
                    .windows(2)
                    .map(cx)
                    .chain(std::iter::once(rz))
                    .chain(chain.windows(2).rev().map(cx))
            });

        Either::Right(
            self.basis_change(false)
                .chain(couplings)
                .chain(self.basis_change(true)),
        )
    }

    /// Map the interaction basis onto Z, or back if ``inverse``.
    fn basis_change(&self, inverse: bool) -> impl Iterator<Item = AnsatzInstruction> {
        let basis = self.config.interaction_basis;
        let angle = if inverse { -FRAC_PI_2 } else { FRAC_PI_2 };
        let num_qubits = match basis {
            InteractionBasis::Z => 0,
            _ => self.config.num_qubits,
        };
        (0..num_qubits).map(move |qubit| -> AnsatzInstruction {
            match basis {
                InteractionBasis::Y => (
                    AnsatzGate::RX,
                    smallvec![AnsatzParam::Fixed(angle)],
                    smallvec![qubit],
                ),
                _ => (AnsatzGate::H, smallvec![], smallvec![qubit]),
            }
        })
    }
}

fn cx(pair: &[u32]) -> AnsatzInstruction {
    (AnsatzGate::CX, smallvec![], smallvec![pair[0], pair[1]])
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;

    fn trainable(index: usize) -> SmallVec<[AnsatzParam; 1]> {
        smallvec![AnsatzParam::Trainable(index)]
    }

    #[test]
    fn two_qubit_layer() {
        let config = FeatureMapConfig {
            entanglement: EntanglementPattern::Linear,
            interaction_length: 1,
            ..FeatureMapConfig::new(2, 1)
        };
        let ansatz = FeatureMapAnsatz::new(config);
        let instructions: Vec<AnsatzInstruction> = ansatz.instructions().collect();
        let expected: Vec<AnsatzInstruction> = vec![
            (AnsatzGate::RY, trainable(0), smallvec![0]),
            (AnsatzGate::RY, trainable(1), smallvec![1]),
            (AnsatzGate::CX, smallvec![], smallvec![0, 1]),
            (AnsatzGate::RZ, trainable(2), smallvec![1]),
            (AnsatzGate::CX, smallvec![], smallvec![0, 1]),
        ];
        assert_eq!(instructions, expected);
        assert_eq!(ansatz.num_parameters(), 3);
    }

    #[test]
    fn chain_ladder() {
        let config = FeatureMapConfig {
            entanglement: EntanglementPattern::Linear,
            ..FeatureMapConfig::new(3, 1)
        };
        let ansatz = FeatureMapAnsatz::new(config);
        // skip the rotations and the two 2-qubit chains
        let last: Vec<AnsatzInstruction> = ansatz.instructions().skip(3 + 2 * 3).collect();
        let expected: Vec<AnsatzInstruction> = vec![
            (AnsatzGate::CX, smallvec![], smallvec![0, 1]),
            (AnsatzGate::CX, smallvec![], smallvec![1, 2]),
            (AnsatzGate::RZ, trainable(5), smallvec![2]),
            (AnsatzGate::CX, smallvec![], smallvec![1, 2]),
            (AnsatzGate::CX, smallvec![], smallvec![0, 1]),
        ];
        assert_eq!(last, expected);
    }

    #[test]
    fn full_rotation_order() {
        let config = FeatureMapConfig {
            full_rotation: true,
            entangle: false,
            ..FeatureMapConfig::new(2, 2)
        };
        let ansatz = FeatureMapAnsatz::new(config);
        let instructions: Vec<AnsatzInstruction> = ansatz.instructions().collect();
        let gates: Vec<AnsatzGate> = instructions.iter().map(|inst| inst.0).collect();
        assert_eq!(
            gates[..6],
            [
                AnsatzGate::RY,
                AnsatzGate::RX,
                AnsatzGate::RY,
                AnsatzGate::RY,
                AnsatzGate::RX,
                AnsatzGate::RY
            ]
        );
        let indices: Vec<AnsatzParam> = instructions.iter().map(|inst| inst.1[0]).collect();
        assert_eq!(
            indices,
            (0..12).map(AnsatzParam::Trainable).collect::<Vec<_>>()
        );
        assert_eq!(ansatz.num_parameters(), 12);
    }

    #[test]
    fn symmetric_shares_parameters() {
        let config = FeatureMapConfig {
            symmetric: true,
            full_rotation: true,
            ..FeatureMapConfig::new(3, 2)
        };
        let ansatz = FeatureMapAnsatz::new(config);
        assert_eq!(ansatz.num_parameters(), 4);

        let mut used: Vec<(AnsatzGate, usize)> = ansatz
            .instructions()
            .filter_map(|(gate, params, _)| match params.first() {
                Some(AnsatzParam::Trainable(index)) => Some((gate, *index)),
                _ => None,
            })
            .collect();
        used.dedup();
        assert_eq!(
            used,
            vec![
                (AnsatzGate::RY, 0),
                (AnsatzGate::RX, 0),
                (AnsatzGate::RY, 0),
                (AnsatzGate::RX, 0),
                (AnsatzGate::RY, 0),
                (AnsatzGate::RX, 0),
                (AnsatzGate::RY, 0),
                (AnsatzGate::RZ, 1),
                (AnsatzGate::RY, 2),
                (AnsatzGate::RX, 2),
                (AnsatzGate::RY, 2),
                (AnsatzGate::RX, 2),
                (AnsatzGate::RY, 2),
                (AnsatzGate::RX, 2),
                (AnsatzGate::RY, 2),
                (AnsatzGate::RZ, 3),
            ]
        );
    }

    #[test]
    fn cyclic_rotation_scheme() {
        let config = FeatureMapConfig {
            rotation_scheme: RotationScheme::Cyclic,
            entangle: false,
            ..FeatureMapConfig::new(4, 1)
        };
        let gates: Vec<AnsatzGate> = FeatureMapAnsatz::new(config)
            .instructions()
            .map(|inst| inst.0)
            .collect();
        assert_eq!(
            gates,
            vec![
                AnsatzGate::RX,
                AnsatzGate::RY,
                AnsatzGate::RZ,
                AnsatzGate::RX
            ]
        );
    }

    #[test]
    fn x_basis_is_wrapped_in_hadamards() {
        let config = FeatureMapConfig {
            interaction_basis: InteractionBasis::X,
            interaction_length: 1,
            ..FeatureMapConfig::new(2, 1)
        };
        let gates: Vec<AnsatzGate> = FeatureMapAnsatz::new(config)
            .instructions()
            .map(|inst| inst.0)
            .collect();
        assert_eq!(
            gates,
            vec![
                AnsatzGate::RY,
                AnsatzGate::RY,
                AnsatzGate::H,
                AnsatzGate::H,
                AnsatzGate::CX,
                AnsatzGate::RZ,
                AnsatzGate::CX,
                AnsatzGate::H,
                AnsatzGate::H,
            ]
        );
    }

    #[test]
    fn y_basis_change_is_undone() {
        let config = FeatureMapConfig {
            interaction_basis: InteractionBasis::Y,
            interaction_length: 1,
            ..FeatureMapConfig::new(2, 1)
        };
        let ansatz = FeatureMapAnsatz::new(config);
        let bound = ansatz.assign_parameters(&[0.1, 0.2, 0.3]).unwrap();
        assert_eq!(bound.len(), 2 + 2 + 3 + 2);
        assert_eq!(bound[2].0, AnsatzGate::RX);
        assert_relative_eq!(bound[2].1[0], FRAC_PI_2);
        assert_eq!(bound[8].0, AnsatzGate::RX);
        assert_relative_eq!(bound[8].1[0], -FRAC_PI_2);
        assert_relative_eq!(bound[5].1[0], 0.3);
    }

    #[test]
    fn assign_parameters_checks_length() {
        let ansatz = FeatureMapAnsatz::new(FeatureMapConfig::new(3, 2));
        assert_eq!(ansatz.num_parameters(), 14);
        assert_eq!(
            ansatz.assign_parameters(&[0.0; 13]).unwrap_err(),
            AnsatzError::ParameterCountMismatch {
                expected: 14,
                actual: 13
            }
        );
        assert!(ansatz.assign_parameters(&[0.0; 15]).is_err());

        let values: Vec<f64> = (0..14).map(|i| i as f64).collect();
        let bound = ansatz.assign_parameters(&values).unwrap();
        assert_relative_eq!(bound[0].1[0], 0.0);
        assert_relative_eq!(bound[1].1[0], 1.0);
        assert_relative_eq!(bound[2].1[0], 2.0);
        let first_cx: BoundInstruction = (AnsatzGate::CX, smallvec![], smallvec![0, 1]);
        assert_eq!(bound[3], first_cx);
    }

    #[test]
    fn names() {
        let ansatz = FeatureMapAnsatz::new(FeatureMapConfig::new(3, 1));
        assert_eq!(ansatz.name(), "full_z_2");
        let config = FeatureMapConfig::from_names(4, 1, "circular", "x", 3).unwrap();
        assert_eq!(FeatureMapAnsatz::new(config).name(), "circular_x_3");
        assert_eq!(
            FeatureMapConfig::from_names(4, 1, "circular", "w", 3),
            Err(TopologyError::InvalidInteractionBasis("w".to_string()))
        );
        assert_eq!(
            FeatureMapConfig::from_names(4, 1, "ring", "x", 3),
            Err(TopologyError::InvalidTopology("ring".to_string()))
        );
    }
}
