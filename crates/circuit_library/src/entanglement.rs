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

use std::fmt;
use std::str::FromStr;

use itertools::{Either, Itertools};
use tracing::debug;

use crate::error::TopologyError;

/// The rule deciding which chains of qubits are coupled in one entangling block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntanglementPattern {
    Linear,
    Circular,
    Full,
}

impl EntanglementPattern {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Circular => "circular",
            Self::Full => "full",
        }
    }

    /// Enumerate the interaction chains of one entangling block.
    ///
    /// Each chain is a sequence of qubit indices of length ``2..=max_length + 1``. Neighbouring
    /// elements are distinct and coupled; only a circular chain that closes the ring repeats its
    /// first qubit at the end. The last element carries the trainable rotation.
    /// The order of the chains is the order in which the gates are laid down, and therefore
    /// also the order in which parameters are handed out.
    pub fn interactions(self, max_length: u32, num_qubits: u32) -> Vec<Vec<u32>> {
        let interactions: Vec<Vec<u32>> = match self {
            Self::Linear => linear(num_qubits, max_length).collect(),
            Self::Circular => circular(num_qubits, max_length).collect(),
            Self::Full => full(num_qubits, max_length).collect(),
        };
        debug!(
            pattern = self.as_str(),
            max_length,
            num_qubits,
            num_interactions = interactions.len(),
            "enumerated entanglement topology"
        );
        interactions
    }
}

impl FromStr for EntanglementPattern {
    type Err = TopologyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linear" => Ok(Self::Linear),
            "circular" => Ok(Self::Circular),
            "full" => Ok(Self::Full),
            _ => Err(TopologyError::InvalidTopology(s.to_string())),
        }
    }
}

impl fmt::Display for EntanglementPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Chains of consecutive qubits, shortest chains first. For 4 qubits and length 2:
/// [(0, 1), (1, 2), (2, 3), (0, 1, 2), (1, 2, 3)]
fn linear(num_qubits: u32, max_length: u32) -> impl Iterator<Item = Vec<u32>> {
    (1..=max_length.min(num_qubits)).flat_map(move |length| {
        (0..num_qubits.saturating_sub(1))
            .filter(move |start| start + length < num_qubits)
            .map(move |start| (start..=start + length).collect())
    })
}

/// Like linear, but chains may run over the last qubit back to the first one. For 4 qubits
/// and length 2:
/// [(0, 1), (1, 2), (2, 3), (3, 0), (0, 1, 2), (1, 2, 3), (2, 3, 0)]
fn circular(num_qubits: u32, max_length: u32) -> impl Iterator<Item = Vec<u32>> {
    // a chain with ``num_qubits`` links closes the ring and ends on the qubit it started from
    let max_length = if num_qubits < 2 {
        0
    } else {
        max_length.min(num_qubits)
    };
    (1..=max_length).flat_map(move |length| {
        (0..num_qubits)
            .filter(move |start| start + length <= num_qubits)
            .map(move |start| {
                (start..=start + length)
                    .map(|index| index % num_qubits)
                    .collect()
            })
    })
}

/// Every ascending chain from ``first`` to ``last``, with any subset of the qubits in between
/// as intermediate stops. Chains are ordered by their end points, then by the number of stops,
/// then lexicographically. For 3 qubits and length 2:
/// [(0, 1), (0, 2), (0, 1, 2), (1, 2)]
fn full(num_qubits: u32, max_length: u32) -> impl Iterator<Item = Vec<u32>> {
    let max_length = max_length as usize;
    (0..num_qubits)
        .tuple_combinations()
        .flat_map(move |(first, last)| {
            (0..(last - first) as usize)
                .take_while(move |&stops| stops < max_length)
                .flat_map(move |stops| {
                    if stops == 0 {
                        Either::Left(std::iter::once(vec![first, last]))
                    } else {
                        Either::Right((first + 1..last).combinations(stops).map(
                            move |between| {
                                let mut chain = Vec::with_capacity(stops + 2);
                                chain.push(first);
                                chain.extend(between);
                                chain.push(last);
                                chain
                            },
                        ))
                    }
                })
        })
}

/// Get the interaction chains of one entangling block.
///
/// Args:
///     entanglement: The entanglement pattern as string, one of ``"linear"``, ``"circular"``
///         or ``"full"``.
///     max_length: The maximal number of links in a chain, i.e. chains couple at most
///         ``max_length + 1`` qubits.
///     num_qubits: The number of qubits in the circuit.
///
/// Returns:
///     The ordered interaction chains.
///
/// Raises:
///     TopologyError: If the pattern is not known.
pub fn enumerate_topology(
    entanglement: &str,
    max_length: u32,
    num_qubits: u32,
) -> Result<Vec<Vec<u32>>, TopologyError> {
    let pattern: EntanglementPattern = entanglement.parse()?;
    Ok(pattern.interactions(max_length, num_qubits))
}
