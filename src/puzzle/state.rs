//! Ordered tuple representation for split/join puzzles

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An ordered tuple of positive integers.
///
/// Equality and hashing are positional, so `(3, 5)` and `(5, 3)` are
/// different states.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct State {
    values: Vec<u32>,
}

impl State {
    /// Create a state from its values
    pub fn new(values: Vec<u32>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[u32] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get the value at a position
    pub fn get(&self, index: usize) -> Option<u32> {
        self.values.get(index).copied()
    }

    /// Total mass of the tuple. Preserved by every split and join.
    pub fn sum(&self) -> u64 {
        self.values.iter().map(|&v| u64::from(v)).sum()
    }

    /// Largest value in the tuple
    pub fn max(&self) -> Option<u32> {
        self.values.iter().copied().max()
    }

    /// The same values in reverse order
    pub fn reversed(&self) -> Self {
        Self::new(self.values.iter().rev().copied().collect())
    }

    /// Check whether any two positions hold the same value
    pub fn has_duplicates(&self) -> bool {
        self.values.iter().duplicates().next().is_some()
    }

    /// Check whether any value is greater than `vmax`
    pub fn exceeds(&self, vmax: u32) -> bool {
        self.values.iter().any(|&v| v > vmax)
    }

    /// Render the tuple the way it is shown in reports: `(3, 5, 7)`, `(1,)`
    pub fn to_tuple_string(&self) -> String {
        match self.values.as_slice() {
            [single] => format!("({},)", single),
            values => format!("({})", values.iter().join(", ")),
        }
    }
}

impl From<Vec<u32>> for State {
    fn from(values: Vec<u32>) -> Self {
        Self::new(values)
    }
}

impl From<&[u32]> for State {
    fn from(values: &[u32]) -> Self {
        Self::new(values.to_vec())
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // pad so that width specifiers line up report columns
        f.pad(&self.to_tuple_string())
    }
}
