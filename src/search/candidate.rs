//! Search-tree nodes and the split/join transformations

use crate::puzzle::State;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;
use thiserror::Error;

/// Contract violations when applying a move to a state
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("position {index} is out of range for a tuple of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("cannot split {value} keeping {keep}: keep must lie strictly between 0 and {value}")]
    SplitOutOfRange { value: u32, keep: u32 },

    #[error("cannot join position {index}: it is the last of {len} positions")]
    NoRightNeighbour { index: usize, len: usize },

    #[error("expected {expected} at position {index}, found {found}")]
    ValueMismatch { index: usize, expected: u32, found: u32 },

    #[error("cannot join {left} and {right}: the sum does not fit in a u32")]
    SumOverflow { left: u32, right: u32 },
}

/// The move that produced a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Move {
    Begin,
    /// `value` at `index` becomes `keep, value - keep`
    Split { index: usize, value: u32, keep: u32 },
    /// `left, right` at `index, index + 1` become `left + right`
    Join { index: usize, left: u32, right: u32 },
}

impl Move {
    /// Describe splitting the value at `index` of `state`, checking preconditions
    pub fn split(state: &State, index: usize, keep: u32) -> Result<Self, MoveError> {
        let value = value_at(state, index)?;
        if keep == 0 || keep >= value {
            return Err(MoveError::SplitOutOfRange { value, keep });
        }
        Ok(Move::Split { index, value, keep })
    }

    /// Describe joining positions `index` and `index + 1` of `state`
    pub fn join(state: &State, index: usize) -> Result<Self, MoveError> {
        let left = value_at(state, index)?;
        let right = state.get(index + 1).ok_or(MoveError::NoRightNeighbour {
            index,
            len: state.len(),
        })?;
        checked_sum(left, right)?;
        Ok(Move::Join { index, left, right })
    }

    /// Apply this move to `state`, producing a new state.
    ///
    /// The values recorded in the move must match the state they are applied to.
    pub fn apply(&self, state: &State) -> Result<State, MoveError> {
        match *self {
            Move::Begin => Ok(state.clone()),
            Move::Split { index, value, keep } => {
                expect_value(state, index, value)?;
                if keep == 0 || keep >= value {
                    return Err(MoveError::SplitOutOfRange { value, keep });
                }
                let values = state.values();
                let mut next = Vec::with_capacity(values.len() + 1);
                next.extend_from_slice(&values[..index]);
                next.push(keep);
                next.push(value - keep);
                next.extend_from_slice(&values[index + 1..]);
                Ok(State::new(next))
            }
            Move::Join { index, left, right } => {
                expect_value(state, index, left)?;
                if index + 1 >= state.len() {
                    return Err(MoveError::NoRightNeighbour { index, len: state.len() });
                }
                expect_value(state, index + 1, right)?;
                let sum = checked_sum(left, right)?;
                let values = state.values();
                let mut next = Vec::with_capacity(values.len() - 1);
                next.extend_from_slice(&values[..index]);
                next.push(sum);
                next.extend_from_slice(&values[index + 2..]);
                Ok(State::new(next))
            }
        }
    }

    /// Report label, e.g. `split 7   -> 4,3` or `join  2,5 -> 7`
    pub fn label(&self) -> String {
        match *self {
            Move::Begin => "begin".to_string(),
            Move::Split { value, keep, .. } => {
                format!("split {}   -> {},{}", value, keep, value - keep)
            }
            Move::Join { left, right, .. } => {
                format!("join  {},{} -> {}", left, right, u64::from(left) + u64::from(right))
            }
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.label())
    }
}

fn value_at(state: &State, index: usize) -> Result<u32, MoveError> {
    state.get(index).ok_or(MoveError::IndexOutOfRange {
        index,
        len: state.len(),
    })
}

fn checked_sum(left: u32, right: u32) -> Result<u32, MoveError> {
    left.checked_add(right)
        .ok_or(MoveError::SumOverflow { left, right })
}

fn expect_value(state: &State, index: usize, expected: u32) -> Result<(), MoveError> {
    let found = value_at(state, index)?;
    if found != expected {
        return Err(MoveError::ValueMismatch { index, expected, found });
    }
    Ok(())
}

/// A node of the search tree.
///
/// Candidates are never mutated once built. Each one links to the parent it
/// was derived from, so the path back to the root is shared between siblings
/// and only materialised when asked for.
#[derive(Debug)]
pub struct Candidate {
    state: State,
    step: Move,
    parent: Option<Rc<Candidate>>,
    depth: usize,
}

impl Candidate {
    /// The root of a search, labelled `begin`
    pub fn root(state: State) -> Self {
        Self {
            state,
            step: Move::Begin,
            parent: None,
            depth: 0,
        }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn step(&self) -> Move {
        self.step
    }

    pub fn parent(&self) -> Option<&Candidate> {
        self.parent.as_deref()
    }

    /// Number of moves between the root and this candidate
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Split the value at `index` into `keep` and the remainder
    pub fn split(self: &Rc<Self>, index: usize, keep: u32) -> Result<Candidate, MoveError> {
        let step = Move::split(&self.state, index, keep)?;
        self.derive(step)
    }

    /// Join the values at `index` and `index + 1`
    pub fn join(self: &Rc<Self>, index: usize) -> Result<Candidate, MoveError> {
        let step = Move::join(&self.state, index)?;
        self.derive(step)
    }

    fn derive(self: &Rc<Self>, step: Move) -> Result<Candidate, MoveError> {
        Ok(Candidate {
            state: step.apply(&self.state)?,
            step,
            parent: Some(Rc::clone(self)),
            depth: self.depth + 1,
        })
    }

    /// Ancestors from the direct parent back to the root
    pub fn ancestors(&self) -> impl Iterator<Item = &Candidate> {
        std::iter::successors(self.parent(), |candidate| candidate.parent())
    }

    /// Full path in root-to-leaf order, ending with this candidate
    pub fn path(&self) -> Vec<&Candidate> {
        let mut path: Vec<&Candidate> = Vec::with_capacity(self.depth + 1);
        path.push(self);
        path.extend(self.ancestors());
        path.reverse();
        path
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:18} ===> {:18}", self.step, self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root(values: &[u32]) -> Rc<Candidate> {
        Rc::new(Candidate::root(State::from(values)))
    }

    #[test]
    fn test_split() {
        let parent = root(&[3, 5, 7]);
        let child = parent.split(2, 4).unwrap();

        assert_eq!(child.state(), &State::new(vec![3, 5, 4, 3]));
        assert_eq!(child.step().label(), "split 7   -> 4,3");
        assert_eq!(child.depth(), 1);
        assert_eq!(child.parent().unwrap().state(), parent.state());
        // parent is untouched
        assert_eq!(parent.state(), &State::new(vec![3, 5, 7]));
    }

    #[test]
    fn test_join() {
        let parent = root(&[2, 5, 1, 7]);
        let child = parent.join(0).unwrap();

        assert_eq!(child.state(), &State::new(vec![7, 1, 7]));
        assert_eq!(child.step().label(), "join  2,5 -> 7");
    }

    #[test]
    fn test_length_and_mass() {
        let parent = root(&[3, 5, 7]);
        for index in 0..3 {
            for keep in 1..parent.state().get(index).unwrap() {
                let child = parent.split(index, keep).unwrap();
                assert_eq!(child.state().len(), 4);
                assert_eq!(child.state().sum(), 15);
            }
        }
        for index in 0..2 {
            let child = parent.join(index).unwrap();
            assert_eq!(child.state().len(), 2);
            assert_eq!(child.state().sum(), 15);
        }
    }

    #[test]
    fn test_split_then_join_restores() {
        let parent = root(&[3, 5, 7]);
        for keep in 1..5 {
            let split = Rc::new(parent.split(1, keep).unwrap());
            let joined = split.join(1).unwrap();
            assert_eq!(joined.state(), parent.state());
            assert_eq!(joined.depth(), 2);
        }
    }

    #[test]
    fn test_precondition_violations() {
        let parent = root(&[3, 5, 7]);
        assert_eq!(
            parent.split(1, 0).unwrap_err(),
            MoveError::SplitOutOfRange { value: 5, keep: 0 }
        );
        assert_eq!(
            parent.split(1, 5).unwrap_err(),
            MoveError::SplitOutOfRange { value: 5, keep: 5 }
        );
        assert_eq!(
            parent.split(3, 1).unwrap_err(),
            MoveError::IndexOutOfRange { index: 3, len: 3 }
        );
        assert_eq!(
            parent.join(2).unwrap_err(),
            MoveError::NoRightNeighbour { index: 2, len: 3 }
        );
    }

    #[test]
    fn test_join_overflow_is_an_error() {
        let parent = root(&[3_000_000_000, 2_000_000_000]);
        assert_eq!(
            parent.join(0).unwrap_err(),
            MoveError::SumOverflow { left: 3_000_000_000, right: 2_000_000_000 }
        );

        let step = Move::Join { index: 0, left: 3_000_000_000, right: 2_000_000_000 };
        assert_eq!(
            step.apply(parent.state()).unwrap_err(),
            MoveError::SumOverflow { left: 3_000_000_000, right: 2_000_000_000 }
        );
        assert_eq!(step.label(), "join  3000000000,2000000000 -> 5000000000");

        let fits = root(&[u32::MAX - 1, 1]).join(0).unwrap();
        assert_eq!(fits.state(), &State::new(vec![u32::MAX]));
    }

    #[test]
    fn test_apply_checks_recorded_values() {
        let state = State::new(vec![3, 5, 7]);
        let step = Move::Split { index: 0, value: 4, keep: 1 };
        assert_eq!(
            step.apply(&state).unwrap_err(),
            MoveError::ValueMismatch { index: 0, expected: 4, found: 3 }
        );
        assert_eq!(Move::Begin.apply(&state).unwrap(), state);
    }

    #[test]
    fn test_path_is_root_to_leaf() {
        let start = root(&[7, 1]);
        let a = Rc::new(start.split(0, 3).unwrap());
        let b = Rc::new(a.join(1).unwrap());
        let c = b.split(0, 1).unwrap();

        let states: Vec<String> = c.path().iter().map(|p| p.state().to_string()).collect();
        assert_eq!(states, vec!["(7, 1)", "(3, 4, 1)", "(3, 5)", "(1, 2, 5)"]);
        assert_eq!(c.ancestors().count(), 3);
    }

    #[test]
    fn test_report_line() {
        let start = root(&[7, 1]);
        assert_eq!(
            start.to_string(),
            "begin              ===> (7, 1)            "
        );
        let child = start.split(0, 3).unwrap();
        assert_eq!(
            child.to_string(),
            "split 7   -> 3,4   ===> (3, 4, 1)         "
        );
    }
}
