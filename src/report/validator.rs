//! Independent re-checking of solution paths

use super::{Solution, SolutionStep};
use crate::search::{Move, MoveError};
use itertools::Itertools;
use std::collections::HashSet;
use thiserror::Error;

/// Re-derives every step of a solution from its start tuple
#[derive(Debug, Default)]
pub struct PathValidator;

/// Result of path validation
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub violations: Vec<PathViolation>,
    pub steps_checked: usize,
}

/// A single problem found in a path
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathViolation {
    #[error("path is empty")]
    EmptyPath,

    #[error("path must open with 'begin', found '{found}'")]
    MissingBegin { found: String },

    #[error("step {step}: 'begin' may only open a path")]
    UnexpectedBegin { step: usize },

    #[error("recorded start {recorded} differs from first state {found}")]
    StartMismatch { recorded: String, found: String },

    #[error("goal {goal} is not the reverse of start {start}")]
    GoalNotReverse { start: String, goal: String },

    #[error("path ends at {found}, expected {goal}")]
    GoalNotReached { goal: String, found: String },

    #[error("step {step}: '{label}' cannot be applied: {error}")]
    IllegalMove { step: usize, label: String, error: MoveError },

    #[error("step {step}: move produces {expected} but path records {found}")]
    StateMismatch { step: usize, expected: String, found: String },

    #[error("step {step}: total changed from {expected} to {found}")]
    MassChanged { step: usize, expected: u64, found: u64 },

    #[error("step {step}: {state} holds a repeated value")]
    DuplicateValue { step: usize, state: String },

    #[error("step {step}: {state} holds a value above {vmax}")]
    AboveBound { step: usize, state: String, vmax: u32 },

    #[error("step {step}: {state} was already visited")]
    RepeatedState { step: usize, state: String },
}

impl PathValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validate that the solution is a legal path from its start to its reverse
    pub fn validate(&self, solution: &Solution) -> ValidationResult {
        let mut violations = Vec::new();

        let Some(root) = solution.steps.first() else {
            return ValidationResult {
                is_valid: false,
                violations: vec![PathViolation::EmptyPath],
                steps_checked: 0,
            };
        };

        if root.step != Move::Begin {
            violations.push(PathViolation::MissingBegin { found: root.step.label() });
        }
        if root.state != solution.start {
            violations.push(PathViolation::StartMismatch {
                recorded: solution.start.to_string(),
                found: root.state.to_string(),
            });
        }
        if solution.goal != solution.start.reversed() {
            violations.push(PathViolation::GoalNotReverse {
                start: solution.start.to_string(),
                goal: solution.goal.to_string(),
            });
        }

        let vmax = root.state.max().unwrap_or(0);
        let mass = root.state.sum();
        let mut visited = HashSet::new();
        visited.insert(&root.state);

        for (step, (previous, next)) in solution.steps.iter().tuple_windows().enumerate() {
            let step = step + 1;
            violations.extend(Self::check_transition(step, previous, next));

            let state = &next.state;
            if state.sum() != mass {
                violations.push(PathViolation::MassChanged { step, expected: mass, found: state.sum() });
            }
            if state.has_duplicates() {
                violations.push(PathViolation::DuplicateValue { step, state: state.to_string() });
            }
            if state.exceeds(vmax) {
                violations.push(PathViolation::AboveBound { step, state: state.to_string(), vmax });
            }
            if !visited.insert(state) {
                violations.push(PathViolation::RepeatedState { step, state: state.to_string() });
            }
        }

        if let Some(last) = solution.final_state() {
            if *last != solution.goal {
                violations.push(PathViolation::GoalNotReached {
                    goal: solution.goal.to_string(),
                    found: last.to_string(),
                });
            }
        }

        ValidationResult {
            is_valid: violations.is_empty(),
            violations,
            steps_checked: solution.steps.len(),
        }
    }

    fn check_transition(
        step: usize,
        previous: &SolutionStep,
        next: &SolutionStep,
    ) -> Option<PathViolation> {
        if next.step == Move::Begin {
            return Some(PathViolation::UnexpectedBegin { step });
        }

        match next.step.apply(&previous.state) {
            Ok(expected) if expected == next.state => None,
            Ok(expected) => Some(PathViolation::StateMismatch {
                step,
                expected: expected.to_string(),
                found: next.state.to_string(),
            }),
            Err(error) => Some(PathViolation::IllegalMove {
                step,
                label: next.step.label(),
                error,
            }),
        }
    }
}

impl std::fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Path Validation:")?;
        writeln!(f, "  Valid: {}", if self.is_valid { "Yes" } else { "No" })?;
        writeln!(f, "  Steps checked: {}", self.steps_checked)?;
        if !self.violations.is_empty() {
            writeln!(f, "  Violations:")?;
            for violation in &self.violations {
                writeln!(f, "    - {}", violation)?;
            }
        }
        Ok(())
    }
}
