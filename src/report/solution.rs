//! Owned solution paths for split/join searches

use crate::puzzle::State;
use crate::search::{Candidate, Move};
use serde::{Deserialize, Serialize};

/// One line of a solution: the move taken and the state it produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolutionStep {
    pub step: Move,
    pub state: State,
}

/// A path from a start tuple to its reverse
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    /// The starting tuple
    pub start: State,
    /// The reversed tuple the search was looking for
    pub goal: State,
    /// Root-to-goal path; the first step is always `begin`
    pub steps: Vec<SolutionStep>,
    /// Summary information about the path
    pub metadata: SolutionMetadata,
}

/// Metadata about a solution path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolutionMetadata {
    /// Stable identifier derived from the path
    pub id: String,
    /// Number of moves (path length minus the root)
    pub moves: usize,
    pub splits: usize,
    pub joins: usize,
    /// Element sum shared by every state on the path
    pub total_mass: u64,
    /// Upper bound on values along the path
    pub vmax: u32,
    /// Longest tuple visited on the path
    pub peak_length: usize,
}

impl Solution {
    /// Build a solution from the candidate that reached the goal
    pub fn from_candidate(goal_candidate: &Candidate, vmax: u32) -> Self {
        let steps: Vec<SolutionStep> = goal_candidate
            .path()
            .into_iter()
            .map(|candidate| SolutionStep {
                step: candidate.step(),
                state: candidate.state().clone(),
            })
            .collect();

        Self::from_steps(steps, vmax)
    }

    /// Build a solution from an explicit root-to-goal path.
    ///
    /// The path must contain at least the root step.
    pub fn from_steps(steps: Vec<SolutionStep>, vmax: u32) -> Self {
        let start = steps.first().map(|s| s.state.clone()).unwrap_or_default();
        let goal = start.reversed();
        let metadata = SolutionMetadata::analyze(&steps, vmax);

        Self {
            start,
            goal,
            steps,
            metadata,
        }
    }

    /// Number of moves performed
    pub fn moves(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    /// The state the path ends in
    pub fn final_state(&self) -> Option<&State> {
        self.steps.last().map(|s| &s.state)
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Create from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Save to file
    pub fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> anyhow::Result<()> {
        let json = self.to_json()?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load from file
    pub fn load_from_file<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&content)?)
    }
}

impl SolutionMetadata {
    /// Summarise a root-to-goal path
    pub fn analyze(steps: &[SolutionStep], vmax: u32) -> Self {
        let splits = steps
            .iter()
            .filter(|s| matches!(s.step, Move::Split { .. }))
            .count();
        let joins = steps
            .iter()
            .filter(|s| matches!(s.step, Move::Join { .. }))
            .count();

        Self {
            id: Self::generate_id(steps),
            moves: steps.len().saturating_sub(1),
            splits,
            joins,
            total_mass: steps.first().map(|s| s.state.sum()).unwrap_or(0),
            vmax,
            peak_length: steps.iter().map(|s| s.state.len()).max().unwrap_or(0),
        }
    }

    /// Identifier based on the sequence of states visited
    fn generate_id(steps: &[SolutionStep]) -> String {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        for step in steps {
            step.state.hash(&mut hasher);
        }

        format!("sol_{:x}", hasher.finish())
    }
}
