//! Breadth-first split/join search

pub mod cache;
pub mod candidate;
pub mod filter;
pub mod engine;
pub mod batch;

pub use cache::StateCache;
pub use candidate::{Candidate, Move, MoveError};
pub use filter::{Rejection, RejectionCounts, ValidityFilter};
pub use engine::{SearchEngine, SearchError, SearchOutcome, SearchStatistics};
pub use batch::{solve_batch, BatchEntry};
