//! Solution paths and their validation

pub mod solution;
pub mod validator;

pub use solution::{Solution, SolutionMetadata, SolutionStep};
pub use validator::{PathValidator, PathViolation, ValidationResult};
