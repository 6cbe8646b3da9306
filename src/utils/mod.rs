//! Output helpers shared by the CLI and library

pub mod display;

pub use display::{ColorOutput, ReportFormatter};
