//! Command-line interface, configuration, progress display and errors

/// Argument parsing and the analysis runner
pub mod cli;
/// Analysis defaults and quality budgets
pub mod configuration;
/// Error types and result alias
pub mod error;
/// Progress bars for long-running sampling
pub mod progress;
