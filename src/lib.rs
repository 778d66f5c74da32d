/// Handles argument parsing and command dispatch.
pub mod cli;

/// Constants used throughout the crate.
pub mod constants;

/// Shared credentials and config files.
pub mod credentials;

/// Defines custom error types.
pub mod error;

/// A set of helpers for working with the file system.
pub mod ioutils;

/// Composable prompts and the providers answering them.
pub mod prompt;

/// Construct tree explorer.
pub mod tree;

/// Answer validators
pub mod validation;

/// Multi-step prompt flows.
pub mod wizard;
