//! Argument processing for the rust-params CLI.
//!
//! Parameter values can be provided in two ways:
//! - **Named arguments**: Using `-p name=value` format, repeatable for lists
//! - **Positional arguments**: Provided as trailing arguments in declaration order
//!
//! The two styles cannot be mixed. Values given for global parameters become
//! their new defaults.

// Export public items from submodules
pub mod processing;
pub mod style;

// Re-exports for convenience
pub use processing::{apply_global_overrides, process_command_line};
pub use style::determine;
pub use style::Provider;
pub use style::Style;
