//! Argument style determination and validation.
//!
//! Parameter values can be given by name (`-p name=value`) or by position,
//! but not both in one invocation.

use rust_params_core::error::Error::MixedParameterMode;
use rust_params_core::error::Result;

/// Represents the style of argument input being used.
#[derive(PartialEq, Clone, Debug)]
pub enum Style {
    /// No arguments provided, every parameter resolves from its default
    None,
    /// Named arguments provided with -p/--param flags (name=value format)
    Named(Vec<String>),
    /// Positional arguments, matched to parameters in declaration order
    Positional(Vec<String>),
}

/// Trait for objects that can determine their argument style.
pub trait Provider {
    /// Validates that named and positional arguments aren't mixed
    /// and returns the appropriate `Style`.
    ///
    /// # Errors
    ///
    /// Returns an error if named and positional arguments are mixed.
    fn get_style(&self) -> Result<Style>;
}

/// Determines the argument style based on provided argument arrays.
///
/// # Errors
///
/// Returns [`MixedParameterMode`] if both named and positional arguments
/// are provided.
///
/// # Examples
///
/// ```rust
/// use rust_params_cli::arguments::{determine, Style};
///
/// let style = determine(&["date=2024-01-01".to_string()], &[]).unwrap();
/// assert!(matches!(style, Style::Named(_)));
///
/// let style = determine(&[], &[]).unwrap();
/// assert_eq!(style, Style::None);
/// ```
pub fn determine(named_args: &[String], positional_args: &[String]) -> Result<Style> {
    let using_named = !named_args.is_empty();
    let using_positional = !positional_args.is_empty();

    match (using_named, using_positional) {
        (true, true) => Err(MixedParameterMode),
        (true, false) => Ok(Style::Named(named_args.to_vec())),
        (false, true) => Ok(Style::Positional(positional_args.to_vec())),
        (false, false) => Ok(Style::None),
    }
}
