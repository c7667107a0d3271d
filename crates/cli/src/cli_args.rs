//! Command-line argument parsing and validation.
//!
//! This module defines the command-line interface structure using the `clap`
//! crate.

use crate::arguments::{determine, Provider, Style};
use clap::Parser;
use rust_params_core::error::Result;

/// Command-line arguments for the `rp` binary.
///
/// # Examples
///
/// ```rust
/// use clap::Parser;
/// use rust_params_cli::cli_args::Args;
///
/// let args = Args::parse_from(["rp", "-p", "date=2024-01-01"]);
/// assert_eq!(args.parameters, vec!["date=2024-01-01".to_string()]);
/// ```
#[derive(Parser, Debug)] // requires `derive` feature
#[command(term_width = 0)] // Just to make testing across clap features easier
pub struct Args {
    /// Path to the parameter declarations YAML file.
    ///
    /// If not provided, defaults to `~/.rust-params/parameters.yml`.
    #[arg(long = "declarations", short = 'd')]
    pub declarations_path: Option<String>,

    /// Path to a config layer YAML file. Repeat to stack layers; later files win.
    ///
    /// If not provided, `/etc/rust-params/config.yml`, `~/.rust-params/config.yml`
    /// and `./rust-params.yml` are used, plus `$RUST_PARAMS_CONFIG_PATH` if set.
    #[arg(long = "config", short = 'c', action = clap::ArgAction::Append)]
    pub config_paths: Vec<String>,

    /// Print each parameter's type, description and significance.
    #[arg(long, action)]
    pub describe: bool,

    /// Named parameter values in the format name=value.
    ///
    /// Repeat a name to give several values to a list parameter.
    /// Cannot be mixed with positional arguments.
    ///
    /// # Examples
    /// ```bash
    /// rp -p date_interval=2024-W10 -p hosts=a -p hosts=b
    /// ```
    #[arg(long = "param", short = 'p', action = clap::ArgAction::Append)]
    pub parameters: Vec<String>,

    /// Positional parameter values, matched to parameters in declaration order.
    ///
    /// Cannot be mixed with named parameters.
    #[arg(trailing_var_arg = true)]
    pub positional_arguments: Vec<String>,
}

impl Provider for Args {
    /// Determines the argument style based on the provided arguments.
    ///
    /// # Errors
    ///
    /// Returns an error if both named and positional arguments are provided.
    fn get_style(&self) -> Result<Style> {
        determine(&self.parameters, &self.positional_arguments)
    }
}
