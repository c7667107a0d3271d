//! Rust Params CLI Library
//!
//! This crate provides the `rp` command-line tool. It loads a parameter
//! declaration file and a stack of config layers, collects raw values from the
//! command line, and prints every parameter's resolved value.
//!
//! # Architecture
//!
//! - [`cli_args`]: Command-line argument parsing and validation
//! - [`arguments`]: Argument processing for both named and positional styles
//! - [`output`]: Rendering of resolved values
//!
//! # Examples
//!
//! ```bash
//! # Resolve everything from defaults and config
//! rp -d parameters.yml
//!
//! # With named parameters (repeat a name for list parameters)
//! rp -d parameters.yml --param date_interval=2024-W10 --param hosts=a --param hosts=b
//!
//! # With positional arguments, in declaration order
//! rp -d parameters.yml 2024-W10 16
//!
//! # With explicit config layers and descriptions
//! rp -d parameters.yml -c base.yml -c local.yml --describe
//! ```

pub mod arguments;
pub mod cli_args;
pub mod output;
