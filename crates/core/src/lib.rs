//! Rust Params Core Library
//!
//! This crate declares strongly-typed, named parameters for configurable units
//! of work and resolves their values from three sources: a literal default, a
//! default looked up in a layered configuration store, or raw text supplied at
//! invocation time.
//!
//! # Key Features
//!
//! - **Parameters**: Declaration-time options, default resolution and input parsing
//! - **Coercers**: Typed parsing for integers, floats, booleans, dates, date-hours,
//!   date intervals and time deltas
//! - **Durations**: ISO-8601 (`P1DT2H`) and shorthand (`1 day 2 hours`) grammars
//! - **Date Intervals**: Years, months, ISO weeks, days and custom ranges
//! - **Configuration**: Layered YAML config files queried by section and name
//! - **Declarations**: YAML files listing the parameters of a unit of work
//!
//! # Examples
//!
//! ```
//! use rust_params_core::coercers::ParameterKind;
//! use rust_params_core::config::LayeredConfig;
//! use rust_params_core::parameter::{Parameter, ParameterOptions, RawInput};
//! use rust_params_core::value::Value;
//!
//! let config = LayeredConfig::new().with_value("core", "workers", "4");
//! let workers = Parameter::new(
//!     ParameterKind::Int,
//!     ParameterOptions::default().with_default_from_config("core", "workers"),
//! )?;
//!
//! assert_eq!(workers.resolve_from_input("workers", None, &config)?, Value::Int(4));
//! assert_eq!(
//!     workers.resolve_from_input("workers", Some(&RawInput::from("8")), &config)?,
//!     Value::Int(8)
//! );
//! # Ok::<(), rust_params_core::error::Error>(())
//! ```

pub mod coercers;
pub mod config;
pub mod date_interval;
pub mod definitions;
pub mod duration;
pub mod error;
pub mod file_handling;
pub mod parameter;
pub mod parameter_set;
pub mod value;
