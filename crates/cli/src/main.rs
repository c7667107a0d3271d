use clap::Parser;
use log::{debug, info};
use rust_params_core::config::{get_config_paths, get_declarations_path, LayeredConfig};
use rust_params_core::error::Result;
use rust_params_core::file_handling;
use rust_params_core::parameter_set::ParameterSet;
use std::process::ExitCode;

use rust_params_cli::arguments::{apply_global_overrides, process_command_line, Provider};
use rust_params_cli::cli_args::Args;
use rust_params_cli::output;

/// Load the declarations and the config layers named by the arguments
fn initialize(args: &Args) -> Result<(ParameterSet, LayeredConfig)> {
    let declarations_path = get_declarations_path(&args.declarations_path);
    debug!("Declarations path: `{}`", declarations_path);

    let definitions = file_handling::get_parameter_definitions(&declarations_path)?;
    let parameters = ParameterSet::from_definitions(&definitions)?;

    let config_paths = get_config_paths(&args.config_paths);
    debug!("Config paths: {:?}", config_paths);
    let config = LayeredConfig::load(config_paths.as_slice())?;

    Ok((parameters, config))
}

fn execute() -> Result<()> {
    let args = Args::parse();

    let (mut parameters, config) = initialize(&args)?;
    info!("Loaded {} parameter declarations", parameters.len());

    let inputs = process_command_line(args.get_style()?, &parameters)?;
    apply_global_overrides(&mut parameters, &inputs, &config)?;

    let values = parameters.resolve_all(&inputs, &config)?;
    for line in output::render(&parameters, &values, args.describe) {
        println!("{line}");
    }

    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    match execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
