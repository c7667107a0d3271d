use std::collections::HashMap;

use itertools::Itertools;
use log::debug;
use rust_params_core::config::ConfigStore;
use rust_params_core::error::Error::{ParameterCountMismatch, ParameterFormat, UnknownParameter};
use rust_params_core::error::Result;
use rust_params_core::parameter::RawInput;
use rust_params_core::parameter_set::ParameterSet;

use crate::arguments::style::Style;

/// Collects raw input per parameter from the command line.
///
/// Named values may repeat a name to build a list; positional values are
/// assigned to parameters in declaration order.
///
/// # Errors
///
/// Returns an error if:
/// - A named value is not in `name=value` format
/// - A named value names no declared parameter
/// - There are more positional values than parameters
pub fn process_command_line(
    argument_style: Style,
    parameters: &ParameterSet,
) -> Result<HashMap<String, RawInput>> {
    match argument_style {
        Style::None => Ok(HashMap::new()),
        Style::Named(named_params) => process_named_parameters(&named_params, parameters),
        Style::Positional(positional_params) => {
            process_positional_parameters(&positional_params, parameters)
        }
    }
}

/// Process named parameters in the format name=value
fn process_named_parameters(
    named_params: &[String],
    parameters: &ParameterSet,
) -> Result<HashMap<String, RawInput>> {
    let mut pairs = Vec::with_capacity(named_params.len());
    for param_str in named_params {
        let (key, value) = param_str
            .split_once('=')
            .ok_or_else(|| ParameterFormat(param_str.to_string()))?;

        pairs.push((canonical_name(key, parameters)?, value.to_string()));
    }

    Ok(pairs
        .into_iter()
        .into_group_map()
        .into_iter()
        .map(|(name, mut values)| {
            let input = if values.len() == 1 && !is_list(&name, parameters) {
                RawInput::Single(values.remove(0))
            } else {
                RawInput::Multiple(values)
            };
            (name, input)
        })
        .collect())
}

/// Process positional parameters based on declaration order
fn process_positional_parameters(
    positional_params: &[String],
    parameters: &ParameterSet,
) -> Result<HashMap<String, RawInput>> {
    if positional_params.len() > parameters.len() {
        return Err(ParameterCountMismatch(
            parameters.len(),
            positional_params.len(),
        ));
    }

    Ok(parameters
        .iter()
        .zip(positional_params)
        .map(|((name, _), value)| (name.to_string(), RawInput::from(value.as_str())))
        .collect())
}

/// Parameter names are accepted as declared or in their flag spelling
/// (`worker-count` for `worker_count`).
fn canonical_name(key: &str, parameters: &ParameterSet) -> Result<String> {
    if parameters.get(key).is_some() {
        return Ok(key.to_string());
    }

    let underscored = key.replace('-', "_");
    if parameters.get(&underscored).is_some() {
        return Ok(underscored);
    }

    Err(UnknownParameter(key.to_string()))
}

fn is_list(name: &str, parameters: &ParameterSet) -> bool {
    parameters
        .get(name)
        .is_some_and(|parameter| parameter.is_list())
}

/// Installs command-line values of global parameters as their defaults.
///
/// The value is parsed first, then installed with `set_default`. The raw
/// input stays in `inputs`: a config-backed parameter whose key is absent
/// still reports no default, and must resolve from the input.
///
/// # Errors
///
/// Returns an error if a global parameter's value does not parse.
pub fn apply_global_overrides(
    parameters: &mut ParameterSet,
    inputs: &HashMap<String, RawInput>,
    config: &dyn ConfigStore,
) -> Result<()> {
    for (name, input) in inputs {
        let Some(parameter) = parameters.get_mut(name) else {
            continue;
        };
        if !parameter.is_global() {
            continue;
        }

        let value = parameter.resolve_from_input(name, Some(input), config)?;
        debug!("Overriding default of global parameter `{}`", name);
        parameter.set_default(value);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_params_core::coercers::ParameterKind;
    use rust_params_core::config::LayeredConfig;
    use rust_params_core::error::Error;
    use rust_params_core::parameter::{Parameter, ParameterOptions};
    use rust_params_core::value::Value;

    fn parameters() -> ParameterSet {
        let mut set = ParameterSet::new();
        for (name, kind, options) in [
            ("date", ParameterKind::Date, ParameterOptions::default()),
            ("worker_count", ParameterKind::Int, ParameterOptions::default()),
            ("ids", ParameterKind::Int, ParameterOptions::default().list()),
            (
                "pool",
                ParameterKind::Str,
                ParameterOptions::default().global().with_default("default"),
            ),
        ] {
            set.insert(name, Parameter::new(kind, options).unwrap())
                .unwrap();
        }
        set
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_none_style_gives_no_input() {
        let inputs = process_command_line(Style::None, &parameters()).unwrap();
        assert!(inputs.is_empty());
    }

    #[test]
    fn test_named_values() {
        let style = Style::Named(strings(&["date=2024-01-01", "ids=1", "ids=2", "ids=1"]));
        let inputs = process_command_line(style, &parameters()).unwrap();

        assert_eq!(inputs["date"], RawInput::from("2024-01-01"));
        assert_eq!(inputs["ids"], RawInput::from(vec!["1", "2", "1"]));
    }

    #[test]
    fn test_single_value_for_list_stays_a_list() {
        let style = Style::Named(strings(&["ids=7"]));
        let inputs = process_command_line(style, &parameters()).unwrap();
        assert_eq!(inputs["ids"], RawInput::from(vec!["7"]));
    }

    #[test]
    fn test_named_value_may_contain_equals() {
        let style = Style::Named(strings(&["pool=a=b"]));
        let inputs = process_command_line(style, &parameters()).unwrap();
        assert_eq!(inputs["pool"], RawInput::from("a=b"));
    }

    #[test]
    fn test_flag_spelling_is_accepted() {
        let style = Style::Named(strings(&["worker-count=3"]));
        let inputs = process_command_line(style, &parameters()).unwrap();
        assert_eq!(inputs["worker_count"], RawInput::from("3"));
    }

    #[test]
    fn test_named_errors() {
        let result = process_command_line(Style::Named(strings(&["date"])), &parameters());
        assert!(matches!(result, Err(Error::ParameterFormat(_))));

        let result = process_command_line(Style::Named(strings(&["day=1"])), &parameters());
        assert!(matches!(result, Err(Error::UnknownParameter(name)) if name == "day"));
    }

    #[test]
    fn test_positional_values_follow_declaration_order() {
        let style = Style::Positional(strings(&["2024-01-01", "4"]));
        let inputs = process_command_line(style, &parameters()).unwrap();

        assert_eq!(inputs.len(), 2);
        assert_eq!(inputs["date"], RawInput::from("2024-01-01"));
        assert_eq!(inputs["worker_count"], RawInput::from("4"));
    }

    #[test]
    fn test_too_many_positional_values() {
        let style = Style::Positional(strings(&["a", "b", "c", "d", "e"]));
        let result = process_command_line(style, &parameters());
        assert!(matches!(result, Err(Error::ParameterCountMismatch(4, 5))));
    }

    #[test]
    fn test_global_override() {
        let mut set = parameters();
        let config = LayeredConfig::new();
        let inputs = process_command_line(
            Style::Named(strings(&["pool=batch", "date=2024-01-01"])),
            &set,
        )
        .unwrap();

        apply_global_overrides(&mut set, &inputs, &config).unwrap();

        assert_eq!(inputs["pool"], RawInput::from("batch"));
        assert_eq!(
            set.get("pool").unwrap().default(&config).unwrap(),
            Value::from("batch")
        );
        assert!(matches!(
            set.get("date").unwrap().default(&config),
            Err(Error::MissingParameter(_))
        ));
    }

    #[test]
    fn test_global_override_without_config_key() {
        let mut set = ParameterSet::new();
        set.insert(
            "workers",
            Parameter::new(
                ParameterKind::Int,
                ParameterOptions::default()
                    .global()
                    .with_default_from_config("core", "workers"),
            )
            .unwrap(),
        )
        .unwrap();
        let config = LayeredConfig::new();
        let inputs = process_command_line(Style::Named(strings(&["workers=8"])), &set).unwrap();

        apply_global_overrides(&mut set, &inputs, &config).unwrap();

        assert_eq!(
            set.get("workers").unwrap().default(&config).unwrap(),
            Value::Int(8)
        );
        let values = set.resolve_all(&inputs, &config).unwrap();
        assert_eq!(values["workers"], Value::Int(8));
    }

    #[test]
    fn test_bad_global_value() {
        let mut set = parameters();
        let inputs = HashMap::from([("pool".to_string(), RawInput::from(vec!["a", "b"]))]);
        let result = apply_global_overrides(&mut set, &inputs, &LayeredConfig::new());
        assert!(matches!(result, Err(Error::MultipleValues(_, 2))));
    }
}
