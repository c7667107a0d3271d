//! Rendering of resolved parameter values.

use indexmap::IndexMap;
use itertools::Itertools;
use rust_params_core::parameter::Parameter;
use rust_params_core::parameter_set::ParameterSet;
use rust_params_core::value::Value;

/// Formats one resolved value as `name = value`.
///
/// List values are shown on one line as `[a, b]`, each element serialized
/// by the parameter's coercer.
pub fn format_value(name: &str, parameter: &Parameter, value: &Value) -> String {
    let rendered = match value {
        Value::List(values) => format!(
            "[{}]",
            values.iter().map(|value| parameter.serialize(value)).join(", ")
        ),
        scalar => parameter.serialize(scalar),
    };

    format!("{name} = {rendered}")
}

/// Formats the type, significance and description shown by `--describe`.
pub fn format_description(parameter: &Parameter) -> String {
    let mut parts = vec![parameter.kind().to_string()];
    if parameter.is_list() {
        parts.push("list".to_string());
    }
    if parameter.is_global() {
        parts.push("global".to_string());
    }
    if !parameter.significant() {
        parts.push("insignificant".to_string());
    }

    match parameter.description() {
        Some(description) => format!("({}) {description}", parts.join(", ")),
        None => format!("({})", parts.join(", ")),
    }
}

/// Renders every resolved value in declaration order.
pub fn render(parameters: &ParameterSet, values: &IndexMap<String, Value>, describe: bool) -> Vec<String> {
    parameters
        .iter()
        .filter_map(|(name, parameter)| {
            let value = values.get(name)?;
            let line = format_value(name, parameter, value);
            Some(if describe {
                format!("{line}\n    {}", format_description(parameter))
            } else {
                line
            })
        })
        .collect()
}
