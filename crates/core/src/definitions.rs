//! Parameter declarations as written in a YAML declarations file.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::Value as YamlValue;

use crate::coercers::ParameterKind;
use crate::config::yaml_scalar_text;
use crate::error::{Error, Result};
use crate::parameter::{ConfigKey, Parameter, ParameterOptions};
use crate::value::Value;

fn significant_by_default() -> bool {
    true
}

/// Keeps a written `default: ~` as `Some(Null)` so it is told apart from an
/// absent key.
fn written_default<'de, D>(deserializer: D) -> std::result::Result<Option<YamlValue>, D::Error>
where
    D: Deserializer<'de>,
{
    YamlValue::deserialize(deserializer).map(Some)
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ParameterDefinition {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: ParameterKind,
    /// Raw text of the default; a list of texts for list parameters.
    #[serde(default, deserialize_with = "written_default")]
    pub default: Option<YamlValue>,
    pub default_from_config: Option<ConfigKey>,
    #[serde(default)]
    pub is_list: bool,
    #[serde(default)]
    pub is_global: bool,
    #[serde(default = "significant_by_default")]
    pub significant: bool,
    pub description: Option<String>,
}

impl ParameterDefinition {
    /// Declares the parameter, parsing the written default with the
    /// parameter's coercer.
    ///
    /// # Errors
    ///
    /// Returns an error if the default does not parse or the options violate
    /// a declaration rule (see [`Parameter::new`]).
    pub fn to_parameter(&self) -> Result<Parameter> {
        let options = ParameterOptions {
            default: self.parse_default()?,
            default_from_config: self.default_from_config.clone(),
            is_list: self.is_list,
            is_boolean: false,
            is_global: self.is_global,
            significant: self.significant,
            description: self.description.clone(),
        };

        Parameter::new(self.kind, options)
    }

    fn parse_default(&self) -> Result<Option<Value>> {
        let Some(default) = &self.default else {
            return Ok(None);
        };

        let coercer = self.kind.coercer();
        let invalid = || {
            Error::declaration(format!(
                "default of `{}` must be {}",
                self.name,
                if self.is_list {
                    "a list of scalars"
                } else {
                    "a scalar"
                }
            ))
        };

        let value = match (default, self.is_list) {
            (YamlValue::Null, _) => {
                return Err(Error::declaration(format!(
                    "default of `{}` is null; omit `default` to declare no default",
                    self.name
                )))
            }
            (YamlValue::Sequence(items), true) => {
                let mut values = Vec::with_capacity(items.len());
                for item in items {
                    let raw = yaml_scalar_text(item).ok_or_else(invalid)?;
                    values.push(coercer.parse(&raw)?);
                }
                Value::List(values)
            }
            (scalar, false) => coercer.parse(&yaml_scalar_text(scalar).ok_or_else(invalid)?)?,
            (_, true) => return Err(invalid()),
        };

        Ok(Some(value))
    }
}

impl Display for ParameterDefinition {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "`{}` ({}", self.name, self.kind)?;
        if self.is_list {
            formatter.write_str(" list")?;
        }
        formatter.write_str(")")?;

        if let Some(desc) = &self.description {
            write!(formatter, " {}", desc)?;
        }

        Ok(())
    }
}
