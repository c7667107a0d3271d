//! Parameter descriptors and value resolution.
//!
//! A [`Parameter`] declares a typed, named input. Its value comes from one of
//! three places, checked in this order when resolving:
//!
//! 1. raw text supplied at invocation time, parsed by the parameter's coercer;
//! 2. the default: either a typed literal, or raw text looked up in a
//!    [`ConfigStore`] and parsed;
//! 3. a type fallback: `false` for booleans, an empty list for lists.
//!
//! If none of these apply the parameter is missing.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::coercers::{Coercer, ParameterKind};
use crate::config::ConfigStore;
use crate::error::{Error, Result};
use crate::value::Value;

static DECLARATION_COUNTER: AtomicU64 = AtomicU64::new(0);

fn next_declaration_order() -> u64 {
    DECLARATION_COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Where in the config store a default lives.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct ConfigKey {
    #[serde(default)]
    pub section: String,
    #[serde(default)]
    pub name: String,
}

impl ConfigKey {
    pub fn new(section: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            section: section.into(),
            name: name.into(),
        }
    }
}

/// Declaration-time options for a [`Parameter`].
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterOptions {
    pub default: Option<Value>,
    pub default_from_config: Option<ConfigKey>,
    pub is_list: bool,
    /// Only meaningful for boolean parameters, which set it themselves.
    pub is_boolean: bool,
    /// The default is exposed and may be overridden with
    /// [`Parameter::set_default`]. Requires a default.
    pub is_global: bool,
    /// Not used when resolving; callers use it e.g. to build cache keys.
    pub significant: bool,
    pub description: Option<String>,
}

impl Default for ParameterOptions {
    fn default() -> Self {
        Self {
            default: None,
            default_from_config: None,
            is_list: false,
            is_boolean: false,
            is_global: false,
            significant: true,
            description: None,
        }
    }
}

impl ParameterOptions {
    #[must_use]
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_default_from_config(mut self, section: &str, name: &str) -> Self {
        self.default_from_config = Some(ConfigKey::new(section, name));
        self
    }

    #[must_use]
    pub fn list(mut self) -> Self {
        self.is_list = true;
        self
    }

    #[must_use]
    pub fn global(mut self) -> Self {
        self.is_global = true;
        self
    }

    #[must_use]
    pub fn insignificant(mut self) -> Self {
        self.significant = false;
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Raw text supplied for a parameter at invocation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawInput {
    Single(String),
    Multiple(Vec<String>),
}

impl RawInput {
    /// Empty text and empty lists count as no input at all.
    pub fn is_empty(&self) -> bool {
        match self {
            RawInput::Single(s) => s.is_empty(),
            RawInput::Multiple(values) => values.is_empty(),
        }
    }
}

impl From<&str> for RawInput {
    fn from(value: &str) -> Self {
        RawInput::Single(value.to_string())
    }
}

impl From<String> for RawInput {
    fn from(value: String) -> Self {
        RawInput::Single(value)
    }
}

impl From<Vec<String>> for RawInput {
    fn from(values: Vec<String>) -> Self {
        RawInput::Multiple(values)
    }
}

impl From<Vec<&str>> for RawInput {
    fn from(values: Vec<&str>) -> Self {
        RawInput::Multiple(values.into_iter().map(ToString::to_string).collect())
    }
}

#[derive(Debug)]
pub struct Parameter {
    kind: ParameterKind,
    default: Option<Value>,
    default_from_config: Option<ConfigKey>,
    is_list: bool,
    is_boolean: bool,
    is_global: bool,
    significant: bool,
    description: Option<String>,
    declaration_order: u64,
}

impl Parameter {
    /// Declares a parameter of the given kind.
    ///
    /// Boolean parameters are flagged as such unless they are lists.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Declaration`] if:
    /// - the parameter is global but has no default of either form
    /// - both a literal default and a config default are given
    /// - the config default is missing its section or name
    pub fn new(kind: ParameterKind, options: ParameterOptions) -> Result<Self> {
        let ParameterOptions {
            default,
            default_from_config,
            is_list,
            is_boolean,
            is_global,
            significant,
            description,
        } = options;

        if is_global && default.is_none() && default_from_config.is_none() {
            return Err(Error::declaration("Global parameters need default values"));
        }

        if default.is_some() && default_from_config.is_some() {
            return Err(Error::declaration(
                "Can only specify either a default or a default_from_config",
            ));
        }

        if let Some(key) = &default_from_config {
            if key.section.is_empty() || key.name.is_empty() {
                return Err(Error::declaration(
                    "default_from_config must contain entries for section and name",
                ));
            }
        }

        Ok(Self {
            kind,
            default,
            default_from_config,
            is_list,
            is_boolean: (is_boolean || kind == ParameterKind::Bool) && !is_list,
            is_global,
            significant,
            description,
            declaration_order: next_declaration_order(),
        })
    }

    pub fn kind(&self) -> ParameterKind {
        self.kind
    }

    pub fn is_list(&self) -> bool {
        self.is_list
    }

    pub fn is_boolean(&self) -> bool {
        self.is_boolean
    }

    pub fn is_global(&self) -> bool {
        self.is_global
    }

    pub fn significant(&self) -> bool {
        self.significant
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn default_from_config(&self) -> Option<&ConfigKey> {
        self.default_from_config.as_ref()
    }

    /// Position of this declaration among every parameter created by the
    /// process so far.
    pub fn declaration_order(&self) -> u64 {
        self.declaration_order
    }

    fn coercer(&self) -> &'static dyn Coercer {
        self.kind.coercer()
    }

    /// Parses one raw scalar with this parameter's coercer.
    ///
    /// # Errors
    ///
    /// Returns the coercer's error if the text does not match its grammar.
    pub fn parse(&self, raw: &str) -> Result<Value> {
        self.coercer().parse(raw)
    }

    /// Renders a value as text that [`Parameter::parse`] accepts. List values
    /// render one element per line.
    pub fn serialize(&self, value: &Value) -> String {
        match value {
            Value::List(values) => values
                .iter()
                .map(|value| self.coercer().serialize(value))
                .collect::<Vec<_>>()
                .join("\n"),
            scalar => self.coercer().serialize(scalar),
        }
    }

    /// True if a literal default was given, or, for config defaults, if the
    /// config store currently holds the value.
    ///
    /// A config default is checked even if [`Parameter::set_default`] has
    /// installed a literal since.
    pub fn has_default(&self, config: &dyn ConfigStore) -> bool {
        match &self.default_from_config {
            Some(key) => config.get(&key.section, &key.name).is_some(),
            None => self.default.is_some(),
        }
    }

    /// The default value.
    ///
    /// A literal default is returned as is. A config default is looked up and
    /// parsed; list parameters read one element per non-empty line.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingParameter`] if no default was declared,
    /// [`Error::UnknownConfig`] if the config value is absent, or the
    /// coercer's error if the config text does not parse.
    pub fn default(&self, config: &dyn ConfigStore) -> Result<Value> {
        if let Some(default) = &self.default {
            return Ok(default.clone());
        }

        let Some(key) = &self.default_from_config else {
            return Err(Error::MissingParameter("No default specified".to_string()));
        };

        let raw = config.require(&key.section, &key.name)?;
        if self.is_list {
            raw.trim()
                .split('\n')
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(|line| self.parse(line))
                .collect::<Result<Vec<_>>>()
                .map(Value::List)
        } else {
            self.parse(&raw)
        }
    }

    /// Replaces the literal default. The value is not parsed or checked.
    pub fn set_default(&mut self, value: impl Into<Value>) {
        self.default = Some(value.into());
    }

    /// Resolves the value of the parameter called `name` from raw input.
    ///
    /// Without input (`None`, empty text or an empty list) the default is
    /// used, then the boolean and list fallbacks. With input, list parameters
    /// parse every string in order and scalars parse their single string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingParameter`] if there is no input, no default
    /// and no fallback; [`Error::MultipleValues`] if a scalar receives more
    /// than one string; otherwise any error from [`Parameter::default`] or
    /// [`Parameter::parse`].
    pub fn resolve_from_input(
        &self,
        name: &str,
        input: Option<&RawInput>,
        config: &dyn ConfigStore,
    ) -> Result<Value> {
        let input = match input {
            Some(input) if !input.is_empty() => input,
            _ => return self.resolve_without_input(name, config),
        };

        match (input, self.is_list) {
            (RawInput::Single(raw), true) => Ok(Value::List(vec![self.parse(raw)?])),
            (RawInput::Multiple(raws), true) => raws
                .iter()
                .map(|raw| self.parse(raw))
                .collect::<Result<Vec<_>>>()
                .map(Value::List),
            (RawInput::Single(raw), false) => self.parse(raw),
            (RawInput::Multiple(raws), false) => match raws.as_slice() {
                [raw] => self.parse(raw),
                _ => Err(Error::MultipleValues(name.to_string(), raws.len())),
            },
        }
    }

    fn resolve_without_input(&self, name: &str, config: &dyn ConfigStore) -> Result<Value> {
        if self.has_default(config) {
            self.default(config)
        } else if self.is_boolean {
            Ok(Value::Bool(false))
        } else if self.is_list {
            Ok(Value::List(Vec::new()))
        } else {
            Err(Error::MissingParameter(format!(
                "No value for '{}' ({}) submitted and no default value has been assigned.",
                name,
                flag_hint(name)
            )))
        }
    }
}

/// The command-line flag spelling of a parameter name.
pub fn flag_hint(name: &str) -> String {
    format!("--{}", name.replace('_', "-"))
}
