//! Named parameters of one unit of work.

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::config::ConfigStore;
use crate::definitions::ParameterDefinition;
use crate::error::{Error, Result};
use crate::parameter::{Parameter, RawInput};
use crate::value::Value;

/// Parameters keyed by name, iterated in declaration order.
#[derive(Debug, Default)]
pub struct ParameterSet {
    parameters: IndexMap<String, Parameter>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares every definition, in order.
    ///
    /// # Errors
    ///
    /// Returns an error if a definition does not declare cleanly or a name is
    /// used twice.
    pub fn from_definitions(definitions: &[ParameterDefinition]) -> Result<Self> {
        let mut set = Self::new();
        for definition in definitions {
            set.insert(&definition.name, definition.to_parameter()?)?;
        }

        Ok(set)
    }

    /// Adds a parameter under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NonUniqueParameterName`] if the name is taken.
    pub fn insert(&mut self, name: &str, parameter: Parameter) -> Result<()> {
        if self.parameters.contains_key(name) {
            return Err(Error::NonUniqueParameterName(name.to_string()));
        }

        self.parameters.insert(name.to_string(), parameter);
        self.parameters
            .sort_by(|_, a, _, b| a.declaration_order().cmp(&b.declaration_order()));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Parameter> {
        self.parameters.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Parameter> {
        self.parameters.get_mut(name)
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// Names and parameters in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Parameter)> {
        self.parameters
            .iter()
            .map(|(name, parameter)| (name.as_str(), parameter))
    }

    /// Resolves every parameter, taking raw input from `inputs` by name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownParameter`] for an input naming no parameter,
    /// or the first resolution error in declaration order.
    pub fn resolve_all<S: std::hash::BuildHasher>(
        &self,
        inputs: &HashMap<String, RawInput, S>,
        config: &dyn ConfigStore,
    ) -> Result<IndexMap<String, Value>> {
        if let Some(unknown) = inputs.keys().find(|name| !self.parameters.contains_key(*name)) {
            return Err(Error::UnknownParameter(unknown.clone()));
        }

        self.iter()
            .map(|(name, parameter)| {
                let value = parameter.resolve_from_input(name, inputs.get(name), config)?;
                Ok((name.to_string(), value))
            })
            .collect()
    }

    /// Serialized values of the significant parameters, in declaration order.
    ///
    /// Values whose name is not declared here are ignored.
    pub fn significant_values(&self, values: &IndexMap<String, Value>) -> Vec<(String, String)> {
        self.iter()
            .filter(|(_, parameter)| parameter.significant())
            .filter_map(|(name, parameter)| {
                values
                    .get(name)
                    .map(|value| (name.to_string(), parameter.serialize(value)))
            })
            .collect()
    }
}
