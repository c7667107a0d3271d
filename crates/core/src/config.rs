//! Layered configuration store.
//!
//! Parameters read config-derived defaults through the [`ConfigStore`] trait.
//! [`LayeredConfig`] is the file-backed implementation: a stack of YAML files
//! shaped as `section -> key -> value`, where later files win.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use log::{debug, info};
use serde_yaml::Value as YamlValue;

use crate::error::{Error, Result};

/// System-wide config layer, read first.
const SYSTEM_CONFIG_PATH: &str = "/etc/rust-params/config.yml";
/// Per-user config layer.
const USER_CONFIG_PATH: &str = "~/.rust-params/config.yml";
/// Config layer in the working directory, read last.
const LOCAL_CONFIG_PATH: &str = "rust-params.yml";

/// Environment variable naming one extra config layer, read after the defaults.
pub const CONFIG_PATH_ENV: &str = "RUST_PARAMS_CONFIG_PATH";

/// Default path for the parameter declarations file.
const DEFAULT_DECLARATIONS_PATH: &str = "~/.rust-params/parameters.yml";

/// Read access to configuration values keyed by section and name.
pub trait ConfigStore {
    /// Looks up a raw value. A miss is `None`.
    fn get(&self, section: &str, key: &str) -> Option<String>;

    /// Every location the store searched, in search order.
    fn search_paths(&self) -> Vec<String>;

    /// Looks up a raw value, surfacing a miss as an error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownConfig`] naming the section, the key and the
    /// searched locations when the value is absent.
    fn require(&self, section: &str, key: &str) -> Result<String> {
        self.get(section, key)
            .ok_or_else(|| Error::unknown_config(section, key, self.search_paths()))
    }
}

#[derive(Debug, Clone, Default)]
pub struct LayeredConfig {
    values: HashMap<String, HashMap<String, String>>,
    paths: Vec<String>,
}

impl LayeredConfig {
    /// An empty store with no files behind it.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the given files in order; later files override earlier ones.
    ///
    /// Files that do not exist are skipped but still reported by
    /// [`ConfigStore::search_paths`].
    ///
    /// # Errors
    ///
    /// Returns an error if a file exists but cannot be read, is not valid
    /// YAML, or holds a value that is not a scalar or a list of scalars.
    pub fn load<P: AsRef<str>>(paths: &[P]) -> Result<Self> {
        let mut config = Self::new();
        for path in paths {
            config.add_layer(path.as_ref())?;
        }

        Ok(config)
    }

    /// Loads the default layers, see [`get_config_paths`].
    ///
    /// # Errors
    ///
    /// See [`LayeredConfig::load`].
    pub fn load_default() -> Result<Self> {
        Self::load(get_config_paths(&[]).as_slice())
    }

    /// Reads one more file on top of the existing layers.
    ///
    /// # Errors
    ///
    /// See [`LayeredConfig::load`].
    pub fn add_layer(&mut self, path: &str) -> Result<()> {
        self.paths.push(path.to_string());

        if !Path::new(path).exists() {
            debug!("Config file `{}` does not exist, skipping", path);
            return Ok(());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| Error::io_error("config".to_string(), path.to_string(), e))?;

        if content.trim().is_empty() {
            debug!("Config file `{}` is empty", path);
            return Ok(());
        }

        let document: Option<HashMap<String, Option<HashMap<String, YamlValue>>>> =
            serde_yaml::from_str(&content).map_err(|e| {
                Error::yaml_error(
                    "reading".to_string(),
                    "config".to_string(),
                    path.to_string(),
                    e,
                )
            })?;

        let mut count = 0;
        for (section, entries) in document.unwrap_or_default() {
            for (key, value) in entries.unwrap_or_default() {
                let raw = yaml_to_raw(&value).ok_or_else(|| {
                    Error::UnsupportedConfigValue(section.clone(), key.clone(), path.to_string())
                })?;
                self.set(&section, &key, raw);
                count += 1;
            }
        }

        info!("Loaded {} config values from `{}`", count, path);
        Ok(())
    }

    /// Sets a single value, replacing any existing one.
    pub fn set(&mut self, section: &str, key: &str, value: impl Into<String>) {
        self.values
            .entry(section.to_string())
            .or_default()
            .insert(key.to_string(), value.into());
    }

    /// Builder-style [`LayeredConfig::set`].
    #[must_use]
    pub fn with_value(mut self, section: &str, key: &str, value: impl Into<String>) -> Self {
        self.set(section, key, value);
        self
    }

    /// Removes a value, returning it if it was present.
    pub fn remove(&mut self, section: &str, key: &str) -> Option<String> {
        self.values.get_mut(section)?.remove(key)
    }
}

impl ConfigStore for LayeredConfig {
    fn get(&self, section: &str, key: &str) -> Option<String> {
        self.values.get(section)?.get(key).cloned()
    }

    fn search_paths(&self) -> Vec<String> {
        self.paths.clone()
    }
}

/// Scalars become their text; a list becomes its items' text, one per line.
fn yaml_to_raw(value: &YamlValue) -> Option<String> {
    match value {
        YamlValue::Sequence(items) => {
            let lines: Option<Vec<String>> = items.iter().map(yaml_scalar_text).collect();
            Some(lines?.join("\n"))
        }
        scalar => yaml_scalar_text(scalar),
    }
}

/// Text of a YAML scalar; `None` for sequences, mappings and tagged values.
pub(crate) fn yaml_scalar_text(value: &YamlValue) -> Option<String> {
    match value {
        YamlValue::String(s) => Some(s.clone()),
        YamlValue::Number(n) => Some(n.to_string()),
        YamlValue::Bool(b) => Some(b.to_string()),
        YamlValue::Null => Some(String::new()),
        YamlValue::Sequence(_) | YamlValue::Mapping(_) | YamlValue::Tagged(_) => None,
    }
}

/// Resolves the config layer paths.
///
/// If custom paths are given, only those are used. Otherwise the system, user
/// and working-directory layers are used, followed by the file named in
/// `RUST_PARAMS_CONFIG_PATH` if that is set. Shell expansions like `~` are
/// resolved.
///
/// # Examples
///
/// ```
/// use rust_params_core::config::get_config_paths;
///
/// let custom = get_config_paths(&["/path/to/config.yml".to_string()]);
/// assert_eq!(custom, vec!["/path/to/config.yml".to_string()]);
/// ```
pub fn get_config_paths(config_path_args: &[String]) -> Vec<String> {
    if !config_path_args.is_empty() {
        return config_path_args.iter().map(|path| expand_path(path)).collect();
    }

    let mut paths: Vec<String> = [SYSTEM_CONFIG_PATH, USER_CONFIG_PATH, LOCAL_CONFIG_PATH]
        .iter()
        .map(|path| expand_path(path))
        .collect();

    if let Ok(extra) = std::env::var(CONFIG_PATH_ENV) {
        paths.push(expand_path(&extra));
    }

    paths
}

/// Resolves the parameter declarations file path.
///
/// If a custom path is provided, uses that path. Otherwise, uses the default
/// declarations path. Shell expansions like `~` are resolved.
pub fn get_declarations_path(declarations_path_arg: &Option<String>) -> String {
    let declarations_path = match declarations_path_arg {
        Some(declarations_path) => declarations_path,
        None => DEFAULT_DECLARATIONS_PATH,
    };

    expand_path(declarations_path)
}

fn expand_path(path: &str) -> String {
    shellexpand::tilde(path).to_string()
}
