use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid parameter declaration: {}", .0)]
    Declaration(String),

    #[error("{}", .0)]
    MissingParameter(String),

    #[error(
        "Couldn't find value for section={} name={}. Search config files: '{}'",
        .section,
        .key,
        .paths.join(", ")
    )]
    UnknownConfig {
        section: String,
        key: String,
        paths: Vec<String>,
    },

    #[error("Could not parse `{}` as {}", .value, .type_name)]
    ParseFailure {
        value: String,
        type_name: &'static str,
    },

    #[error("Invalid time delta - could not parse `{}`", .0)]
    InvalidDuration(String),

    #[error("Invalid date interval - could not parse `{}`", .0)]
    InvalidInterval(String),

    #[error("Parameter `{}` takes a single value but {} were given", .0, .1)]
    MultipleValues(String, usize),

    #[error("Error {} {} file at `{}`: {}", .action, .file_description, .path, .original)]
    Yaml {
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    },

    #[error("IO error with {} file at path `{}`: {}", .file_description, .path, .original)]
    Io {
        file_description: String,
        path: String,
        original: std::io::Error,
    },

    #[error("Unsupported value for section={} name={} in `{}`: only scalars and lists of scalars are allowed", .0, .1, .2)]
    UnsupportedConfigValue(String, String, String),

    #[error("No parameters were found in the declaration YAML. Is `{}` empty?", .path)]
    EmptyParameterDefinition { path: String },

    #[error("Found a non-unique parameter name: `{}`", .0)]
    NonUniqueParameterName(String),

    #[error("Invalid name: parameter name may not be empty")]
    EmptyName,

    #[error("Invalid name `{}`: parameter name may not contain spaces", .0)]
    NameWithSpace(String),

    #[error("Invalid name `{}`: parameter name cannot be purely numeric", .0)]
    NumericName(String),

    #[error("Unknown parameter: `{}`", .0)]
    UnknownParameter(String),

    #[error("Parameter `{}` is not in the `name=value` format", .0)]
    ParameterFormat(String),

    #[error("Named (-p) and positional parameters cannot be mixed")]
    MixedParameterMode,

    #[error("{} parameters are declared but {} positional values were given", .0, .1)]
    ParameterCountMismatch(usize, usize),
}

impl Error {
    pub fn declaration(message: impl Into<String>) -> Self {
        Self::Declaration(message.into())
    }

    pub fn parse_failure(value: &str, type_name: &'static str) -> Self {
        Self::ParseFailure {
            value: value.to_string(),
            type_name,
        }
    }

    pub fn unknown_config(section: &str, key: &str, paths: Vec<String>) -> Self {
        Self::UnknownConfig {
            section: section.to_string(),
            key: key.to_string(),
            paths,
        }
    }

    pub fn empty_parameter_definition(path: String) -> Self {
        Self::EmptyParameterDefinition { path }
    }

    pub fn yaml_error(
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    ) -> Self {
        Self::Yaml {
            action,
            file_description,
            path,
            original,
        }
    }

    pub fn io_error(file_description: String, path: String, original: std::io::Error) -> Self {
        Self::Io {
            file_description,
            path,
            original,
        }
    }
}
