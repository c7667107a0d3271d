//! Loading and validation of parameter declaration files.

use std::collections::HashSet;
use std::fs::File;

use crate::definitions::ParameterDefinition;
use crate::error::Error::{EmptyName, NameWithSpace, NonUniqueParameterName, NumericName};
use crate::error::{Error, Result};

fn get_reader(file_description: &str, path: &str) -> Result<File> {
    File::open(path).map_err(|e| Error::io_error(file_description.to_string(), path.to_string(), e))
}

fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(EmptyName);
    }

    if name.contains(char::is_whitespace) {
        return Err(NameWithSpace(name.to_string()));
    }

    if name.chars().all(|c| c.is_numeric()) {
        return Err(NumericName(name.to_string()));
    }

    Ok(())
}

fn validate_definitions(definitions: &[ParameterDefinition]) -> Result<()> {
    let mut names = HashSet::new();

    for definition in definitions {
        validate_name(&definition.name)?;

        if !names.insert(definition.name.as_str()) {
            return Err(NonUniqueParameterName(definition.name.clone()));
        }
    }

    Ok(())
}

/// Loads and validates parameter definitions from a declarations file.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be read
/// - The YAML is malformed or doesn't match the expected structure
/// - The file declares no parameters
/// - A name is empty, contains whitespace, is purely numeric or is repeated
///
/// # Examples
///
/// ```no_run
/// use rust_params_core::file_handling::get_parameter_definitions;
///
/// let definitions = get_parameter_definitions("parameters.yml")?;
/// println!("Loaded {} parameters", definitions.len());
/// # Ok::<(), rust_params_core::error::Error>(())
/// ```
pub fn get_parameter_definitions(declarations_path: &str) -> Result<Vec<ParameterDefinition>> {
    let reader = get_reader("declarations", declarations_path)?;

    let definitions: Vec<ParameterDefinition> = serde_yaml::from_reader(reader).map_err(|e| {
        Error::yaml_error(
            "reading".to_string(),
            "declarations".to_string(),
            declarations_path.to_string(),
            e,
        )
    })?;

    if definitions.is_empty() {
        return Err(Error::empty_parameter_definition(
            declarations_path.to_string(),
        ));
    }

    validate_definitions(&definitions)?;

    Ok(definitions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_declarations(content: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{content}").unwrap();
        temp_file
    }

    fn named(name: &str) -> ParameterDefinition {
        serde_yaml::from_str(&format!("name: '{name}'")).unwrap()
    }

    #[test]
    fn test_validate_name_valid() {
        assert!(validate_name("valid_name").is_ok());
        assert!(validate_name("date2").is_ok());
        assert!(validate_name("date-interval").is_ok());
        assert!(validate_name("_underscore").is_ok());
    }

    #[test]
    fn test_validate_name_empty() {
        assert!(matches!(validate_name(""), Err(EmptyName)));
    }

    #[test]
    fn test_validate_name_with_space() {
        assert!(matches!(validate_name("has space"), Err(NameWithSpace(_))));
        assert!(matches!(validate_name("has\ttab"), Err(NameWithSpace(_))));
    }

    #[test]
    fn test_validate_name_numeric_only() {
        assert!(matches!(validate_name("123"), Err(NumericName(_))));
    }

    #[test]
    fn test_validate_definitions_duplicate() {
        let definitions = vec![named("a"), named("b"), named("a")];
        assert!(matches!(
            validate_definitions(&definitions),
            Err(NonUniqueParameterName(name)) if name == "a"
        ));
    }

    #[test]
    fn test_get_parameter_definitions_valid_yaml() {
        let file = write_declarations(
            r#"
- name: date
  type: date
  description: "Day to process"
- name: workers
  type: int
  default: 4
  significant: false
"#,
        );

        let definitions = get_parameter_definitions(file.path().to_str().unwrap()).unwrap();
        assert_eq!(definitions.len(), 2);
        assert_eq!(definitions[0].name, "date");
        assert_eq!(definitions[0].description.as_deref(), Some("Day to process"));
        assert!(!definitions[1].significant);
    }

    #[test]
    fn test_get_parameter_definitions_empty_file() {
        let file = write_declarations("[]");
        let result = get_parameter_definitions(file.path().to_str().unwrap());
        assert!(matches!(result, Err(Error::EmptyParameterDefinition { .. })));
    }

    #[test]
    fn test_get_parameter_definitions_invalid_yaml() {
        let file = write_declarations("invalid: yaml: content: [");
        let result = get_parameter_definitions(file.path().to_str().unwrap());
        assert!(matches!(result, Err(Error::Yaml { .. })));
    }

    #[test]
    fn test_get_parameter_definitions_unknown_type() {
        let file = write_declarations("- name: a\n  type: complex\n");
        let result = get_parameter_definitions(file.path().to_str().unwrap());
        assert!(matches!(result, Err(Error::Yaml { .. })));
    }

    #[test]
    fn test_get_parameter_definitions_file_not_found() {
        let result = get_parameter_definitions("/this/path/does/not/exist.yml");
        assert!(matches!(result, Err(Error::Io { .. })));
    }
}
