//! Integration tests for rust-params-core
//!
//! These tests verify that declarations, config layers and input resolution
//! work together by running complete workflows end-to-end.

use chrono::{NaiveDate, TimeDelta};
use rust_params_core::{
    coercers::ParameterKind,
    config::{ConfigStore, LayeredConfig},
    date_interval::IntervalKind,
    error::Error,
    file_handling::get_parameter_definitions,
    parameter::{Parameter, ParameterOptions, RawInput},
    parameter_set::ParameterSet,
    value::Value,
};
use std::collections::HashMap;
use std::io::Write;
use tempfile::NamedTempFile;

fn temp_yaml(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "{content}").unwrap();
    temp_file
}

fn path_of(file: &NamedTempFile) -> String {
    file.path().to_str().unwrap().to_string()
}

/// Test a declarations file resolved against two config layers and raw input
#[test]
fn test_declarations_config_and_input_workflow() {
    let declarations = temp_yaml(
        r#"
- name: date_interval
  type: date_interval
  description: "Interval to process"
- name: workers
  type: int
  default_from_config:
    section: core
    name: workers
  significant: false
- name: retry_delay
  type: time_delta
  default: "P1DT2H"
- name: dry_run
  type: bool
- name: hosts
  is_list: true
  default_from_config:
    section: core
    name: hosts
"#,
    );
    let base = temp_yaml("core:\n  workers: 2\n  hosts:\n    - a.example.org\n    - b.example.org\n");
    let local = temp_yaml("core:\n  workers: 16\n");

    let definitions = get_parameter_definitions(&path_of(&declarations)).unwrap();
    let set = ParameterSet::from_definitions(&definitions).unwrap();
    let config = LayeredConfig::load(&[path_of(&base), path_of(&local)]).unwrap();

    let inputs = HashMap::from([("date_interval".to_string(), RawInput::from("2024-W10"))]);
    let values = set.resolve_all(&inputs, &config).unwrap();

    let names: Vec<&str> = values.keys().map(String::as_str).collect();
    assert_eq!(
        names,
        vec!["date_interval", "workers", "retry_delay", "dry_run", "hosts"]
    );

    let Value::Interval(interval) = &values["date_interval"] else {
        panic!("expected an interval");
    };
    assert_eq!(interval.kind(), IntervalKind::Week);
    assert_eq!(interval.date_a(), NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());

    assert_eq!(values["workers"], Value::Int(16));
    assert_eq!(
        values["retry_delay"],
        Value::Duration(TimeDelta::days(1) + TimeDelta::hours(2))
    );
    assert_eq!(values["dry_run"], Value::Bool(false));
    assert_eq!(
        values["hosts"],
        Value::from(vec!["a.example.org", "b.example.org"])
    );

    let significant: Vec<String> = set
        .significant_values(&values)
        .into_iter()
        .map(|(name, _)| name)
        .collect();
    assert!(!significant.contains(&"workers".to_string()));
    assert!(significant.contains(&"date_interval".to_string()));
}

/// Test that a missing config value surfaces the searched files
#[test]
fn test_unknown_config_names_searched_files() {
    let layer = temp_yaml("other:\n  key: value\n");
    let config = LayeredConfig::load(&[path_of(&layer), "/no/such/layer.yml".to_string()]).unwrap();

    let parameter = Parameter::new(
        ParameterKind::Int,
        ParameterOptions::default().with_default_from_config("core", "workers"),
    )
    .unwrap();

    assert!(!parameter.has_default(&config));
    let err = parameter.default(&config).unwrap_err();
    let message = err.to_string();
    assert!(matches!(err, Error::UnknownConfig { .. }));
    assert!(message.contains("section=core"));
    assert!(message.contains("name=workers"));
    assert!(message.contains(&path_of(&layer)));
    assert!(message.contains("/no/such/layer.yml"));
    assert_eq!(config.search_paths().len(), 2);
}

/// Test the fallbacks used when nothing is supplied
#[test]
fn test_missing_input_fallbacks() {
    let config = LayeredConfig::new();

    let flag = Parameter::new(ParameterKind::Bool, ParameterOptions::default()).unwrap();
    assert_eq!(
        flag.resolve_from_input("force", Some(&RawInput::from("")), &config)
            .unwrap(),
        Value::Bool(false)
    );

    let list = Parameter::new(ParameterKind::Date, ParameterOptions::default().list()).unwrap();
    assert_eq!(
        list.resolve_from_input("dates", None, &config).unwrap(),
        Value::List(Vec::new())
    );

    let scalar = Parameter::new(ParameterKind::Float, ParameterOptions::default()).unwrap();
    let err = scalar
        .resolve_from_input("learning_rate", None, &config)
        .unwrap_err();
    assert!(err.to_string().contains("--learning-rate"));
}

/// Test the duration grammar through a parameter
#[test]
fn test_time_delta_parameter() {
    let config = LayeredConfig::new();
    let parameter = Parameter::new(ParameterKind::TimeDelta, ParameterOptions::default()).unwrap();
    let resolve = |raw: &str| parameter.resolve_from_input("delay", Some(&RawInput::from(raw)), &config);

    assert_eq!(resolve("P1W").unwrap(), resolve("1 week").unwrap());
    assert_eq!(resolve("P1W").unwrap(), Value::Duration(TimeDelta::days(7)));
    assert_eq!(resolve("1h30m").unwrap(), resolve("1 h 30 m").unwrap());
    assert_eq!(
        resolve("1h30m").unwrap(),
        Value::Duration(TimeDelta::minutes(90))
    );
    assert!(matches!(resolve("P0D"), Err(Error::InvalidDuration(_))));
}

/// Test that each interval format is picked by its own grammar branch
#[test]
fn test_date_interval_parameter() {
    let config = LayeredConfig::new();
    let parameter =
        Parameter::new(ParameterKind::DateInterval, ParameterOptions::default()).unwrap();

    let kind_of = |raw: &str| match parameter
        .resolve_from_input("interval", Some(&RawInput::from(raw)), &config)
        .unwrap()
    {
        Value::Interval(interval) => interval.kind(),
        other => panic!("expected an interval, got {other:?}"),
    };

    assert_eq!(kind_of("2019"), IntervalKind::Year);
    assert_eq!(kind_of("2019-04"), IntervalKind::Month);
    assert_eq!(kind_of("2019-W14"), IntervalKind::Week);
    assert_eq!(kind_of("2019-04-01"), IntervalKind::Date);
    assert_eq!(kind_of("2019-04-01-2019-05-01"), IntervalKind::Custom);

    assert!(matches!(
        parameter.resolve_from_input("interval", Some(&RawInput::from("spring")), &config),
        Err(Error::InvalidInterval(_))
    ));
}

/// Test global parameter overrides through set_default
#[test]
fn test_global_parameter_override() {
    let config = LayeredConfig::new();
    let mut set = ParameterSet::new();
    set.insert(
        "pool",
        Parameter::new(
            ParameterKind::Str,
            ParameterOptions::default().global().with_default("default"),
        )
        .unwrap(),
    )
    .unwrap();

    let pool = set.get_mut("pool").unwrap();
    let parsed = pool.parse("batch").unwrap();
    pool.set_default(parsed);

    let values = set.resolve_all(&HashMap::new(), &config).unwrap();
    assert_eq!(values["pool"], Value::from("batch"));
}

/// Test integer list input keeps order and duplicates
#[test]
fn test_integer_list_input() {
    let parameter = Parameter::new(ParameterKind::Int, ParameterOptions::default().list()).unwrap();
    let value = parameter
        .resolve_from_input(
            "ids",
            Some(&RawInput::from(vec!["1", "2", "3", "2"])),
            &LayeredConfig::new(),
        )
        .unwrap();

    assert_eq!(value, Value::from(vec![1_i64, 2, 3, 2]));
    assert_eq!(parameter.serialize(&value), "1\n2\n3\n2");
}
