use super::{Config, OutputFormat};
use crate::compiler_frontend::optimizers::DEFAULT_MAX_UNROLL_ITERATIONS;
use crate::compiler_frontend::compiler_errors::ErrorType;
use std::fs;
use std::time::SystemTime;

#[test]
fn empty_config_uses_defaults() {
    let config = Config::from_toml_str("").expect("empty config should parse");
    assert_eq!(config, Config::default());
    assert!(config.show_original);
    assert_eq!(
        config.optimizer_settings().max_unroll_iterations,
        Some(DEFAULT_MAX_UNROLL_ITERATIONS)
    );
}

#[test]
fn reads_every_setting() {
    let text = "max_unroll_iterations = 16\noutput_format = \"json\"\nshow_original = false\n";
    let config = Config::from_toml_str(text).expect("config should parse");

    assert_eq!(config.max_unroll_iterations, Some(16));
    assert_eq!(config.output_format, OutputFormat::Json);
    assert!(!config.show_original);
    assert_eq!(config.optimizer_settings().max_unroll_iterations, Some(16));
}

#[test]
fn unknown_keys_are_config_errors() {
    let error = Config::from_toml_str("unroll_everything = true\n").expect_err("should fail");
    assert_eq!(error.error_type, ErrorType::Config);
}

#[test]
fn bad_output_format_is_a_config_error() {
    let error = Config::from_toml_str("output_format = \"xml\"\n").expect_err("should fail");
    assert_eq!(error.error_type, ErrorType::Config);
}

#[test]
fn missing_config_file_falls_back_to_defaults() {
    let unique = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .expect("time should be after unix epoch")
        .as_nanos();
    let root = std::env::temp_dir().join(format!("astopt_settings_{unique}"));
    fs::create_dir_all(&root).expect("should create temp root");

    let config = Config::load_from_dir(&root).expect("missing config should be fine");
    assert_eq!(config, Config::default());

    fs::write(root.join("astopt.toml"), "max_unroll_iterations = 2\n").expect("should write");
    let config = Config::load_from_dir(&root).expect("config should load");
    assert_eq!(config.max_unroll_iterations, Some(2));

    fs::remove_dir_all(&root).expect("should remove temp dir");
}
