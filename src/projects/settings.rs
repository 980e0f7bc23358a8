use crate::compiler_frontend::compiler_errors::CompilerError;
use crate::compiler_frontend::optimizers::{DEFAULT_MAX_UNROLL_ITERATIONS, OptimizerSettings};
use crate::{return_config_error, return_file_error};
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const CONFIG_FILE_NAME: &str = "astopt.toml";
pub const DUMP_FILE_EXTENSION: &str = "ast";
pub const JSON_FILE_EXTENSION: &str = "json";
pub const OPTIMIZED_FILE_SUFFIX: &str = "optimized";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub max_unroll_iterations: Option<u64>,
    pub output_format: OutputFormat,

    // Also print the tree as it was before optimizing
    pub show_original: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_unroll_iterations: Some(DEFAULT_MAX_UNROLL_ITERATIONS),
            output_format: OutputFormat::Text,
            show_original: true,
        }
    }
}

impl Config {
    pub fn from_toml_str(text: &str) -> Result<Config, CompilerError> {
        match toml::from_str::<Config>(text) {
            Ok(config) => Ok(config),
            Err(e) => return_config_error!(format!("Invalid {}: {}", CONFIG_FILE_NAME, e)),
        }
    }

    /// Reads a config file. Parse errors are reported against the file.
    pub fn load(path: &Path) -> Result<Config, CompilerError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => return_file_error!(path, format!("Could not read config file: {}", e)),
        };

        Config::from_toml_str(&text).map_err(|e| e.with_file_path(path))
    }

    /// Uses the config file in `dir` if there is one, otherwise the defaults.
    pub fn load_from_dir(dir: &Path) -> Result<Config, CompilerError> {
        let path = dir.join(CONFIG_FILE_NAME);
        if path.is_file() {
            Config::load(&path)
        } else {
            Ok(Config::default())
        }
    }

    pub fn optimizer_settings(&self) -> OptimizerSettings {
        OptimizerSettings {
            max_unroll_iterations: self.max_unroll_iterations,
        }
    }
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
