//! Command-line entrypoint for the optimizer.
//!
//! Parses the command and its flags, loads the config and dispatches to the build system.

use crate::build_system::build::{self, InputFile};
use crate::compiler_frontend::compiler_errors::CompilerError;
use crate::compiler_frontend::display_messages::{print_compiler_messages, print_formatted_error};
use crate::projects::settings::{Config, OutputFormat};
use saying::say;
use std::env;
use std::path::{Path, PathBuf};

#[derive(Debug, PartialEq, Eq)]
enum Command {
    // Optimizes a tree file, or every tree file in a directory
    Optimize {
        path: String,
        options: OptimizeOptions,
    },

    Help,
}

/// Flags given on the command line. Each one that is set overrides the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptimizeOptions {
    pub json: bool,
    pub quiet: bool,
    pub max_unroll_iterations: Option<u64>,
    pub config_path: Option<String>,
}

impl OptimizeOptions {
    fn apply_to(&self, config: &mut Config) {
        if self.json {
            config.output_format = OutputFormat::Json;
        }

        if self.quiet {
            config.show_original = false;
        }

        if let Some(limit) = self.max_unroll_iterations {
            config.max_unroll_iterations = Some(limit);
        }
    }
}

pub fn start_cli() {
    let compiler_args: Vec<String> = env::args().collect();

    if compiler_args.len() < 2 {
        print_help(false);
        return;
    }

    let command = match get_command(&compiler_args[1..]) {
        Ok(command) => command,
        Err(e) => {
            say!(Red e);
            print_help(true);
            return;
        }
    };

    match command {
        Command::Help => {
            print_help(false);
        }

        Command::Optimize { path, options } => {
            if let Err(e) = run_optimize(&path, &options) {
                print_formatted_error(e);
            }
        }
    }
}

fn load_config(path: &Path, options: &OptimizeOptions) -> Result<Config, CompilerError> {
    let mut config = match &options.config_path {
        Some(config_path) => Config::load(Path::new(config_path))?,
        None => {
            // Look beside the input first
            let dir = if path.is_dir() {
                path.to_path_buf()
            } else {
                path.parent().map(Path::to_path_buf).unwrap_or_default()
            };
            Config::load_from_dir(&dir)?
        }
    };

    options.apply_to(&mut config);
    Ok(config)
}

fn run_optimize(path: &str, options: &OptimizeOptions) -> Result<(), CompilerError> {
    let path = PathBuf::from(path);
    let config = load_config(&path, options)?;

    if path.is_dir() {
        let build = build::optimize_directory(&path, &config);

        for written in &build.written_files {
            say!(Green "Wrote ", Green written.display().to_string());
        }

        if !build.written_files.is_empty() {
            say!(Bold "Rewrites: ", build.report.to_string());
        }

        print_compiler_messages(build.messages);
        return Ok(());
    }

    let input = InputFile::read(&path)?;
    let tree = build::optimize_input(&input, &config)?;
    let output = build::render_output(&tree, &config)?;

    // The rendered tree goes to stdout untouched so it can be piped
    print!("{}", output);

    Ok(())
}

fn get_command(args: &[String]) -> Result<Command, String> {
    let command = args.first().map(String::as_str);

    match command {
        Some("help") | Some("--help") => Ok(Command::Help),
        Some("optimize") => parse_optimize_command(args),
        Some(other) => Err(format!("Invalid command: '{}'", other)),
        None => Err(String::from("No command given")),
    }
}

fn parse_optimize_command(args: &[String]) -> Result<Command, String> {
    let mut path = String::new();
    let mut options = OptimizeOptions::default();
    let mut index = 1usize;

    while let Some(arg) = args.get(index) {
        match arg.as_str() {
            "--json" => {
                options.json = true;
                index += 1;
            }
            "--quiet" => {
                options.quiet = true;
                index += 1;
            }
            "--max-unroll" => {
                let Some(limit_value) = args.get(index + 1) else {
                    return Err(String::from("Missing value for --max-unroll"));
                };
                options.max_unroll_iterations = match limit_value.parse::<u64>() {
                    Ok(limit) => Some(limit),
                    Err(_) => {
                        return Err(format!(
                            "Invalid --max-unroll value: '{limit_value}'. It must be a non-negative integer."
                        ));
                    }
                };
                index += 2;
            }
            "--config" => {
                let Some(config_path) = args.get(index + 1) else {
                    return Err(String::from("Missing value for --config"));
                };
                if config_path.starts_with("--") {
                    return Err(String::from("Missing value for --config"));
                }
                options.config_path = Some(config_path.to_owned());
                index += 2;
            }
            _ if arg.starts_with("--") => {
                return Err(format!(
                    "Unknown optimize flag: '{arg}'. Supported flags are --json, --quiet, --max-unroll, --config."
                ));
            }
            _ => {
                if path.is_empty() {
                    path = arg.to_owned();
                    index += 1;
                } else {
                    return Err(String::from(
                        "Optimize command accepts at most one path argument.",
                    ));
                }
            }
        }
    }

    if path.is_empty() {
        return Err(String::from("Optimize command needs a file or directory path."));
    }

    Ok(Command::Optimize { path, options })
}

fn print_help(commands_only: bool) {
    if !commands_only {
        say!(Green Bold "astopt - tree optimizer: constant folding, dead-code elimination, loop unrolling");
        say!("Usage: ", Bold "<command>", " <args>");
    }
    say!(Green Bold "\nCommands:");
    say!("  optimize <path>   - Optimizes a .ast dump or .json tree, or every one in a directory");
    say!("  help              - Shows this message");

    say!(Green Bold "\nFlags:");
    say!("  --json                 Output JSON instead of the text dump");
    say!("  --quiet                Only output the optimized tree");
    say!("  --max-unroll <n>       Leave loops with more than n iterations alone (default: 1024)");
    say!("  --config <path>        Config file (default: astopt.toml beside the input)");
}

#[cfg(test)]
#[path = "tests/cli_tests.rs"]
mod tests;
