//! Reads trees from disk, runs the optimizer over them and renders the results.
//!
//! A directory is processed one tree per rayon worker. Each tree is still optimized on a
//! single thread, the parallelism is only across independent files.

use crate::compiler_frontend::ast::ast_display::{OPTIMIZED_AST_HEADER, dump_tree, render_report};
use crate::compiler_frontend::ast::ast_nodes::Link;
use crate::compiler_frontend::ast::dump_reader::{DumpSection, parse_dump, parse_report_section};
use crate::compiler_frontend::compiler_errors::{CompilerError, CompilerMessages};
use crate::compiler_frontend::optimizers::{OptimizationReport, optimize_with};
use crate::projects::settings::{
    Config, DUMP_FILE_EXTENSION, JSON_FILE_EXTENSION, OPTIMIZED_FILE_SUFFIX, OutputFormat,
};
use crate::{ast_log, return_file_error, return_syntax_error, timer_log};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

pub struct InputFile {
    pub source_code: String,
    pub source_path: PathBuf,
}

impl InputFile {
    pub fn read(source_path: &Path) -> Result<InputFile, CompilerError> {
        match fs::read_to_string(source_path) {
            Ok(source_code) => Ok(InputFile {
                source_code,
                source_path: source_path.to_path_buf(),
            }),
            Err(e) => return_file_error!(source_path, format!("Could not read file: {}", e)),
        }
    }

    fn is_json(&self) -> bool {
        self.source_path
            .extension()
            .is_some_and(|extension| extension == JSON_FILE_EXTENSION)
    }
}

pub struct OptimizedTree {
    pub source_path: PathBuf,
    pub original: Link,
    pub optimized: Link,
    pub report: OptimizationReport,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    original: Option<&'a Link>,
    optimized: &'a Link,
    report: &'a OptimizationReport,
}

/// Reads the tree out of a JSON file or a dump.
/// A driver report is accepted too, in which case its optimized section is read.
pub fn read_tree(input: &InputFile) -> Result<Link, CompilerError> {
    let tree = if input.is_json() {
        match read_json_tree(&input.source_code) {
            Ok(tree) => Ok(tree),
            Err(e) => return_syntax_error!(format!("Invalid JSON tree: {}", e), e.line()),
        }
    } else if input
        .source_code
        .lines()
        .any(|line| line.trim_end() == OPTIMIZED_AST_HEADER)
    {
        parse_report_section(&input.source_code, DumpSection::Optimized)
    } else {
        parse_dump(&input.source_code)
    };

    tree.map_err(|e| e.with_file_path(&input.source_path))
}

// Every statement of a program adds a sequence level, so nesting is unbounded.
// The stack grows on demand while the tree is deserialized.
fn read_json_tree(source_code: &str) -> Result<Link, serde_json::Error> {
    let mut json = serde_json::Deserializer::from_str(source_code);
    json.disable_recursion_limit();

    let tree = Link::deserialize(serde_stacker::Deserializer::new(&mut json))?;
    json.end()?;

    Ok(tree)
}

pub fn optimize_input(input: &InputFile, config: &Config) -> Result<OptimizedTree, CompilerError> {
    let time = Instant::now();
    let original = read_tree(input)?;
    timer_log!(time, "Tree read in: ");

    ast_log!("Original tree:\n", dump_tree(&original));

    // Only clone when the original is going to be shown
    let kept_original = if config.show_original {
        original.clone()
    } else {
        None
    };

    let (optimized, report) = optimize_with(original, &config.optimizer_settings());
    timer_log!(time, "Tree optimized in: ");

    ast_log!("Optimized tree:\n", dump_tree(&optimized));

    Ok(OptimizedTree {
        source_path: input.source_path.to_owned(),
        original: kept_original,
        optimized,
        report,
    })
}

pub fn render_output(tree: &OptimizedTree, config: &Config) -> Result<String, CompilerError> {
    match config.output_format {
        OutputFormat::Text => {
            if config.show_original {
                Ok(render_report(&tree.original, &tree.optimized))
            } else {
                Ok(dump_tree(&tree.optimized))
            }
        }
        OutputFormat::Json => {
            let output = JsonOutput {
                original: config.show_original.then_some(&tree.original),
                optimized: &tree.optimized,
                report: &tree.report,
            };

            serde_json::to_string_pretty(&output).map_err(|e| {
                CompilerError::compiler_error(format!("Could not serialize tree: {}", e))
            })
        }
    }
}

/// Where the output for `source_path` is written in directory mode.
/// `loop.ast` becomes `loop.optimized.txt` (or `loop.optimized.json`).
pub fn output_path(source_path: &Path, format: OutputFormat) -> PathBuf {
    let stem = source_path
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_default();

    let extension = match format {
        OutputFormat::Text => "txt",
        OutputFormat::Json => JSON_FILE_EXTENSION,
    };

    source_path.with_file_name(format!("{}.{}.{}", stem, OPTIMIZED_FILE_SUFFIX, extension))
}

fn is_tree_file(path: &Path) -> bool {
    let is_input_extension = path.extension().is_some_and(|extension| {
        extension == DUMP_FILE_EXTENSION || extension == JSON_FILE_EXTENSION
    });

    // Skip the outputs of a previous run
    let output_marker = format!(".{}", OPTIMIZED_FILE_SUFFIX);
    let is_previous_output = path
        .file_stem()
        .is_some_and(|stem| stem.to_string_lossy().ends_with(&output_marker));

    path.is_file() && is_input_extension && !is_previous_output
}

pub fn collect_tree_files(dir: &Path) -> Result<Vec<PathBuf>, CompilerError> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => return_file_error!(dir, format!("Could not read directory: {}", e)),
    };

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|entry| entry.path()))
        .filter(|path| is_tree_file(path))
        .collect();

    // Stable order so repeated runs report in the same order
    files.sort();

    Ok(files)
}

pub struct DirectoryBuild {
    pub written_files: Vec<PathBuf>,
    pub report: OptimizationReport,
    pub messages: CompilerMessages,
}

/// Optimizes every tree file in `dir` and writes each result next to its input.
pub fn optimize_directory(dir: &Path, config: &Config) -> DirectoryBuild {
    let time = Instant::now();

    let files = match collect_tree_files(dir) {
        Ok(files) => files,
        Err(e) => {
            return DirectoryBuild {
                written_files: Vec::new(),
                report: OptimizationReport::default(),
                messages: CompilerMessages::from(e),
            };
        }
    };

    let results: Vec<Result<(PathBuf, OptimizationReport), CompilerError>> = files
        .par_iter()
        .map(|path| optimize_and_write(path, config))
        .collect();

    timer_log!(time, "Directory optimized in: ");

    let mut build = DirectoryBuild {
        written_files: Vec::with_capacity(results.len()),
        report: OptimizationReport::default(),
        messages: CompilerMessages::new(),
    };

    for result in results {
        match result {
            Ok((path, report)) => {
                build.report.merge(&report);
                build.written_files.push(path);
            }
            Err(e) => build.messages.errors.push(e),
        }
    }

    build
}

fn optimize_and_write(
    source_path: &Path,
    config: &Config,
) -> Result<(PathBuf, OptimizationReport), CompilerError> {
    let input = InputFile::read(source_path)?;
    let tree = optimize_input(&input, config)?;
    let output = render_output(&tree, config)?;
    let destination = output_path(source_path, config.output_format);

    if let Err(e) = fs::write(&destination, output) {
        return_file_error!(&destination, format!("Could not write output: {}", e));
    }

    Ok((destination, tree.report))
}

#[cfg(test)]
#[path = "tests/build_tests.rs"]
mod tests;
