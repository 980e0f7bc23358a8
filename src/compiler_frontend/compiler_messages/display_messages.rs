use crate::compiler_frontend::compiler_errors::{
    CompilerError, CompilerMessages, ErrorType, error_type_to_str,
};
use saying::say;
use std::path::{Path, PathBuf};
use std::{env, fs};

fn relative_display_path(scope: &Path) -> String {
    match env::current_dir() {
        Ok(dir) => scope
            .strip_prefix(&dir)
            .unwrap_or(scope)
            .to_string_lossy()
            .to_string(),
        Err(_) => scope.to_string_lossy().to_string(),
    }
}

pub fn print_compiler_messages(messages: CompilerMessages) {
    for err in messages.errors {
        print_formatted_error(err);
    }
}

pub fn print_formatted_error(e: CompilerError) {
    let heading = error_type_to_str(&e.error_type);

    if e.error_type == ErrorType::Compiler {
        say!(Red "Optimizer bug, this is not your fault: ", e.msg);
        return;
    }

    say!(Red heading);

    let scope: Option<PathBuf> = e.location.scope.to_owned();
    let line_number = e.location.line_number;

    if let Some(path) = &scope {
        if line_number > 0 {
            say!(Yellow relative_display_path(path), Yellow ":", Yellow line_number);
        } else {
            say!(Yellow relative_display_path(path));
        }

        // Show the offending line of the dump when there is one
        if line_number > 0 {
            let line = fs::read_to_string(path)
                .ok()
                .and_then(|file| file.lines().nth(line_number - 1).map(str::to_owned))
                .unwrap_or_default();

            if !line.trim().is_empty() {
                say!("    ", line);
            }
        }
    } else if line_number > 0 {
        say!(Yellow "line ", Yellow line_number);
    }

    say!(e.msg);
}
