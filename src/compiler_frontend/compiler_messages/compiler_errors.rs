use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::{Path, PathBuf};

// The final set of errors emitted from a run over one or more trees
#[derive(Debug, Default)]
pub struct CompilerMessages {
    pub errors: Vec<CompilerError>,
}

impl CompilerMessages {
    pub fn new() -> Self {
        CompilerMessages { errors: Vec::new() }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

impl From<CompilerError> for CompilerMessages {
    fn from(error: CompilerError) -> Self {
        CompilerMessages {
            errors: vec![error],
        }
    }
}

/// Where an error came from.
/// Line numbers are 1-based; zero means the error isn't tied to a line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextLocation {
    pub scope: Option<PathBuf>,
    pub line_number: usize,
}

impl TextLocation {
    pub fn new_just_line(line_number: usize) -> Self {
        TextLocation {
            scope: None,
            line_number,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorType {
    Syntax,
    File,
    Config,
    Compiler,
}

pub fn error_type_to_str(e_type: &ErrorType) -> &'static str {
    match e_type {
        ErrorType::Compiler => "Compiler Bug",
        ErrorType::Syntax => "Syntax Error",
        ErrorType::Config => "Malformed Config",
        ErrorType::File => "File Error",
    }
}

#[derive(Debug)]
pub struct CompilerError {
    pub msg: String,
    pub location: TextLocation,
    pub error_type: ErrorType,
}

impl CompilerError {
    pub fn new(msg: impl Into<String>, location: TextLocation, error_type: ErrorType) -> Self {
        CompilerError {
            msg: msg.into(),
            location,
            error_type,
        }
    }

    pub fn new_syntax_error(msg: impl Into<String>, line_number: usize) -> Self {
        CompilerError::new(
            msg,
            TextLocation::new_just_line(line_number),
            ErrorType::Syntax,
        )
    }

    pub fn new_file_error(path: &Path, msg: impl Into<String>) -> Self {
        CompilerError::new(
            msg,
            TextLocation {
                scope: Some(path.to_path_buf()),
                line_number: 0,
            },
            ErrorType::File,
        )
    }

    pub fn new_config_error(msg: impl Into<String>) -> Self {
        CompilerError::new(msg, TextLocation::default(), ErrorType::Config)
    }

    /// Create a compiler error (internal bug, not user's fault)
    pub fn compiler_error(msg: impl Into<String>) -> Self {
        CompilerError::new(msg, TextLocation::default(), ErrorType::Compiler)
    }

    pub fn with_file_path(mut self, file_path: &Path) -> Self {
        self.location.scope = Some(file_path.to_path_buf());
        self
    }
}

impl Display for CompilerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", error_type_to_str(&self.error_type))?;

        if let Some(scope) = &self.location.scope {
            write!(f, " in {}", scope.display())?;
        }

        if self.location.line_number > 0 {
            write!(f, " (line {})", self.location.line_number)?;
        }

        write!(f, ": {}", self.msg)
    }
}

impl std::error::Error for CompilerError {}

/// Returns a new syntax error tied to a line of the input.
#[macro_export]
macro_rules! return_syntax_error {
    ($msg:expr, $line:expr) => {
        return Err(
            $crate::compiler_frontend::compiler_errors::CompilerError::new_syntax_error(
                $msg, $line,
            ),
        )
    };
}

/// Returns a new file system error for a path.
#[macro_export]
macro_rules! return_file_error {
    ($path:expr, $msg:expr) => {
        return Err(
            $crate::compiler_frontend::compiler_errors::CompilerError::new_file_error(
                $path, $msg,
            ),
        )
    };
}

/// Returns a new config error.
#[macro_export]
macro_rules! return_config_error {
    ($msg:expr) => {
        return Err(
            $crate::compiler_frontend::compiler_errors::CompilerError::new_config_error($msg),
        )
    };
}
