use thiserror::Error;

#[derive(Error, Debug)]
pub enum UpError {
    #[error("syntax error at line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("two variables with the same name at line {line}: '{name}'")]
    DuplicateName { line: usize, name: String },

    #[error("undeclared variable at line {line}: '{name}'")]
    UndeclaredName { line: usize, name: String },

    #[error("compile error at line {line}: {message}")]
    Compile { line: usize, message: String },

    #[error("type error at line {line}: {message}")]
    Type { line: usize, message: String },

    #[error("cannot parse input at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("unbound reference at line {line}: '{name}'")]
    UnboundReference { line: usize, name: String },

    #[error("unsupported operation at line {line}: {message}")]
    Unsupported { line: usize, message: String },

    #[error("invalid source file: {message}")]
    Source { message: String },

    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl UpError {
    pub fn syntax(line: usize, message: impl Into<String>) -> Self {
        Self::Syntax { line, message: message.into() }
    }

    pub fn compile(line: usize, message: impl Into<String>) -> Self {
        Self::Compile { line, message: message.into() }
    }

    pub fn type_error(line: usize, message: impl Into<String>) -> Self {
        Self::Type { line, message: message.into() }
    }

    /// Line of the statement that raised the error, if it came from one.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Syntax { line, .. }
            | Self::DuplicateName { line, .. }
            | Self::UndeclaredName { line, .. }
            | Self::Compile { line, .. }
            | Self::Type { line, .. }
            | Self::Parse { line, .. }
            | Self::UnboundReference { line, .. }
            | Self::Unsupported { line, .. } => Some(*line),
            Self::Source { .. } | Self::Io { .. } => None,
        }
    }
}
