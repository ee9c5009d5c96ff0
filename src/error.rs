use std::fmt;

/// A 0-based position in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    /// 0-based line number
    pub line: usize,
    /// 0-based column (byte offset within the line)
    pub column: usize,
    /// 0-based absolute byte offset from the start of input
    pub offset: usize,
}

/// A region of source text (begin..end, end exclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub begin: Position,
    pub end: Position,
}

impl Span {
    pub fn new(begin: Position, end: Position) -> Self {
        Span { begin, end }
    }
}

/// Source text did not match the grammar.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxError {
    pub message: String,
    /// Raw text of the offending token; empty at end of input.
    pub token: String,
    /// Start of the offending region
    pub begin: Position,
    /// End of the offending region (exclusive)
    pub end: Position,
}

impl SyntaxError {
    pub fn new(message: String, token: &str, span: Span) -> Self {
        SyntaxError {
            message,
            token: token.to_string(),
            begin: span.begin,
            end: span.end,
        }
    }

    pub fn span(&self) -> Span {
        Span::new(self.begin, self.end)
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.begin == self.end {
            write!(
                f,
                "{}:{}: {} (syntax-error)",
                self.begin.line, self.begin.column, self.message
            )
        } else {
            write!(
                f,
                "{}:{}-{}:{}: {} (syntax-error)",
                self.begin.line, self.begin.column, self.end.line, self.end.column, self.message
            )
        }
    }
}

impl std::error::Error for SyntaxError {}

/// Every way compiling a program can fail.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Syntax(#[from] SyntaxError),

    /// A tree shape the grammar should have ruled out.
    #[error("Internal error: {message}")]
    Structural { message: String },

    #[error("Empty program: no value defined")]
    EmptyProgram,

    #[error("Use of undefined constant '{name}'")]
    UndefinedConstant { name: String, span: Span },

    /// Strict mode only.
    #[error("Duplicate key '{key}' in struct")]
    DuplicateKey { key: String, span: Span },

    /// Strict mode only.
    #[error("Constant '{name}' is already defined")]
    RedeclaredConstant { name: String, span: Span },
}

impl Error {
    pub fn structural(message: impl Into<String>) -> Self {
        Error::Structural {
            message: message.into(),
        }
    }

    /// Stable machine-readable code for this error kind.
    pub fn code(&self) -> &'static str {
        match self {
            Error::Syntax(_) => "syntax-error",
            Error::Structural { .. } => "structural-error",
            Error::EmptyProgram => "empty-program",
            Error::UndefinedConstant { .. } => "undefined-constant",
            Error::DuplicateKey { .. } => "duplicate-key",
            Error::RedeclaredConstant { .. } => "redeclared-constant",
        }
    }

    /// The source region the error points at, if it has one.
    pub fn span(&self) -> Option<Span> {
        match self {
            Error::Syntax(err) => Some(err.span()),
            Error::UndefinedConstant { span, .. }
            | Error::DuplicateKey { span, .. }
            | Error::RedeclaredConstant { span, .. } => Some(*span),
            Error::Structural { .. } | Error::EmptyProgram => None,
        }
    }
}
