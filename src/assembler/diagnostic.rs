//! Diagnostics are positioned notices produced while scanning and parsing.
//!
//! They are plain data: a diagnostic never stops the assembler by itself.
//! Whether an error aborts the parse is decided by the session's
//! [`Mode`](super::session::Mode).
use std::fmt;

use super::token::TokenKind;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Severity {
    Note,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Severity::Note    => write!(f, "note"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error   => write!(f, "error"),
        }
    }
}

/// The span of source a diagnostic refers to.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Location {
    pub file: String,
    pub position: usize,
    pub length: usize,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub location: Option<Location>,
}

impl Diagnostic {
    /// A diagnostic that refers to no particular source.
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Diagnostic { severity, message: message.into(), location: None }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)
    }
}

/// A diagnostic waiting for its location.
///
/// The scanner and parser build one of these from the catalog below and
/// hand it to the session, which places it at the current token.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct DiagnosticFactory {
    pub severity: Severity,
    pub message: String,
}

impl DiagnosticFactory {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        DiagnosticFactory { severity, message: message.into() }
    }

    pub fn at(&self, file: &str, position: usize, length: usize) -> Diagnostic {
        Diagnostic {
            severity: self.severity,
            message: self.message.clone(),
            location: Some(Location { file: file.to_owned(), position, length }),
        }
    }
}

pub mod notes {
    use super::*;

    pub fn expected_lf_after_cr() -> DiagnosticFactory {
        DiagnosticFactory::new(Severity::Note, "expected LF (\\n) after CR (\\r)")
    }

    pub fn expected_final_newline() -> DiagnosticFactory {
        DiagnosticFactory::new(Severity::Note, "expected final newline")
    }
}

pub mod errors {
    use super::*;

    pub fn unexpected_character(c: char) -> DiagnosticFactory {
        DiagnosticFactory::new(Severity::Error, format!("unexpected character '{}'", c.escape_default()))
    }

    pub fn malformed_integer(text: &str) -> DiagnosticFactory {
        DiagnosticFactory::new(Severity::Error, format!("malformed integer '{}'", text.escape_default()))
    }

    pub fn expected_statement(found: TokenKind) -> DiagnosticFactory {
        DiagnosticFactory::new(Severity::Error, format!("expected statement, found {}", found))
    }

    pub fn expected_expression(found: TokenKind) -> DiagnosticFactory {
        DiagnosticFactory::new(Severity::Error, format!("expected expression, found {}", found))
    }

    pub fn expected_terminator(found: TokenKind) -> DiagnosticFactory {
        DiagnosticFactory::new(Severity::Error, format!("expected terminator after instruction, found {}", found))
    }
}
