//! A session holds everything one parse of one source file needs:
//! the text, the scanner's cursor, the diagnostics and, at the end,
//! the syntax tree.
use super::ast::SyntaxTree;
use super::diagnostic::{Diagnostic, DiagnosticFactory, Severity};
use super::error::{Error, Result};
use super::line_map::LineMap;
use super::token::{IdentifierClass, TokenKind};

/// How the session reacts to diagnostics.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Mode {
    /// Keep every diagnostic and keep going. Builds a line map so
    /// diagnostics can be shown with line and column.
    Debug,
    /// Abort on the first error. Notes and warnings are dropped.
    FailFast,
}

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Options {
    /// Selects [`Mode::Debug`] over [`Mode::FailFast`].
    pub debug: bool,
    /// Used verbatim instead of reading the file.
    pub source: Option<String>,
    /// Hide spaces, terminators and comments from direct scanner callers.
    pub skip_trivia: bool,
}

#[derive(Debug)]
pub struct Session {
    file: String,
    source: String,
    mode: Mode,
    line_map: Option<LineMap>,
    pub(crate) skip_trivia: bool,
    pub(crate) position: usize,
    pub(crate) last_position: usize,
    pub(crate) eof_reached: bool,
    pub(crate) token: TokenKind,
    pub(crate) identifier_class: Option<IdentifierClass>,
    diagnostics: Vec<Diagnostic>,
    pub(crate) tree: Option<SyntaxTree>,
}

impl Session {
    /// Opens a session on `file`, reading it unless `options.source` is given.
    pub fn new(file: &str, options: Options) -> Result<Self> {
        let source = match options.source {
            Some(source) => source,
            None => std::fs::read_to_string(file).map_err(|source| Error::Io {
                file: file.to_owned(),
                source,
            })?,
        };
        let mode = if options.debug { Mode::Debug } else { Mode::FailFast };
        let mut session = Session::with_source(file, source, mode);
        session.skip_trivia = options.skip_trivia;
        Ok(session)
    }

    pub fn with_source(file: &str, source: impl Into<String>, mode: Mode) -> Self {
        let source = source.into();
        let line_map = match mode {
            Mode::Debug => Some(LineMap::new(&source)),
            Mode::FailFast => None,
        };
        debug!("session for `{}`: {} bytes, {:?} mode", file, source.len(), mode);

        Session {
            file: file.to_owned(),
            source,
            mode,
            line_map,
            skip_trivia: false,
            position: 0,
            last_position: 0,
            eof_reached: false,
            token: TokenKind::EndOfFile,
            identifier_class: None,
            diagnostics: Vec::new(),
            tree: None,
        }
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Only present in debug mode.
    pub fn line_map(&self) -> Option<&LineMap> {
        self.line_map.as_ref()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn syntax_tree(&self) -> Option<&SyntaxTree> {
        self.tree.as_ref()
    }

    pub fn set_skip_trivia(&mut self, skip_trivia: bool) {
        self.skip_trivia = skip_trivia;
    }

    /// Kind of the most recently scanned token.
    pub fn token(&self) -> TokenKind {
        self.token
    }

    pub fn token_position(&self) -> usize {
        self.last_position
    }

    pub fn token_length(&self) -> usize {
        self.position - self.last_position
    }

    pub fn token_lexeme(&self) -> &str {
        &self.source[self.last_position..self.position]
    }

    /// Set only while the current token is an identifier.
    pub fn identifier_class(&self) -> Option<IdentifierClass> {
        self.identifier_class
    }

    /// Places a diagnostic over the current token and records it.
    ///
    /// In fail-fast mode an error diagnostic is returned as
    /// [`Error::Aborted`] instead and everything else is dropped.
    pub fn add_diagnostic(&mut self, factory: DiagnosticFactory) -> Result<()> {
        let diagnostic = factory.at(&self.file, self.last_position, self.position - self.last_position);
        debug!("{}", self.format_diagnostic(&diagnostic));

        match self.mode {
            Mode::Debug => {
                self.diagnostics.push(diagnostic);
                Ok(())
            },
            Mode::FailFast if diagnostic.severity == Severity::Error => {
                Err(Error::Aborted(self.format_diagnostic(&diagnostic)))
            },
            Mode::FailFast => Ok(()),
        }
    }

    /// Renders `file:line:column: severity: message` when a line map is
    /// available, and just `severity: message` otherwise.
    pub fn format_diagnostic(&self, diagnostic: &Diagnostic) -> String {
        match (&self.line_map, &diagnostic.location) {
            (Some(map), Some(location)) => {
                let (line, column) = map.line_and_column(location.position);
                format!("{}:{}:{}: {}", location.file, line + 1, column + 1, diagnostic)
            },
            _ => diagnostic.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::diagnostic::{errors, notes, Location};

    #[test]
    fn test_options_select_mode() {
        let session = Session::new("a.asm", Options {
            debug: true,
            source: Some("nop\n".to_owned()),
            skip_trivia: true,
        }).unwrap();
        assert_eq!(session.mode(), Mode::Debug);
        assert!(session.line_map().is_some());
        assert!(session.skip_trivia);
        assert_eq!(session.source(), "nop\n");

        let session = Session::new("a.asm", Options {
            source: Some("nop\n".to_owned()),
            ..Options::default()
        }).unwrap();
        assert_eq!(session.mode(), Mode::FailFast);
        assert!(session.line_map().is_none());
    }

    #[test]
    fn test_missing_file() {
        let result = Session::new("/nonexistent/definitely/missing.asm", Options::default());
        match result {
            Err(Error::Io { file, .. }) => assert_eq!(file, "/nonexistent/definitely/missing.asm"),
            other => panic!("expected an I/O error, got {:?}", other),
        }
    }

    #[test]
    fn test_debug_mode_collects() {
        let mut session = Session::with_source("a.asm", "nop\n#\n", Mode::Debug);
        session.last_position = 4;
        session.position = 5;
        session.add_diagnostic(errors::unexpected_character('#')).unwrap();
        session.add_diagnostic(notes::expected_final_newline()).unwrap();

        assert_eq!(session.diagnostics().len(), 2);
        assert!(session.has_errors());
        assert_eq!(session.diagnostics()[0].location, Some(Location {
            file: "a.asm".to_owned(),
            position: 4,
            length: 1,
        }));
        assert_eq!(
            session.format_diagnostic(&session.diagnostics()[0]),
            "a.asm:2:1: error: unexpected character '#'"
        );
    }

    #[test]
    fn test_fail_fast_aborts_on_error_only() {
        let mut session = Session::with_source("a.asm", "#", Mode::FailFast);
        session.position = 1;
        assert!(session.add_diagnostic(notes::expected_lf_after_cr()).is_ok());
        assert!(session.diagnostics().is_empty());

        match session.add_diagnostic(errors::unexpected_character('#')) {
            Err(Error::Aborted(message)) => assert_eq!(message, "error: unexpected character '#'"),
            other => panic!("expected an abort, got {:?}", other),
        }
    }
}
