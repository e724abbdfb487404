//! The Parser module pulls tokens from the lexer one at a time
//! and converts them into a [`SyntaxTree`].
//!
//! ```text
//! Source     := Trivia* (Statement Trivia*)* EndOfFile
//! Statement  := Identifier Space* ':'
//!             | Identifier (Operand (',' Operand)*)? Comment? (Terminator | EndOfFile)
//! Operand    := Identifier | Integer
//! ```
//!
//! A malformed line is reported, skipped up to and including its
//! terminator, and parsing carries on with the next one. Instructions
//! parsed up to the point of failure are kept.
use super::ast::{NodeId, SyntaxTree, TreeBuilder};
use super::diagnostic::{errors, DiagnosticFactory};
use super::error::Result;
use super::integer;
use super::lexer;
use super::session::Session;
use super::token::TokenKind;

/// Parses the session's source and stores the tree on the session.
pub fn parse(session: &mut Session) -> Result<&SyntaxTree> {
    let tree = Parser::new(session).run()?;
    Ok(session.tree.insert(tree))
}

pub struct Parser<'s> {
    session: &'s mut Session,
    builder: TreeBuilder,
    /// End offset of the last token consumed.
    last_end: usize,
    error_count: usize,
}

impl<'s> Parser<'s> {
    pub fn new(session: &'s mut Session) -> Self {
        Parser { session, builder: TreeBuilder::new(), last_end: 0, error_count: 0 }
    }

    /// Run the parser, consuming itself and returning the finished tree.
    pub fn run(mut self) -> Result<SyntaxTree> {
        self.scan()?;
        let root = self.source()?;

        if self.error_count > 0 {
            debug!("parsed `{}` with {} parsing error(s)", self.session.file(), self.error_count);
        }
        Ok(self.builder.finish(root))
    }

    fn source(&mut self) -> Result<NodeId> {
        let mut statements = Vec::new();
        self.skip_trivia()?;

        'mainloop: loop {
            match self.token() {
                TokenKind::EndOfFile => break 'mainloop,
                TokenKind::Identifier => statements.push(self.statement()?),
                found => {
                    self.error(errors::expected_statement(found))?;
                    self.skip_line()?;
                },
            }
            self.skip_trivia()?;
        }

        // End of file sits at the end of the source.
        let length = self.session.token_position();
        Ok(self.builder.source(0, length, statements))
    }

    /// Parses a label or an instruction starting at the current identifier.
    fn statement(&mut self) -> Result<NodeId> {
        let start = self.session.token_position();
        let target = self.identifier()?;
        let mut end = self.last_end;
        self.skip_space()?;

        if self.token() == TokenKind::Colon {
            self.consume()?;
            let length = self.last_end - start;
            return Ok(self.builder.label(start, length, target));
        }

        let mut operands = Vec::new();
        match self.token() {
            found if found.is_literal() => {
                operands.push(self.expression()?);
                end = self.last_end;
                self.skip_space()?;

                while self.token() == TokenKind::Delimiter {
                    self.consume()?;
                    self.skip_space()?;

                    if !self.is_expression_start() {
                        let factory = errors::expected_expression(self.token());
                        return self.recover(factory, start, end, target, operands);
                    }

                    operands.push(self.expression()?);
                    end = self.last_end;
                    self.skip_space()?;
                }
            },
            TokenKind::Comment | TokenKind::Terminator | TokenKind::EndOfFile => {},
            found => {
                return self.recover(errors::expected_expression(found), start, end, target, operands);
            },
        }

        if self.token() == TokenKind::Comment {
            self.consume()?;
        }

        match self.token() {
            TokenKind::Terminator => self.consume()?,
            TokenKind::EndOfFile => {},
            found => {
                return self.recover(errors::expected_terminator(found), start, end, target, operands);
            },
        }

        let length = self.last_end - start;
        Ok(self.builder.instruction(start, length, target, operands))
    }

    /// Reports `factory` at the current token, drops the rest of the line
    /// and keeps whatever of the instruction was parsed, ending at `end`.
    fn recover(
        &mut self,
        factory: DiagnosticFactory,
        start: usize,
        end: usize,
        target: NodeId,
        operands: Vec<NodeId>,
    ) -> Result<NodeId> {
        self.error(factory)?;
        self.skip_line()?;
        Ok(self.builder.instruction(start, end - start, target, operands))
    }

    fn expression(&mut self) -> Result<NodeId> {
        match self.token() {
            TokenKind::Identifier => self.identifier(),
            _ => self.integer(),
        }
    }

    fn identifier(&mut self) -> Result<NodeId> {
        let node = self.builder.identifier(
            self.session.token_position(),
            self.session.token_length(),
            self.session.token_lexeme(),
        );
        self.consume()?;
        Ok(node)
    }

    /// Literals that do not decode were already reported by the lexer; they read as 0.
    fn integer(&mut self) -> Result<NodeId> {
        let value = integer::decode(self.session.token_lexeme()).unwrap_or(0);
        let node = self.builder.integer(
            self.session.token_position(),
            self.session.token_length(),
            value,
        );
        self.consume()?;
        Ok(node)
    }

    /// Skips everything up to and including the next terminator.
    fn skip_line(&mut self) -> Result<()> {
        while !matches!(self.token(), TokenKind::Terminator | TokenKind::EndOfFile) {
            self.consume()?;
        }
        self.consume()
    }

    fn skip_space(&mut self) -> Result<()> {
        while self.token() == TokenKind::Space {
            self.consume()?;
        }
        Ok(())
    }

    fn skip_trivia(&mut self) -> Result<()> {
        while self.token().is_trivia() {
            self.consume()?;
        }
        Ok(())
    }

    fn is_expression_start(&self) -> bool {
        self.token().is_literal()
    }

    fn error(&mut self, factory: DiagnosticFactory) -> Result<()> {
        self.error_count += 1;
        self.session.add_diagnostic(factory)
    }

    #[inline]
    fn token(&self) -> TokenKind {
        self.session.token()
    }

    /// Accepts the current token and scans the next one.
    /// Consuming end of file is a no-op.
    fn consume(&mut self) -> Result<()> {
        if self.token() != TokenKind::EndOfFile {
            self.last_end = self.session.token_position() + self.session.token_length();
        }
        self.scan()?;
        Ok(())
    }

    /// Trivia is always surfaced: the grammar needs terminators.
    fn scan(&mut self) -> Result<TokenKind> {
        lexer::next_token(self.session, false)
    }
}
