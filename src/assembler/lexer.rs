//! This lexer scans 8085 assembly one token at a time.
//!
//! The scanner does not build a token list. Each call to [`scan`] moves
//! the session's cursor past exactly one token and records its kind and
//! start; callers read the lexeme back out of the session.
use super::diagnostic::{errors, notes};
use super::error::Result;
use super::integer;
use super::session::Session;
use super::token::{IdentifierClass, TokenKind};

/// Scans the next token, honouring the session's skip-trivia setting.
pub fn scan(session: &mut Session) -> Result<TokenKind> {
    let skip_trivia = session.skip_trivia;
    next_token(session, skip_trivia)
}

/// Scans the next token. When `skip_trivia` is set, spaces, terminators
/// and comments are consumed without being returned.
pub(crate) fn next_token(session: &mut Session, skip_trivia: bool) -> Result<TokenKind> {
    session.identifier_class = None;

    let kind = loop {
        session.last_position = session.position;

        let c = match peek(session) {
            Some(c) => c,
            None => break end_of_file(session)?,
        };

        let kind = match c {
            ' ' | '\t'  => { scan_space(session); TokenKind::Space },
            '\r' | '\n' => { scan_terminator(session)?; TokenKind::Terminator },
            ';'         => { scan_comment(session); TokenKind::Comment },
            ','         => { bump(session); TokenKind::Delimiter },
            ':'         => { bump(session); TokenKind::Colon },
            '0'..='9'   => { scan_integer(session)?; TokenKind::Integer },
            c if is_identifier_start(c) => {
                scan_identifier(session);
                session.identifier_class = Some(IdentifierClass::of(session.token_lexeme()));
                TokenKind::Identifier
            },
            c => {
                // Invalid characters never become tokens.
                bump(session);
                session.add_diagnostic(errors::unexpected_character(c))?;
                continue;
            },
        };

        if skip_trivia && kind.is_trivia() {
            continue;
        }
        break kind;
    };

    trace!("{:?} {:?} at {}", kind, session.token_lexeme(), session.last_position);
    session.token = kind;
    Ok(kind)
}

fn end_of_file(session: &mut Session) -> Result<TokenKind> {
    if !session.eof_reached {
        let ends_with_terminator = session.source().ends_with(|c: char| c == '\n' || c == '\r');
        if !session.source().is_empty() && !ends_with_terminator {
            session.add_diagnostic(notes::expected_final_newline())?;
        }
        session.eof_reached = true;
    }
    Ok(TokenKind::EndOfFile)
}

fn scan_space(session: &mut Session) {
    bump_while(session, |c| c == ' ' || c == '\t');
}

/// Accepts `\n`, `\r\n` and a lone `\r`, noting the last.
fn scan_terminator(session: &mut Session) -> Result<()> {
    if bump(session) == Some('\r') {
        if peek(session) == Some('\n') {
            bump(session);
        } else {
            session.add_diagnostic(notes::expected_lf_after_cr())?;
        }
    }
    Ok(())
}

/// Runs up to, not including, the line terminator.
fn scan_comment(session: &mut Session) {
    bump(session);
    bump_while(session, |c| c != '\n' && c != '\r');
}

/// Anything alphanumeric that starts with a digit is lexically an integer,
/// even when it is not a valid literal. Literals without digits or too
/// large for a `u64` are malformed too.
fn scan_integer(session: &mut Session) -> Result<()> {
    bump(session);
    bump_while(session, |c| c.is_ascii_alphanumeric() || c == '_');

    if integer::decode(session.token_lexeme()).is_none() {
        let factory = errors::malformed_integer(session.token_lexeme());
        session.add_diagnostic(factory)?;
    }
    Ok(())
}

fn scan_identifier(session: &mut Session) {
    bump(session);
    bump_while(session, |c| c.is_ascii_alphanumeric() || c == '_' || c == '.');
}

fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '.'
}

#[inline]
fn peek(session: &Session) -> Option<char> {
    session.source()[session.position..].chars().next()
}

/// Consumes one character and returns it.
#[inline]
fn bump(session: &mut Session) -> Option<char> {
    let c = peek(session)?;
    session.position += c.len_utf8();
    Some(c)
}

fn bump_while<F: Fn(char) -> bool>(session: &mut Session, predicate: F) {
    while let Some(c) = peek(session) {
        if !predicate(c) {
            break;
        }
        session.position += c.len_utf8();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::diagnostic::{errors, notes, Diagnostic};
    use crate::assembler::error::Error;
    use crate::assembler::session::Mode;

    fn tokens(session: &mut Session) -> Vec<(TokenKind, String)> {
        let mut out = Vec::new();
        loop {
            match scan(session).unwrap() {
                TokenKind::EndOfFile => return out,
                kind => out.push((kind, session.token_lexeme().to_owned())),
            }
        }
    }

    fn tok(kind: TokenKind, lexeme: &str) -> (TokenKind, String) {
        (kind, lexeme.to_owned())
    }

    const SOURCE: &str = "
label: ; comment
mvi a, 123 ; a = 123
mov b, a ; b = a
identifier 123
";

    fn expected() -> Vec<(TokenKind, String)> {
        use TokenKind::*;
        vec![
            tok(Terminator, "\n"),
            tok(Identifier, "label"),
            tok(Colon, ":"),
            tok(Space, " "),
            tok(Comment, "; comment"),
            tok(Terminator, "\n"),
            tok(Identifier, "mvi"),
            tok(Space, " "),
            tok(Identifier, "a"),
            tok(Delimiter, ","),
            tok(Space, " "),
            tok(Integer, "123"),
            tok(Space, " "),
            tok(Comment, "; a = 123"),
            tok(Terminator, "\n"),
            tok(Identifier, "mov"),
            tok(Space, " "),
            tok(Identifier, "b"),
            tok(Delimiter, ","),
            tok(Space, " "),
            tok(Identifier, "a"),
            tok(Space, " "),
            tok(Comment, "; b = a"),
            tok(Terminator, "\n"),
            tok(Identifier, "identifier"),
            tok(Space, " "),
            tok(Integer, "123"),
            tok(Terminator, "\n"),
        ]
    }

    #[test]
    fn test_scan_with_trivia() {
        let mut session = Session::with_source("test", SOURCE, Mode::Debug);
        assert_eq!(tokens(&mut session), expected());
        assert!(session.diagnostics().is_empty());
    }

    #[test]
    fn test_scan_without_trivia() {
        let mut session = Session::with_source("test", SOURCE, Mode::Debug);
        session.set_skip_trivia(true);
        let significant: Vec<_> = expected().into_iter().filter(|(k, _)| !k.is_trivia()).collect();
        assert_eq!(tokens(&mut session), significant);
        assert!(session.diagnostics().is_empty());
    }

    #[test]
    fn test_scan_diagnostics() {
        let source = "\r\n?\rmov:  12F";
        let mut session = Session::with_source("test", source, Mode::Debug);

        assert_eq!(tokens(&mut session), vec![
            tok(TokenKind::Terminator, "\r\n"),
            tok(TokenKind::Terminator, "\r"),
            tok(TokenKind::Identifier, "mov"),
            tok(TokenKind::Colon, ":"),
            tok(TokenKind::Space, "  "),
            tok(TokenKind::Integer, "12F"),
        ]);

        let expected: Vec<Diagnostic> = vec![
            errors::unexpected_character('?').at("test", 2, 1),
            notes::expected_lf_after_cr().at("test", 3, 1),
            errors::malformed_integer("12F").at("test", 10, 3),
            notes::expected_final_newline().at("test", 13, 0),
        ];
        assert_eq!(session.diagnostics(), &expected[..]);
    }

    #[test]
    fn test_fail_fast_aborts_on_first_error() {
        let mut session = Session::with_source("test", "\r\n?\rmov:  12F", Mode::FailFast);
        assert_eq!(scan(&mut session).unwrap(), TokenKind::Terminator);
        match scan(&mut session) {
            Err(Error::Aborted(message)) => assert_eq!(message, "error: unexpected character '?'"),
            other => panic!("expected an abort, got {:?}", other),
        }
    }

    #[test]
    fn test_fail_fast_ignores_notes() {
        let mut session = Session::with_source("test", "nop\rhlt", Mode::FailFast);
        let kinds: Vec<_> = tokens(&mut session).into_iter().map(|(k, _)| k).collect();
        assert_eq!(kinds, vec![TokenKind::Identifier, TokenKind::Terminator, TokenKind::Identifier]);
        assert!(session.diagnostics().is_empty());
    }

    #[test]
    fn test_end_of_file_is_idempotent() {
        let mut session = Session::with_source("test", "nop", Mode::Debug);
        assert_eq!(scan(&mut session).unwrap(), TokenKind::Identifier);
        for _ in 0..4 {
            assert_eq!(scan(&mut session).unwrap(), TokenKind::EndOfFile);
            assert_eq!(session.token_position(), 3);
            assert_eq!(session.token_length(), 0);
        }
        assert_eq!(session.diagnostics(), &[notes::expected_final_newline().at("test", 3, 0)]);
    }

    #[test]
    fn test_empty_and_blank_sources() {
        let mut session = Session::with_source("test", "", Mode::Debug);
        assert_eq!(scan(&mut session).unwrap(), TokenKind::EndOfFile);
        assert!(session.diagnostics().is_empty());

        let mut session = Session::with_source("test", "\n", Mode::Debug);
        assert_eq!(tokens(&mut session), vec![tok(TokenKind::Terminator, "\n")]);
        assert!(session.diagnostics().is_empty());

        let mut session = Session::with_source("test", "nop\r", Mode::Debug);
        tokens(&mut session);
        assert_eq!(session.diagnostics(), &[notes::expected_lf_after_cr().at("test", 3, 1)]);
    }

    #[test]
    fn test_identifier_classification() {
        let mut session = Session::with_source("test", "MVI a, loop\n", Mode::Debug);
        session.set_skip_trivia(true);
        let mut classes = Vec::new();
        while scan(&mut session).unwrap() != TokenKind::EndOfFile {
            classes.push(session.identifier_class());
        }
        assert_eq!(classes, vec![
            Some(IdentifierClass::Opcode),
            Some(IdentifierClass::Register),
            None,
            Some(IdentifierClass::Plain),
        ]);
    }

    #[test]
    fn test_identifier_charset() {
        let mut session = Session::with_source("test", ".org _start x.y2\n", Mode::Debug);
        session.set_skip_trivia(true);
        assert_eq!(tokens(&mut session), vec![
            tok(TokenKind::Identifier, ".org"),
            tok(TokenKind::Identifier, "_start"),
            tok(TokenKind::Identifier, "x.y2"),
        ]);
    }

    #[test]
    fn test_many_invalid_characters() {
        let source = format!("{}\n", "#".repeat(10_000));
        let mut session = Session::with_source("test", source, Mode::Debug);
        assert_eq!(scan(&mut session).unwrap(), TokenKind::Terminator);
        assert_eq!(session.diagnostics().len(), 10_000);
    }

    #[test]
    fn test_undecodable_integers() {
        let source = "0b_ 0x_ 0x1_0000_0000_0000_0000 99999999999999999999999 0xffffffffffffffff\n";
        let mut session = Session::with_source("test", source, Mode::Debug);
        session.set_skip_trivia(true);
        let kinds: Vec<_> = tokens(&mut session).into_iter().map(|(k, _)| k).collect();
        assert_eq!(kinds, vec![TokenKind::Integer; 5]);

        let expected: Vec<Diagnostic> = vec![
            errors::malformed_integer("0b_").at("test", 0, 3),
            errors::malformed_integer("0x_").at("test", 4, 3),
            errors::malformed_integer("0x1_0000_0000_0000_0000").at("test", 8, 23),
            errors::malformed_integer("99999999999999999999999").at("test", 32, 23),
        ];
        assert_eq!(session.diagnostics(), &expected[..]);
    }

    #[test]
    fn test_multibyte_unexpected_character() {
        let mut session = Session::with_source("test", "é\n", Mode::Debug);
        assert_eq!(scan(&mut session).unwrap(), TokenKind::Terminator);
        assert_eq!(session.token_position(), 2);
        assert_eq!(session.diagnostics()[0].location.as_ref().map(|l| l.length), Some(2));
    }
}
