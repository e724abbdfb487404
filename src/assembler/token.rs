//! Token kinds produced by the scanner.
//!
//! Tokens themselves are never stored. The session remembers the kind,
//! start and end of the most recent one and the parser copies out only
//! the lexemes it keeps.
use std::fmt;

use crate::isa;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum TokenKind {
    EndOfFile,

    // Trivia
    Space,
    Terminator,
    Comment,

    // Literals
    Identifier,
    Integer,

    // Punctuators
    Delimiter,
    Colon,
}

impl TokenKind {
    pub fn is_trivia(self) -> bool {
        matches!(self, TokenKind::Space | TokenKind::Terminator | TokenKind::Comment)
    }

    pub fn is_literal(self) -> bool {
        matches!(self, TokenKind::Identifier | TokenKind::Integer)
    }

    pub fn is_punctuator(self) -> bool {
        matches!(self, TokenKind::Delimiter | TokenKind::Colon)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use TokenKind::*;
        let name = match self {
            EndOfFile  => "end of file",
            Space      => "space",
            Terminator => "line terminator",
            Comment    => "comment",
            Identifier => "identifier",
            Integer    => "integer",
            Delimiter  => "','",
            Colon      => "':'",
        };
        f.write_str(name)
    }
}

/// What an identifier names, as far as the instruction set can tell.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum IdentifierClass {
    Opcode,
    Register,
    Plain,
}

impl IdentifierClass {
    /// Lookups are case-insensitive.
    pub fn of(text: &str) -> Self {
        let upper = text.to_ascii_uppercase();
        if !isa::is_known_mnemonic_or_register(&upper) {
            IdentifierClass::Plain
        } else if isa::is_opcode_name(&upper) {
            IdentifierClass::Opcode
        } else {
            IdentifierClass::Register
        }
    }
}
