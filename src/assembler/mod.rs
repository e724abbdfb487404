//! The Assembler module is in charge of taking an
//! 8085 source file and producing a [`ast::SyntaxTree`].
//!
//! It does this by implementing a pull-based scanner
//! and a single look-ahead recursive descent parser
//! that recovers at the end of each malformed line.
//!
//! ```
//! use asm85::assembler::{parse_source, session::Mode};
//!
//! let session = parse_source("demo.asm", "loop: dcr b\njnz loop\n", Mode::Debug).unwrap();
//! assert!(session.diagnostics().is_empty());
//! ```

pub mod ast;
pub mod diagnostic;
pub mod error;
pub mod integer;
pub mod lexer;
pub mod line_map;
pub mod parser;
pub mod printer;
pub mod session;
pub mod token;
pub mod traversal;


use self::error::Result;
use self::session::{Mode, Options, Session};

/// Parses `source` in a fresh session and hands the session back,
/// tree and diagnostics included.
pub fn parse_source(file: &str, source: &str, mode: Mode) -> Result<Session> {
    let mut session = Session::new(file, Options {
        debug: mode == Mode::Debug,
        source: Some(source.to_owned()),
        skip_trivia: false,
    })?;
    parser::parse(&mut session)?;
    Ok(session)
}
