//! asm85 reads Intel 8085 assembly and produces a syntax tree
//! along with positioned diagnostics for anything malformed.
//!
//! The [`assembler`] module holds the scanner, parser and tree.
//! The [`isa`] module holds the instruction-set name tables the
//! scanner uses to classify identifiers.

#[macro_use] extern crate log;

pub mod assembler;
pub mod isa;
