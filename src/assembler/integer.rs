//! Integer literals.
//!
//! Literals may be written in binary, octal, decimal or hexadecimal,
//! marked either by a `0` prefix or by a trailing letter, with `_`
//! allowed as a digit separator:
//!
//! ```nasm
//! mvi a, 123       ; decimal
//! mvi a, 0b1010    ; prefixed: 0b 0o 0d 0x
//! mvi a, 1010b     ; suffixed: b o d h
//! lxi h, 0ffffh    ; suffixed hex must start with a digit
//! lxi h, 1_000
//! ```
use regex::RegexSet;
use std::sync::OnceLock;

fn literal_shapes() -> &'static RegexSet {
    static SHAPES: OnceLock<RegexSet> = OnceLock::new();
    SHAPES.get_or_init(|| {
        RegexSet::new(&[
            r"^[0-9][0-9_]*$",
            r"^0[bB][01_]+$",
            r"^0[oO][0-7_]+$",
            r"^0[dD][0-9_]+$",
            r"^0[xX][0-9A-Fa-f_]+$",
            r"^[01][01_]*[bB]$",
            r"^[0-7][0-7_]*[oO]$",
            r"^[0-9][0-9_]*[dD]$",
            r"^[0-9][0-9A-Fa-f_]*[hH]$",
        ])
        .unwrap()
    })
}

/// Returns true if `text` has the shape of an integer literal.
pub fn is_valid_literal(text: &str) -> bool {
    literal_shapes().is_match(text)
}

/// Decodes an integer literal.
///
/// Returns `None` when `text` is not a valid literal, when its digits
/// are all separators, or when the value does not fit in a `u64`.
///
/// A literal like `0bh` can be read both as prefixed binary and as
/// suffixed hex. An `x` prefix always wins (`0xb` is 11); any other
/// prefix loses to the suffix (`0bh` is 11 as well).
pub fn decode(text: &str) -> Option<u64> {
    if !is_valid_literal(text) {
        return None;
    }

    let bytes = text.as_bytes();
    let mut prefix = match bytes {
        [b'0', marker, _, ..] if b"bBoOdDxX".contains(marker) => Some(*marker),
        _ => None,
    };
    let mut suffix = match bytes.last() {
        Some(marker) if b"bBoOdDhH".contains(marker) => Some(*marker),
        _ => None,
    };

    if prefix.is_some() && suffix.is_some() {
        if let Some(b'x') | Some(b'X') = prefix {
            suffix = None;
        } else {
            prefix = None;
        }
    }

    let (digits, radix) = match (prefix, suffix) {
        (Some(marker), _) => (&text[2..], radix_of(marker)),
        (None, Some(marker)) => (&text[..text.len() - 1], radix_of(marker)),
        (None, None) => (text, 10),
    };

    let digits: String = digits.chars().filter(|&c| c != '_').collect();
    u64::from_str_radix(&digits, radix).ok()
}

fn radix_of(marker: u8) -> u32 {
    match marker {
        b'b' | b'B' => 2,
        b'o' | b'O' => 8,
        b'd' | b'D' => 10,
        _ => 16,
    }
}
