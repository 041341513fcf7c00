//! Scalar decoding: integer literals in several radices, floats, quoted text.
//!
//! The lexer guarantees that integer tokens only hold digits valid for their
//! radix. A token that breaks that guarantee is a bug on the lexer side, so
//! integer decoding panics rather than reporting a recoverable error.

use crate::token::TokenKind;

/// Split an optional leading sign off a numeric literal.
fn split_sign(text: &str) -> (bool, &str) {
    if let Some(rest) = text.strip_prefix('-') {
        (true, rest)
    } else {
        (false, text.strip_prefix('+').unwrap_or(text))
    }
}

fn strip_radix_prefix<'a>(digits: &'a str, lower: &str, upper: &str) -> &'a str {
    digits
        .strip_prefix(lower)
        .or_else(|| digits.strip_prefix(upper))
        .unwrap_or(digits)
}

/// Decode unsigned digits in `radix`.
///
/// # Panics
///
/// If `digits` is not a valid base-`radix` integer that fits in `u64`.
pub(crate) fn decode_digits(digits: &str, radix: u32) -> u64 {
    match u64::from_str_radix(digits, radix) {
        Ok(n) => n,
        Err(err) => panic!("integer token {digits:?} is not valid in base {radix}: {err}"),
    }
}

/// The magnitude of `i64::MIN` is one past `i64::MAX`, so the sign is applied
/// in `i128` before narrowing.
fn apply_sign(text: &str, negative: bool, magnitude: u64) -> i64 {
    let signed = if negative {
        -i128::from(magnitude)
    } else {
        i128::from(magnitude)
    };
    match i64::try_from(signed) {
        Ok(n) => n,
        Err(_) => panic!("integer token {text:?} overflows i64"),
    }
}

/// Decode an integer token of the given kind.
///
/// # Panics
///
/// If the token text is not a valid integer for its kind.
pub(crate) fn decode_int(kind: TokenKind, text: &str) -> i64 {
    let (negative, body) = split_sign(text);
    let magnitude = match kind {
        TokenKind::OctalInt => decode_digits(strip_radix_prefix(body, "0o", "0O"), 8),
        TokenKind::HexInt => decode_digits(strip_radix_prefix(body, "0x", "0X"), 16),
        TokenKind::SexagesimalInt => decode_sexagesimal(body),
        _ => decode_digits(body, 10),
    };
    apply_sign(text, negative, magnitude)
}

/// Fold colon-separated base-10 components left to right in base 60.
fn decode_sexagesimal(body: &str) -> u64 {
    body.split(':').fold(0u64, |acc, component| {
        let digit = decode_digits(component, 10);
        match acc.checked_mul(60).and_then(|n| n.checked_add(digit)) {
            Some(n) => n,
            None => panic!("sexagesimal integer {body:?} overflows u64"),
        }
    })
}

/// Decode a base-10 float literal.
pub(crate) fn decode_float(text: &str) -> Option<f64> {
    text.parse::<f64>().ok()
}

/// Drop the first and last character, the quote delimiters.
pub(crate) fn strip_quotes(text: &str) -> &str {
    let mut chars = text.chars();
    chars.next();
    chars.next_back();
    chars.as_str()
}
