/// Single-byte lexical classes the scanner dispatches on.
///
/// Multi-byte elements (`--`, `/*`, `0x`, doubled quotes) are resolved by the
/// scanner with its lookahead window on top of these classes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ByteClass {
    /// ASCII space, tab, CR, LF.
    Space,
    Digit,
    SingleQuote,
    DoubleQuote,
    Backtick,
    Comma,
    /// `(` or `[`.
    Open,
    /// `)` or `]`.
    Close,
    /// Arithmetic operator: `+ - * / %`.
    Operator,
    /// MySQL-dialect line comment opener.
    Hash,
    Dot,
    /// A placeholder already present in the input.
    Question,
    Nul,
    /// Anything else passes through untouched.
    Word,
}

pub(crate) fn classify(b: u8) -> ByteClass {
    match b {
        b' ' | b'\t' | b'\r' | b'\n' => ByteClass::Space,
        b'0'..=b'9' => ByteClass::Digit,
        b'\'' => ByteClass::SingleQuote,
        b'"' => ByteClass::DoubleQuote,
        b'`' => ByteClass::Backtick,
        b',' => ByteClass::Comma,
        b'(' | b'[' => ByteClass::Open,
        b')' | b']' => ByteClass::Close,
        b'+' | b'-' | b'*' | b'/' | b'%' => ByteClass::Operator,
        b'#' => ByteClass::Hash,
        b'.' => ByteClass::Dot,
        b'?' => ByteClass::Question,
        0 => ByteClass::Nul,
        _ => ByteClass::Word,
    }
}

/// Whitespace the digest canonicalizes to a single space.
pub(crate) fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n')
}

/// Identifier-forming bytes. Bytes 0x80 and above count, so multi-byte UTF-8
/// stays part of the surrounding word and never starts a literal.
pub(crate) fn is_ident_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$' || b >= 0x80
}

pub(crate) fn is_hex_digit(b: u8) -> bool {
    b.is_ascii_hexdigit()
}
