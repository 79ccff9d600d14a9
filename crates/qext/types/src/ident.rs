//! Identifier lexical rules shared by the parser and the renderer.

/// Can `ch` start a free-form identifier (`[A-Za-z_]`)?
pub fn is_ident_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

/// Can `ch` continue a free-form identifier (`[A-Za-z0-9_]`)?
pub fn is_ident_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

/// Is `s` a well-formed identifier `[A-Za-z_][A-Za-z0-9_]*`?
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if is_ident_start(first) => chars.all(is_ident_char),
        _ => false,
    }
}
