// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Lexical helpers: comments, string and char literals, identifiers.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lexeme {
    LineComment,
    BlockComment,
    Char,
    /// Regular string: `"..."`.
    Str,
    /// Verbatim string: `@"..."`.
    VerbatimStr,
    /// Raw string: `"""..."""`.
    RawStr,
    /// Interpolated string: `$"..."`, `$@"..."`, `@$"..."`, `$"""..."""`.
    InterpolatedStr,
}

impl Lexeme {
    /// Return `true` if the lexeme is a string literal that can hold a format string.
    #[must_use]
    pub fn is_format_literal(self) -> bool {
        matches!(self, Lexeme::Str | Lexeme::VerbatimStr | Lexeme::RawStr)
    }

    #[must_use]
    pub fn is_comment(self) -> bool {
        matches!(self, Lexeme::LineComment | Lexeme::BlockComment)
    }
}

#[inline]
fn starts_with_at(bytes: &[u8], pos: usize, pattern: &[u8]) -> bool {
    bytes.len() >= pos + pattern.len() && &bytes[pos..pos + pattern.len()] == pattern
}

/// Find the end of a quoted string or char (`pos` is the first byte after the opening
/// quote); an unterminated literal ends at the end of line.
fn end_quoted(bytes: &[u8], mut pos: usize, quote: u8) -> usize {
    let len = bytes.len();
    while pos < len {
        match bytes[pos] {
            b'\\' => pos += 2,
            b'\n' => return pos,
            b if b == quote => return pos + 1,
            _ => pos += 1,
        }
    }
    len
}

/// Find the end of a verbatim string (`""` is an escaped quote).
fn end_verbatim(bytes: &[u8], mut pos: usize) -> usize {
    let len = bytes.len();
    while pos < len {
        if bytes[pos] == b'"' {
            if pos + 1 < len && bytes[pos + 1] == b'"' {
                pos += 2;
                continue;
            }
            return pos + 1;
        }
        pos += 1;
    }
    len
}

/// Find the end of a raw string: the same number of quotes as the opening sequence.
fn end_raw(bytes: &[u8], pos: usize, quotes: usize) -> usize {
    let len = bytes.len();
    let mut pos = pos;
    while pos < len {
        if bytes[pos] == b'"' {
            let count = bytes[pos..].iter().take_while(|&&b| b == b'"').count();
            if count >= quotes {
                return pos + count;
            }
            pos += count;
        } else {
            pos += 1;
        }
    }
    len
}

/// Find the end of an interpolated string; expressions between braces may contain
/// other literals.
fn end_interpolated(bytes: &[u8], mut pos: usize, verbatim: bool) -> usize {
    let len = bytes.len();
    let mut depth = 0_usize;
    while pos < len {
        if depth > 0 {
            if let Some((end, _)) = lexeme_at(bytes, pos) {
                pos = end;
                continue;
            }
            match bytes[pos] {
                b'{' => depth += 1,
                b'}' => depth -= 1,
                _ => {}
            }
            pos += 1;
            continue;
        }
        match bytes[pos] {
            b'"' if verbatim && pos + 1 < len && bytes[pos + 1] == b'"' => pos += 2,
            b'"' => return pos + 1,
            b'\\' if !verbatim => pos += 2,
            b'\n' if !verbatim => return pos,
            b'{' if pos + 1 < len && bytes[pos + 1] == b'{' => pos += 2,
            b'{' => {
                depth += 1;
                pos += 1;
            }
            _ => pos += 1,
        }
    }
    len
}

/// Return the end position and the kind of the comment or literal starting at `pos`,
/// `None` if there is none at this position.
#[must_use]
pub fn lexeme_at(bytes: &[u8], pos: usize) -> Option<(usize, Lexeme)> {
    let len = bytes.len();
    match bytes.get(pos)? {
        b'/' if starts_with_at(bytes, pos, b"//") => Some((
            memchr::memchr(b'\n', &bytes[pos..]).map_or(len, |offset| pos + offset),
            Lexeme::LineComment,
        )),
        b'/' if starts_with_at(bytes, pos, b"/*") => Some((
            memchr::memmem::find(&bytes[pos + 2..], b"*/").map_or(len, |offset| pos + offset + 4),
            Lexeme::BlockComment,
        )),
        b'\'' => Some((end_quoted(bytes, pos + 1, b'\''), Lexeme::Char)),
        b'"' if starts_with_at(bytes, pos, b"\"\"\"") => {
            let quotes = bytes[pos..].iter().take_while(|&&b| b == b'"').count();
            Some((end_raw(bytes, pos + quotes, quotes), Lexeme::RawStr))
        }
        b'"' => Some((end_quoted(bytes, pos + 1, b'"'), Lexeme::Str)),
        b'@' if starts_with_at(bytes, pos, b"@\"") => {
            Some((end_verbatim(bytes, pos + 2), Lexeme::VerbatimStr))
        }
        b'@' if starts_with_at(bytes, pos, b"@$\"") => Some((
            end_interpolated(bytes, pos + 3, true),
            Lexeme::InterpolatedStr,
        )),
        b'$' => {
            let dollars = bytes[pos..].iter().take_while(|&&b| b == b'$').count();
            let after = pos + dollars;
            if starts_with_at(bytes, after, b"\"\"\"") {
                let quotes = bytes[after..].iter().take_while(|&&b| b == b'"').count();
                Some((end_raw(bytes, after + quotes, quotes), Lexeme::InterpolatedStr))
            } else if starts_with_at(bytes, after, b"@\"") {
                Some((
                    end_interpolated(bytes, after + 2, true),
                    Lexeme::InterpolatedStr,
                ))
            } else if starts_with_at(bytes, after, b"\"") {
                Some((
                    end_interpolated(bytes, after + 1, false),
                    Lexeme::InterpolatedStr,
                ))
            } else {
                None
            }
        }
        _ => None,
    }
}

#[inline]
#[must_use]
pub fn is_ident_start(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}

#[inline]
#[must_use]
pub fn is_ident_char(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}

/// Return the end of the identifier starting at `pos`.
#[must_use]
pub fn ident_end(s: &str, pos: usize) -> usize {
    s[pos..]
        .char_indices()
        .find(|(_, c)| !is_ident_char(*c))
        .map_or(s.len(), |(offset, _)| pos + offset)
}
