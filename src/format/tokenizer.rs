// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Placeholder iterator: return placeholders of a format string, left to right.

use memchr::{memchr, memchr2};

use crate::format::token::PlaceholderToken;

/// Iterator on placeholders of a format string.
///
/// A placeholder starts with `{` and ends with the first `}` that follows on the same
/// line; nested and escaped braces (`{{`, `}}`) are not handled.
pub struct Placeholders<'a> {
    s: &'a str,
    len: usize,
    pos: usize,
}

impl<'a> Placeholders<'a> {
    #[must_use]
    pub fn new(s: &'a str) -> Self {
        Self {
            s,
            len: s.len(),
            pos: 0,
        }
    }
}

impl<'a> Iterator for Placeholders<'a> {
    type Item = PlaceholderToken<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let bytes = self.s.as_bytes();
        while self.pos < self.len {
            let Some(offset_open) = memchr(b'{', &bytes[self.pos..]) else {
                self.pos = self.len;
                return None;
            };
            let start = self.pos + offset_open;
            match memchr2(b'}', b'\n', &bytes[start + 1..]) {
                Some(offset_close) if bytes[start + 1 + offset_close] == b'}' => {
                    let end = start + offset_close + 2;
                    self.pos = end;
                    return Some(PlaceholderToken::new(&self.s[start..end], start, end));
                }
                // No closing brace on this line: retry from the next char.
                _ => self.pos = start + 1,
            }
        }
        None
    }
}

/// Return all placeholders of a format string, in order of appearance.
#[must_use]
pub fn tokenize(format: &str) -> Vec<PlaceholderToken<'_>> {
    Placeholders::new(format).collect()
}
