// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Placeholder token found in a format string (`{0}`, `{ 1 }`, `{name}`).

use std::sync::OnceLock;

use serde::{
    Serialize,
    ser::{SerializeStruct, Serializer},
};

/// Index used for placeholders whose content is not a number.
pub const SENTINEL_INDEX: i32 = -1;

/// Index of a placeholder, as extracted from its content.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlaceholderIndex {
    Numeric(i32),
    /// Named placeholder, format specifier or garbage (`{}`, `{abc}`, `{0:N2}`).
    Unrecognized,
}

impl PlaceholderIndex {
    /// Return the index as an integer, with [`SENTINEL_INDEX`] for an unrecognized index.
    #[must_use]
    pub fn sentinel(self) -> i32 {
        match self {
            PlaceholderIndex::Numeric(index) => index,
            PlaceholderIndex::Unrecognized => SENTINEL_INDEX,
        }
    }

    #[must_use]
    pub fn is_numeric(self) -> bool {
        matches!(self, PlaceholderIndex::Numeric(_))
    }
}

/// Extract the index of a raw placeholder (with braces).
///
/// The content between the first `{` and the next `}` is trimmed and parsed as a
/// signed base-10 integer. Anything else gives [`PlaceholderIndex::Unrecognized`].
#[must_use]
pub fn extract_index(raw: &str) -> PlaceholderIndex {
    let mut rest = raw;
    while let Some(pos_open) = rest.find('{') {
        let after_open = &rest[pos_open + 1..];
        let Some(pos_close) = after_open.find('}') else {
            break;
        };
        let content = after_open[..pos_close].trim();
        if !content.contains('\n') {
            return content
                .parse::<i32>()
                .map_or(PlaceholderIndex::Unrecognized, PlaceholderIndex::Numeric);
        }
        rest = after_open;
    }
    PlaceholderIndex::Unrecognized
}

/// A placeholder found in a format string.
///
/// The index is computed on first access and cached; the computation is pure so
/// concurrent first accesses yield the same value.
#[derive(Clone, Debug)]
pub struct PlaceholderToken<'a> {
    pub raw: &'a str,
    pub start: usize,
    pub end: usize,
    index: OnceLock<PlaceholderIndex>,
}

impl<'a> PlaceholderToken<'a> {
    #[must_use]
    pub fn new(raw: &'a str, start: usize, end: usize) -> Self {
        Self {
            raw,
            start,
            end,
            index: OnceLock::new(),
        }
    }

    /// Return the index of the placeholder (computed once).
    #[must_use]
    pub fn placeholder_index(&self) -> PlaceholderIndex {
        *self.index.get_or_init(|| extract_index(self.raw))
    }

    /// Return the index of the placeholder, `-1` if it is not a number.
    #[must_use]
    pub fn index(&self) -> i32 {
        self.placeholder_index().sentinel()
    }
}

impl PartialEq for PlaceholderToken<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw && self.start == other.start && self.end == other.end
    }
}

impl Eq for PlaceholderToken<'_> {}

impl std::fmt::Display for PlaceholderToken<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Index: {}, Token: {}", self.index(), self.raw)
    }
}

impl Serialize for PlaceholderToken<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("PlaceholderToken", 5)?;
        state.serialize_field("token", self.raw)?;
        state.serialize_field("start", &self.start)?;
        state.serialize_field("end", &self.end)?;
        state.serialize_field("index", &self.index())?;
        state.serialize_field("numeric", &self.placeholder_index().is_numeric())?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_numeric() {
        assert_eq!(extract_index("{0}"), PlaceholderIndex::Numeric(0));
        assert_eq!(extract_index("{12}"), PlaceholderIndex::Numeric(12));
        assert_eq!(extract_index("{  7  }"), PlaceholderIndex::Numeric(7));
        assert_eq!(extract_index("{\t3 }"), PlaceholderIndex::Numeric(3));
        assert_eq!(extract_index("{+4}"), PlaceholderIndex::Numeric(4));
        assert_eq!(extract_index("{-1}"), PlaceholderIndex::Numeric(-1));
        assert_eq!(extract_index("{\n 5 }"), PlaceholderIndex::Numeric(5));
    }

    #[test]
    fn test_extract_unrecognized() {
        assert_eq!(extract_index("{}"), PlaceholderIndex::Unrecognized);
        assert_eq!(extract_index("{ }"), PlaceholderIndex::Unrecognized);
        assert_eq!(extract_index("{abc}"), PlaceholderIndex::Unrecognized);
        assert_eq!(extract_index("{0:N2}"), PlaceholderIndex::Unrecognized);
        assert_eq!(extract_index("{0,-5}"), PlaceholderIndex::Unrecognized);
        assert_eq!(extract_index("{1 2}"), PlaceholderIndex::Unrecognized);
        assert_eq!(extract_index("{a{0}"), PlaceholderIndex::Unrecognized);
        assert_eq!(extract_index("{99999999999}"), PlaceholderIndex::Unrecognized);
        assert_eq!(extract_index("no braces"), PlaceholderIndex::Unrecognized);
        assert_eq!(extract_index("{0\n1}"), PlaceholderIndex::Unrecognized);
    }

    #[test]
    fn test_sentinel() {
        assert_eq!(PlaceholderIndex::Numeric(5).sentinel(), 5);
        assert_eq!(PlaceholderIndex::Unrecognized.sentinel(), SENTINEL_INDEX);
        assert_eq!(PlaceholderToken::new("{abc}", 0, 5).index(), -1);
        assert_eq!(PlaceholderToken::new("{0:N2}", 0, 6).index(), -1);
        assert_eq!(PlaceholderToken::new("{  7  }", 0, 7).index(), 7);
    }

    #[test]
    fn test_index_cached() {
        let token = PlaceholderToken::new("{ 3 }", 4, 9);
        assert_eq!(token.index(), 3);
        assert_eq!(token.index(), 3);
        let copy = token.clone();
        assert_eq!(copy, token);
        assert_eq!(copy.index(), 3);
    }

    #[test]
    fn test_index_concurrent_readers() {
        let token = PlaceholderToken::new("{42}", 0, 4);
        std::thread::scope(|s| {
            let handles: Vec<_> = (0..4).map(|_| s.spawn(|| token.index())).collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), 42);
            }
        });
    }

    #[test]
    fn test_display() {
        assert_eq!(
            PlaceholderToken::new("{ 2 }", 0, 5).to_string(),
            "Index: 2, Token: { 2 }"
        );
        assert_eq!(
            PlaceholderToken::new("{x}", 0, 3).to_string(),
            "Index: -1, Token: {x}"
        );
    }
}
