// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Source scanner: find calls with a string literal as first argument.

use std::collections::HashSet;

use crate::source::{
    call::Call,
    lexer::{Lexeme, ident_end, is_ident_char, is_ident_start, lexeme_at},
};

/// Keywords that can be followed by a parenthesis but are not calls.
const KEYWORDS: &[&str] = &[
    "as", "await", "catch", "checked", "default", "fixed", "for", "foreach", "if", "in", "is",
    "lock", "nameof", "return", "sizeof", "switch", "throw", "typeof", "unchecked", "using",
    "when", "while",
];

pub struct Scanner<'a> {
    text: &'a str,
    line_starts: Vec<usize>,
}

/// Return `true` if the content of a line comment disables checks on its line.
fn is_noqa_comment(comment: &str) -> bool {
    comment.trim_start().starts_with("noqa")
}

/// Range of an argument, without surrounding whitespace and comments.
#[derive(Default)]
struct ArgRange {
    start: Option<usize>,
    end: usize,
}

impl ArgRange {
    fn extend(&mut self, start: usize, end: usize) {
        self.start.get_or_insert(start);
        self.end = end;
    }

    /// Return the range and reset it for the next argument; an empty argument gives
    /// an empty range at `pos`.
    fn take(&mut self, pos: usize) -> (usize, usize) {
        let range = self.start.map_or((pos, pos), |start| (start, self.end));
        *self = Self::default();
        range
    }
}

/// Return the end of the type arguments starting at `pos` (e.g. `<int, string>`), or
/// `None` if the text at `pos` is not a list of type arguments.
fn type_args_end(text: &str, pos: usize) -> Option<usize> {
    let mut depth = 0_usize;
    for (offset, c) in text[pos..].char_indices() {
        match c {
            '<' => depth += 1,
            '>' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(pos + offset + 1);
                }
            }
            ',' | '.' | '?' | '[' | ']' => {}
            c if c.is_whitespace() || is_ident_char(c) => {}
            _ => return None,
        }
    }
    None
}

/// Return the position of the value of an argument, after its name if the argument is
/// named (e.g. `format: "{0}"`).
fn argument_value_start(text: &str, start: usize, end: usize) -> usize {
    let arg = &text[start..end];
    if arg.chars().next().is_some_and(is_ident_start) {
        let rest = arg[ident_end(arg, 0)..].trim_start();
        if let Some(value) = rest.strip_prefix(':')
            && !value.starts_with(':')
        {
            return end - value.trim_start().len();
        }
    }
    start
}

/// Split the arguments of a call, `open` being the position of the opening parenthesis.
///
/// Return the range of each argument (without surrounding whitespace and comments), or
/// `None` if the closing parenthesis is missing or brackets are unbalanced.
fn split_args(bytes: &[u8], open: usize) -> Option<Vec<(usize, usize)>> {
    let len = bytes.len();
    let mut args = Vec::new();
    let mut arg = ArgRange::default();
    let mut depth = 0_usize;
    let mut pos = open + 1;
    while pos < len {
        if let Some((end, lexeme)) = lexeme_at(bytes, pos) {
            if !lexeme.is_comment() {
                arg.extend(pos, end);
            }
            pos = end;
            continue;
        }
        match bytes[pos] {
            b'(' | b'[' | b'{' => depth += 1,
            b')' | b']' | b'}' if depth > 0 => depth -= 1,
            b')' => {
                let range = arg.take(pos);
                if range.0 < range.1 || !args.is_empty() {
                    args.push(range);
                }
                return Some(args);
            }
            b']' | b'}' => return None,
            b',' if depth == 0 => {
                args.push(arg.take(pos));
                pos += 1;
                continue;
            }
            _ => {}
        }
        if !bytes[pos].is_ascii_whitespace() {
            arg.extend(pos, pos + 1);
        }
        pos += 1;
    }
    None
}

impl<'a> Scanner<'a> {
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(memchr::memchr_iter(b'\n', text.as_bytes()).map(|pos| pos + 1))
            .collect();
        Self { text, line_starts }
    }

    /// Return the line number (starting at 1) of a position.
    #[must_use]
    pub fn line_number(&self, pos: usize) -> usize {
        self.line_starts.partition_point(|&start| start <= pos)
    }

    /// Return the text of a line (starting at 1), without the line feed.
    #[must_use]
    pub fn line(&self, line_number: usize) -> &'a str {
        let Some(&start) = self.line_starts.get(line_number.saturating_sub(1)) else {
            return "";
        };
        let end = self
            .line_starts
            .get(line_number)
            .map_or(self.text.len(), |next| next - 1);
        let text: &'a str = self.text;
        text[start..end].trim_end_matches('\r')
    }

    /// Return the position of the start of a line (starting at 1).
    #[must_use]
    pub fn line_start(&self, line_number: usize) -> usize {
        self.line_starts
            .get(line_number.saturating_sub(1))
            .copied()
            .unwrap_or_default()
    }

    /// Return the column (in chars, starting at 1) of a position.
    fn column(&self, pos: usize, line_number: usize) -> usize {
        self.text[self.line_start(line_number)..pos].chars().count() + 1
    }

    /// Return the identifier before the call name, if the call is qualified.
    fn receiver(&self, start: usize) -> Option<&'a str> {
        let text: &'a str = self.text;
        let before = text[..start].trim_end().strip_suffix('.')?;
        let before = before.strip_suffix('?').unwrap_or(before).trim_end();
        let pos = before
            .char_indices()
            .rev()
            .take_while(|(_, c)| is_ident_char(*c))
            .last()?
            .0;
        Some(&before[pos..])
    }

    /// Parse a call starting with the identifier at `start..end`.
    fn parse_call(&self, start: usize, end: usize) -> Option<Call<'a>> {
        let bytes = self.text.as_bytes();
        let skip_whitespace = |pos: usize| {
            pos + bytes[pos..]
                .iter()
                .take_while(|b| b.is_ascii_whitespace())
                .count()
        };
        let mut open = skip_whitespace(end);
        if bytes.get(open) == Some(&b'<') {
            open = skip_whitespace(type_args_end(self.text, open)?);
        }
        if bytes.get(open) != Some(&b'(') {
            return None;
        }
        let args = split_args(bytes, open)?;
        if args.len() < 2 {
            return None;
        }
        let (arg_start, literal_end) = args[0];
        let literal_start = argument_value_start(self.text, arg_start, literal_end);
        match lexeme_at(bytes, literal_start) {
            Some((end_literal, lexeme))
                if end_literal == literal_end && lexeme.is_format_literal() => {}
            _ => return None,
        }
        let line_number = self.line_number(literal_start);
        Some(Call {
            name: &self.text[start..end],
            receiver: self.receiver(start),
            literal: &self.text[literal_start..literal_end],
            literal_start,
            literal_end,
            line_number,
            column: self.column(literal_start, line_number),
            arg_count: args.len() - 1,
            noqa: false,
        })
    }

    /// Return all calls with a string literal as first argument followed by at least
    /// one argument, in order of appearance (nested calls included).
    #[must_use]
    pub fn scan(&self) -> Vec<Call<'a>> {
        let bytes = self.text.as_bytes();
        let len = bytes.len();
        let mut calls = Vec::new();
        let mut noqa_lines = HashSet::new();
        let mut pos = 0;
        while pos < len {
            if let Some((end, lexeme)) = lexeme_at(bytes, pos) {
                if lexeme == Lexeme::LineComment && is_noqa_comment(&self.text[pos + 2..end]) {
                    noqa_lines.insert(self.line_number(pos));
                }
                pos = end;
                continue;
            }
            let Some(c) = self.text[pos..].chars().next() else {
                break;
            };
            if is_ident_start(c) {
                let end = ident_end(self.text, pos);
                if !KEYWORDS.contains(&&self.text[pos..end])
                    && let Some(call) = self.parse_call(pos, end)
                {
                    tracing::debug!(
                        name = call.name,
                        line = call.line_number,
                        literal = call.literal,
                        args = call.arg_count,
                        "call found"
                    );
                    calls.push(call);
                }
                pos = end;
                continue;
            }
            pos += c.len_utf8();
        }
        for call in &mut calls {
            call.noqa = noqa_lines.contains(&call.line_number);
        }
        calls
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(text: &str) -> Vec<Call<'_>> {
        Scanner::new(text).scan()
    }

    #[test]
    fn test_no_calls() {
        assert!(scan("").is_empty());
        assert!(scan("var x = 1;").is_empty());
        assert!(scan("Foo();").is_empty());
        assert!(scan("Foo(\"{0}\");").is_empty());
        assert!(scan("Foo(x, \"{0}\");").is_empty());
        assert!(scan("Foo(\"{0}\" + y, x);").is_empty());
        assert!(scan("if (\"a\" == x) {}").is_empty());
        assert!(scan("Foo(\"{0}\", x").is_empty());
    }

    #[test]
    fn test_simple_call() {
        let text = "\t\tpublic void TestMethod()\n\t\t{\n\t\t\tvar str = String.Format(\"test {0} {1} {3} {2} {5} {4}\", 1,2,3,4,5, 6);\n\t\t}\n";
        let calls = scan(text);
        assert_eq!(calls.len(), 1);
        let call = &calls[0];
        assert_eq!(call.name, "Format");
        assert_eq!(call.receiver, Some("String"));
        assert_eq!(call.literal, "\"test {0} {1} {3} {2} {5} {4}\"");
        assert_eq!(&text[call.literal_start..call.literal_end], call.literal);
        assert_eq!(call.line_number, 3);
        assert_eq!(call.column, 28);
        assert_eq!(call.arg_count, 6);
        assert!(!call.noqa);
    }

    #[test]
    fn test_nested_brackets_and_literals() {
        let calls =
            scan("Log(\"{0} {1}\", Foo(a, b), new[] { 1, 2 }, \"x, y\", ',', /* , */ d);");
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].name, "Log");
        assert_eq!(calls[0].receiver, None);
        assert_eq!(calls[0].arg_count, 5);
    }

    #[test]
    fn test_nested_calls() {
        let calls = scan("Outer(\"{1} {0}\", Inner(\"{0}\", x), y);");
        assert_eq!(
            calls.iter().map(|c| (c.name, c.arg_count)).collect::<Vec<_>>(),
            vec![("Outer", 2), ("Inner", 1)]
        );
    }

    #[test]
    fn test_literal_kinds() {
        let calls = scan("A(@\"{1}\n{0}\", x, y); B($\"{x}\", y); C(\"\"\"{0}\"\"\", z);");
        assert_eq!(
            calls.iter().map(|c| (c.name, c.literal)).collect::<Vec<_>>(),
            vec![("A", "@\"{1}\n{0}\""), ("C", "\"\"\"{0}\"\"\"")]
        );
    }

    #[test]
    fn test_skip_comments_and_strings() {
        let text = "// Format(\"{1} {0}\", a, b);\n/* Format(\"{1} {0}\", a, b); */\nvar s = \"Format(\\\"{1}\\\", a)\";\n";
        assert!(scan(text).is_empty());
    }

    #[test]
    fn test_comments_around_literal() {
        for text in [
            "F(\"{1} {0}\" /* fmt */, a, b);",
            "F(/* fmt */ \"{1} {0}\", a, b);",
            "F(\n    // format\n    \"{1} {0}\",\n    a, b);",
            "F(\"{1} {0}\", // first\n    a, /* second */ b /* last */);",
        ] {
            let calls = scan(text);
            assert_eq!(calls.len(), 1, "{text}");
            assert_eq!(calls[0].literal, "\"{1} {0}\"", "{text}");
            assert_eq!(calls[0].arg_count, 2, "{text}");
        }
        let calls = scan("F(\n    // format\n    \"{1} {0}\",\n    a, b);");
        assert_eq!((calls[0].line_number, calls[0].column), (3, 5));
        assert!(scan("F(/* only a comment */);").is_empty());
    }

    #[test]
    fn test_generic_call() {
        let text = "Log.Info<int>(\"{1} {0}\", a, b); M<Dictionary<string, int?>> (\"{0}\", x);";
        let calls = scan(text);
        assert_eq!(
            calls
                .iter()
                .map(|c| (c.name, c.receiver, c.arg_count))
                .collect::<Vec<_>>(),
            vec![("Info", Some("Log"), 2), ("M", None, 1)]
        );
        assert!(scan("if (a < b) (\"{0}\", x);").is_empty());
        assert!(scan("x = a < b > (\"{0}\" + c);").is_empty());
    }

    #[test]
    fn test_named_argument() {
        let text = "String.Format(format: \"{1} {0}\", a, b);";
        let calls = scan(text);
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].literal, "\"{1} {0}\"");
        assert_eq!(&text[calls[0].literal_start..calls[0].literal_end], calls[0].literal);
        assert_eq!(calls[0].column, 23);
        assert!(scan("F(a ? \"{0}\" : \"{1}\", x);").is_empty());
        assert!(scan("F(Ns::Name, x);").is_empty());
    }

    #[test]
    fn test_receiver() {
        let calls = scan("logger?.Info(\"{0}\", a); obj . Write (\"{0}\", b); (x).Warn(\"{0}\", c);");
        assert_eq!(
            calls.iter().map(|c| (c.name, c.receiver)).collect::<Vec<_>>(),
            vec![
                ("Info", Some("logger")),
                ("Write", Some("obj")),
                ("Warn", None)
            ]
        );
    }

    #[test]
    fn test_noqa() {
        let text = "Format(\"{1} {0}\", a, b); // noqa\nFormat(\"{1} {0}\", a, b);\n";
        let calls = scan(text);
        assert_eq!(calls.len(), 2);
        assert!(calls[0].noqa);
        assert!(!calls[1].noqa);
    }

    #[test]
    fn test_lines() {
        let scanner = Scanner::new("first\r\nsecond\nthird");
        assert_eq!(scanner.line_number(0), 1);
        assert_eq!(scanner.line_number(7), 2);
        assert_eq!(scanner.line_number(14), 3);
        assert_eq!(scanner.line(1), "first");
        assert_eq!(scanner.line(2), "second");
        assert_eq!(scanner.line(3), "third");
        assert_eq!(scanner.line(4), "");
        assert_eq!(scanner.line_start(3), 14);
    }

    #[test]
    fn test_column_utf8() {
        let calls = scan("é = F(\"{1}{0}\", a, b);");
        assert_eq!(calls[0].column, 7);
        assert_eq!(calls[0].literal_start, 7);
    }
}
