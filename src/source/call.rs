// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Formatting call found in a source file.

/// Call with a string literal as first argument, followed by at least one argument.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Call<'a> {
    /// Name of the function (e.g. `Format`).
    pub name: &'a str,
    /// Identifier before the name, if the call is qualified (e.g. `String`).
    pub receiver: Option<&'a str>,
    /// Literal as written in the source, including quotes (e.g. `"{0} {1}"`).
    pub literal: &'a str,
    pub literal_start: usize,
    pub literal_end: usize,
    pub line_number: usize,
    pub column: usize,
    /// Number of arguments after the literal.
    pub arg_count: usize,
    pub noqa: bool,
}

impl Call<'_> {
    /// Return `true` if the call matches one of the function names.
    ///
    /// A name can be qualified (`String.Format`) or not (`Format`); an empty list
    /// matches all calls.
    #[must_use]
    pub fn matches_functions(&self, functions: &[String]) -> bool {
        functions.is_empty()
            || functions.iter().any(|function| match function.rsplit_once('.') {
                Some((receiver, name)) => self.receiver == Some(receiver) && self.name == name,
                None => self.name == function.as_str(),
            })
    }
}
