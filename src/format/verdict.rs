// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Verdict on a formatting call: format string + number of arguments.

use crate::format::{
    order::{OrderRules, OrderVerdict, is_ordered_and_indices},
    token::PlaceholderToken,
    tokenizer::tokenize,
};

/// Placeholders of a formatting call used out of order.
#[derive(Debug)]
pub struct OutOfOrder<'a> {
    pub tokens: Vec<PlaceholderToken<'a>>,
    pub verdict: OrderVerdict,
}

impl OutOfOrder<'_> {
    /// Return the indexes joined with spaces (e.g. `0 1 3 2 5 4`).
    #[must_use]
    pub fn joined_indices(&self) -> String {
        self.verdict.joined_indices()
    }

    /// Return the message to display for this call.
    #[must_use]
    pub fn message(&self) -> String {
        format!(
            "Arguments passed to the format are used out of order ({})",
            self.joined_indices()
        )
    }

    /// Return the positions of placeholders in the format string.
    #[must_use]
    pub fn positions(&self) -> Vec<(usize, usize)> {
        self.tokens.iter().map(|t| (t.start, t.end)).collect()
    }
}

/// Check a formatting call, given its format string and the number of arguments that
/// follow it.
///
/// Return `None` when there is nothing to report: no placeholders, a number of
/// placeholders different from the number of arguments (the call can not be analyzed),
/// or placeholders in order.
#[must_use]
pub fn check_call(format: &str, arg_count: usize, rules: OrderRules) -> Option<OutOfOrder<'_>> {
    let tokens = tokenize(format);
    tracing::trace!(
        tokens = %tokens.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "),
        "placeholders found"
    );
    if tokens.is_empty() {
        return None;
    }
    if tokens.len() != arg_count {
        tracing::debug!(
            expected = tokens.len(),
            got = arg_count,
            "wrong arguments count, call skipped"
        );
        return None;
    }
    let verdict = is_ordered_and_indices(&tokens, rules);
    if verdict.ordered {
        return None;
    }
    Some(OutOfOrder { tokens, verdict })
}
