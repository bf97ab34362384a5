// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Placeholders of a single format string.

use colored::Colorize;
use serde::Serialize;

use crate::{
    args,
    format::{
        order::{OrderRules, OrderVerdict, is_ordered_and_indices},
        token::PlaceholderToken,
        tokenizer::tokenize,
    },
    highlight::HighlightExt,
};

#[derive(Serialize)]
struct TokensReport<'a> {
    format: &'a str,
    tokens: Vec<PlaceholderToken<'a>>,
    rules: OrderRules,
    #[serde(flatten)]
    verdict: OrderVerdict,
}

impl<'a> TokensReport<'a> {
    fn new(format: &'a str, rules: OrderRules) -> Self {
        let tokens = tokenize(format);
        let verdict = is_ordered_and_indices(&tokens, rules);
        Self {
            format,
            tokens,
            rules,
            verdict,
        }
    }

    fn verdict_line(&self) -> String {
        if self.tokens.is_empty() {
            "No placeholders".to_string()
        } else if self.verdict.ordered {
            format!("In order ({})", self.verdict.joined_indices())
                .green()
                .to_string()
        } else {
            format!("Out of order ({})", self.verdict.joined_indices())
                .bright_red()
                .bold()
                .to_string()
        }
    }
}

impl std::fmt::Display for TokensReport<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let positions: Vec<(usize, usize)> =
            self.tokens.iter().map(|t| (t.start, t.end)).collect();
        writeln!(f, "{}", self.format.highlight_list_pos(&positions))?;
        for token in &self.tokens {
            writeln!(f, "  {token}")?;
        }
        write!(f, "{}", self.verdict_line())
    }
}

/// Display placeholders of the format string and whether they are in order.
///
/// Return 0 if the placeholders are in order, 1 otherwise.
pub fn run_tokens(args: &args::TokensArgs) -> i32 {
    let rules = OrderRules::default()
        .with_allow_repeated(args.allow_repeated)
        .with_unrecognized(args.unrecognized);
    let report = TokensReport::new(&args.format, rules);
    tracing::debug!(count = report.tokens.len(), "placeholders found");
    match args.output {
        args::OutputFormat::Human => println!("{report}"),
        args::OutputFormat::Json => {
            println!("{}", serde_json::to_string(&report).unwrap_or_default());
        }
    }
    i32::from(!report.verdict.ordered)
}
