// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Order of placeholders: check that indexes are increasing.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::format::token::{PlaceholderIndex, PlaceholderToken};

/// How two consecutive indexes must compare.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderPolicy {
    /// Each index must be greater than all previous ones: `{0} {0} {1}` is out of order.
    #[default]
    Strict,
    /// Repeated indexes are allowed: `{0} {0} {1}` is ordered.
    NonDecreasing,
}

/// How placeholders without a numeric index (`{name}`, `{0:N2}`) are handled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum UnrecognizedPolicy {
    /// Compare them with index `-1`.
    #[default]
    Sentinel,
    /// Ignore them in the comparison.
    Skip,
}

impl std::fmt::Display for UnrecognizedPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            UnrecognizedPolicy::Sentinel => write!(f, "sentinel"),
            UnrecognizedPolicy::Skip => write!(f, "skip"),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct OrderRules {
    pub order: OrderPolicy,
    pub unrecognized: UnrecognizedPolicy,
}

impl OrderRules {
    /// Set the order policy from the "allow repeated indexes" flag.
    #[must_use]
    pub fn with_allow_repeated(mut self, allow_repeated: bool) -> Self {
        self.order = if allow_repeated {
            OrderPolicy::NonDecreasing
        } else {
            OrderPolicy::Strict
        };
        self
    }

    #[must_use]
    pub fn with_unrecognized(mut self, unrecognized: UnrecognizedPolicy) -> Self {
        self.unrecognized = unrecognized;
        self
    }

    /// Return the index to compare for a placeholder, `None` if it is ignored.
    fn comparable_index(self, index: PlaceholderIndex) -> Option<i32> {
        match (index, self.unrecognized) {
            (PlaceholderIndex::Unrecognized, UnrecognizedPolicy::Skip) => None,
            (index, _) => Some(index.sentinel()),
        }
    }

    fn follows(self, index: i32, max_index: i32) -> bool {
        match self.order {
            OrderPolicy::Strict => index > max_index,
            OrderPolicy::NonDecreasing => index >= max_index,
        }
    }
}

/// Result of the order check on a sequence of placeholders.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct OrderVerdict {
    pub ordered: bool,
    pub indices: Vec<i32>,
}

impl OrderVerdict {
    /// Return the indexes joined with spaces (e.g. `0 1 3 2`).
    #[must_use]
    pub fn joined_indices(&self) -> String {
        self.indices
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<String>>()
            .join(" ")
    }
}

/// Return `true` if the placeholders are in order according to the rules.
///
/// The first placeholder that does not follow the greatest index seen so far stops
/// the check.
#[must_use]
pub fn is_ordered(tokens: &[PlaceholderToken], rules: OrderRules) -> bool {
    let mut max_index = i32::MIN;
    for token in tokens {
        let Some(index) = rules.comparable_index(token.placeholder_index()) else {
            continue;
        };
        if !rules.follows(index, max_index) {
            return false;
        }
        max_index = index;
    }
    true
}

/// Check the order of placeholders and return the verdict with all indexes.
#[must_use]
pub fn is_ordered_and_indices(tokens: &[PlaceholderToken], rules: OrderRules) -> OrderVerdict {
    OrderVerdict {
        ordered: is_ordered(tokens, rules),
        indices: tokens.iter().map(PlaceholderToken::index).collect(),
    }
}
