// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

use colored::Colorize;

const HL_TEXT: &str = "bright yellow";
const HL_BG: &str = "red";

pub trait HighlightExt {
    fn highlight_list_pos(&self, list_pos: &[(usize, usize)]) -> String;
}

impl HighlightExt for str {
    /// Highlight multiple substrings from `start` to `end` with the given text and background colors.
    ///
    /// Positions overlapping a previous one or out of the string are ignored.
    fn highlight_list_pos(&self, list_pos: &[(usize, usize)]) -> String {
        let mut result = String::new();
        let mut pos = 0;
        for &(start, end) in list_pos {
            if start < pos || end > self.len() || start > end {
                continue;
            }
            result.push_str(&self[pos..start]);
            result.push_str(
                &self[start..end]
                    .color(HL_TEXT)
                    .bold()
                    .on_color(HL_BG)
                    .to_string(),
            );
            pos = end;
        }
        result.push_str(&self[pos..]);
        result
    }
}
