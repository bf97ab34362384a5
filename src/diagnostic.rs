// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Diagnostic for source files.

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use colored::Colorize;
use serde::{
    Deserialize, Serialize,
    ser::{SerializeStruct, Serializer},
};

use crate::highlight::HighlightExt;

#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Ord,
    PartialOrd,
    Hash,
    Deserialize,
    Serialize,
    ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Info,
    Warning,
    Error,
}

#[derive(Debug, Default)]
pub struct DiagnosticLine {
    pub line_number: usize,
    pub message: String,
    pub highlights: Vec<(usize, usize)>,
}

#[derive(Debug, Default, Serialize)]
pub struct Diagnostic {
    pub path: PathBuf,
    pub rule: &'static str,
    pub severity: Severity,
    pub message: String,
    pub line_number: usize,
    pub column: usize,
    pub lines: Vec<DiagnosticLine>,
}

impl std::fmt::Display for Severity {
    /// Format the `Severity` as a colored string for display.
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let s = match self {
            Severity::Info => "info".cyan(),
            Severity::Warning => "warning".yellow(),
            Severity::Error => "error".bright_red().bold(),
        };
        write!(f, "{s}")
    }
}

impl Serialize for DiagnosticLine {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("DiagnosticLine", 3)?;
        state.serialize_field("line_number", &self.line_number)?;
        state.serialize_field("message", &self.message)?;
        // Convert highlights from byte positions to character positions for serialization.
        let hl: Vec<_> = self
            .highlights
            .iter()
            .map(|(s, e)| {
                (
                    self.message[..*s].chars().count(),
                    self.message[..*e].chars().count(),
                )
            })
            .collect();
        state.serialize_field("highlights", &hl)?;
        state.end()
    }
}

impl Diagnostic {
    /// Create a new `Diagnostic` with the given path, rule, severity, and message.
    #[must_use]
    pub fn new(path: &Path, rule: &'static str, severity: Severity, message: String) -> Self {
        Self {
            path: PathBuf::from(path),
            rule,
            severity,
            message,
            ..Default::default()
        }
    }

    /// Set the position (line and column, starting at 1) of the diagnostic.
    #[must_use]
    pub fn with_position(mut self, line_number: usize, column: usize) -> Self {
        self.line_number = line_number;
        self.column = column;
        self
    }

    pub fn add_line(&mut self, line_number: usize, message: &str, highlights: &[(usize, usize)]) {
        self.lines.push(DiagnosticLine {
            line_number,
            message: message.to_string(),
            highlights: highlights.to_vec(),
        });
    }

    /// Format the diagnostic line (number + message) with colors for display.
    fn format_line(line: &DiagnosticLine) -> String {
        let prefix_line = if line.line_number > 0 {
            format!("{:7} | ", line.line_number).cyan().to_string()
        } else {
            "        | ".cyan().to_string()
        };
        if line.message.is_empty() {
            return prefix_line;
        }
        format!(
            "{prefix_line}{}",
            line.message.highlight_list_pos(&line.highlights)
        )
    }

    fn format_lines(&self) -> String {
        if self.lines.is_empty() {
            "\n".to_string()
        } else {
            let mut list_lines = Vec::with_capacity(self.lines.len() + 4);
            list_lines.push(String::new());
            list_lines.push("        |".cyan().to_string());
            for line in &self.lines {
                list_lines.push(Diagnostic::format_line(line));
            }
            list_lines.push("        |".cyan().to_string());
            list_lines.push(String::new());
            list_lines.join("\n")
        }
    }
}

impl std::fmt::Display for Diagnostic {
    /// Format the `Diagnostic` for display, including file, position, severity, message,
    /// and context.
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let str_position = if self.line_number > 0 {
            format!(":{}:{}", self.line_number, self.column)
        } else {
            String::new()
        };
        write!(
            f,
            "{}{str_position}: [{}:{}] {}{}",
            self.path.display().to_string().white().bold(),
            self.severity,
            self.rule,
            self.message,
            self.format_lines(),
        )
    }
}
