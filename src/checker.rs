// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Checker for source files.

use std::{
    borrow::Cow,
    fs::File,
    io::Read,
    ops::AddAssign,
    path::{Path, PathBuf},
};

use colored::Colorize;
use rayon::prelude::*;
use serde::Serialize;

use crate::{
    args,
    config::{Config, load_config},
    diagnostic::{Diagnostic, Severity},
    dir::find_source_files,
    format::verdict::{OutOfOrder, check_call},
    result::display_result,
    source::{call::Call, scanner::Scanner},
};

/// Name of the rule reporting placeholders used out of order.
pub const RULE_FORMAT_ORDER: &str = "format-order";

pub type CheckResult = (PathBuf, Vec<Diagnostic>, CallStats);

/// Counters of calls found in a file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CallStats {
    /// Calls with a string literal as first argument and at least one more argument.
    pub calls: usize,
    /// Calls ignored because of a "noqa" comment.
    pub noqa: usize,
    /// Calls checked.
    pub checked: usize,
    /// Calls with placeholders used out of order.
    pub out_of_order: usize,
}

impl AddAssign for CallStats {
    fn add_assign(&mut self, other: Self) {
        *self = Self {
            calls: self.calls + other.calls,
            noqa: self.noqa + other.noqa,
            checked: self.checked + other.checked,
            out_of_order: self.out_of_order + other.out_of_order,
        };
    }
}

pub struct Checker<'d, 'c> {
    pub path: PathBuf,
    pub diagnostics: Vec<Diagnostic>,
    pub stats: CallStats,
    data: &'d [u8],
    config: &'c Config,
    check_noqa: bool,
}

impl<'d, 'c> Checker<'d, 'c> {
    /// Create a new `Checker` for the given data and configuration.
    #[must_use]
    pub fn new(data: &'d [u8], config: &'c Config) -> Self {
        Checker {
            path: PathBuf::new(),
            diagnostics: Vec::new(),
            stats: CallStats::default(),
            data,
            config,
            check_noqa: false,
        }
    }

    /// Set the path of the file being checked.
    #[must_use]
    pub fn with_path(mut self, path: &Path) -> Self {
        self.path = PathBuf::from(path);
        self
    }

    /// Set the flag indicating the calls on lines with a "noqa" comment are checked.
    #[must_use]
    pub fn with_check_noqa(mut self, check_noqa: bool) -> Self {
        self.check_noqa = check_noqa;
        self
    }

    /// Report a diagnostic for the whole file.
    pub fn report_file(&mut self, rule: &'static str, severity: Severity, message: String) {
        self.diagnostics
            .push(Diagnostic::new(self.path.as_path(), rule, severity, message));
    }

    /// Report a call with placeholders out of order: the lines of the format string are
    /// displayed with the placeholders highlighted.
    pub fn report_call(&mut self, scanner: &Scanner, call: &Call, out_of_order: &OutOfOrder) {
        let mut diagnostic = Diagnostic::new(
            self.path.as_path(),
            RULE_FORMAT_ORDER,
            self.config.severity,
            out_of_order.message(),
        )
        .with_position(call.line_number, call.column);
        let positions: Vec<(usize, usize)> = out_of_order
            .positions()
            .iter()
            .map(|(start, end)| (call.literal_start + start, call.literal_start + end))
            .collect();
        let last_line = scanner.line_number(call.literal_end.saturating_sub(1));
        for line_number in call.line_number..=last_line {
            let line = scanner.line(line_number);
            let line_start = scanner.line_start(line_number);
            let highlights: Vec<(usize, usize)> = positions
                .iter()
                .filter(|(start, end)| *start >= line_start && *end <= line_start + line.len())
                .map(|(start, end)| (start - line_start, end - line_start))
                .collect();
            diagnostic.add_line(line_number, line, &highlights);
        }
        self.diagnostics.push(diagnostic);
    }

    /// Decode the data: the BOM gives the encoding, otherwise the configured encoding
    /// is used.
    fn decode(&mut self) -> Cow<'d, str> {
        let encoding = self.config.encoding().unwrap_or(encoding_rs::UTF_8);
        let (text, encoding_used, errors) = encoding.decode(self.data);
        if errors {
            self.report_file(
                "encoding",
                Severity::Info,
                format!("invalid characters for encoding {}", encoding_used.name()),
            );
        }
        text
    }

    /// Check a formatting call.
    fn check_format_call(&mut self, scanner: &Scanner, call: &Call) {
        if !call.matches_functions(&self.config.functions) {
            return;
        }
        if call.noqa && !self.check_noqa {
            self.stats.noqa += 1;
            return;
        }
        self.stats.checked += 1;
        let rules = self.config.order_rules();
        if let Some(out_of_order) = check_call(call.literal, call.arg_count, rules) {
            tracing::debug!(
                path = %self.path.display(),
                line = call.line_number,
                indices = %out_of_order.joined_indices(),
                "placeholders out of order"
            );
            self.stats.out_of_order += 1;
            self.report_call(scanner, call, &out_of_order);
        }
    }

    /// Perform all checks on every call of the file.
    pub fn do_all_checks(&mut self) {
        let text = self.decode();
        let scanner = Scanner::new(&text);
        let calls = scanner.scan();
        self.stats.calls += calls.len();
        for call in &calls {
            self.check_format_call(&scanner, call);
        }
    }
}

/// Check a single source file and return the list of diagnostics found.
pub fn check_file(path: &Path, args: &args::CheckArgs, config: &Config) -> CheckResult {
    let Ok(mut file) = File::open(path) else {
        return (
            PathBuf::from(path),
            vec![Diagnostic::new(
                path,
                "read-error",
                Severity::Error,
                "could not open file".to_string(),
            )],
            CallStats::default(),
        );
    };
    let mut buf = Vec::new();
    let Ok(_) = file.read_to_end(&mut buf) else {
        return (
            PathBuf::from(path),
            vec![Diagnostic::new(
                path,
                "read-error",
                Severity::Error,
                "could not read file".to_string(),
            )],
            CallStats::default(),
        );
    };
    let mut checker = Checker::new(&buf, config)
        .with_path(path)
        .with_check_noqa(args.noqa);
    checker.do_all_checks();
    (PathBuf::from(path), checker.diagnostics, checker.stats)
}

/// Display the settings used to check files.
fn display_settings(args: &args::CheckArgs, config: &Config) {
    if args.quiet || !args.show_settings {
        return;
    }
    println!("Configuration:");
    println!(
        "  Configuration file: {}",
        config
            .path
            .as_ref()
            .map_or_else(|| "<none>".to_string(), |p| p.display().to_string())
    );
    println!("  File extensions: {}", config.extensions.join(", "));
    println!(
        "  Functions checked: {}",
        if config.functions.is_empty() {
            "<all>".to_string()
        } else {
            config.functions.join(", ")
        }
    );
    println!(
        "  Repeated indexes allowed: {}",
        if config.allow_repeated { "yes" } else { "no" }
    );
    println!("  Unrecognized placeholders: {}", config.unrecognized);
    println!("  Severity: {}", config.severity);
    println!("  Default encoding: {}", config.encoding);
    println!(
        "  Check noqa lines: {}",
        if args.noqa { "yes" } else { "no" }
    );
    println!("  Output format: {}", args.output);
}

/// Check and display result for all source files.
pub fn run_check(args: &args::CheckArgs) -> i32 {
    let start = std::time::Instant::now();
    let config = match load_config(args) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}: {err}", "Error".bright_red().bold());
            return 1;
        }
    };
    display_settings(args, &config);
    let source_files = find_source_files(&args.files, &config.extensions);
    tracing::debug!(count = source_files.len(), "source files found");
    let result: Vec<CheckResult> = source_files
        .par_iter()
        .map(|f| check_file(f, args, &config))
        .collect();
    let elapsed = start.elapsed();
    display_result(&result, args, &elapsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_source(content: &str, config: &Config) -> (Vec<Diagnostic>, CallStats) {
        let mut checker = Checker::new(content.as_bytes(), config).with_path(Path::new("test.cs"));
        checker.do_all_checks();
        (checker.diagnostics, checker.stats)
    }

    #[test]
    fn test_empty() {
        let (diags, stats) = check_source("", &Config::default());
        assert!(diags.is_empty());
        assert_eq!(stats, CallStats::default());
    }

    #[test]
    fn test_out_of_order() {
        let (diags, stats) = check_source(
            r#"
		public void TestMethod()
		{
			var str = String.Format("test {0} {1} {3} {2} {5} {4}", 1,2,3,4,5, 6);

		}
"#,
            &Config::default(),
        );
        assert_eq!(diags.len(), 1);
        let diag = &diags[0];
        assert_eq!(diag.rule, RULE_FORMAT_ORDER);
        assert_eq!(diag.severity, Severity::Warning);
        assert_eq!(
            diag.message,
            "Arguments passed to the format are used out of order (0 1 3 2 5 4)"
        );
        assert_eq!((diag.line_number, diag.column), (4, 28));
        assert_eq!(diag.lines.len(), 1);
        assert_eq!(diag.lines[0].line_number, 4);
        assert_eq!(diag.lines[0].highlights.len(), 6);
        let (start, end) = diag.lines[0].highlights[2];
        assert_eq!(&diag.lines[0].message[start..end], "{3}");
        assert_eq!(
            stats,
            CallStats {
                calls: 1,
                noqa: 0,
                checked: 1,
                out_of_order: 1,
            }
        );
    }

    #[test]
    fn test_wrong_arguments_count() {
        let (diags, stats) = check_source(
            r#"
		public void TestMethod()
		{
			var str = String.Format("test {0} {1} {3} {2} {5} {4}", 1,2,3,4,5);

		}
"#,
            &Config::default(),
        );
        assert!(diags.is_empty());
        assert_eq!(stats.checked, 1);
        assert_eq!(stats.out_of_order, 0);
    }

    #[test]
    fn test_ordered_and_no_placeholders() {
        let (diags, _) = check_source(
            r#"
Console.WriteLine("{0} {1}", a, b);
Console.WriteLine("no placeholders", a);
Log($"{b} {a}", x);
"#,
            &Config::default(),
        );
        assert!(diags.is_empty());
    }

    #[test]
    fn test_multiline_verbatim() {
        let (diags, _) = check_source("F(@\"{1}\n{0}\", a, b);\n", &Config::default());
        assert_eq!(diags.len(), 1);
        assert_eq!(
            diags[0].message,
            "Arguments passed to the format are used out of order (1 0)"
        );
        assert_eq!(diags[0].lines.len(), 2);
        assert_eq!(diags[0].lines[0].highlights, vec![(4, 7)]);
        assert_eq!(diags[0].lines[1].highlights, vec![(0, 3)]);
    }

    #[test]
    fn test_comments_around_format() {
        let (diags, stats) = check_source(
            r#"
var a = String.Format("{1} {0}" /* fmt */, x, y);
var b = String.Format(/* fmt */ "{1} {0}", x, y);
var c = String.Format(
    // format
    "{1} {0}",
    x, y);
"#,
            &Config::default(),
        );
        assert_eq!(stats.checked, 3);
        assert_eq!(
            diags
                .iter()
                .map(|d| (d.line_number, d.column))
                .collect::<Vec<_>>(),
            vec![(2, 23), (3, 33), (6, 5)]
        );
        assert_eq!(diags[2].lines.len(), 1);
        assert_eq!(diags[2].lines[0].highlights, vec![(5, 8), (9, 12)]);
    }

    #[test]
    fn test_generic_and_named_calls() {
        let (diags, _) = check_source(
            "Log.Info<int>(\"{1} {0}\", a, b);\nString.Format(format: \"{1} {0}\", a, b);\n",
            &Config::default(),
        );
        assert_eq!(
            diags
                .iter()
                .map(|d| (d.line_number, d.column))
                .collect::<Vec<_>>(),
            vec![(1, 15), (2, 23)]
        );
    }

    #[test]
    fn test_noqa() {
        let content = "F(\"{1} {0}\", a, b); // noqa\nF(\"{1} {0}\", a, b);\n";
        let config = Config::default();
        let (diags, stats) = check_source(content, &config);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].line_number, 2);
        assert_eq!(stats.noqa, 1);

        let mut checker = Checker::new(content.as_bytes(), &config).with_check_noqa(true);
        checker.do_all_checks();
        assert_eq!(checker.diagnostics.len(), 2);
    }

    #[test]
    fn test_functions_and_policies() {
        let content = "Format(\"{0} {0} {1}\", a, b, c);\nWrite(\"{1} {0}\", a, b);\n";
        let config = Config {
            functions: vec!["Format".to_string()],
            ..Default::default()
        };
        let (diags, stats) = check_source(content, &config);
        assert_eq!(diags.len(), 1);
        assert_eq!(
            diags[0].message,
            "Arguments passed to the format are used out of order (0 0 1)"
        );
        assert_eq!(stats.calls, 2);
        assert_eq!(stats.checked, 1);

        let config = Config {
            functions: vec!["Format".to_string()],
            allow_repeated: true,
            severity: Severity::Error,
            ..Default::default()
        };
        let (diags, _) = check_source(content, &config);
        assert!(diags.is_empty());
    }

    #[test]
    fn test_encoding() {
        let config = Config {
            encoding: "windows-1252".to_string(),
            ..Default::default()
        };
        let (content, _, _) = encoding_rs::WINDOWS_1252.encode("F(\"é {1} {0}\", a, b);");
        let mut checker = Checker::new(&content, &config);
        checker.do_all_checks();
        assert_eq!(checker.diagnostics.len(), 1);
        assert_eq!(checker.diagnostics[0].lines[0].message, "F(\"é {1} {0}\", a, b);");

        // Invalid UTF-8 is reported and the file is still checked.
        let config = Config::default();
        let mut checker = Checker::new(b"F(\"\xff {1} {0}\", a, b);", &config);
        checker.do_all_checks();
        assert_eq!(checker.diagnostics.len(), 2);
        assert_eq!(checker.diagnostics[0].rule, "encoding");
        assert_eq!(checker.diagnostics[0].severity, Severity::Info);
        assert_eq!(checker.diagnostics[1].rule, RULE_FORMAT_ORDER);
    }

    #[test]
    fn test_bom() {
        let mut content = vec![0xef, 0xbb, 0xbf];
        content.extend_from_slice(b"F(\"{1} {0}\", a, b);");
        let config = Config::default();
        let mut checker = Checker::new(&content, &config);
        checker.do_all_checks();
        assert_eq!(checker.diagnostics.len(), 1);
        let diag = &checker.diagnostics[0];
        assert_eq!((diag.line_number, diag.column), (1, 3));
    }

    #[test]
    fn test_missing_file() {
        let (path, diags, stats) = check_file(
            Path::new("/nonexistent/file.cs"),
            &args::CheckArgs::default(),
            &Config::default(),
        );
        assert_eq!(path, PathBuf::from("/nonexistent/file.cs"));
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].rule, "read-error");
        assert_eq!(stats, CallStats::default());
    }
}
