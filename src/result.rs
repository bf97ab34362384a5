// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Display check result.

use std::{path::PathBuf, time::Duration};

use serde::Serialize;

use crate::{
    args,
    checker::{CallStats, CheckResult},
    diagnostic::{Diagnostic, Severity},
};

/// Counters of diagnostics by severity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct SeverityCount {
    info: usize,
    warnings: usize,
    errors: usize,
}

impl SeverityCount {
    fn add(&mut self, severity: Severity) {
        match severity {
            Severity::Info => self.info += 1,
            Severity::Warning => self.warnings += 1,
            Severity::Error => self.errors += 1,
        }
    }

    fn total(&self) -> usize {
        self.info + self.warnings + self.errors
    }
}

/// Output of the check in JSON format.
#[derive(Serialize)]
struct JsonOutput<'a> {
    diagnostics: Vec<&'a Diagnostic>,
    stats: CallStats,
}

/// Sort diagnostics for display.
fn sort_diagnostics<'a>(result: &'a [CheckResult], sort: &args::CheckSort) -> Vec<&'a Diagnostic> {
    let mut diags: Vec<&Diagnostic> = result.iter().flat_map(|x| &x.1).collect();
    match sort {
        args::CheckSort::Line => {
            diags.sort_by_key(|diag| (diag.path.as_path(), diag.line_number, diag.column));
        }
        args::CheckSort::Message => {
            diags.sort_by_key(|diag| {
                (
                    diag.message.as_str(),
                    diag.path.as_path(),
                    diag.line_number,
                    diag.column,
                )
            });
        }
    }
    diags
}

/// Display diagnostics in human format.
fn display_diagnostics_human(result: &[CheckResult], args: &args::CheckArgs) {
    for diag in sort_diagnostics(result, &args.sort) {
        println!("{diag}");
    }
}

/// Display diagnostics in JSON format.
fn display_diagnostics_json(result: &[CheckResult], args: &args::CheckArgs, stats: CallStats) {
    let output = JsonOutput {
        diagnostics: sort_diagnostics(result, &args.sort),
        stats,
    };
    println!("{}", serde_json::to_string(&output).unwrap_or_default());
}

/// Display file statistics.
fn display_file_stats(file_stats: &[(PathBuf, SeverityCount, CallStats)]) {
    for (filename, count, stats) in file_stats {
        let calls = format!(
            "{} calls, {} checked, {} noqa",
            stats.calls, stats.checked, stats.noqa
        );
        if count.total() == 0 {
            println!("{}: all OK! ({calls})", filename.display());
        } else {
            println!(
                "{}: {} problems ({} errors, {} warnings, {} info; {calls})",
                filename.display(),
                count.total(),
                count.errors,
                count.warnings,
                count.info,
            );
        }
    }
}

/// Display the result of the checks and return the appropriate exit code.
pub fn display_result(result: &[CheckResult], args: &args::CheckArgs, elapsed: &Duration) -> i32 {
    let mut files_checked = 0;
    let mut files_with_errors = 0;
    let mut count = SeverityCount::default();
    let mut stats = CallStats::default();
    let mut file_stats: Vec<(PathBuf, SeverityCount, CallStats)> = Vec::new();
    for (filename, diags, file_calls) in result {
        let mut count_file = SeverityCount::default();
        files_checked += 1;
        stats += *file_calls;
        if !diags.is_empty() {
            files_with_errors += 1;
            for diag in diags {
                count.add(diag.severity);
                count_file.add(diag.severity);
            }
        }
        if args.file_stats {
            file_stats.push((filename.clone(), count_file, *file_calls));
        }
    }
    if !args.quiet {
        match args.output {
            args::OutputFormat::Human => {
                if !args.no_errors {
                    display_diagnostics_human(result, args);
                }
                if args.file_stats {
                    file_stats.sort_by(|a, b| a.0.cmp(&b.0));
                    display_file_stats(&file_stats);
                }
            }
            args::OutputFormat::Json => {
                if !args.no_errors {
                    display_diagnostics_json(result, args, stats);
                }
            }
        }
    }
    let human = !args.quiet && args.output == args::OutputFormat::Human;
    if files_with_errors == 0 {
        if human {
            if files_checked > 0 {
                println!(
                    "{files_checked} files checked, {} calls: all OK! [{elapsed:?}]",
                    stats.checked
                );
            } else {
                println!("No files checked [{elapsed:?}]");
            }
        }
        0
    } else {
        if human {
            println!(
                "{files_checked} files checked, {} calls: \
                {} problems \
                in {files_with_errors} files \
                ({} errors, \
                {} warnings, \
                {} info) \
                [{elapsed:?}]",
                stats.checked,
                count.total(),
                count.errors,
                count.warnings,
                count.info,
            );
        }
        1
    }
}
