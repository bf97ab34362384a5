// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

use crate::{diagnostic::Severity, format::order::UnrecognizedPolicy};

#[derive(Debug, Parser)]
#[command(
    author,
    name = "fmtorder",
    about = "Linter for out of order placeholders in composite format strings.",
    after_help = "For help with a specific command, see: `fmtorder help <command>`."
)]
#[command(version)]
pub struct Cli {
    /// Verbose mode: display debug logs (-v) or trace logs (-vv) on stderr
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check source files
    Check(CheckArgs),

    /// Display placeholders of a format string and their order
    Tokens(TokensArgs),
}

/// Arguments for the `check` command.
#[derive(Debug, Default, Args)]
#[allow(clippy::struct_excessive_bools)]
pub struct CheckArgs {
    /// List of files or directories
    #[clap(help = "List of files or directories [default: .]")]
    pub files: Vec<PathBuf>,

    /// Configuration file [default: fmtorder.toml or .fmtorder.toml in current directory]
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Display settings used to check files
    #[arg(long)]
    pub show_settings: bool,

    /// Extensions of files to check (comma-separated list) [default: cs]
    #[arg(short = 'x', long)]
    pub extensions: Option<String>,

    /// Check only calls to these functions (comma-separated list, for example: "Format,String.Format"); by default all calls are checked
    #[arg(short = 'F', long)]
    pub functions: Option<String>,

    /// Allow repeated indexes: "{0} {0} {1}" is considered in order
    #[arg(short, long)]
    pub allow_repeated: bool,

    /// How placeholders without a numeric index are compared
    #[arg(short, long, value_enum)]
    pub unrecognized: Option<UnrecognizedPolicy>,

    /// Severity of diagnostics [default: warning]
    #[arg(short = 'e', long, value_enum)]
    pub severity: Option<Severity>,

    /// Encoding of files without BOM [default: utf-8]
    #[arg(long)]
    pub encoding: Option<String>,

    /// Check calls on lines with a "noqa" comment (not checked by default)
    #[arg(long)]
    pub noqa: bool,

    /// Do not display errors found
    #[arg(short, long)]
    pub no_errors: bool,

    /// Sort of errors displayed
    #[arg(long, value_enum, default_value_t)]
    pub sort: CheckSort,

    /// Display statistics for each file checked (used only with `human` output format)
    #[arg(short, long)]
    pub file_stats: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    pub output: OutputFormat,

    /// Quiet mode: do not report any error, only set the exit code
    #[arg(short, long)]
    pub quiet: bool,
}

/// Sort of errors.
#[derive(Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum CheckSort {
    #[default]
    /// Sort by path, line number
    Line,

    /// Sort by message, path, line number
    Message,
}

/// Arguments for the `tokens` command.
#[derive(Debug, Args)]
pub struct TokensArgs {
    /// Format string
    pub format: String,

    /// Allow repeated indexes: "{0} {0} {1}" is considered in order
    #[arg(short, long)]
    pub allow_repeated: bool,

    /// How placeholders without a numeric index are compared
    #[arg(short, long, value_enum, default_value_t)]
    pub unrecognized: UnrecognizedPolicy,

    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    pub output: OutputFormat,
}

/// Output format.
#[derive(Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    /// Human readable text format
    Human,

    /// JSON
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            OutputFormat::Human => write!(f, "human"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}
