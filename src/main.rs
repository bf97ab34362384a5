// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Fmtorder is a fast linter reporting composite format strings whose placeholders are
//! used out of order.
//!
//! A call like `String.Format("{1} {0}", a, b)` is valid but often the sign of a
//! mistake: the arguments are usually expected in the same order as the placeholders.
//!
//! The following sub-commands are available:
//!
//! - [`check`](#check-files): check files
//! - [`tokens`](#tokens): display placeholders of a format string
//!
//! # Check files
//!
//! The `check` command checks all source files (*.cs by default) given on command-line
//! or found in the provided directories.
//!
//! The .gitignore rules are respected: ignored files are skipped.
//!
//! A call is checked when its first argument is a string literal followed by as many
//! arguments as there are placeholders in the string. A line with a `noqa` comment
//! is not checked.
//!
//! # Tokens
//!
//! The `tokens` command displays the placeholders found in a format string, with
//! their index, and whether they are in order.

mod args;
mod checker;
mod config;
mod diagnostic;
mod dir;
mod format;
mod highlight;
mod logging;
mod result;
mod source;
mod tokens;

use clap::Parser;

use crate::args::{Cli, Command};
use crate::checker::run_check;
use crate::tokens::run_tokens;

fn main() {
    let args = Cli::parse();
    logging::init_tracing(args.verbose);
    let rc = match &args.command {
        Command::Check(args) => run_check(args),
        Command::Tokens(args) => run_tokens(args),
    };
    std::process::exit(rc);
}
