// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Source files: lexical scan and formatting calls.

pub mod call;
pub mod lexer;
pub mod scanner;
