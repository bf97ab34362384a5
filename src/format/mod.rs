// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Composite format strings: placeholders, their indexes and their order.

pub mod order;
pub mod token;
pub mod tokenizer;
pub mod verdict;
