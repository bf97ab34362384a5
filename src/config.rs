// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration: TOML file, overridden by command line arguments.

use std::path::{Path, PathBuf};

use encoding_rs::Encoding;
use path_absolutize::Absolutize;
use serde::{Deserialize, Serialize};

use crate::{
    args,
    diagnostic::Severity,
    format::order::{OrderRules, UnrecognizedPolicy},
};

/// Configuration files searched in the current directory, in this order.
pub const CONFIG_FILES: &[&str] = &["fmtorder.toml", ".fmtorder.toml"];

#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Extensions of files to check.
    pub extensions: Vec<String>,
    /// Functions to check; empty means all calls.
    pub functions: Vec<String>,
    pub allow_repeated: bool,
    pub unrecognized: UnrecognizedPolicy,
    pub severity: Severity,
    /// Encoding of files without BOM.
    pub encoding: String,
    #[serde(skip)]
    pub path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            extensions: vec!["cs".to_string()],
            functions: vec![],
            allow_repeated: false,
            unrecognized: UnrecognizedPolicy::default(),
            severity: Severity::Warning,
            encoding: encoding_rs::UTF_8.name().to_lowercase(),
            path: None,
        }
    }
}

/// Split a comma-separated list, ignoring empty items.
fn split_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

impl Config {
    /// Parse a configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or has unknown keys.
    pub fn from_toml(content: &str) -> Result<Self, Box<dyn std::error::Error>> {
        Ok(toml::from_str::<Config>(content)?)
    }

    /// Read the configuration from a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file can not be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)
            .map_err(|err| format!("could not read config file {}: {err}", path.display()))?;
        let mut config = Config::from_toml(&content)
            .map_err(|err| format!("invalid config file {}: {err}", path.display()))?;
        config.path = Some(path.absolutize()?.into_owned());
        Ok(config)
    }

    /// Override the configuration with command line arguments.
    #[must_use]
    pub fn with_args(mut self, args: &args::CheckArgs) -> Self {
        if let Some(extensions) = &args.extensions {
            self.extensions = split_list(extensions);
        }
        if let Some(functions) = &args.functions {
            self.functions = split_list(functions);
        }
        if args.allow_repeated {
            self.allow_repeated = true;
        }
        if let Some(unrecognized) = args.unrecognized {
            self.unrecognized = unrecognized;
        }
        if let Some(severity) = args.severity {
            self.severity = severity;
        }
        if let Some(encoding) = &args.encoding {
            self.encoding.clone_from(encoding);
        }
        self
    }

    /// Return the rules used to check the order of placeholders.
    #[must_use]
    pub fn order_rules(&self) -> OrderRules {
        OrderRules::default()
            .with_allow_repeated(self.allow_repeated)
            .with_unrecognized(self.unrecognized)
    }

    /// Return the encoding used for files without BOM.
    ///
    /// # Errors
    ///
    /// Returns an error if the encoding label is unknown.
    pub fn encoding(&self) -> Result<&'static Encoding, Box<dyn std::error::Error>> {
        Encoding::for_label(self.encoding.as_bytes())
            .ok_or_else(|| format!("unknown encoding: {}", self.encoding).into())
    }
}

/// Load the configuration: file given on command line, or the first configuration file
/// found in the current directory, or the default configuration; then apply command
/// line arguments.
///
/// # Errors
///
/// Returns an error if the configuration file can not be read or is invalid, or if the
/// encoding is unknown.
pub fn load_config(args: &args::CheckArgs) -> Result<Config, Box<dyn std::error::Error>> {
    let config = if let Some(path) = &args.config {
        Config::from_file(path)?
    } else if let Some(path) = CONFIG_FILES.iter().map(Path::new).find(|p| p.is_file()) {
        Config::from_file(path)?
    } else {
        Config::default()
    }
    .with_args(args);
    config.encoding()?;
    if config.extensions.is_empty() {
        return Err("no file extensions to check".into());
    }
    tracing::debug!(?config, "configuration loaded");
    Ok(config)
}
