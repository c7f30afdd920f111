//! `.core` descriptor parsing.
//!
//! Discovery only depends on the [`CoreParser`] trait. [`DescriptorParser`]
//! is the default implementation, reading a small TOML format:
//!
//! ```toml
//! [core]
//! name = "uart"
//! vendor = "opencores"
//! library = "comm"
//! version = "1.2"
//! depend = ["fifo"]
//!
//! [provider]
//! name = "github"
//! repo = "olofk/uart16550"
//!
//! [icarus]
//! depend = ["vpi_utils"]
//! ```
//!
//! A `[system]` table marks the core as a top-level system. Every table other
//! than `core` and `provider` becomes a named section.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use toml::{Table, Value};

use crate::core::record::{Provider, ProviderKind, Section};
use crate::core::{CoreRecord, Vlnv};

/// File name suffix identifying core descriptors.
pub const DESCRIPTOR_SUFFIX: &str = ".core";

/// Why a descriptor could not be turned into a record.
///
/// All variants are recoverable during discovery: the file is skipped.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to parse {}: {message}", .path.display())]
    ParseSyntax { path: PathBuf, message: String },

    #[error("failed to register {} due to unknown provider: {provider}", .path.display())]
    UnknownProvider { path: PathBuf, provider: String },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Turns one descriptor file into a [`CoreRecord`].
pub trait CoreParser {
    /// Parse the descriptor at `path`.
    fn parse(&self, path: &Path) -> Result<CoreRecord, LoadError>;

    /// Suffix of files this parser understands.
    fn suffix(&self) -> &str {
        DESCRIPTOR_SUFFIX
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CoreTable {
    name: String,
    #[serde(default = "default_scope")]
    vendor: String,
    #[serde(default = "default_scope")]
    library: String,
    #[serde(default = "default_version")]
    version: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    depend: Vec<String>,
}

fn default_scope() -> String {
    "local".to_string()
}

fn default_version() -> String {
    "0".to_string()
}

#[derive(Debug, Deserialize)]
struct ProviderTable {
    name: String,
    #[serde(flatten)]
    settings: Table,
}

#[derive(Debug, Deserialize)]
struct SectionTable {
    #[serde(default)]
    depend: Option<Vec<String>>,
    #[serde(flatten)]
    values: Table,
}

/// The default TOML descriptor parser.
#[derive(Debug, Clone, Copy, Default)]
pub struct DescriptorParser;

impl DescriptorParser {
    pub fn new() -> Self {
        DescriptorParser
    }

    /// Parse descriptor text. `path` is used for `core_root` and errors.
    pub fn parse_str(&self, path: &Path, contents: &str) -> Result<CoreRecord, LoadError> {
        let syntax = |message: String| LoadError::ParseSyntax {
            path: path.to_path_buf(),
            message,
        };

        let mut document: Table =
            toml::from_str(contents).map_err(|e| syntax(e.message().to_string()))?;

        let core: CoreTable = match document.remove("core") {
            Some(value) => value
                .try_into()
                .map_err(|e: toml::de::Error| syntax(format!("in [core]: {}", e.message())))?,
            None => return Err(syntax("missing [core] table".to_string())),
        };

        let vlnv = Vlnv::new(core.vendor, core.library, core.name, core.version)
            .map_err(|e| syntax(e.to_string()))?;

        let core_root = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let mut record = CoreRecord::new(vlnv, core_root).with_depend(core.depend);
        if let Some(description) = core.description {
            record = record.with_description(description);
        }

        if let Some(value) = document.remove("provider") {
            let table: ProviderTable = value
                .try_into()
                .map_err(|e: toml::de::Error| syntax(format!("in [provider]: {}", e.message())))?;
            let kind: ProviderKind =
                table
                    .name
                    .parse()
                    .map_err(|provider| LoadError::UnknownProvider {
                        path: path.to_path_buf(),
                        provider,
                    })?;
            record = record.with_provider(Provider {
                kind,
                settings: table.settings,
            });
        }

        for (name, value) in document {
            if !matches!(value, Value::Table(_)) {
                return Err(syntax(format!("unexpected top-level key `{}`", name)));
            }
            let table: SectionTable = value
                .try_into()
                .map_err(|e: toml::de::Error| syntax(format!("in [{}]: {}", name, e.message())))?;

            if name == "system" {
                record = record.with_system(true);
            }
            record = record.with_section(name, Section::new(table.depend, table.values));
        }

        Ok(record)
    }
}

impl CoreParser for DescriptorParser {
    fn parse(&self, path: &Path) -> Result<CoreRecord, LoadError> {
        let contents = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.parse_str(path, &contents)
    }
}
