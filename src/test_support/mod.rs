//! Test utilities for unit tests.
//!
//! Provides record builders, descriptor fixtures on disk and a parser that
//! records which files discovery handed to it.

pub mod fixtures;

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use toml::{Table, Value};

use crate::core::{CoreDb, CoreParser, CoreRecord, DescriptorParser, LoadError, Section, Vlnv};

pub use fixtures::*;

/// Start building a record for `vlnv` (`vendor:library:name:version`).
pub fn core(vlnv: &str) -> CoreBuilder {
    CoreBuilder {
        vlnv: vlnv.parse().expect("test coordinate must be valid"),
        depend: Vec::new(),
        system: false,
        sections: BTreeMap::new(),
    }
}

/// Builder for [`CoreRecord`]s in tests.
#[derive(Debug, Clone)]
pub struct CoreBuilder {
    vlnv: Vlnv,
    depend: Vec<String>,
    system: bool,
    sections: BTreeMap<String, (Option<Vec<String>>, Table)>,
}

impl CoreBuilder {
    /// Set the base dependency list.
    pub fn depends(mut self, names: &[&str]) -> Self {
        self.depend = names.iter().map(|n| n.to_string()).collect();
        self
    }

    /// Declare a tool section with its own dependency list.
    pub fn tool(mut self, tool: &str, names: &[&str]) -> Self {
        let entry = self.sections.entry(tool.to_string()).or_default();
        entry.0 = Some(names.iter().map(|n| n.to_string()).collect());
        self
    }

    /// Set a string value in a section.
    pub fn attr(mut self, section: &str, key: &str, value: &str) -> Self {
        let entry = self.sections.entry(section.to_string()).or_default();
        entry.1.insert(key.to_string(), Value::String(value.to_string()));
        self
    }

    pub fn system(mut self) -> Self {
        self.system = true;
        self
    }

    /// Build with `core_root` set to `root`.
    pub fn at(self, root: impl Into<PathBuf>) -> CoreRecord {
        let mut record = CoreRecord::new(self.vlnv, root)
            .with_depend(self.depend)
            .with_system(self.system);
        for (name, (depend, values)) in self.sections {
            record = record.with_section(name, Section::new(depend, values));
        }
        record
    }

    /// Build with a placeholder `core_root`.
    pub fn build(self) -> CoreRecord {
        let root = PathBuf::from("/cores").join(self.vlnv.name());
        self.at(root)
    }
}

/// A database holding `records`, inserted in order.
pub fn db_of(records: impl IntoIterator<Item = CoreRecord>) -> CoreDb {
    let mut db = CoreDb::new();
    for record in records {
        db.insert(record);
    }
    db
}

/// Parser that remembers every path it was asked to parse.
#[derive(Debug, Default)]
pub struct RecordingParser {
    inner: DescriptorParser,
    seen: RefCell<Vec<PathBuf>>,
}

impl RecordingParser {
    pub fn seen(&self) -> Vec<PathBuf> {
        self.seen.borrow().clone()
    }
}

impl CoreParser for RecordingParser {
    fn parse(&self, path: &Path) -> Result<CoreRecord, LoadError> {
        self.seen.borrow_mut().push(path.to_path_buf());
        self.inner.parse(path)
    }
}
