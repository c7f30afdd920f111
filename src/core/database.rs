//! The core database.
//!
//! Holds one record per VLNV coordinate. Inserting a coordinate that is
//! already present replaces the old record, and the replacement counts as
//! the newest insertion for name lookups.

use indexmap::IndexMap;

use crate::core::{CoreRecord, Vlnv, VlnvPattern};

/// All known cores, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct CoreDb {
    cores: IndexMap<Vlnv, CoreRecord>,
}

impl CoreDb {
    /// Create a new empty database.
    pub fn new() -> Self {
        CoreDb {
            cores: IndexMap::new(),
        }
    }

    /// Add a record, returning the one it replaced, if any.
    pub fn insert(&mut self, record: CoreRecord) -> Option<CoreRecord> {
        tracing::debug!("Adding core {}", record.name());

        let vlnv = record.vlnv().clone();
        // Move replacements to the end so the newest insertion is last.
        let replaced = self.cores.shift_remove(&vlnv);
        if let Some(old) = &replaced {
            tracing::info!(
                "Replacing {} in {} with the version found in {}",
                vlnv,
                old.core_root().display(),
                record.core_root().display()
            );
        }

        self.cores.insert(vlnv, record);
        replaced
    }

    /// All records matching `pattern`, oldest insertion first.
    pub fn find(&self, pattern: &VlnvPattern) -> Vec<CoreRecord> {
        self.cores
            .values()
            .filter(|core| pattern.matches(core.vlnv()))
            .cloned()
            .collect()
    }

    /// Look up a core by name alone.
    ///
    /// When several coordinates share the name, the most recently inserted
    /// one wins.
    pub fn lookup(&self, name: &str) -> Option<CoreRecord> {
        let mut found = self.find(&VlnvPattern::by_name(name));
        if found.len() > 1 {
            tracing::debug!(
                "`{}` is ambiguous ({}), using the most recently added",
                name,
                found
                    .iter()
                    .map(|c| c.vlnv().to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }
        found.pop()
    }

    /// Every record, keyed by its `vendor:library:name:version` string.
    pub fn all(&self) -> IndexMap<String, CoreRecord> {
        self.cores
            .iter()
            .map(|(vlnv, core)| (vlnv.to_string(), core.clone()))
            .collect()
    }

    /// Records flagged as top-level systems.
    pub fn systems(&self) -> IndexMap<String, CoreRecord> {
        self.cores
            .iter()
            .filter(|(_, core)| core.is_system())
            .map(|(vlnv, core)| (vlnv.to_string(), core.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.cores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cores.is_empty()
    }
}
