//! The core manager: one registry per run.
//!
//! `CoreManager` owns the core database, the set of scanned roots, the
//! descriptor parser and the active tool. It is built once by the caller and
//! passed by reference to whatever needs to query cores.

use std::path::Path;

use indexmap::IndexMap;
use toml::Value;

use crate::core::{CoreDb, CoreParser, CoreRecord, DescriptorParser};
use crate::resolver::{ResolveError, Resolver};
use crate::sources::{DiscoveryError, RootSet, ScanReport, Walker};
use crate::util::paths;

/// Registry of discovered cores.
pub struct CoreManager {
    db: CoreDb,
    roots: RootSet,
    parser: Box<dyn CoreParser>,
    tool: Option<String>,
}

impl CoreManager {
    /// Create an empty manager that parses descriptors with `parser`.
    pub fn new(parser: Box<dyn CoreParser>) -> Self {
        CoreManager {
            db: CoreDb::new(),
            roots: RootSet::new(),
            parser,
            tool: None,
        }
    }

    /// Set the active tool.
    pub fn with_tool(mut self, tool: impl Into<String>) -> Self {
        self.set_tool(Some(tool.into()));
        self
    }

    /// Set or clear the active tool. An empty name clears it.
    pub fn set_tool(&mut self, tool: Option<String>) {
        self.tool = tool.filter(|t| !t.is_empty());
    }

    pub fn tool(&self) -> Option<&str> {
        self.tool.as_deref()
    }

    /// Add one root directory and scan it.
    ///
    /// Returns `None` if the root was already known, in which case nothing is
    /// scanned.
    pub fn add_root(
        &mut self,
        path: impl AsRef<Path>,
    ) -> Result<Option<ScanReport>, DiscoveryError> {
        let path = path.as_ref();
        let expanded = paths::expand_home(path);
        let absolute = paths::absolute(&expanded).map_err(|source| DiscoveryError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        if self.roots.contains(&absolute) {
            tracing::debug!("{} is already a cores root", absolute.display());
            return Ok(None);
        }

        // Only record roots that scan, so a failed root can be retried.
        if !expanded.is_dir() {
            return Err(DiscoveryError::NotADirectory(expanded));
        }

        self.roots.insert(absolute);
        let report = Walker::new(self.parser.as_ref()).scan(&expanded, &mut self.db)?;
        Ok(Some(report))
    }

    /// Add several roots in order. Passing `None` does nothing.
    ///
    /// Stops at the first root that is not a directory; roots before it stay
    /// scanned.
    pub fn add_roots<I, P>(&mut self, paths: I) -> Result<Vec<ScanReport>, DiscoveryError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut reports = Vec::new();
        for path in paths {
            if let Some(report) = self.add_root(path)? {
                reports.push(report);
            }
        }
        Ok(reports)
    }

    /// Insert a record directly.
    pub fn insert(&mut self, record: CoreRecord) -> Option<CoreRecord> {
        self.db.insert(record)
    }

    /// Every root scanned so far, in the order they were added.
    pub fn cores_root(&self) -> &RootSet {
        &self.roots
    }

    pub fn db(&self) -> &CoreDb {
        &self.db
    }

    /// All known cores, keyed by `vendor:library:name:version`.
    pub fn get_cores(&self) -> IndexMap<String, CoreRecord> {
        self.db.all()
    }

    /// Look up a core by name.
    pub fn get_core(&self, name: &str) -> Option<CoreRecord> {
        self.db.lookup(name)
    }

    /// Cores flagged as top-level systems.
    pub fn get_systems(&self) -> IndexMap<String, CoreRecord> {
        self.db.systems()
    }

    /// A resolver bound to this registry and its active tool.
    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::new(&self.db, self.tool.as_deref())
    }

    /// Build order for `name`, see [`Resolver::resolve`].
    pub fn get_depends(&self, name: &str) -> Result<Vec<String>, ResolveError> {
        self.resolver().resolve(name)
    }

    /// Per-core values of `attribute`, see [`Resolver::aggregate`].
    pub fn get_property(
        &self,
        name: &str,
        attribute: &str,
        recursive: bool,
    ) -> Result<IndexMap<String, Value>, ResolveError> {
        self.resolver().aggregate(name, attribute, recursive)
    }
}

impl Default for CoreManager {
    fn default() -> Self {
        CoreManager::new(Box::new(DescriptorParser::new()))
    }
}
