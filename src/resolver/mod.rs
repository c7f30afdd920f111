//! Dependency resolution.
//!
//! Computes the build order of a core: every dependency, transitively,
//! followed by the core itself. Dependencies are named by core name only and
//! looked up in the [`CoreDb`]. The active tool may add extra dependencies
//! through a section of the same name.
//!
//! The resolver only reads the database. Cycles are reported as errors
//! instead of recursing forever.

pub mod errors;

pub use errors::ResolveError;

use indexmap::{IndexMap, IndexSet};
use toml::Value;

use crate::core::{CoreDb, CoreRecord};

/// Resolves dependency closures against a database.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    db: &'a CoreDb,
    tool: Option<&'a str>,
}

impl<'a> Resolver<'a> {
    /// Create a resolver. An empty tool name means no tool overlay.
    pub fn new(db: &'a CoreDb, tool: Option<&'a str>) -> Self {
        Resolver {
            db,
            tool: tool.filter(|t| !t.is_empty()),
        }
    }

    pub fn tool(&self) -> Option<&'a str> {
        self.tool
    }

    /// The direct dependencies of `core`: its own list followed by the
    /// active tool's list.
    pub fn direct_depends(&self, core: &CoreRecord) -> Vec<String> {
        let mut depends = core.depend().to_vec();
        if let Some(extra) = self.tool.and_then(|tool| core.tool_depends(tool)) {
            depends.extend_from_slice(extra);
        }
        depends
    }

    /// Build order for `name`, ending with `name` itself.
    ///
    /// Each core appears once, at the position where it is first needed.
    pub fn resolve(&self, name: &str) -> Result<Vec<String>, ResolveError> {
        tracing::debug!("Resolving dependencies of {}", name);

        let core = self.lookup(name)?;
        if self.direct_depends(&core).is_empty() {
            return Ok(vec![name.to_string()]);
        }

        let mut order = IndexSet::new();
        let mut path = Vec::new();
        self.expand(name, &mut path, &mut order)?;

        Ok(order.into_iter().collect())
    }

    // A name only enters `order` once its whole subtree has, so a name
    // already in `order` needs no second expansion.
    fn expand(
        &self,
        name: &str,
        path: &mut Vec<String>,
        order: &mut IndexSet<String>,
    ) -> Result<(), ResolveError> {
        if order.contains(name) {
            return Ok(());
        }
        check_cycle(path, name)?;

        let core = self.lookup(name)?;

        path.push(name.to_string());
        for dep in self.direct_depends(&core) {
            self.expand(&dep, path, order)?;
        }
        path.pop();

        order.insert(name.to_string());
        Ok(())
    }

    /// Collect `attribute` from `name` and, if `recursive`, from its
    /// dependency tree.
    ///
    /// Dependencies come first. The first value found for a core is kept.
    /// Cores that are unknown or lack the attribute have no entry.
    pub fn aggregate(
        &self,
        name: &str,
        attribute: &str,
        recursive: bool,
    ) -> Result<IndexMap<String, Value>, ResolveError> {
        let mut found = IndexMap::new();
        let mut done = IndexSet::new();
        let mut path = Vec::new();
        self.collect(name, attribute, recursive, &mut path, &mut done, &mut found)?;
        Ok(found)
    }

    // `done` holds names whose subtree has been fully collected.
    fn collect(
        &self,
        name: &str,
        attribute: &str,
        recursive: bool,
        path: &mut Vec<String>,
        done: &mut IndexSet<String>,
        found: &mut IndexMap<String, Value>,
    ) -> Result<(), ResolveError> {
        if done.contains(name) {
            return Ok(());
        }
        check_cycle(path, name)?;

        let core = self.db.lookup(name);

        if let Some(core) = core.as_ref().filter(|_| recursive) {
            path.push(name.to_string());
            for dep in core.depend() {
                self.collect(dep, attribute, true, path, done, found)?;
            }
            path.pop();
        }

        if let Some(value) = core.and_then(|c| c.attribute(attribute)) {
            found.entry(name.to_string()).or_insert(value);
        }
        done.insert(name.to_string());

        Ok(())
    }

    fn lookup(&self, name: &str) -> Result<CoreRecord, ResolveError> {
        self.db
            .lookup(name)
            .ok_or_else(|| ResolveError::DependencyNotFound {
                name: name.to_string(),
            })
    }
}

fn check_cycle(path: &[String], name: &str) -> Result<(), ResolveError> {
    match path.iter().position(|n| n == name) {
        Some(start) => {
            let mut cycle = path[start..].to_vec();
            cycle.push(name.to_string());
            Err(ResolveError::CyclicDependency { cycle })
        }
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{core, db_of};

    fn resolve(db: &CoreDb, name: &str) -> Result<Vec<String>, ResolveError> {
        Resolver::new(db, None).resolve(name)
    }

    #[test]
    fn test_closure_orders_and_dedups() {
        let db = db_of([
            core("acme:ip:a:1").depends(&["b", "c"]).build(),
            core("acme:ip:b:1").depends(&["c"]).build(),
            core("acme:ip:c:1").build(),
        ]);

        assert_eq!(resolve(&db, "a").unwrap(), ["c", "b", "a"]);
    }

    #[test]
    fn test_leaf_resolves_to_itself() {
        let db = db_of([core("acme:ip:leaf:1").build()]);
        assert_eq!(resolve(&db, "leaf").unwrap(), ["leaf"]);
    }

    #[test]
    fn test_first_required_position_wins() {
        // a -> [b, d], b -> [c], d -> [c, e]
        let db = db_of([
            core("acme:ip:a:1").depends(&["b", "d"]).build(),
            core("acme:ip:b:1").depends(&["c"]).build(),
            core("acme:ip:c:1").build(),
            core("acme:ip:d:1").depends(&["c", "e"]).build(),
            core("acme:ip:e:1").build(),
        ]);

        assert_eq!(resolve(&db, "a").unwrap(), ["c", "b", "e", "d", "a"]);
    }

    #[test]
    fn test_missing_names_fail() {
        let db = db_of([
            core("acme:ip:a:1").depends(&["b"]).build(),
            core("acme:ip:b:1").depends(&["z"]).build(),
        ]);

        assert_eq!(
            resolve(&db, "a"),
            Err(ResolveError::DependencyNotFound { name: "z".into() })
        );
        assert_eq!(
            resolve(&db, "nope"),
            Err(ResolveError::DependencyNotFound { name: "nope".into() })
        );
    }

    #[test]
    fn test_tool_overlay() {
        let db = db_of([
            core("acme:ip:a:1")
                .depends(&["b"])
                .tool("icarus", &["vpi"])
                .build(),
            core("acme:ip:b:1").tool("icarus", &["c"]).build(),
            core("acme:ip:c:1").build(),
            core("acme:ip:vpi:1").build(),
            core("acme:ip:solo:1").tool("icarus", &[]).build(),
        ]);

        assert_eq!(Resolver::new(&db, None).resolve("a").unwrap(), ["b", "a"]);
        assert_eq!(Resolver::new(&db, Some("")).resolve("a").unwrap(), ["b", "a"]);
        assert_eq!(
            Resolver::new(&db, Some("modelsim")).resolve("a").unwrap(),
            ["b", "a"]
        );
        assert_eq!(
            Resolver::new(&db, Some("icarus")).resolve("a").unwrap(),
            ["c", "b", "vpi", "a"]
        );
        assert_eq!(
            Resolver::new(&db, Some("icarus")).resolve("solo").unwrap(),
            ["solo"]
        );
    }

    #[test]
    fn test_cycles_are_errors() {
        let db = db_of([
            core("acme:ip:a:1").depends(&["b"]).build(),
            core("acme:ip:b:1").depends(&["c"]).build(),
            core("acme:ip:c:1").depends(&["a"]).build(),
            core("acme:ip:self:1").depends(&["self"]).build(),
        ]);

        assert_eq!(
            resolve(&db, "a"),
            Err(ResolveError::CyclicDependency {
                cycle: vec!["a".into(), "b".into(), "c".into(), "a".into()],
            })
        );
        assert!(matches!(
            resolve(&db, "self"),
            Err(ResolveError::CyclicDependency { .. })
        ));
        assert!(matches!(
            Resolver::new(&db, None).aggregate("b", "name", true),
            Err(ResolveError::CyclicDependency { .. })
        ));
    }

    #[test]
    fn test_aggregate_dependency_first() {
        let db = db_of([
            core("acme:ip:a:1").depends(&["b"]).build(),
            core("acme:ip:b:1").depends(&["c"]).attr("x", "files", "b.v").build(),
            core("acme:ip:c:1").attr("x", "files", "c.v").build(),
        ]);
        let resolver = Resolver::new(&db, None);

        let found = resolver.aggregate("a", "x", true).unwrap();
        assert_eq!(found.keys().collect::<Vec<_>>(), ["c", "b"]);
        assert_eq!(found["c"]["files"].as_str(), Some("c.v"));

        let shallow = resolver.aggregate("b", "x", false).unwrap();
        assert_eq!(shallow.keys().collect::<Vec<_>>(), ["b"]);

        let names = resolver.aggregate("a", "name", true).unwrap();
        assert_eq!(names.keys().collect::<Vec<_>>(), ["c", "b", "a"]);
    }

    #[test]
    fn test_aggregate_diamond() {
        // a -> [b, c], b -> [d], c -> [d]
        let db = db_of([
            core("acme:ip:a:1").depends(&["b", "c"]).build(),
            core("acme:ip:b:1").depends(&["d"]).build(),
            core("acme:ip:c:1").depends(&["d"]).build(),
            core("acme:ip:d:1").build(),
        ]);

        let found = Resolver::new(&db, None).aggregate("a", "name", true).unwrap();
        assert_eq!(found.keys().collect::<Vec<_>>(), ["d", "b", "c", "a"]);
    }

    #[test]
    fn test_aggregate_visits_shared_subtrees_once() {
        // Every level depends on both cores of the next one, so without
        // memoization the walk doubles per level.
        const DEPTH: usize = 40;
        let mut records = Vec::new();
        for level in 0..DEPTH {
            let names = [format!("l{}", level + 1), format!("r{}", level + 1)];
            let next: Vec<&str> = names.iter().map(String::as_str).collect();
            for side in ["l", "r"] {
                let vlnv = format!("acme:ip:{}{}:1", side, level);
                records.push(core(&vlnv).depends(&next).build());
            }
        }
        records.push(core(&format!("acme:ip:l{}:1", DEPTH)).build());
        records.push(core(&format!("acme:ip:r{}:1", DEPTH)).build());
        let db = db_of(records);
        let resolver = Resolver::new(&db, None);

        assert!(resolver.aggregate("l0", "missing", true).unwrap().is_empty());
        let names = resolver.aggregate("l0", "name", true).unwrap();
        assert_eq!(names.len(), 2 * DEPTH + 1);
        assert_eq!(names.keys().last().map(String::as_str), Some("l0"));
    }

    #[test]
    fn test_aggregate_skips_unknown_cores() {
        let db = db_of([core("acme:ip:a:1").depends(&["ghost"]).build()]);
        let resolver = Resolver::new(&db, None);

        let found = resolver.aggregate("a", "name", true).unwrap();
        assert_eq!(found.keys().collect::<Vec<_>>(), ["a"]);
        assert!(resolver.aggregate("ghost", "name", true).unwrap().is_empty());
    }

    #[test]
    fn test_aggregate_ignores_tool_overlay() {
        let db = db_of([
            core("acme:ip:a:1").tool("icarus", &["b"]).build(),
            core("acme:ip:b:1").build(),
        ]);

        let found = Resolver::new(&db, Some("icarus"))
            .aggregate("a", "name", true)
            .unwrap();
        assert_eq!(found.keys().collect::<Vec<_>>(), ["a"]);
    }
}
