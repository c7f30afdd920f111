//! CoreRecord - the parsed, immutable description of one core.
//!
//! Records are Arc-wrapped internally, so the database, resolver and
//! callers can all hold one cheaply.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use toml::{Table, Value};

use crate::core::Vlnv;

/// Where a core's sources come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    Github,
    Opencores,
    Url,
    Git,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Github => "github",
            ProviderKind::Opencores => "opencores",
            ProviderKind::Url => "url",
            ProviderKind::Git => "git",
        }
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "github" => Ok(ProviderKind::Github),
            "opencores" => Ok(ProviderKind::Opencores),
            "url" => Ok(ProviderKind::Url),
            "git" => Ok(ProviderKind::Git),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved provider declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct Provider {
    pub kind: ProviderKind,
    /// Remaining provider settings (repo, url, revision...).
    pub settings: Table,
}

/// A named section of a core, e.g. the settings for one tool.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Section {
    depend: Option<Vec<String>>,
    values: Table,
}

impl Section {
    pub fn new(depend: Option<Vec<String>>, values: Table) -> Self {
        Section { depend, values }
    }

    /// Section-specific dependencies, if the section declares any.
    pub fn depend(&self) -> Option<&[String]> {
        self.depend.as_deref()
    }

    pub fn values(&self) -> &Table {
        &self.values
    }

    /// The section as a single TOML table, `depend` included.
    pub fn to_value(&self) -> Value {
        let mut table = self.values.clone();
        if let Some(depend) = &self.depend {
            table.insert("depend".to_string(), string_array(depend));
        }
        Value::Table(table)
    }
}

fn string_array(items: &[String]) -> Value {
    Value::Array(items.iter().cloned().map(Value::String).collect())
}

/// A parsed core.
#[derive(Clone)]
pub struct CoreRecord {
    inner: Arc<CoreRecordInner>,
}

#[derive(Clone)]
struct CoreRecordInner {
    vlnv: Vlnv,
    description: Option<String>,
    depend: Vec<String>,
    system: bool,
    core_root: PathBuf,
    provider: Option<Provider>,
    sections: BTreeMap<String, Section>,
}

impl CoreRecord {
    /// Create a record with no dependencies or sections.
    pub fn new(vlnv: Vlnv, core_root: impl Into<PathBuf>) -> Self {
        CoreRecord {
            inner: Arc::new(CoreRecordInner {
                vlnv,
                description: None,
                depend: Vec::new(),
                system: false,
                core_root: core_root.into(),
                provider: None,
                sections: BTreeMap::new(),
            }),
        }
    }

    pub fn with_depend<I, S>(mut self, depend: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Arc::make_mut(&mut self.inner).depend = depend.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.inner).description = Some(description.into());
        self
    }

    /// Mark this core as a top-level system.
    pub fn with_system(mut self, system: bool) -> Self {
        Arc::make_mut(&mut self.inner).system = system;
        self
    }

    pub fn with_provider(mut self, provider: Provider) -> Self {
        Arc::make_mut(&mut self.inner).provider = Some(provider);
        self
    }

    pub fn with_section(mut self, name: impl Into<String>, section: Section) -> Self {
        Arc::make_mut(&mut self.inner)
            .sections
            .insert(name.into(), section);
        self
    }

    pub fn vlnv(&self) -> &Vlnv {
        &self.inner.vlnv
    }

    pub fn name(&self) -> &str {
        self.inner.vlnv.name()
    }

    pub fn description(&self) -> Option<&str> {
        self.inner.description.as_deref()
    }

    /// Base dependencies, by core name.
    pub fn depend(&self) -> &[String] {
        &self.inner.depend
    }

    pub fn is_system(&self) -> bool {
        self.inner.system
    }

    /// Directory holding the descriptor this record came from.
    pub fn core_root(&self) -> &Path {
        &self.inner.core_root
    }

    pub fn provider(&self) -> Option<&Provider> {
        self.inner.provider.as_ref()
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.inner.sections.get(name)
    }

    pub fn sections(&self) -> impl Iterator<Item = (&str, &Section)> {
        self.inner.sections.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Extra dependencies declared for `tool`, if any.
    pub fn tool_depends(&self, tool: &str) -> Option<&[String]> {
        self.section(tool).and_then(Section::depend)
    }

    /// Look up a named attribute as a TOML value.
    ///
    /// Built-in fields take precedence over sections of the same name.
    pub fn attribute(&self, name: &str) -> Option<Value> {
        let inner = &self.inner;
        match name {
            "name" => Some(Value::String(inner.vlnv.name().to_string())),
            "vendor" => Some(Value::String(inner.vlnv.vendor().to_string())),
            "library" => Some(Value::String(inner.vlnv.library().to_string())),
            "version" => Some(Value::String(inner.vlnv.version().to_string())),
            "depend" => Some(string_array(&inner.depend)),
            "description" => inner.description.clone().map(Value::String),
            "core_root" => Some(Value::String(inner.core_root.display().to_string())),
            "provider" => inner.provider.as_ref().map(|p| {
                let mut table = p.settings.clone();
                table.insert("name".to_string(), Value::String(p.kind.to_string()));
                Value::Table(table)
            }),
            _ => inner.sections.get(name).map(Section::to_value),
        }
    }
}

impl fmt::Debug for CoreRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoreRecord")
            .field("vlnv", &self.inner.vlnv)
            .field("depend", &self.inner.depend)
            .field("system", &self.inner.system)
            .field("core_root", &self.inner.core_root)
            .finish()
    }
}

impl fmt::Display for CoreRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner.vlnv)
    }
}
