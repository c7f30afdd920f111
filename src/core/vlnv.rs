//! Core identity - Vendor:Library:Name:Version coordinates.
//!
//! A `Vlnv` is the full identity of a core and doubles as the database key.
//! A `VlnvPattern` is the query form, where any field may be left open.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error building a coordinate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VlnvError {
    #[error("empty `{field}` in core coordinate")]
    EmptyField { field: &'static str },

    #[error("`{field}` must not contain ':' (got `{value}`)")]
    InvalidField { field: &'static str, value: String },

    #[error("expected `vendor:library:name:version`, got `{0}`")]
    Malformed(String),
}

/// Full identity of a core.
///
/// All four fields are non-empty and colon-free, so the joined form is an
/// unambiguous key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Vlnv {
    vendor: String,
    library: String,
    name: String,
    version: String,
}

fn check_field(field: &'static str, value: &str) -> Result<(), VlnvError> {
    if value.is_empty() {
        return Err(VlnvError::EmptyField { field });
    }
    if value.contains(':') {
        return Err(VlnvError::InvalidField {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}

impl Vlnv {
    /// Create a new coordinate, rejecting empty or colon-bearing fields.
    pub fn new(
        vendor: impl Into<String>,
        library: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Result<Self, VlnvError> {
        let vlnv = Vlnv {
            vendor: vendor.into(),
            library: library.into(),
            name: name.into(),
            version: version.into(),
        };

        check_field("vendor", &vlnv.vendor)?;
        check_field("library", &vlnv.library)?;
        check_field("name", &vlnv.name)?;
        check_field("version", &vlnv.version)?;

        Ok(vlnv)
    }

    pub fn vendor(&self) -> &str {
        &self.vendor
    }

    pub fn library(&self) -> &str {
        &self.library
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }
}

impl fmt::Display for Vlnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}",
            self.vendor, self.library, self.name, self.version
        )
    }
}

impl FromStr for Vlnv {
    type Err = VlnvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        match parts.as_slice() {
            [vendor, library, name, version] => Vlnv::new(*vendor, *library, *name, *version),
            _ => Err(VlnvError::Malformed(s.to_string())),
        }
    }
}

/// A coordinate query. `None` fields match anything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VlnvPattern {
    pub vendor: Option<String>,
    pub library: Option<String>,
    pub name: Option<String>,
    pub version: Option<String>,
}

/// Empty strings are wildcards, same as `None`.
fn wildcard(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

impl VlnvPattern {
    /// A pattern matching every core.
    pub fn any() -> Self {
        VlnvPattern::default()
    }

    /// A name-only pattern.
    pub fn by_name(name: impl AsRef<str>) -> Self {
        VlnvPattern {
            name: wildcard(name.as_ref()),
            ..VlnvPattern::default()
        }
    }

    /// Build a pattern from four fields, treating `""` as a wildcard.
    pub fn from_fields(vendor: &str, library: &str, name: &str, version: &str) -> Self {
        VlnvPattern {
            vendor: wildcard(vendor),
            library: wildcard(library),
            name: wildcard(name),
            version: wildcard(version),
        }
    }

    /// Check whether every concrete field of the pattern matches.
    pub fn matches(&self, vlnv: &Vlnv) -> bool {
        fn field(pattern: &Option<String>, value: &str) -> bool {
            pattern.as_deref().map_or(true, |p| p == value)
        }

        field(&self.vendor, vlnv.vendor())
            && field(&self.library, vlnv.library())
            && field(&self.name, vlnv.name())
            && field(&self.version, vlnv.version())
    }

    /// True if no field is constrained.
    pub fn is_any(&self) -> bool {
        self.vendor.is_none()
            && self.library.is_none()
            && self.name.is_none()
            && self.version.is_none()
    }
}

impl From<&Vlnv> for VlnvPattern {
    fn from(vlnv: &Vlnv) -> Self {
        VlnvPattern::from_fields(vlnv.vendor(), vlnv.library(), vlnv.name(), vlnv.version())
    }
}

impl FromStr for VlnvPattern {
    type Err = VlnvError;

    /// Parses `name`, or `vendor:library:name:version` with empty fields as
    /// wildcards.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        match parts.as_slice() {
            [name] => Ok(VlnvPattern::by_name(name)),
            [vendor, library, name, version] => {
                Ok(VlnvPattern::from_fields(vendor, library, name, version))
            }
            _ => Err(VlnvError::Malformed(s.to_string())),
        }
    }
}
