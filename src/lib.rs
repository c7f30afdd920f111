//! Coresmith - core registry and dependency resolver for hardware IP builds
//!
//! This crate indexes `.core` descriptors found below a set of root
//! directories, keyed by their Vendor:Library:Name:Version coordinate, and
//! computes the ordered dependency closure of any core.

pub mod core;
pub mod ops;
pub mod resolver;
pub mod sources;
pub mod util;

/// Test utilities for unit tests.
///
/// This module is only available when compiling with `--cfg test`. It
/// provides record builders, descriptor fixtures and a recording parser.
#[cfg(test)]
pub mod test_support;

pub use crate::core::{CoreDb, CoreParser, CoreRecord, DescriptorParser, Vlnv, VlnvPattern};

pub use ops::CoreManager;
pub use resolver::{ResolveError, Resolver};
