//! Core data structures.
//!
//! This module contains the foundational types of the registry:
//! - VLNV coordinates and query patterns
//! - Parsed core records and the descriptor parser seam
//! - The core database

pub mod database;
pub mod descriptor;
pub mod record;
pub mod vlnv;

pub use database::CoreDb;
pub use descriptor::{CoreParser, DescriptorParser, LoadError, DESCRIPTOR_SUFFIX};
pub use record::{CoreRecord, Provider, ProviderKind, Section};
pub use vlnv::{Vlnv, VlnvError, VlnvPattern};
