//! Core sources.
//!
//! Discovery walks directory trees for descriptors; the root set records
//! which trees have already been scanned.

pub mod discovery;
pub mod roots;

pub use discovery::{DiscoveryError, ScanOutcome, ScanReport, Walker};
pub use roots::RootSet;
