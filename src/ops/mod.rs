//! High-level operations.
//!
//! This module contains the registry object the command line drives.

pub mod manager;

pub use manager::CoreManager;
