// src/lib.rs

//! dpkg-catalog
//!
//! Reads a Debian control file (the format of `/var/lib/dpkg/status`) and
//! builds an in-memory catalog of installed packages, including forward and
//! reverse dependency relationships.
//!
//! # Architecture
//!
//! - Replayable source: the file is read once, then scanned twice from memory
//! - Scanner: a per-line state machine yielding one record per blank line
//! - Two-pass builder: discovery first, then dependency resolution against
//!   the set of packages that actually exist
//! - Immutable catalog: records are frozen before the catalog is handed out

pub mod catalog;
pub mod control;
mod error;

pub use catalog::{Catalog, CatalogBuilder, PackageRecord, PackageRecordBuilder};
pub use control::{ControlSource, ScanOptions};
pub use error::{Error, Result};
