// src/catalog/mod.rs

//! Installed package catalog
//!
//! The catalog maps package names to [`PackageRecord`]s with resolved
//! dependency and reverse-dependency edges. It is produced by
//! [`CatalogBuilder`] and has no mutating API; to refresh, build a new one
//! and swap it in.

pub mod builder;
pub mod record;

pub use builder::CatalogBuilder;
pub use record::{PackageRecord, PackageRecordBuilder};

use crate::control::{ControlSource, ScanOptions};
use crate::error::Result;
use serde::Serialize;
use std::collections::BTreeMap;
use std::collections::btree_map;
use std::path::Path;

/// Read-only registry of installed packages, keyed by name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    packages: BTreeMap<String, PackageRecord>,
}

impl Catalog {
    /// Parse a control file with default scan options
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_with(path, ScanOptions::default())
    }

    /// Parse a control file
    ///
    /// The file is read once; both passes run over the in-memory copy. Any
    /// I/O failure aborts the whole parse.
    pub fn load_with(path: impl AsRef<Path>, options: ScanOptions) -> Result<Self> {
        let source = ControlSource::open(path)?;
        Ok(CatalogBuilder::new(options).build(&source))
    }

    pub(crate) fn from_packages(packages: BTreeMap<String, PackageRecord>) -> Self {
        Self { packages }
    }

    pub fn get(&self, name: &str) -> Option<&PackageRecord> {
        self.packages.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.packages.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Package names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.packages.keys().map(String::as_str)
    }

    /// Records in name order
    pub fn iter(&self) -> btree_map::Values<'_, String, PackageRecord> {
        self.packages.values()
    }

    /// Packages nothing else in the catalog depends on
    pub fn orphans(&self) -> Vec<&PackageRecord> {
        self.iter()
            .filter(|record| record.reverse_dependencies().is_empty())
            .collect()
    }

    /// Dependency names with no matching package, mapped to the packages
    /// that reference them
    pub fn missing_dependencies(&self) -> BTreeMap<&str, Vec<&str>> {
        let mut missing: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for record in self.iter() {
            for dependency in record.unresolved_dependencies() {
                missing.entry(dependency).or_default().push(record.name());
            }
        }
        missing
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a PackageRecord;
    type IntoIter = btree_map::Values<'a, String, PackageRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATUS: &str = "Package: app
Depends: libfoo (>= 1.0), mail-transport-agent | exim4

Package: libfoo
Depends: libc6

Package: libc6

Package: tool
Depends: exim4

";

    fn catalog() -> Catalog {
        CatalogBuilder::default().build(&ControlSource::from_text(STATUS))
    }

    #[test]
    fn test_names_sorted() {
        let catalog = catalog();
        assert_eq!(
            catalog.names().collect::<Vec<_>>(),
            vec!["app", "libc6", "libfoo", "tool"]
        );
        assert_eq!(catalog.len(), 4);
        assert!(!catalog.is_empty());
    }

    #[test]
    fn test_orphans() {
        let catalog = catalog();
        let orphans: Vec<_> = catalog.orphans().iter().map(|r| r.name()).collect();
        assert_eq!(orphans, vec!["app", "tool"]);
    }

    #[test]
    fn test_missing_dependencies() {
        let catalog = catalog();
        let missing = catalog.missing_dependencies();

        assert_eq!(missing.len(), 2);
        assert_eq!(missing["exim4"], vec!["app", "tool"]);
        assert_eq!(missing["mail-transport-agent"], vec!["app"]);
    }

    #[test]
    fn test_into_iterator() {
        let catalog = catalog();
        let mut count = 0;
        for record in &catalog {
            assert!(catalog.contains(record.name()));
            count += 1;
        }
        assert_eq!(count, catalog.len());
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = CatalogBuilder::default().build(&ControlSource::from_text(""));
        assert!(catalog.is_empty());
        assert!(catalog.orphans().is_empty());
        assert!(catalog.missing_dependencies().is_empty());
    }

    #[test]
    fn test_serialize_keyed_by_name() {
        let json = serde_json::to_value(catalog()).unwrap();
        assert_eq!(json["libfoo"]["dependencies"]["libc6"], true);
        assert_eq!(json["libc6"]["reverse_dependencies"]["libfoo"], true);
    }
}
