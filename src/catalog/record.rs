// src/catalog/record.rs

//! Installed package record

use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

/// One installed package, as described by its control file paragraph
///
/// Records are frozen once built. Dependency flags and reverse edges are set
/// on a [`PackageRecordBuilder`] before the record joins a catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PackageRecord {
    name: String,
    simple_description: String,
    #[serde(serialize_with = "serialize_lines")]
    extended_description: String,
    maintainer: String,
    architecture: String,
    version: String,
    dependencies: BTreeMap<String, bool>,
    reverse_dependencies: BTreeMap<String, bool>,
}

fn serialize_lines<S: Serializer>(raw: &str, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(raw.split('\n'))
}

impl PackageRecord {
    /// Create a record with only a name and descriptions
    pub fn new(
        name: impl Into<String>,
        simple_description: impl Into<String>,
        extended_description: impl Into<String>,
    ) -> Self {
        Self::builder(name)
            .simple_description(simple_description)
            .extended_description(extended_description)
            .build()
    }

    /// Start building a record with every field available
    pub fn builder(name: impl Into<String>) -> PackageRecordBuilder {
        PackageRecordBuilder {
            record: Self {
                name: name.into(),
                ..Self::default()
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn simple_description(&self) -> &str {
        &self.simple_description
    }

    /// Extended description split into lines
    ///
    /// The stored text terminates every line with `\n`, so the result ends
    /// with an empty element whenever the description is non-empty. Empty
    /// elements in the middle are paragraph breaks.
    pub fn extended_description(&self) -> Vec<&str> {
        self.extended_description.split('\n').collect()
    }

    /// Extended description exactly as stored
    pub fn raw_extended_description(&self) -> &str {
        &self.extended_description
    }

    pub fn maintainer(&self) -> &str {
        &self.maintainer
    }

    pub fn architecture(&self) -> &str {
        &self.architecture
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Dependency names mapped to whether a record with that name exists
    pub fn dependencies(&self) -> &BTreeMap<String, bool> {
        &self.dependencies
    }

    /// Names of packages depending on this one
    ///
    /// The flag records whether the dependent package is itself in the
    /// catalog. Dependents are only ever taken from scanned records, so it
    /// is `true` for every catalog built from a control file.
    pub fn reverse_dependencies(&self) -> &BTreeMap<String, bool> {
        &self.reverse_dependencies
    }

    /// Whether `name` appears among this package's dependencies
    pub fn depends_on(&self, name: &str) -> bool {
        self.dependencies.contains_key(name)
    }

    /// Dependencies that resolved to a package in the catalog
    pub fn resolved_dependencies(&self) -> impl Iterator<Item = &str> {
        self.dependencies
            .iter()
            .filter(|(_, resolved)| **resolved)
            .map(|(name, _)| name.as_str())
    }

    /// Dependencies with no matching package (uninstalled alternatives,
    /// virtual packages)
    pub fn unresolved_dependencies(&self) -> impl Iterator<Item = &str> {
        self.dependencies
            .iter()
            .filter(|(_, resolved)| !**resolved)
            .map(|(name, _)| name.as_str())
    }
}

/// Builder for [`PackageRecord`]
#[derive(Debug, Clone)]
pub struct PackageRecordBuilder {
    record: PackageRecord,
}

impl PackageRecordBuilder {
    /// Name of the record under construction
    pub fn name(&self) -> &str {
        &self.record.name
    }

    pub fn simple_description(mut self, description: impl Into<String>) -> Self {
        self.record.simple_description = description.into();
        self
    }

    /// Set the raw extended description (lines joined with `\n`)
    pub fn extended_description(mut self, description: impl Into<String>) -> Self {
        self.record.extended_description = description.into();
        self
    }

    pub fn maintainer(mut self, maintainer: impl Into<String>) -> Self {
        self.record.maintainer = maintainer.into();
        self
    }

    pub fn architecture(mut self, architecture: impl Into<String>) -> Self {
        self.record.architecture = architecture.into();
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.record.version = version.into();
        self
    }

    /// Set or overwrite the resolved flag of a dependency
    pub fn add_dependency(&mut self, name: impl Into<String>, resolved: bool) -> &mut Self {
        self.record.dependencies.insert(name.into(), resolved);
        self
    }

    /// Set or overwrite the flag of a reverse dependency
    pub fn add_reverse_dependency(&mut self, name: impl Into<String>, present: bool) -> &mut Self {
        self.record.reverse_dependencies.insert(name.into(), present);
        self
    }

    pub fn build(self) -> PackageRecord {
        self.record
    }
}
