// src/catalog/builder.rs

//! Two-pass catalog construction
//!
//! A dependency such as `debconf | debconf-2.0` names packages that may or
//! may not be installed, and the package that settles the question can come
//! later in the file. So the source is scanned twice:
//!
//! 1. Discovery: every record is registered, all dependency flags `false`.
//! 2. Resolution: every record is scanned again and its flags are set from
//!    the set of names discovered in pass 1. Resolved dependencies also
//!    produce reverse edges on their targets.

use super::record::PackageRecordBuilder;
use super::{Catalog, PackageRecord};
use crate::control::{ControlSource, ScanOptions, ScannedRecord};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Reverse edges waiting to be attached: target name -> dependent -> flag
type ReverseEdges = BTreeMap<String, BTreeMap<String, bool>>;

/// Builds a [`Catalog`] from a control source
#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogBuilder {
    options: ScanOptions,
}

impl CatalogBuilder {
    pub fn new(options: ScanOptions) -> Self {
        Self { options }
    }

    /// Run both passes over `source` and freeze the result
    pub fn build(&self, source: &ControlSource) -> Catalog {
        let mut registry = self.discover(source);
        let reverse = self.resolve(source, &mut registry);

        let mut packages = BTreeMap::new();
        for (name, mut draft) in registry {
            if let Some(dependents) = reverse.get(&name) {
                for (dependent, present) in dependents {
                    draft.add_reverse_dependency(dependent.as_str(), *present);
                }
            }
            packages.insert(name, draft.build());
        }

        let catalog = Catalog::from_packages(packages);
        info!(
            "Built catalog of {} packages from {} ({} reverse edges)",
            catalog.len(),
            source.origin(),
            reverse.values().map(BTreeMap::len).sum::<usize>()
        );
        catalog
    }

    /// Pass 1: register every record with unresolved dependencies
    fn discover(&self, source: &ControlSource) -> BTreeMap<String, PackageRecordBuilder> {
        let mut registry = BTreeMap::new();
        let mut scanned_count = 0usize;

        for scanned in source.scan(self.options) {
            scanned_count += 1;
            let (mut draft, depends) = split_scanned(scanned);
            for dependency in depends {
                draft.add_dependency(dependency, false);
            }
            registry.insert(draft.name().to_string(), draft);
        }

        debug!(
            "Discovery pass: {} records scanned, {} distinct packages",
            scanned_count,
            registry.len()
        );
        registry
    }

    /// Pass 2: rebuild every record with resolved flags and collect the
    /// reverse edges those flags imply
    ///
    /// Edges are inverted only after the pass completes, so a record that is
    /// re-inserted later keeps the edges pointing at it, and a superseded
    /// duplicate leaves none behind.
    fn resolve(
        &self,
        source: &ControlSource,
        registry: &mut BTreeMap<String, PackageRecordBuilder>,
    ) -> ReverseEdges {
        let mut forward: BTreeMap<String, Vec<String>> = BTreeMap::new();
        let mut unresolved = 0usize;

        for scanned in source.scan(self.options) {
            let (mut draft, depends) = split_scanned(scanned);
            let mut resolved = Vec::new();
            for dependency in depends {
                let exists = registry.contains_key(&dependency);
                draft.add_dependency(dependency.as_str(), exists);
                if exists {
                    resolved.push(dependency);
                } else {
                    unresolved += 1;
                }
            }

            let name = draft.name().to_string();
            registry.insert(name.clone(), draft);
            forward.insert(name, resolved);
        }

        debug!(
            "Resolution pass: {} dependency references left unresolved",
            unresolved
        );

        let mut reverse = ReverseEdges::new();
        for (dependent, targets) in forward {
            let dependent_present = registry.contains_key(&dependent);
            for target in targets {
                reverse
                    .entry(target)
                    .or_default()
                    .insert(dependent.clone(), dependent_present);
            }
        }
        reverse
    }
}

/// Split a scanned paragraph into a record draft and its candidate list
fn split_scanned(scanned: ScannedRecord) -> (PackageRecordBuilder, Vec<String>) {
    let builder = PackageRecord::builder(scanned.name)
        .simple_description(scanned.simple_description)
        .extended_description(scanned.extended_description)
        .maintainer(scanned.maintainer)
        .architecture(scanned.architecture)
        .version(scanned.version);
    (builder, scanned.depends)
}
