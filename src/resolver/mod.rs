//! Dependency resolution.
//!
//! Every requirement is an exact pin, so resolution is location plus
//! conflict detection rather than version solving: each declared library is
//! fetched at its pinned version, overrides force their version graph-wide,
//! and any disagreement that no override settles is a hard error.
//!
//! Resolution is deterministic: requirements are walked in declaration
//! order, wave by wave, and store fetches within a wave may run in
//! parallel without affecting the outcome.

pub mod errors;
pub mod graph;

pub use errors::ResolveError;
pub use graph::ResolvedGraph;

use std::collections::HashMap;

use rayon::prelude::*;
use semver::Version;

use crate::core::{PackageId, Requirement};
use crate::store::{ArtifactStore, StoreEntry};
use crate::util::InternedString;

/// Resolve a set of pinned requirements against an artifact store.
///
/// `root` is the recipe's own package; `requirements` are its direct
/// requirements in declaration order.
pub fn resolve(
    root: PackageId,
    requirements: &[Requirement],
    store: &dyn ArtifactStore,
) -> Result<ResolvedGraph, ResolveError> {
    let overrides = collect_overrides(root, requirements)?;

    let mut graph = ResolvedGraph::new(root);
    let mut resolved: HashMap<InternedString, Version> = HashMap::new();
    let mut requested: HashMap<InternedString, Vec<(String, String)>> = HashMap::new();

    let mut wave: Vec<(PackageId, InternedString, Version)> = requirements
        .iter()
        .map(|req| (root, req.name(), effective_version(&overrides, req)))
        .collect();

    while !wave.is_empty() {
        let fetched = prefetch_wave(&wave, &resolved, store)?;
        let mut next_wave = Vec::new();

        for (requirer, name, version) in wave {
            requested
                .entry(name)
                .or_default()
                .push((requirer.to_string(), version.to_string()));

            match resolved.get(&name) {
                Some(existing) if *existing == version => {
                    let dep = graph.get_by_name(name).expect("resolved package in graph");
                    graph.add_edge(requirer, dep);
                }

                Some(_) => {
                    let mut reqs = requested.remove(&name).unwrap_or_default();
                    reqs.dedup();
                    return Err(ResolveError::VersionConflict {
                        library: name.to_string(),
                        requirements: reqs,
                    });
                }

                None => {
                    let entry = fetched
                        .get(&(name, version.clone()))
                        .and_then(|e| e.as_ref())
                        .ok_or_else(|| ResolveError::DependencyNotFound {
                            library: name.to_string(),
                            version: version.to_string(),
                            available: store
                                .available_versions(name)
                                .iter()
                                .map(Version::to_string)
                                .collect(),
                        })?;

                    let dep_id = entry.package_id();
                    tracing::debug!("resolved {}", dep_id);

                    graph.add_package(entry.clone());
                    graph.add_edge(requirer, dep_id);
                    resolved.insert(name, version);

                    let transitive =
                        entry
                            .metadata()
                            .requirements()
                            .map_err(|e| ResolveError::Store {
                                library: name.to_string(),
                                version: entry.package_id().version().to_string(),
                                message: format!("{:#}", e),
                            })?;

                    for req in transitive {
                        next_wave.push((dep_id, req.name(), effective_version(&overrides, &req)));
                    }
                }
            }
        }

        wave = next_wave;
    }

    check_acyclic(&graph)?;
    Ok(graph)
}

/// Collect override pins, rejecting overrides that disagree.
fn collect_overrides(
    root: PackageId,
    requirements: &[Requirement],
) -> Result<HashMap<InternedString, Version>, ResolveError> {
    let mut overrides: HashMap<InternedString, Version> = HashMap::new();

    for req in requirements.iter().filter(|r| r.is_override()) {
        if let Some(existing) = overrides.get(&req.name()) {
            if existing != req.version() {
                return Err(ResolveError::VersionConflict {
                    library: req.name().to_string(),
                    requirements: vec![
                        (format!("{} (override)", root), existing.to_string()),
                        (format!("{} (override)", root), req.version().to_string()),
                    ],
                });
            }
        } else {
            overrides.insert(req.name(), req.version().clone());
        }
    }

    Ok(overrides)
}

/// The version a requirement resolves to once overrides are applied.
fn effective_version(overrides: &HashMap<InternedString, Version>, req: &Requirement) -> Version {
    overrides
        .get(&req.name())
        .cloned()
        .unwrap_or_else(|| req.version().clone())
}

/// Fetch every not-yet-resolved (name, version) in the wave.
///
/// Fetches run in parallel; integration stays sequential, so the outcome
/// does not depend on completion order.
fn prefetch_wave(
    wave: &[(PackageId, InternedString, Version)],
    resolved: &HashMap<InternedString, Version>,
    store: &dyn ArtifactStore,
) -> Result<HashMap<(InternedString, Version), Option<StoreEntry>>, ResolveError> {
    let mut to_fetch: Vec<(InternedString, Version)> = Vec::new();
    for (_, name, version) in wave {
        if !resolved.contains_key(name) && !to_fetch.iter().any(|(n, v)| n == name && v == version)
        {
            to_fetch.push((*name, version.clone()));
        }
    }

    to_fetch
        .par_iter()
        .map(|(name, version)| {
            store
                .fetch(*name, version)
                .map(|entry| ((*name, version.clone()), entry))
                .map_err(|e| ResolveError::Store {
                    library: name.to_string(),
                    version: version.to_string(),
                    message: format!("{:#}", e),
                })
        })
        .collect()
}

/// Reject graphs with requirement cycles.
fn check_acyclic(graph: &ResolvedGraph) -> Result<(), ResolveError> {
    for cycle in graph.cycles() {
        return Err(ResolveError::CycleDetected {
            packages: cycle.iter().map(|id| id.to_string()).collect(),
        });
    }
    Ok(())
}
