//! Carries a profile-scoped build environment into direct dependencies.

use std::collections::BTreeSet;

use tracing::debug;

use super::scope::resolve;
use crate::graph::{ConfigGraph, DocId};
use crate::schema::{BuildType, ProfileDependency};

/// Push `build_type` into `profile` of every loaded document `consumer` requires,
/// and make each `requires` edge activate that profile.
///
/// The dependency's profile is created or overwritten; an existing activation
/// entry for the profile is left as is. Edges to documents outside the loaded
/// graph, and git-hosted edges, are skipped. Only direct dependencies are
/// visited.
///
/// Returns the dependencies written to, plus `consumer` when one of its edges
/// gained an activation entry.
pub fn propagate(
    graph: &mut ConfigGraph,
    consumer: DocId,
    profile: &str,
    build_type: &BuildType,
) -> BTreeSet<DocId> {
    let mut changed = BTreeSet::new();
    let edge_count = graph[consumer].document.dependencies.len();

    for edge_index in 0..edge_count {
        let edge = &graph[consumer].document.dependencies[edge_index];
        if edge.is_remote() {
            debug!(module = graph[consumer].name(), "not propagating into remote dependency");
            continue;
        }

        let targets = graph.resolve_dependency(consumer, edge);
        if targets.is_empty() {
            debug!(
                module = graph[consumer].name(),
                path = edge.path.as_deref().unwrap_or_default(),
                "dependency is not loaded, skipping"
            );
            continue;
        }

        for dep in targets {
            resolve(&mut graph[dep].document, Some(profile)).set_build_type(build_type.clone());
            changed.insert(dep);
        }

        let edge = &mut graph[consumer].document.dependencies[edge_index];
        if edge.activation(profile).is_none() {
            edge.active_profiles.push(ProfileDependency::same_name(profile));
            changed.insert(consumer);
        }
    }

    changed
}
