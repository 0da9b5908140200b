//! Applies a new build environment across the configuration graph.

use std::collections::BTreeSet;

use tracing::debug;

use super::propagate::propagate;
use super::scope::resolve;
use crate::graph::{ConfigGraph, DocId};
use crate::schema::BuildType;

/// Documents that receive the new build environment.
///
/// A non-empty `modules` list selects documents by name. Otherwise a
/// profile-scoped injection targets every loaded document, while a
/// default-scope injection only targets root documents, leaving documents that
/// are merely required by the main file alone.
pub fn select_targets(graph: &ConfigGraph, modules: &[String], profile: Option<&str>) -> Vec<DocId> {
    let profile_scoped = profile.is_some_and(|p| !p.is_empty());
    graph
        .entries()
        .filter(|(_, entry)| {
            if !modules.is_empty() {
                modules.iter().any(|m| m == entry.name())
            } else {
                profile_scoped || entry.is_root
            }
        })
        .map(|(id, _)| id)
        .collect()
}

/// Write `build_type` into every target and, for a profile-scoped injection,
/// into the same profile of each target's direct dependencies.
///
/// Returns every document that was written to. A document counts as changed
/// even when the value written equals the one it already had.
pub fn apply(
    graph: &mut ConfigGraph,
    modules: &[String],
    build_type: &BuildType,
    profile: Option<&str>,
) -> BTreeSet<DocId> {
    let profile = profile.filter(|p| !p.is_empty());
    let targets = select_targets(graph, modules, profile);
    debug!(
        targets = targets.len(),
        profile = profile.unwrap_or("<default>"),
        build_type = build_type.kind(),
        "applying build environment"
    );

    let mut changed = BTreeSet::new();
    for id in targets {
        resolve(&mut graph[id].document, profile).set_build_type(build_type.clone());
        changed.insert(id);

        if let Some(profile) = profile {
            changed.extend(propagate(graph, id, profile, build_type));
        }
    }
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::ConfigEntry;
    use crate::schema::{ConfigDependency, ConfigDocument, GoogleCloudBuild, ProfileDependency};

    fn gcb() -> BuildType {
        BuildType::GoogleCloudBuild(GoogleCloudBuild::default())
    }

    fn graph() -> ConfigGraph {
        let mut root = ConfigDocument::default();
        root.metadata.name = "root".into();
        root.dependencies.push(ConfigDependency::local("dep.yaml"));
        let mut dep = ConfigDocument::default();
        dep.metadata.name = "dep".into();

        [
            ConfigEntry::new(root, "root.yaml", 0, true),
            ConfigEntry::new(dep, "dep.yaml", 0, false),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn default_scope_targets_roots_only() {
        let g = graph();
        let names: Vec<&str> =
            select_targets(&g, &[], None).into_iter().map(|id| g[id].name()).collect();
        assert_eq!(names, vec!["root"]);
    }

    #[test]
    fn profile_scope_targets_everything() {
        let g = graph();
        assert_eq!(select_targets(&g, &[], Some("p")).len(), 2);
    }

    #[test]
    fn module_filter_wins() {
        let g = graph();
        let names: Vec<&str> = select_targets(&g, &["dep".to_string()], None)
            .into_iter()
            .map(|id| g[id].name())
            .collect();
        assert_eq!(names, vec!["dep"]);
    }

    #[test]
    fn default_scope_does_not_propagate() {
        let mut g = graph();
        let changed = apply(&mut g, &[], &gcb(), None);

        assert_eq!(changed.len(), 1);
        let dep = g.find_by_name("dep").unwrap();
        assert!(g[dep].document.build.is_empty());
        let root = g.find_by_name("root").unwrap();
        assert!(g[root].document.dependencies[0].active_profiles.is_empty());
    }

    #[test]
    fn profile_scope_marks_dependencies_changed() {
        let mut g = graph();
        let changed = apply(&mut g, &["root".to_string()], &gcb(), Some("p2"));

        let dep = g.find_by_name("dep").unwrap();
        assert!(changed.contains(&dep));
        assert_eq!(g[dep].document.profile("p2").unwrap().build.build_type(), Some(&gcb()));
    }

    #[test]
    fn shared_dependency_gets_a_single_profile() {
        let consumer = |name: &str, file: &str| {
            let mut d = ConfigDocument::default();
            d.metadata.name = name.into();
            d.dependencies.push(ConfigDependency::local("lib.yaml"));
            ConfigEntry::new(d, file, 0, true)
        };
        let mut lib = ConfigDocument::default();
        lib.metadata.name = "lib".into();
        let mut g: ConfigGraph = [
            consumer("web", "web.yaml"),
            consumer("api", "api.yaml"),
            ConfigEntry::new(lib, "lib.yaml", 0, false),
        ]
        .into_iter()
        .collect();

        let changed =
            apply(&mut g, &["web".to_string(), "api".to_string()], &gcb(), Some("p"));

        let lib = g.find_by_name("lib").unwrap();
        assert!(changed.contains(&lib));
        assert_eq!(g[lib].document.profiles.len(), 1);
        assert_eq!(g[lib].document.profile("p").unwrap().build.build_type(), Some(&gcb()));
        for name in ["web", "api"] {
            let id = g.find_by_name(name).unwrap();
            assert_eq!(
                g[id].document.dependencies[0].active_profiles,
                vec![ProfileDependency::same_name("p")]
            );
        }
    }
}
