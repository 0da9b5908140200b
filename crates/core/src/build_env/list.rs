//! Reports the build environment each module uses.

use serde::Serialize;

use crate::graph::ConfigGraph;
use crate::schema::BuildType;

/// Executor assumed when a default pipeline declares none.
pub const DEFAULT_BUILD_ENV: &str = "local";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildEnvEntry {
    #[serde(rename = "type")]
    pub build_type: String,
    pub module: String,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
}

/// One entry per loaded document.
///
/// For the default pipeline a document without an executor reports
/// [`DEFAULT_BUILD_ENV`]. For a profile, documents lacking that profile or
/// whose profile sets no executor are left out.
pub fn list_build_envs(graph: &ConfigGraph, profile: Option<&str>) -> Vec<BuildEnvEntry> {
    let profile = profile.filter(|p| !p.is_empty());

    graph
        .entries()
        .filter_map(|(_, entry)| {
            let build_type = match profile {
                None => entry
                    .document
                    .build
                    .build_type()
                    .map_or(DEFAULT_BUILD_ENV, BuildType::kind),
                Some(name) => entry.document.profile(name)?.build.build_type()?.kind(),
            };
            Some(BuildEnvEntry {
                build_type: build_type.to_string(),
                module: entry.name().to_string(),
                path: entry.source_file.display().to_string(),
                profile: profile.map(str::to_string),
            })
        })
        .collect()
}
