//! Pipeline configuration documents, profiles and `requires` edges.

use serde::{Deserialize, Serialize};
use serde_yaml::Mapping;

use super::build::BuildConfig;

/// One document of a (possibly multi-document) pipeline configuration file.
///
/// Only the parts the build-env commands read or write are typed; every other
/// top-level stanza (`test`, `deploy`, `manifests`, ...) lives in `pipeline` and
/// is written back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigDocument {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub api_version: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub kind: String,
    #[serde(default)]
    pub metadata: Metadata,
    /// Other configuration files this document depends on.
    #[serde(default, rename = "requires", skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<ConfigDependency>,
    #[serde(default, skip_serializing_if = "BuildConfig::is_empty")]
    pub build: BuildConfig,
    #[serde(flatten)]
    pub pipeline: Mapping,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub profiles: Vec<Profile>,
}

impl ConfigDocument {
    /// Module name (`metadata.name`).
    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn profile(&self, name: &str) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.name == name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(flatten)]
    pub extra: Mapping,
}

/// A named override of the default pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    #[serde(default, skip_serializing_if = "BuildConfig::is_empty")]
    pub build: BuildConfig,
    /// `activation`, `patches` and any pipeline stanzas the profile overrides.
    #[serde(flatten)]
    pub extra: Mapping,
}

impl Profile {
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Default::default() }
    }
}

/// One entry of a document's `requires` list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigDependency {
    /// Restricts the dependency to these module names within the referenced file.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub configs: Vec<String>,
    /// Local file or directory, relative to the consuming file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Remote git-hosted configuration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git: Option<GitInfo>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub active_profiles: Vec<ProfileDependency>,
    #[serde(flatten)]
    pub extra: Mapping,
}

impl ConfigDependency {
    pub fn local(path: impl Into<String>) -> Self {
        Self { path: Some(path.into()), ..Default::default() }
    }

    pub fn is_remote(&self) -> bool {
        self.git.is_some()
    }

    pub fn activation(&self, profile: &str) -> Option<&ProfileDependency> {
        self.active_profiles.iter().find(|a| a.name == profile)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GitInfo {
    pub repo: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, rename = "ref", skip_serializing_if = "Option::is_none")]
    pub git_ref: Option<String>,
    #[serde(flatten)]
    pub extra: Mapping,
}

/// Activates profile `name` in the dependency whenever one of the consumer's
/// `activated_by` profiles is active.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDependency {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub activated_by: Vec<String>,
}

impl ProfileDependency {
    /// Activation of `profile` triggered by the consumer's profile of the same name.
    pub fn same_name(profile: &str) -> Self {
        Self { name: profile.to_string(), activated_by: vec![profile.to_string()] }
    }
}
