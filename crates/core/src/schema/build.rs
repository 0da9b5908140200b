//! Build configuration and the build-type union.
//!
//! A build slot (the default pipeline's `build:` or a profile's `build:`) holds at
//! most one executor definition. On disk each executor is its own key
//! (`local`, `cluster`, `googleCloudBuild`); in memory it is a single [`BuildType`]
//! so that overwriting a slot always discards the previous executor.

use serde::{Deserialize, Deserializer, Serialize, de};
use serde_yaml::{Mapping, Value};
use thiserror::Error;

/// A build slot declared more than one executor.
#[derive(Debug, Error)]
#[error("build configuration declares more than one build type: {}", .0.join(", "))]
pub struct MultipleBuildTypes(pub Vec<&'static str>);

/// Builds artifacts with the local toolchain.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalBuild {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub push: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concurrency: Option<u32>,
    #[serde(flatten)]
    pub extra: Mapping,
}

/// Builds artifacts inside a cluster.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterBuild {
    #[serde(default, deserialize_with = "scalar_string", skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(default, deserialize_with = "scalar_string", skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,
    #[serde(flatten)]
    pub extra: Mapping,
}

/// Builds artifacts with Google Cloud Build.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleCloudBuild {
    #[serde(default, deserialize_with = "scalar_string", skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disk_size_gb: Option<i64>,
    #[serde(default, deserialize_with = "scalar_string", skip_serializing_if = "Option::is_none")]
    pub machine_type: Option<String>,
    #[serde(default, deserialize_with = "scalar_string", skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concurrency: Option<u32>,
    #[serde(flatten)]
    pub extra: Mapping,
}

/// Reads any YAML scalar into a string field, so `timeout: 600` and
/// `timeout: "600s"` both load.
fn scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(de::Error::custom(format!("expected a scalar, found {other:?}"))),
    }
}

/// The executor that runs a build. Exactly one variant per slot.
#[derive(Debug, Clone, PartialEq)]
pub enum BuildType {
    Local(LocalBuild),
    Cluster(ClusterBuild),
    GoogleCloudBuild(GoogleCloudBuild),
}

impl BuildType {
    /// The YAML key this executor is stored under.
    pub fn kind(&self) -> &'static str {
        match self {
            BuildType::Local(_) => "local",
            BuildType::Cluster(_) => "cluster",
            BuildType::GoogleCloudBuild(_) => "googleCloudBuild",
        }
    }
}

/// A `build:` stanza: the executor plus any other build fields
/// (`artifacts`, `tagPolicy`, ...), which are carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBuildConfig", into = "RawBuildConfig")]
pub struct BuildConfig {
    pub build_type: Option<BuildType>,
    pub fields: Mapping,
}

impl BuildConfig {
    pub fn with_build_type(build_type: BuildType) -> Self {
        Self { build_type: Some(build_type), fields: Mapping::new() }
    }

    pub fn build_type(&self) -> Option<&BuildType> {
        self.build_type.as_ref()
    }

    /// Replace the executor. Whatever variant was set before is dropped.
    pub fn set_build_type(&mut self, build_type: BuildType) {
        self.build_type = Some(build_type);
    }

    pub fn is_empty(&self) -> bool {
        self.build_type.is_none() && self.fields.is_empty()
    }
}

/// On-disk shape of a build stanza.
#[derive(Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBuildConfig {
    #[serde(flatten)]
    fields: Mapping,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    local: Option<LocalBuild>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    google_cloud_build: Option<GoogleCloudBuild>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    cluster: Option<ClusterBuild>,
}

impl TryFrom<RawBuildConfig> for BuildConfig {
    type Error = MultipleBuildTypes;

    fn try_from(raw: RawBuildConfig) -> Result<Self, Self::Error> {
        let mut declared = Vec::new();
        if let Some(local) = raw.local {
            declared.push(BuildType::Local(local));
        }
        if let Some(gcb) = raw.google_cloud_build {
            declared.push(BuildType::GoogleCloudBuild(gcb));
        }
        if let Some(cluster) = raw.cluster {
            declared.push(BuildType::Cluster(cluster));
        }

        if declared.len() > 1 {
            return Err(MultipleBuildTypes(declared.iter().map(BuildType::kind).collect()));
        }

        Ok(BuildConfig { build_type: declared.pop(), fields: raw.fields })
    }
}

impl From<BuildConfig> for RawBuildConfig {
    fn from(config: BuildConfig) -> Self {
        let mut raw = RawBuildConfig { fields: config.fields, ..Default::default() };
        match config.build_type {
            Some(BuildType::Local(local)) => raw.local = Some(local),
            Some(BuildType::Cluster(cluster)) => raw.cluster = Some(cluster),
            Some(BuildType::GoogleCloudBuild(gcb)) => raw.google_cloud_build = Some(gcb),
            None => {}
        }
        raw
    }
}
