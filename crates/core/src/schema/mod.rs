//! Typed view of pipeline configuration documents.
//!
//! This module provides:
//! - [`ConfigDocument`] and its `requires` edges and profiles
//! - [`BuildConfig`], a build slot holding at most one [`BuildType`]

pub mod build;
pub mod document;

pub use build::{
    BuildConfig, BuildType, ClusterBuild, GoogleCloudBuild, LocalBuild, MultipleBuildTypes,
};
pub use document::{
    ConfigDependency, ConfigDocument, GitInfo, Metadata, Profile, ProfileDependency,
};
