//! Picks the build slot a new build environment is written into.

use tracing::debug;

use crate::schema::{BuildConfig, ConfigDocument, Profile};

/// The build slot of `document` for `profile`.
///
/// Without a profile (or with an empty name) this is the default pipeline's
/// `build`. Otherwise it is the named profile's `build`; a missing profile is
/// appended to the end of `profiles` first.
pub fn resolve<'a>(document: &'a mut ConfigDocument, profile: Option<&str>) -> &'a mut BuildConfig {
    let Some(name) = profile.filter(|p| !p.is_empty()) else {
        return &mut document.build;
    };

    let index = match document.profiles.iter().position(|p| p.name == name) {
        Some(index) => index,
        None => {
            debug!(module = document.name(), profile = name, "creating profile");
            document.profiles.push(Profile::named(name));
            document.profiles.len() - 1
        }
    };
    &mut document.profiles[index].build
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{BuildType, ClusterBuild, GoogleCloudBuild, LocalBuild};

    fn gcb() -> BuildType {
        BuildType::GoogleCloudBuild(GoogleCloudBuild {
            project_id: Some("project1".into()),
            ..Default::default()
        })
    }

    fn document() -> ConfigDocument {
        let mut doc = ConfigDocument::default();
        doc.metadata.name = "cfg".into();
        doc.build = BuildConfig::with_build_type(BuildType::Local(LocalBuild::default()));
        doc.profiles.push(Profile {
            name: "p1".into(),
            build: BuildConfig::with_build_type(BuildType::Cluster(ClusterBuild::default())),
            ..Default::default()
        });
        doc
    }

    #[test]
    fn empty_profile_targets_default_pipeline() {
        let mut doc = document();
        resolve(&mut doc, None).set_build_type(gcb());

        assert_eq!(doc.build.build_type(), Some(&gcb()));
        assert_eq!(doc.profiles.len(), 1);
        assert!(matches!(doc.profiles[0].build.build_type(), Some(BuildType::Cluster(_))));
    }

    #[test]
    fn empty_string_is_the_same_as_no_profile() {
        let mut doc = document();
        resolve(&mut doc, Some("")).set_build_type(gcb());
        assert_eq!(doc.build.build_type(), Some(&gcb()));
        assert_eq!(doc.profiles.len(), 1);
    }

    #[test]
    fn existing_profile_is_reused() {
        let mut doc = document();
        resolve(&mut doc, Some("p1")).set_build_type(gcb());

        assert_eq!(doc.profiles.len(), 1);
        assert_eq!(doc.profiles[0].build.build_type(), Some(&gcb()));
        assert!(matches!(doc.build.build_type(), Some(BuildType::Local(_))));
    }

    #[test]
    fn missing_profile_is_appended() {
        let mut doc = document();
        resolve(&mut doc, Some("p2")).set_build_type(gcb());

        let names: Vec<&str> = doc.profiles.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["p1", "p2"]);
        assert_eq!(doc.profiles[1].build.build_type(), Some(&gcb()));
    }
}
