//! The loaded set of configuration documents.
//!
//! Documents are stored in an arena and addressed by [`DocId`]. `requires`
//! edges stay on the consuming document as written and are resolved to ids on
//! demand, so every consumer of a shared dependency sees the same document.

use std::ops::{Index, IndexMut};
use std::path::{Component, Path, PathBuf};

use crate::schema::{ConfigDependency, ConfigDocument};

/// File name assumed when a `requires` path points at a directory.
pub const DEFAULT_CONFIG_FILE: &str = "skaffold.yaml";

/// Position of a document in its [`ConfigGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocId(usize);

impl DocId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A document together with where it came from.
#[derive(Debug, Clone)]
pub struct ConfigEntry {
    pub document: ConfigDocument,
    pub source_file: PathBuf,
    /// Position of the document within its file's multi-document stream.
    pub source_index: usize,
    /// Declared in the main configuration file rather than pulled in via `requires`.
    pub is_root: bool,
}

impl ConfigEntry {
    pub fn new(
        document: ConfigDocument,
        source_file: impl Into<PathBuf>,
        source_index: usize,
        is_root: bool,
    ) -> Self {
        Self { document, source_file: source_file.into(), source_index, is_root }
    }

    pub fn name(&self) -> &str {
        self.document.name()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConfigGraph {
    entries: Vec<ConfigEntry>,
}

impl ConfigGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: ConfigEntry) -> DocId {
        self.entries.push(entry);
        DocId(self.entries.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = DocId> + use<> {
        (0..self.entries.len()).map(DocId)
    }

    pub fn entries(&self) -> impl Iterator<Item = (DocId, &ConfigEntry)> {
        self.entries.iter().enumerate().map(|(i, e)| (DocId(i), e))
    }

    pub fn find_by_name(&self, name: &str) -> Option<DocId> {
        self.entries().find(|(_, e)| e.name() == name).map(|(id, _)| id)
    }

    /// Loaded documents referenced by one of `consumer`'s `requires` entries.
    ///
    /// A document matches when its source file is the edge path itself, the
    /// edge path relative to the consumer's directory, or that path plus
    /// [`DEFAULT_CONFIG_FILE`]. An edge without a path but with `configs` names
    /// documents of the consumer's own file. A non-empty `configs` list narrows
    /// the match to the named modules. Remote (git) edges never match.
    pub fn resolve_dependency(&self, consumer: DocId, edge: &ConfigDependency) -> Vec<DocId> {
        if edge.is_remote() {
            return Vec::new();
        }
        let candidates = match edge.path.as_deref() {
            Some(path) => {
                let relative = dependency_path(&self[consumer].source_file, path);
                vec![PathBuf::from(path), relative.join(DEFAULT_CONFIG_FILE), relative]
            }
            None if !edge.configs.is_empty() => vec![self[consumer].source_file.clone()],
            None => return Vec::new(),
        };

        self.entries()
            .filter(|(id, _)| *id != consumer)
            .filter(|(_, e)| candidates.contains(&e.source_file))
            .filter(|(_, e)| edge.configs.is_empty() || edge.configs.iter().any(|c| c == e.name()))
            .map(|(id, _)| id)
            .collect()
    }
}

impl FromIterator<ConfigEntry> for ConfigGraph {
    fn from_iter<I: IntoIterator<Item = ConfigEntry>>(iter: I) -> Self {
        Self { entries: iter.into_iter().collect() }
    }
}

impl Index<DocId> for ConfigGraph {
    type Output = ConfigEntry;

    fn index(&self, id: DocId) -> &ConfigEntry {
        &self.entries[id.0]
    }
}

impl IndexMut<DocId> for ConfigGraph {
    fn index_mut(&mut self, id: DocId) -> &mut ConfigEntry {
        &mut self.entries[id.0]
    }
}

/// `edge_path` interpreted relative to the directory of `consumer_file`.
pub fn dependency_path(consumer_file: &Path, edge_path: &str) -> PathBuf {
    match consumer_file.parent() {
        Some(dir) => normalize_path(&dir.join(edge_path)),
        None => normalize_path(Path::new(edge_path)),
    }
}

/// Lexically drop `.` components and fold `..` into the preceding segment.
///
/// The filesystem is not consulted, so symlinks are not resolved.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(name: &str, requires: Vec<ConfigDependency>) -> ConfigDocument {
        let mut d = ConfigDocument::default();
        d.metadata.name = name.to_string();
        d.dependencies = requires;
        d
    }

    #[test]
    fn resolves_exact_path() {
        let mut graph = ConfigGraph::new();
        let app = graph.push(ConfigEntry::new(
            doc("app", vec![ConfigDependency::local("path/to/cfg2")]),
            "path/to/cfg1",
            0,
            true,
        ));
        let lib = graph.push(ConfigEntry::new(doc("lib", vec![]), "path/to/cfg2", 0, false));

        let edge = graph[app].document.dependencies[0].clone();
        assert_eq!(graph.resolve_dependency(app, &edge), vec![lib]);
    }

    #[test]
    fn resolves_relative_directory() {
        let mut graph = ConfigGraph::new();
        let app = graph.push(ConfigEntry::new(
            doc("app", vec![ConfigDependency::local("lib")]),
            "proj/skaffold.yaml",
            0,
            true,
        ));
        let lib =
            graph.push(ConfigEntry::new(doc("lib", vec![]), "proj/lib/skaffold.yaml", 0, false));

        let edge = graph[app].document.dependencies[0].clone();
        assert_eq!(graph.resolve_dependency(app, &edge), vec![lib]);
    }

    #[test]
    fn configs_selection_narrows_match() {
        let mut graph = ConfigGraph::new();
        let mut edge = ConfigDependency::local("libs.yaml");
        edge.configs = vec!["b".into()];
        let app = graph.push(ConfigEntry::new(doc("app", vec![edge]), "skaffold.yaml", 0, true));
        graph.push(ConfigEntry::new(doc("a", vec![]), "libs.yaml", 0, false));
        let b = graph.push(ConfigEntry::new(doc("b", vec![]), "libs.yaml", 1, false));

        let edge = graph[app].document.dependencies[0].clone();
        assert_eq!(graph.resolve_dependency(app, &edge), vec![b]);
    }

    #[test]
    fn pathless_configs_refer_to_the_same_file() {
        let mut graph = ConfigGraph::new();
        let edge = ConfigDependency { configs: vec!["base".into()], ..Default::default() };
        let app = graph.push(ConfigEntry::new(doc("app", vec![edge]), "skaffold.yaml", 0, true));
        let base = graph.push(ConfigEntry::new(doc("base", vec![]), "skaffold.yaml", 1, true));
        graph.push(ConfigEntry::new(doc("base", vec![]), "other.yaml", 0, false));

        let edge = graph[app].document.dependencies[0].clone();
        assert_eq!(graph.resolve_dependency(app, &edge), vec![base]);

        assert!(graph.resolve_dependency(app, &ConfigDependency::default()).is_empty());
    }

    #[test]
    fn unloaded_dependency_resolves_to_nothing() {
        let mut graph = ConfigGraph::new();
        let app = graph.push(ConfigEntry::new(
            doc("app", vec![ConfigDependency::local("missing")]),
            "skaffold.yaml",
            0,
            true,
        ));
        let edge = graph[app].document.dependencies[0].clone();
        assert!(graph.resolve_dependency(app, &edge).is_empty());
    }

    #[test]
    fn dependency_paths_fold_parent_segments() {
        assert_eq!(
            dependency_path(Path::new("proj/lib/skaffold.yaml"), "../skaffold.yaml"),
            PathBuf::from("proj/skaffold.yaml")
        );
        assert_eq!(dependency_path(Path::new("skaffold.yaml"), "./lib"), PathBuf::from("lib"));
        assert_eq!(normalize_path(Path::new("../a/./b/..")), PathBuf::from("../a"));
        assert_eq!(normalize_path(Path::new("/x/../../y")), PathBuf::from("/y"));
    }

    #[test]
    fn find_by_name() {
        let graph: ConfigGraph =
            [ConfigEntry::new(doc("x", vec![]), "a.yaml", 0, true)].into_iter().collect();
        assert_eq!(graph.find_by_name("x").map(DocId::index), Some(0));
        assert!(graph.find_by_name("y").is_none());
    }
}
