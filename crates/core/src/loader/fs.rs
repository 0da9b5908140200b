//! Loads configuration documents from disk and follows `requires` edges.

use std::collections::{HashMap, HashSet, VecDeque};
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{ConfigLoader, LoadError, LoadOptions};
use crate::graph::{
    ConfigEntry, ConfigGraph, DEFAULT_CONFIG_FILE, DocId, dependency_path, normalize_path,
};
use crate::yaml::{DocumentStream, parse_document};

/// Reads the main configuration file and every local file it requires.
///
/// Documents of the main file are roots. Files reached through `requires` are
/// loaded once each, so cycles terminate. Git-hosted dependencies are not
/// fetched. The returned graph only holds documents reachable from the
/// selection: the main file's documents, or the modules named in
/// [`LoadOptions::modules`].
#[derive(Debug, Default, Clone, Copy)]
pub struct FsConfigLoader;

impl ConfigLoader for FsConfigLoader {
    fn load(&self, opts: &LoadOptions) -> Result<ConfigGraph, LoadError> {
        let mut state = LoadState::default();

        let content = fs::read_to_string(&opts.config_file).map_err(|e| {
            LoadError::MainConfigNotFound {
                path: opts.config_file.clone(),
                reason: format!("failed to read file: {e}"),
            }
        })?;
        let roots = state.add_file(&normalize_path(&opts.config_file), &content, true)?;

        let mut queue: VecDeque<DocId> = roots.iter().copied().collect();
        while let Some(id) = queue.pop_front() {
            let consumer_file = state.graph[id].source_file.clone();
            let edges = state.graph[id].document.dependencies.clone();

            for edge in edges {
                if edge.is_remote() {
                    debug!(module = state.graph[id].name(), "skipping remote dependency");
                    continue;
                }
                let Some(path) = edge.path.as_deref() else {
                    if edge.configs.is_empty() {
                        debug!(
                            module = state.graph[id].name(),
                            "skipping dependency without path or configs"
                        );
                    }
                    continue;
                };
                let file = locate(&consumer_file, path);
                if state.files.contains_key(&file) {
                    continue;
                }

                let content = fs::read_to_string(&file).map_err(|e| {
                    LoadError::DependencyNotFound {
                        path: file.clone(),
                        required_by: consumer_file.clone(),
                        reason: e.to_string(),
                    }
                })?;
                queue.extend(state.add_file(&file, &content, false)?);
            }
        }

        let selected = select(&state.graph, &roots, &opts.modules)?;
        let graph = state.into_graph(&selected);
        check_unique_names(&graph)?;

        debug!(documents = graph.len(), "loaded configuration graph");
        Ok(graph)
    }
}

#[derive(Default)]
struct LoadState {
    graph: ConfigGraph,
    files: HashMap<PathBuf, Vec<DocId>>,
}

impl LoadState {
    fn add_file(
        &mut self,
        path: &Path,
        content: &str,
        is_root: bool,
    ) -> Result<Vec<DocId>, LoadError> {
        let stream = DocumentStream::parse(content);
        let mut ids = Vec::new();

        for (index, body) in stream.documents() {
            let parsed = parse_document(body).map_err(|source| LoadError::Parse {
                path: path.to_path_buf(),
                index,
                source,
            })?;
            if let Some(document) = parsed {
                ids.push(self.graph.push(ConfigEntry::new(document, path, index, is_root)));
            }
        }

        debug!(path = %path.display(), documents = ids.len(), "read configuration file");
        self.files.insert(path.to_path_buf(), ids.clone());
        Ok(ids)
    }

    fn into_graph(self, selected: &HashSet<DocId>) -> ConfigGraph {
        self.graph
            .entries()
            .filter(|(id, _)| selected.contains(id))
            .map(|(_, entry)| entry.clone())
            .collect()
    }
}

/// Where a local `requires` path lives on disk.
fn locate(consumer_file: &Path, edge_path: &str) -> PathBuf {
    let joined = dependency_path(consumer_file, edge_path);
    if joined.is_dir() { joined.join(DEFAULT_CONFIG_FILE) } else { joined }
}

/// Documents reachable from the selection through resolved `requires` edges.
fn select(
    graph: &ConfigGraph,
    roots: &[DocId],
    modules: &[String],
) -> Result<HashSet<DocId>, LoadError> {
    let unmatched: Vec<String> = modules
        .iter()
        .filter(|m| graph.find_by_name(m).is_none())
        .cloned()
        .collect();
    if !unmatched.is_empty() {
        return Err(LoadError::BadFilter { modules: unmatched });
    }

    let start: Vec<DocId> = if modules.is_empty() {
        roots.to_vec()
    } else {
        graph.ids().filter(|id| modules.iter().any(|m| m == graph[*id].name())).collect()
    };

    let mut seen: HashSet<DocId> = HashSet::new();
    let mut stack = start;
    while let Some(id) = stack.pop() {
        if !seen.insert(id) {
            continue;
        }
        for edge in &graph[id].document.dependencies {
            stack.extend(graph.resolve_dependency(id, edge));
        }
    }
    Ok(seen)
}

fn check_unique_names(graph: &ConfigGraph) -> Result<(), LoadError> {
    let mut seen: HashMap<&str, &ConfigEntry> = HashMap::new();
    for (_, entry) in graph.entries() {
        if entry.name().is_empty() {
            continue;
        }
        if let Some(first) = seen.insert(entry.name(), entry) {
            return Err(if first.source_file == entry.source_file {
                LoadError::DuplicateNameSameFile {
                    name: entry.name().to_string(),
                    path: entry.source_file.clone(),
                }
            } else {
                LoadError::DuplicateNameAcrossFiles {
                    name: entry.name().to_string(),
                    first: first.source_file.clone(),
                    second: entry.source_file.clone(),
                }
            });
        }
    }
    Ok(())
}
