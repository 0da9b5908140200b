//! Decides which files to rewrite and renders their new contents.

use std::collections::{BTreeSet, HashMap};
use std::path::PathBuf;

use super::BuildEnvError;
use crate::graph::{ConfigGraph, DocId};
use crate::yaml::{DocumentStream, serialize_document};

/// A file to rewrite and the loaded documents it holds, by position in the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedFile {
    pub path: PathBuf,
    pub documents: Vec<DocId>,
}

/// Files holding at least one changed document, in the order the graph first
/// mentions them. Files without a changed document are left out.
pub fn plan(graph: &ConfigGraph, changed: &BTreeSet<DocId>) -> Vec<PlannedFile> {
    let mut files: Vec<PlannedFile> = Vec::new();
    let mut by_path: HashMap<&PathBuf, usize> = HashMap::new();

    for (id, entry) in graph.entries() {
        let slot = *by_path.entry(&entry.source_file).or_insert_with(|| {
            files.push(PlannedFile { path: entry.source_file.clone(), documents: Vec::new() });
            files.len() - 1
        });
        files[slot].documents.push(id);
    }

    files.retain(|file| file.documents.iter().any(|id| changed.contains(id)));
    for file in &mut files {
        file.documents.sort_by_key(|id| graph[*id].source_index);
    }
    files
}

/// New contents for `file`: changed documents are re-serialized in place, every
/// other document (loaded or not) is copied from `original` unchanged.
pub fn render(
    original: &str,
    graph: &ConfigGraph,
    file: &PlannedFile,
    changed: &BTreeSet<DocId>,
) -> Result<String, BuildEnvError> {
    let mut stream = DocumentStream::parse(original);

    for id in file.documents.iter().filter(|id| changed.contains(id)) {
        let entry = &graph[*id];
        let body = serialize_document(&entry.document).map_err(|source| {
            BuildEnvError::Serialize { module: entry.name().to_string(), source }
        })?;
        if !stream.replace(entry.source_index, body) {
            return Err(BuildEnvError::StaleSource {
                path: file.path.clone(),
                index: entry.source_index,
            });
        }
    }

    Ok(stream.render())
}
