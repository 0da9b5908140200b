//! YAML (de)serialization of configuration documents.

mod stream;

pub use stream::DocumentStream;

use serde_yaml::Value;

use crate::schema::ConfigDocument;

/// Separator written between documents of a multi-document file.
pub const DOCUMENT_SEPARATOR: &str = "---\n";

/// Parse one document body. Blank or comment-only bodies yield `None`.
pub fn parse_document(body: &str) -> Result<Option<ConfigDocument>, serde_yaml::Error> {
    if body.trim().is_empty() {
        return Ok(None);
    }
    let value: Value = serde_yaml::from_str(body)?;
    if value.is_null() {
        return Ok(None);
    }
    serde_yaml::from_value(value).map(Some)
}

pub fn serialize_document(doc: &ConfigDocument) -> Result<String, serde_yaml::Error> {
    serde_yaml::to_string(doc)
}

/// Serialize several documents into one multi-document stream.
pub fn serialize_documents<'a>(
    docs: impl IntoIterator<Item = &'a ConfigDocument>,
) -> Result<String, serde_yaml::Error> {
    let bodies = docs.into_iter().map(serialize_document).collect::<Result<Vec<_>, _>>()?;
    Ok(bodies.join(DOCUMENT_SEPARATOR))
}
