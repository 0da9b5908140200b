//! Lossless splitting of multi-document YAML files.
//!
//! A file is a list of segments: the text before the first separator line,
//! then one segment per `---` line. Rendering concatenates every separator and
//! body as read, so a segment that is never replaced comes back byte for byte.

/// A `---` line (optionally followed by a comment) that starts a new document.
pub(crate) fn is_separator(line: &str) -> bool {
    let line = line.trim_end_matches(['\n', '\r']);
    match line.strip_prefix("---") {
        Some(rest) => {
            let rest = rest.trim_start();
            rest.is_empty() || rest.starts_with('#')
        }
        None => false,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Segment {
    /// The separator line including its line break; empty for the first segment.
    separator: String,
    body: String,
}

/// The documents of one file, in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentStream {
    segments: Vec<Segment>,
}

impl DocumentStream {
    pub fn parse(content: &str) -> Self {
        let mut segments = vec![Segment { separator: String::new(), body: String::new() }];

        for line in content.split_inclusive('\n') {
            if is_separator(line) {
                segments.push(Segment { separator: line.to_string(), body: String::new() });
            } else if let Some(current) = segments.last_mut() {
                current.body.push_str(line);
            }
        }

        Self { segments }
    }

    /// Number of segments, including blank ones.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.iter().all(|s| s.body.trim().is_empty())
    }

    pub fn body(&self, index: usize) -> Option<&str> {
        self.segments.get(index).map(|s| s.body.as_str())
    }

    /// `(index, body)` for every segment.
    pub fn documents(&self) -> impl Iterator<Item = (usize, &str)> {
        self.segments.iter().enumerate().map(|(i, s)| (i, s.body.as_str()))
    }

    /// Swap in new text for one document, keeping its separator.
    /// Returns `false` when `index` is past the end of the stream.
    pub fn replace(&mut self, index: usize, mut body: String) -> bool {
        let has_next = index + 1 < self.segments.len();
        let Some(segment) = self.segments.get_mut(index) else {
            return false;
        };
        if has_next && !body.is_empty() && !body.ends_with('\n') {
            body.push('\n');
        }
        segment.body = body;
        true
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            out.push_str(&segment.separator);
            out.push_str(&segment.body);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_document_is_one_segment() {
        let stream = DocumentStream::parse("a: 1\nb: 2\n");
        assert_eq!(stream.len(), 1);
        assert_eq!(stream.body(0), Some("a: 1\nb: 2\n"));
    }

    #[test]
    fn splits_on_separator_lines_only() {
        let content = "a: 1\n---\nb: '---'\nc: --- not a separator\n--- # second\nd: 4\n";
        let stream = DocumentStream::parse(content);
        assert_eq!(stream.len(), 3);
        assert_eq!(stream.body(1), Some("b: '---'\nc: --- not a separator\n"));
        assert_eq!(stream.body(2), Some("d: 4\n"));
    }

    #[test]
    fn leading_separator_leaves_blank_first_segment() {
        let stream = DocumentStream::parse("---\na: 1\n");
        assert_eq!(stream.len(), 2);
        assert_eq!(stream.body(0), Some(""));
        assert_eq!(stream.body(1), Some("a: 1\n"));
    }

    #[test]
    fn render_is_lossless() {
        let content = "# header comment\na: 1\n---   \r\nb:   2 # keep me\n---\n\nc: 3";
        assert_eq!(DocumentStream::parse(content).render(), content);
    }

    #[test]
    fn replace_keeps_neighbours_verbatim() {
        let content = "a: 1   # odd spacing\n---\nb: 2\n---\nc: 3\n";
        let mut stream = DocumentStream::parse(content);
        assert!(stream.replace(1, "b: 20".to_string()));
        assert_eq!(stream.render(), "a: 1   # odd spacing\n---\nb: 20\n---\nc: 3\n");
    }

    #[test]
    fn replace_out_of_range_is_rejected() {
        let mut stream = DocumentStream::parse("a: 1\n");
        assert!(!stream.replace(3, "x: 1\n".to_string()));
    }

    #[test]
    fn empty_when_only_whitespace() {
        assert!(DocumentStream::parse("\n---\n  \n").is_empty());
        assert!(!DocumentStream::parse("a: 1\n").is_empty());
    }
}
