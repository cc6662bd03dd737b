//! Whole-document load and save on top of the splitter and codec.

use super::errors::FrontMatterError;
use super::parser::decode;
use super::serializer::encode;
use super::splitter::{Split, split_candidates};
use super::types::{FormatMark, Metadata};

/// Split and decode a document.
///
/// Returns the detected format, the decoded metadata and the content bytes,
/// which are a slice of `raw` and never inspected.
pub fn load_document(raw: &[u8]) -> Result<(FormatMark, Metadata, &[u8]), FrontMatterError> {
    let (split, metadata) = locate(raw)?;
    Ok((split.mark, metadata, split.content))
}

/// Encode `metadata` in `mark` and append `content` unchanged.
pub fn save_document(
    mark: FormatMark,
    metadata: &Metadata,
    content: &[u8],
) -> Result<Vec<u8>, FrontMatterError> {
    let mut out = encode(mark, metadata)?;
    out.extend_from_slice(content);
    Ok(out)
}

/// Pick the first candidate block whose payload decodes.
///
/// A delimiter line inside a multi-line string makes the first candidate
/// fail; the parser, not the line scan, decides where the block ends. A
/// failed candidate is only followed by the next one when its payload could
/// have been cut inside such a string. When no candidate decodes the error
/// of the first one is reported.
fn locate(raw: &[u8]) -> Result<(Split<'_>, Metadata), FrontMatterError> {
    let mut first_error = None;
    for candidate in split_candidates(raw)? {
        match decode(candidate.mark, candidate.metadata) {
            Ok(metadata) => return Ok((candidate, metadata)),
            Err(e) => {
                first_error.get_or_insert(e);
                if !may_hide_delimiter(&candidate) {
                    break;
                }
            }
        }
    }
    Err(first_error.unwrap_or(FrontMatterError::NoFrontMatter))
}

/// Whether the payload opens a string that may span a delimiter line.
///
/// Only TOML multi-line strings can hold a bare `+++` line. YAML forbids a
/// `---` line inside any scalar and a JSON block has a single candidate.
fn may_hide_delimiter(split: &Split<'_>) -> bool {
    match split.mark {
        FormatMark::Plus => split
            .metadata
            .windows(3)
            .any(|w| w == b"\"\"\"" || w == b"'''"),
        FormatMark::Dash | FormatMark::Brace => false,
    }
}

/// A document held in memory between load and save.
///
/// The original front matter bytes are kept so that an unmodified document
/// is written back byte for byte, whatever formatting it used.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    mark: FormatMark,
    front_matter: Vec<u8>,
    original: Metadata,
    reformatted: bool,
    /// Decoded metadata, free to mutate.
    pub metadata: Metadata,
    content: Vec<u8>,
}

impl Document {
    /// A brand-new document without front matter.
    pub fn new(mark: FormatMark) -> Self {
        Self {
            mark,
            front_matter: Vec::new(),
            original: Metadata::new(),
            reformatted: false,
            metadata: Metadata::new(),
            content: Vec::new(),
        }
    }

    /// Parse raw bytes. A document without front matter is not an error: it
    /// gets empty metadata, `default_mark`, and all of `raw` as content.
    pub fn parse(raw: &[u8], default_mark: FormatMark) -> Result<Self, FrontMatterError> {
        match locate(raw) {
            Ok((split, metadata)) => Ok(Self {
                mark: split.mark,
                front_matter: split.front_matter.to_vec(),
                original: metadata.clone(),
                reformatted: false,
                metadata,
                content: split.content.to_vec(),
            }),
            Err(FrontMatterError::NoFrontMatter) => {
                let mut doc = Self::new(default_mark);
                doc.content = raw.to_vec();
                Ok(doc)
            }
            Err(e) => Err(e),
        }
    }

    pub fn mark(&self) -> FormatMark {
        self.mark
    }

    /// Whether the loaded bytes carried a front matter block.
    pub fn has_front_matter(&self) -> bool {
        !self.front_matter.is_empty()
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    pub fn set_content(&mut self, content: impl Into<Vec<u8>>) {
        self.content = content.into();
    }

    /// Write the front matter in another format on the next save.
    pub fn convert(&mut self, mark: FormatMark) {
        if mark != self.mark {
            self.mark = mark;
            self.reformatted = true;
        }
    }

    /// Whether saving will re-encode the front matter.
    pub fn is_modified(&self) -> bool {
        self.reformatted || self.metadata != self.original
    }

    /// Serialize the document.
    ///
    /// Untouched metadata reuses the original front matter bytes; anything
    /// else is re-encoded in the document's format.
    pub fn to_bytes(&self) -> Result<Vec<u8>, FrontMatterError> {
        if self.is_modified() {
            return save_document(self.mark, &self.metadata, &self.content);
        }
        let mut out = Vec::with_capacity(self.front_matter.len() + self.content.len());
        out.extend_from_slice(&self.front_matter);
        out.extend_from_slice(&self.content);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontmatter::types::Value;

    #[test]
    fn load_returns_untouched_content() {
        let raw = b"+++\ntitle = \"T\"\n+++\n\n  Body with +++ inside\n";
        let (mark, fm, content) = load_document(raw).unwrap();
        assert_eq!(mark, FormatMark::Plus);
        assert_eq!(fm["title"], Value::from("T"));
        assert_eq!(content, b"\n  Body with +++ inside\n");
    }

    #[test]
    fn load_skips_delimiter_inside_multiline_string() {
        let raw = b"+++\nnote = \"\"\"\n+++\n\"\"\"\n+++\nBody";
        let (_, fm, content) = load_document(raw).unwrap();
        assert_eq!(fm["note"], Value::from("+++\n"));
        assert_eq!(content, b"Body");
    }

    #[test]
    fn load_reports_first_candidate_error() {
        let raw = b"---\ntitle: [oops\n---\nBody\n---\nMore";
        let err = load_document(raw).unwrap_err();
        assert!(matches!(err, FrontMatterError::Decode { format: FormatMark::Dash, .. }));
    }

    #[test]
    fn only_multiline_strings_extend_the_search() {
        let candidates = split_candidates(b"---\ntitle: [oops\n---\nBody\n---\n").unwrap();
        assert_eq!(candidates.len(), 2);
        assert!(!may_hide_delimiter(&candidates[0]));

        let candidates = split_candidates(b"+++\nbad = \n+++\nBody\n+++\n").unwrap();
        assert!(!may_hide_delimiter(&candidates[0]));

        let candidates = split_candidates(b"+++\nnote = '''\n+++\n'''\n+++\n").unwrap();
        assert!(may_hide_delimiter(&candidates[0]));
    }

    #[test]
    fn broken_yaml_with_many_rules_reports_first_error() {
        let mut raw = b"---\ntitle: [oops\n---\n".to_vec();
        for _ in 0..1000 {
            raw.extend_from_slice(b"Paragraph\n---\n");
        }
        let err = load_document(&raw).unwrap_err();
        assert!(matches!(err, FrontMatterError::Decode { format: FormatMark::Dash, .. }));
    }

    #[test]
    fn save_appends_content() {
        let mut fm = Metadata::new();
        fm.insert("title".to_string(), Value::from("T"));
        let out = save_document(FormatMark::Dash, &fm, b"Body").unwrap();
        assert_eq!(out, b"---\ntitle: T\n---\nBody");
    }

    #[test]
    fn parse_without_front_matter() {
        let doc = Document::parse(b"# Just text\n", FormatMark::Plus).unwrap();
        assert!(!doc.has_front_matter());
        assert!(doc.metadata.is_empty());
        assert_eq!(doc.mark(), FormatMark::Plus);
        assert_eq!(doc.content(), b"# Just text\n");
        assert_eq!(doc.to_bytes().unwrap(), b"# Just text\n");
    }

    #[test]
    fn parse_propagates_fatal_errors() {
        let err = Document::parse(b"---\ntitle: x\n", FormatMark::Plus).unwrap_err();
        assert!(matches!(err, FrontMatterError::UnterminatedFrontMatter { .. }));
    }

    #[test]
    fn unmodified_document_keeps_original_bytes() {
        let raw = b"---\n# a comment\ntitle:   'Spaced'\n---\nBody";
        let doc = Document::parse(raw, FormatMark::Plus).unwrap();
        assert!(!doc.is_modified());
        assert_eq!(doc.to_bytes().unwrap(), raw);
    }

    #[test]
    fn modified_document_is_reencoded() {
        let raw = b"---\n# a comment\ntitle:   'Spaced'\n---\nBody";
        let mut doc = Document::parse(raw, FormatMark::Plus).unwrap();
        doc.metadata.insert("draft".to_string(), Value::Bool(true));
        assert_eq!(doc.to_bytes().unwrap(), b"---\ntitle: Spaced\ndraft: true\n---\nBody");
    }

    #[test]
    fn convert_changes_format() {
        let raw = b"+++\ntitle = \"T\"\n+++\nBody";
        let mut doc = Document::parse(raw, FormatMark::Plus).unwrap();
        doc.convert(FormatMark::Brace);
        assert_eq!(doc.to_bytes().unwrap(), b"{\n  \"title\": \"T\"\n}\nBody");
    }

    #[test]
    fn new_document_gets_front_matter_once_metadata_is_set() {
        let mut doc = Document::new(FormatMark::Plus);
        doc.set_content("Hello");
        assert_eq!(doc.to_bytes().unwrap(), b"Hello");
        doc.metadata.insert("title".to_string(), Value::from("New"));
        assert_eq!(doc.to_bytes().unwrap(), b"+++\ntitle = \"New\"\n+++\nHello");
    }
}
