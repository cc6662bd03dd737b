//! Front matter detection, decoding, and encoding.
//!
//! This module provides functionality to:
//! - Detect the front matter format (`---` YAML, `+++` TOML, `{` JSON)
//! - Split a document into front matter and verbatim content
//! - Decode front matter into an ordered, dynamically typed mapping
//! - Encode a mapping back into a block of the same format

pub mod document;
pub mod errors;
pub mod parser;
pub mod serializer;
pub mod splitter;
pub mod types;

pub use document::{Document, load_document, save_document};
pub use errors::{DecodeCause, FrontMatterError};
pub use parser::decode;
pub use serializer::encode;
pub use splitter::{Split, split, split_candidates};
pub use types::{FormatMark, Metadata, Timestamp, Value};
