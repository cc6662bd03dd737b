//! Core library for gwiki: front matter codec, typed page view, page store
//! and configuration.
//!
//! ```
//! use gwiki_core::frontmatter::{FormatMark, load_document, save_document};
//!
//! let raw = b"+++\ntitle = \"Hello\"\n+++\nSome content\n";
//! let (mark, metadata, content) = load_document(raw).unwrap();
//! assert_eq!(mark, FormatMark::Plus);
//! assert_eq!(metadata["title"].as_str(), Some("Hello"));
//! assert_eq!(save_document(mark, &metadata, content).unwrap(), raw);
//! ```

#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod frontmatter;
pub mod page;
