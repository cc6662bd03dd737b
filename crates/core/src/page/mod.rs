//! Wiki pages: a named [`Document`] with typed access to its front matter.

pub mod store;
pub mod view;

use std::borrow::Cow;

use crate::frontmatter::{Document, FormatMark};

pub use store::{PageStore, StoreError};
pub use view::{Field, FieldIssue, PageMeta, PageMetaMut};

#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// Name relative to the content directory, without suffix.
    pub name: String,
    pub document: Document,
}

impl Page {
    /// An empty page that has never been saved.
    pub fn new(name: impl Into<String>, mark: FormatMark) -> Self {
        Self { name: name.into(), document: Document::new(mark) }
    }

    pub fn meta(&self) -> PageMeta<'_> {
        PageMeta::new(&self.name, &self.document.metadata)
    }

    pub fn meta_mut(&mut self) -> PageMetaMut<'_> {
        PageMetaMut::new(&self.name, &mut self.document.metadata)
    }

    /// Page content as text; invalid UTF-8 is replaced.
    pub fn body(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.document.content())
    }

    pub fn set_body(&mut self, body: impl Into<String>) {
        self.document.set_content(body.into());
    }
}
