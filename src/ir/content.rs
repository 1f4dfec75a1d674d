//! Opaque mixed content carried by objects and metadata entries.

use std::collections::BTreeMap;
use std::fmt;

use roxmltree::Document;
use serde::{Deserialize, Serialize};

use super::io_manifest_xml::{escape_attr, xml_escape, MANIFEST_NAMESPACE};

/// An uninterpreted XML fragment (text and/or nested markup).
///
/// The fragment is stored exactly as it appears between an element's start
/// and end tags, so a manifest that is parsed and written again reproduces
/// it byte for byte.
///
/// Prefixed namespace declarations that were in scope where the fragment
/// appeared are kept alongside it, so a prefix bound on an ancestor element
/// stays bound once the fragment is taken out of the document.
#[derive(Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Content {
    markup: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    namespaces: BTreeMap<String, String>,
}

impl Content {
    /// Creates empty content.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates content holding plain text, escaping markup characters.
    pub fn text(text: &str) -> Self {
        Self::markup(xml_escape(text))
    }

    /// Creates content from a raw markup fragment, stored verbatim.
    ///
    /// The fragment is not checked here; manifest validation reports
    /// fragments that are not well-formed.
    pub fn markup(raw: impl Into<String>) -> Self {
        Self {
            markup: raw.into(),
            namespaces: BTreeMap::new(),
        }
    }

    /// Binds `prefix` to `uri` for the fragment.
    pub fn with_namespace(mut self, prefix: impl Into<String>, uri: impl Into<String>) -> Self {
        self.namespaces.insert(prefix.into(), uri.into());
        self
    }

    /// Returns the raw markup.
    pub fn as_markup(&self) -> &str {
        &self.markup
    }

    /// Prefix to URI bindings the fragment is read under.
    pub fn namespaces(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.namespaces
            .iter()
            .map(|(prefix, uri)| (prefix.as_str(), uri.as_str()))
    }

    /// Returns true if there is no content at all.
    pub fn is_empty(&self) -> bool {
        self.markup.is_empty()
    }

    /// Returns true if the fragment parses as element content.
    pub fn is_well_formed(&self) -> bool {
        Document::parse(&self.wrap_fragment()).is_ok()
    }

    /// Returns the concatenated text of the fragment with markup removed,
    /// or `None` if the fragment is not well-formed.
    pub fn plain_text(&self) -> Option<String> {
        let wrapped = self.wrap_fragment();
        let document = Document::parse(&wrapped).ok()?;
        Some(
            document
                .root_element()
                .descendants()
                .filter(|n| n.is_text())
                .filter_map(|n| n.text())
                .collect(),
        )
    }

    /// The ` xmlns:prefix="uri"` attributes for the enclosing element.
    pub(crate) fn declarations(&self) -> String {
        self.namespaces
            .iter()
            .map(|(prefix, uri)| format!(" xmlns:{prefix}=\"{}\"", escape_attr(uri)))
            .collect()
    }

    fn wrap_fragment(&self) -> String {
        format!(
            "<Content xmlns=\"{MANIFEST_NAMESPACE}\"{}>{}</Content>",
            self.declarations(),
            self.markup
        )
    }
}

impl fmt::Debug for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespaces.is_empty() {
            write!(f, "Content({:?})", self.markup)
        } else {
            write!(f, "Content({:?}, {:?})", self.markup, self.namespaces)
        }
    }
}
