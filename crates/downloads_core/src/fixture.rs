//! In-memory item adapter.
//!
//! Lets the extraction tiers run without any markup substrate. Children keep
//! insertion order, which stands in for document order.
use std::collections::BTreeMap;

use crate::adapter::{ChildNode, Marker, SourceItem};
use crate::record::is_usable_address;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixtureChild {
    text: String,
    link: Option<String>,
}

impl FixtureChild {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            link: None,
        }
    }

    pub fn anchor(address: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            link: Some(address.into()),
        }
    }
}

impl ChildNode for FixtureChild {
    fn text(&self) -> String {
        self.text.trim().to_string()
    }

    fn link_address(&self) -> Option<String> {
        self.link.clone()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixtureItem {
    markers: BTreeMap<Marker, String>,
    marker_links: BTreeMap<Marker, String>,
    children: Vec<FixtureChild>,
    /// Links nested deeper than the immediate children.
    nested_links: Vec<String>,
}

impl FixtureItem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_marker(mut self, marker: Marker, text: impl Into<String>) -> Self {
        self.markers.insert(marker, text.into());
        self
    }

    pub fn with_marker_link(mut self, marker: Marker, address: impl Into<String>) -> Self {
        self.marker_links.insert(marker, address.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(FixtureChild::plain(text));
        self
    }

    pub fn with_link(mut self, address: impl Into<String>, text: impl Into<String>) -> Self {
        self.children.push(FixtureChild::anchor(address, text));
        self
    }

    pub fn with_nested_link(mut self, address: impl Into<String>) -> Self {
        self.nested_links.push(address.into());
        self
    }

    /// Builds an item whose children are plain text nodes.
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        texts
            .into_iter()
            .fold(Self::new(), |item, text| item.with_text(text))
    }
}

impl SourceItem for FixtureItem {
    type Child<'a> = &'a FixtureChild;

    fn text_by_marker(&self, marker: Marker) -> String {
        self.markers
            .get(&marker)
            .map(|text| text.trim().to_string())
            .unwrap_or_default()
    }

    fn marker_link(&self, marker: Marker) -> Option<String> {
        self.marker_links.get(&marker).cloned()
    }

    fn first_link(&self) -> Option<String> {
        self.marker_links
            .get(&Marker::FileLink)
            .into_iter()
            .chain(self.children.iter().filter_map(|c| c.link.as_ref()))
            .chain(self.nested_links.iter())
            .find(|address| is_usable_address(address))
            .cloned()
    }

    fn children(&self) -> Vec<Self::Child<'_>> {
        self.children.iter().collect()
    }
}
