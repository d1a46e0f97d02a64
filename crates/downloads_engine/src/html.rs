use std::collections::BTreeMap;

use downloads_core::{ChildNode, Marker, SourceItem};
use ego_tree::NodeRef;
use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::links::resolve_href;
use crate::settings::SourceSettings;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SourceError {
    #[error("invalid selector {selector:?}: {message}")]
    InvalidSelector { selector: String, message: String },
    #[error("invalid base url {url:?}: {message}")]
    InvalidBaseUrl { url: String, message: String },
}

/// Selectors and link base compiled once from [`SourceSettings`].
#[derive(Debug, Clone)]
pub struct SourceSelectors {
    slot: Option<Selector>,
    item: Selector,
    anchor: Selector,
    markers: BTreeMap<Marker, Selector>,
    base_url: Option<Url>,
}

impl SourceSelectors {
    pub fn compile(settings: &SourceSettings) -> Result<Self, SourceError> {
        let slot = settings
            .slot_name
            .as_deref()
            .map(|name| {
                let escaped = name.replace('"', "\\\"");
                parse_selector(&format!("slot[name=\"{escaped}\"]"))
            })
            .transpose()?;
        let item = parse_selector(&settings.item_selector)?;
        let anchor = parse_selector("a")?;

        let mut markers = BTreeMap::new();
        for marker in Marker::ALL {
            let class = settings.markers.class_for(marker);
            markers.insert(marker, parse_selector(&format!(".{class}"))?);
        }

        let base_url = settings
            .base_url
            .as_deref()
            .map(|raw| {
                Url::parse(raw).map_err(|err| SourceError::InvalidBaseUrl {
                    url: raw.to_string(),
                    message: err.to_string(),
                })
            })
            .transpose()?;

        Ok(Self {
            slot,
            item,
            anchor,
            markers,
            base_url,
        })
    }
}

fn parse_selector(selector: &str) -> Result<Selector, SourceError> {
    Selector::parse(selector).map_err(|err| SourceError::InvalidSelector {
        selector: selector.to_string(),
        message: err.to_string(),
    })
}

/// A parsed page snapshot holding one CMS collection.
pub struct HtmlSource {
    document: Html,
    selectors: SourceSelectors,
}

impl HtmlSource {
    pub fn parse(html: &str, selectors: SourceSelectors) -> Self {
        Self {
            document: Html::parse_document(html),
            selectors,
        }
    }

    /// Collection items in document order, or `None` when the configured
    /// slot is not present in the snapshot.
    pub fn items(&self) -> Option<Vec<HtmlItem<'_>>> {
        let selectors = &self.selectors;
        let root = match &selectors.slot {
            Some(slot_selector) => self.document.select(slot_selector).next()?,
            None => self.document.root_element(),
        };
        let items = root
            .select(&selectors.item)
            .map(|element| HtmlItem { element, selectors })
            .collect();
        Some(items)
    }
}

/// One collection item element.
#[derive(Clone, Copy)]
pub struct HtmlItem<'a> {
    element: ElementRef<'a>,
    selectors: &'a SourceSelectors,
}

impl<'a> HtmlItem<'a> {
    fn marked(&self, marker: Marker) -> Option<ElementRef<'a>> {
        let selector = self.selectors.markers.get(&marker)?;
        self.element.select(selector).next()
    }
}

impl<'a> SourceItem for HtmlItem<'a> {
    type Child<'c>
        = HtmlChild<'a>
    where
        Self: 'c;

    fn text_by_marker(&self, marker: Marker) -> String {
        self.marked(marker).map(trimmed_text).unwrap_or_default()
    }

    fn marker_link(&self, marker: Marker) -> Option<String> {
        let element = self.marked(marker)?;
        link_of(element, self.selectors)
    }

    fn first_link(&self) -> Option<String> {
        let base = self.selectors.base_url.as_ref();
        self.element
            .select(&self.selectors.anchor)
            .filter_map(|anchor| anchor.value().attr("href"))
            .find_map(|href| resolve_href(href, base))
    }

    fn children(&self) -> Vec<Self::Child<'_>> {
        child_elements(self.element)
            .map(|element| HtmlChild {
                element,
                selectors: self.selectors,
            })
            .collect()
    }
}

/// Element child of a collection item.
#[derive(Clone, Copy)]
pub struct HtmlChild<'a> {
    element: ElementRef<'a>,
    selectors: &'a SourceSelectors,
}

impl ChildNode for HtmlChild<'_> {
    fn text(&self) -> String {
        trimmed_text(self.element)
    }

    fn link_address(&self) -> Option<String> {
        link_of(self.element, self.selectors)
    }
}

fn child_elements<'a>(element: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    element
        .children()
        .filter_map(|node: NodeRef<'a, Node>| ElementRef::wrap(node))
}

fn trimmed_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// The element's own address when it is an anchor, else the address of its
/// first descendant anchor.
fn link_of(element: ElementRef<'_>, selectors: &SourceSelectors) -> Option<String> {
    let anchor = if element.value().name().eq_ignore_ascii_case("a") {
        element
    } else {
        element.select(&selectors.anchor).next()?
    };
    let href = anchor.value().attr("href")?;
    resolve_href(href, selectors.base_url.as_ref())
}
