use std::fmt;

/// Field role an editor can assign to an element inside a collection item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Marker {
    Name,
    Category,
    ProductCategory,
    FileSize,
    FileType,
    FileLink,
}

impl Marker {
    pub const ALL: [Marker; 6] = [
        Marker::Name,
        Marker::Category,
        Marker::ProductCategory,
        Marker::FileSize,
        Marker::FileType,
        Marker::FileLink,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Marker::Name => "name",
            Marker::Category => "category",
            Marker::ProductCategory => "product-category",
            Marker::FileSize => "file-size",
            Marker::FileType => "file-type",
            Marker::FileLink => "file-link",
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-only view of one collection item.
///
/// Implementations never mutate the underlying tree and every lookup has a
/// non-failing default: missing markers read as the empty string and missing
/// links as `None`.
pub trait SourceItem {
    type Child<'a>: ChildNode
    where
        Self: 'a;

    /// Trimmed text of the first element carrying `marker`, or `""`.
    fn text_by_marker(&self, marker: Marker) -> String;

    /// Address of the element carrying `marker`, if that element is a link.
    fn marker_link(&self, marker: Marker) -> Option<String>;

    /// Address of the first link anywhere in the item's subtree, skipping
    /// links whose address is empty or the placeholder.
    fn first_link(&self) -> Option<String>;

    /// Immediate children in document order.
    fn children(&self) -> Vec<Self::Child<'_>>;
}

/// One immediate child of a [`SourceItem`].
pub trait ChildNode {
    /// Text content with surrounding whitespace removed.
    fn text(&self) -> String;

    /// Resolved address when the child is a link or wraps one.
    fn link_address(&self) -> Option<String>;
}

impl<T: ChildNode + ?Sized> ChildNode for &T {
    fn text(&self) -> String {
        (**self).text()
    }

    fn link_address(&self) -> Option<String> {
        (**self).link_address()
    }
}
