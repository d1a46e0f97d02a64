use downloads_core::Marker;
use serde::{Deserialize, Serialize};

pub const DEFAULT_SLOT_NAME: &str = "cmsCollectionSlot";
pub const DEFAULT_ITEM_SELECTOR: &str = ".sch-cms-item, .w-dyn-item";

/// Class name editors put on an element to mark its field role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerClasses {
    pub name: String,
    pub category: String,
    pub product_category: String,
    pub file_size: String,
    pub file_type: String,
    pub file_link: String,
}

impl Default for MarkerClasses {
    fn default() -> Self {
        Self {
            name: "sch-data-name".to_string(),
            category: "sch-data-category".to_string(),
            product_category: "sch-data-product-category".to_string(),
            file_size: "sch-data-file-size".to_string(),
            file_type: "sch-data-file-type".to_string(),
            file_link: "sch-data-file".to_string(),
        }
    }
}

impl MarkerClasses {
    pub fn class_for(&self, marker: Marker) -> &str {
        match marker {
            Marker::Name => &self.name,
            Marker::Category => &self.category,
            Marker::ProductCategory => &self.product_category,
            Marker::FileSize => &self.file_size,
            Marker::FileType => &self.file_type,
            Marker::FileLink => &self.file_link,
        }
    }
}

/// Where the collection lives in a page and how its items are marked up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    /// Name of the `<slot>` wrapping the collection. `None` searches the whole
    /// document.
    pub slot_name: Option<String>,
    pub item_selector: String,
    pub markers: MarkerClasses,
    /// Base for resolving relative link addresses.
    pub base_url: Option<String>,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            slot_name: Some(DEFAULT_SLOT_NAME.to_string()),
            item_selector: DEFAULT_ITEM_SELECTOR.to_string(),
            markers: MarkerClasses::default(),
            base_url: None,
        }
    }
}
