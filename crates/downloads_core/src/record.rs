use serde::ser::{Serialize, SerializeMap, Serializer};

/// Address used when no usable link was found for an item.
pub const PLACEHOLDER_URL: &str = "#";

/// Whether `address` can be followed. Empty strings and the placeholder
/// cannot.
pub(crate) fn is_usable_address(address: &str) -> bool {
    !address.is_empty() && address != PLACEHOLDER_URL
}

/// Name given to heuristic records that had no title candidate.
pub const UNTITLED: &str = "Untitled";

/// Which extraction tier produced a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Marker,
    Heuristic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Id,
    Name,
    DownloadUrl,
    Category,
    ProductCategory,
    FileSize,
    FileType,
}

/// Serialized keys in output order. Canonical keys come first, followed by the
/// legacy aliases older consumers still read. Aliases point at the same stored
/// value as their canonical key.
const RECORD_KEYS: [(&str, Field); 16] = [
    ("id", Field::Id),
    ("name", Field::Name),
    ("downloadUrl", Field::DownloadUrl),
    ("category", Field::Category),
    ("productCategory", Field::ProductCategory),
    ("fileSize", Field::FileSize),
    ("fileType", Field::FileType),
    ("display-name", Field::Name),
    ("title", Field::Name),
    ("primary-download-category", Field::Category),
    ("primaryDownloadCategory", Field::Category),
    ("productType", Field::ProductCategory),
    ("product-category", Field::ProductCategory),
    ("primaryRelatedProductCategory", Field::ProductCategory),
    ("filetype", Field::FileType),
    ("filesize", Field::FileSize),
];

/// One normalized row handed to the downloads table.
///
/// `file_size` is free text as authored ("1.2 MB"); it is never parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRecord {
    pub id: String,
    pub name: String,
    pub download_url: String,
    pub category: String,
    pub product_category: String,
    pub file_size: String,
    pub file_type: String,
    pub tier: Tier,
}

impl DownloadRecord {
    /// Every key a serialized record carries, canonical keys first.
    pub fn keys() -> impl Iterator<Item = &'static str> {
        RECORD_KEYS.iter().map(|(key, _)| *key)
    }

    /// Looks up a value by canonical or legacy key.
    pub fn field(&self, key: &str) -> Option<&str> {
        RECORD_KEYS
            .iter()
            .find(|(candidate, _)| *candidate == key)
            .map(|(_, field)| self.value(*field))
    }

    fn value(&self, field: Field) -> &str {
        match field {
            Field::Id => &self.id,
            Field::Name => &self.name,
            Field::DownloadUrl => &self.download_url,
            Field::Category => &self.category,
            Field::ProductCategory => &self.product_category,
            Field::FileSize => &self.file_size,
            Field::FileType => &self.file_type,
        }
    }
}

impl Serialize for DownloadRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(RECORD_KEYS.len()))?;
        for (key, field) in RECORD_KEYS {
            map.serialize_entry(key, self.value(field))?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DownloadRecord {
        DownloadRecord {
            id: "cms-3".to_string(),
            name: "Spec Sheet".to_string(),
            download_url: "https://cdn.example.com/spec.pdf".to_string(),
            category: "Brochures".to_string(),
            product_category: "Undermount".to_string(),
            file_size: "1.2 MB".to_string(),
            file_type: "PDF".to_string(),
            tier: Tier::Marker,
        }
    }

    #[test]
    fn aliases_resolve_to_canonical_values() {
        let record = sample();
        assert_eq!(record.field("display-name"), Some("Spec Sheet"));
        assert_eq!(record.field("title"), Some("Spec Sheet"));
        assert_eq!(record.field("primary-download-category"), Some("Brochures"));
        assert_eq!(record.field("productType"), Some("Undermount"));
        assert_eq!(record.field("product-category"), Some("Undermount"));
        assert_eq!(record.field("filetype"), Some("PDF"));
        assert_eq!(record.field("filesize"), Some("1.2 MB"));
        assert_eq!(record.field("download-type"), None);
    }

    #[test]
    fn serialized_record_carries_every_key() {
        let value = serde_json::to_value(sample()).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object.len(), 16);
        for key in DownloadRecord::keys() {
            assert!(object.contains_key(key), "missing key {key}");
        }
        assert_eq!(object["fileType"], object["filetype"]);
        assert_eq!(object["category"], object["primary-download-category"]);
        assert_eq!(object["downloadUrl"], "https://cdn.example.com/spec.pdf");
    }

    #[test]
    fn only_real_addresses_are_usable() {
        assert!(is_usable_address("https://cdn.example.com/spec.pdf"));
        assert!(is_usable_address("/files/spec.pdf"));
        assert!(!is_usable_address(PLACEHOLDER_URL));
        assert!(!is_usable_address(""));
    }

    #[test]
    fn empty_fields_serialize_as_empty_strings() {
        let record = DownloadRecord {
            category: String::new(),
            product_category: String::new(),
            ..sample()
        };
        let value = serde_json::to_value(record).unwrap();
        assert_eq!(value["category"], "");
        assert_eq!(value["product-category"], "");
    }
}
