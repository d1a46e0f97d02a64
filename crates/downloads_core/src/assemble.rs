use crate::adapter::SourceItem;
use crate::classify::classify_item;
use crate::marker::extract_marked;
use crate::record::{DownloadRecord, Tier, PLACEHOLDER_URL};

/// Field values produced by either tier, before normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedFields {
    pub name: String,
    pub category: String,
    pub product_category: String,
    pub file_size: String,
    pub file_type: String,
    pub download_url: Option<String>,
}

pub fn assemble_record(ordinal: usize, tier: Tier, fields: ExtractedFields) -> DownloadRecord {
    DownloadRecord {
        id: format!("cms-{ordinal}"),
        name: fields.name,
        download_url: fields
            .download_url
            .unwrap_or_else(|| PLACEHOLDER_URL.to_string()),
        category: fields.category,
        product_category: fields.product_category,
        file_size: fields.file_size,
        file_type: fields.file_type,
        tier,
    }
}

/// Runs the marker tier and falls back to the heuristic tier on a miss.
pub fn extract_item<I: SourceItem + ?Sized>(ordinal: usize, item: &I) -> DownloadRecord {
    match extract_marked(item) {
        Some(fields) => assemble_record(ordinal, Tier::Marker, fields),
        None => assemble_record(ordinal, Tier::Heuristic, classify_item(item)),
    }
}

/// Every item in source order, valid or not. Ids are positional.
pub fn extract_records<I: SourceItem>(items: &[I]) -> Vec<DownloadRecord> {
    items
        .iter()
        .enumerate()
        .map(|(ordinal, item)| extract_item(ordinal, item))
        .collect()
}
