use engine_logging::{engine_debug, extraction_pass};

use crate::adapter::{Marker, SourceItem};
use crate::assemble::ExtractedFields;
use crate::record::is_usable_address;

/// Marker tier. Returns `None` when the item has no name marker, which is the
/// signal to fall through to the heuristic tier. When a name is present the
/// result is final: absent markers stay empty and are never filled in from
/// the item's unmarked children.
pub fn extract_marked<I: SourceItem + ?Sized>(item: &I) -> Option<ExtractedFields> {
    let name = item.text_by_marker(Marker::Name);
    if name.is_empty() {
        return None;
    }

    let download_url = item
        .marker_link(Marker::FileLink)
        .filter(|address| is_usable_address(address))
        .or_else(|| item.first_link())
        .filter(|address| is_usable_address(address));
    engine_debug!(
        "pass {}: marker tier: name={:?}, link={}",
        extraction_pass(),
        name,
        download_url.is_some()
    );

    Some(ExtractedFields {
        name,
        category: item.text_by_marker(Marker::Category),
        product_category: item.text_by_marker(Marker::ProductCategory),
        file_size: item.text_by_marker(Marker::FileSize),
        file_type: item.text_by_marker(Marker::FileType),
        download_url,
    })
}
