use std::sync::Once;

use downloads_core::{extract_item, extract_marked, FixtureItem, Marker, Tier, PLACEHOLDER_URL};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

#[test]
fn missing_name_marker_falls_through() {
    init_logging();
    let item = FixtureItem::new()
        .with_marker(Marker::Category, "Brochures")
        .with_text("Product Brochure");

    assert!(extract_marked(&item).is_none());
    assert_eq!(extract_item(0, &item).tier, Tier::Heuristic);
}

#[test]
fn name_marker_text_is_used_verbatim() {
    init_logging();
    let item = FixtureItem::new()
        .with_marker(Marker::Name, "  Spec Sheet – Silent Range  ")
        .with_marker(Marker::Category, "Technical Specifications")
        .with_marker(Marker::ProductCategory, "Silent Range")
        .with_marker(Marker::FileSize, "820 KB")
        .with_marker(Marker::FileType, "PDF")
        .with_marker_link(Marker::FileLink, "https://cdn.example.com/spec.pdf");

    let record = extract_item(4, &item);

    assert_eq!(record.tier, Tier::Marker);
    assert_eq!(record.id, "cms-4");
    assert_eq!(record.name, "Spec Sheet – Silent Range");
    assert_eq!(record.category, "Technical Specifications");
    assert_eq!(record.product_category, "Silent Range");
    assert_eq!(record.file_size, "820 KB");
    assert_eq!(record.file_type, "PDF");
    assert_eq!(record.download_url, "https://cdn.example.com/spec.pdf");
}

#[test]
fn absent_markers_stay_empty_even_with_classifiable_children() {
    init_logging();
    let item = FixtureItem::new()
        .with_marker(Marker::Name, "Installation Guide")
        .with_text("Installation Guides")
        .with_text("PDF")
        .with_text("1.2 MB")
        .with_link("https://cdn.example.com/guide.pdf", "Download");

    let record = extract_item(0, &item);

    assert_eq!(record.name, "Installation Guide");
    assert_eq!(record.category, "");
    assert_eq!(record.product_category, "");
    assert_eq!(record.file_type, "");
    assert_eq!(record.file_size, "");
    assert_eq!(record.download_url, "https://cdn.example.com/guide.pdf");
}

#[test]
fn name_only_without_link_gets_placeholder() {
    init_logging();
    let item = FixtureItem::new().with_marker(Marker::Name, "Spec Sheet");

    let record = extract_item(0, &item);

    assert_eq!(record.name, "Spec Sheet");
    assert_eq!(record.category, "");
    assert_eq!(record.file_type, "");
    assert_eq!(record.file_size, "");
    assert_eq!(record.download_url, PLACEHOLDER_URL);
}

#[test]
fn placeholder_file_link_falls_back_to_first_link() {
    init_logging();
    let item = FixtureItem::new()
        .with_marker(Marker::Name, "CAD Pack")
        .with_marker_link(Marker::FileLink, "#")
        .with_nested_link("https://cdn.example.com/cad.zip");

    let record = extract_item(0, &item);
    assert_eq!(record.download_url, "https://cdn.example.com/cad.zip");
}

#[test]
fn file_link_marker_beats_other_links() {
    init_logging();
    let item = FixtureItem::new()
        .with_marker(Marker::Name, "CAD Pack")
        .with_link("https://example.com/product-page", "Product")
        .with_marker_link(Marker::FileLink, "https://cdn.example.com/cad.zip");

    let record = extract_item(0, &item);
    assert_eq!(record.download_url, "https://cdn.example.com/cad.zip");
}
