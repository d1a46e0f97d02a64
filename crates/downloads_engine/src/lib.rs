//! Downloads engine: HTML snapshots in, exported download records out.
mod engine;
mod export;
mod html;
mod links;
mod settings;
mod snapshot;

pub use engine::{EngineError, ExtractionEngine, Observation};
pub use export::{write_export, ExportBatch, ExportError, ExportOptions, ExportSummary};
pub use html::{HtmlChild, HtmlItem, HtmlSource, SourceError, SourceSelectors};
pub use settings::{MarkerClasses, SourceSettings, DEFAULT_ITEM_SELECTOR, DEFAULT_SLOT_NAME};
pub use snapshot::{decode_snapshot, load_snapshot, Snapshot, SnapshotError};
