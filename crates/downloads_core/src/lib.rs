//! Downloads core: pure extraction of download records from CMS collection items.
mod adapter;
mod assemble;
mod classify;
mod filter;
mod fixture;
mod marker;
mod record;
mod rules;
mod session;

pub use adapter::{ChildNode, Marker, SourceItem};
pub use assemble::{assemble_record, extract_item, extract_records, ExtractedFields};
pub use classify::{
    classify_item, classify_tokens, collect_tokens, Classification, Placement, TokenStream,
};
pub use filter::{is_valid, ValidityFilter};
pub use fixture::{FixtureChild, FixtureItem};
pub use marker::extract_marked;
pub use record::{DownloadRecord, Tier, PLACEHOLDER_URL, UNTITLED};
pub use rules::{
    first_match, is_file_size, is_file_type, rules, token_len, Rule, Slot, TokenSlots,
    FILE_TYPE_VOCABULARY, MAX_TITLE_CHARS,
};
pub use session::{ExtractionSession, PassOutcome, SessionState};
