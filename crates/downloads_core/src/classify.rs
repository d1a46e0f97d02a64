use engine_logging::{engine_debug, engine_trace, extraction_pass};

use crate::adapter::{ChildNode, SourceItem};
use crate::assemble::ExtractedFields;
use crate::record::{is_usable_address, UNTITLED};
use crate::rules::{first_match, Slot, TokenSlots};

/// Non-link text of an item plus the first link found among its children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenStream {
    pub tokens: Vec<String>,
    pub download_url: Option<String>,
}

/// Where a single token ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    FileSize,
    FileType,
    Title,
    /// Token became the title; the previous title moved to category when
    /// `demoted_to_category` is set and was dropped otherwise.
    TitleReplaced {
        previous: String,
        demoted_to_category: bool,
    },
    Category,
    ProductType,
    /// The rule matched but its slot was already full.
    Discarded { rule: &'static str },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub slots: TokenSlots,
    pub placements: Vec<Placement>,
}

/// Walks the immediate children in order. The first child carrying a usable
/// link supplies the address and is left out of the token stream; later link
/// children, and children whose link is empty or the placeholder, contribute
/// their text like any other child.
pub fn collect_tokens<I: SourceItem + ?Sized>(item: &I) -> TokenStream {
    let mut stream = TokenStream::default();
    for child in item.children() {
        if stream.download_url.is_none() {
            if let Some(address) = child.link_address().filter(|a| is_usable_address(a)) {
                stream.download_url = Some(address);
                continue;
            }
        }
        let text = child.text();
        if !text.is_empty() {
            stream.tokens.push(text);
        }
    }
    stream
}

pub fn classify_tokens<S: AsRef<str>>(tokens: &[S]) -> Classification {
    let mut classification = Classification::default();
    for token in tokens {
        let token = token.as_ref();
        let placement = place(&mut classification.slots, token);
        engine_trace!("token {:?} -> {:?}", token, placement);
        classification.placements.push(placement);
    }
    classification
}

/// Heuristic tier for one item.
pub fn classify_item<I: SourceItem + ?Sized>(item: &I) -> ExtractedFields {
    let stream = collect_tokens(item);
    let Classification { slots, .. } = classify_tokens(&stream.tokens);
    engine_debug!(
        "pass {}: heuristic tier: {} tokens, title={:?}, link={}",
        extraction_pass(),
        stream.tokens.len(),
        slots.title,
        stream.download_url.is_some()
    );

    let name = if slots.title.is_empty() {
        UNTITLED.to_string()
    } else {
        slots.title
    };
    ExtractedFields {
        name,
        category: slots.category,
        product_category: slots.product_type,
        file_size: slots.file_size,
        file_type: slots.file_type,
        download_url: stream.download_url,
    }
}

fn place(slots: &mut TokenSlots, token: &str) -> Placement {
    let Some(rule) = first_match(token, slots) else {
        return Placement::Discarded { rule: "none" };
    };
    match rule.slot {
        Slot::FileSize => fill_once(&mut slots.file_size, token, Placement::FileSize, rule.name),
        Slot::FileType => fill_once(&mut slots.file_type, token, Placement::FileType, rule.name),
        Slot::Title => {
            let previous = std::mem::replace(&mut slots.title, token.to_string());
            if previous.is_empty() {
                return Placement::Title;
            }
            let demoted_to_category = slots.category.is_empty();
            if demoted_to_category {
                slots.category = previous.clone();
            }
            Placement::TitleReplaced {
                previous,
                demoted_to_category,
            }
        }
        Slot::Descriptor => {
            if slots.category.is_empty() {
                slots.category = token.to_string();
                Placement::Category
            } else if slots.product_type.is_empty() {
                slots.product_type = token.to_string();
                Placement::ProductType
            } else {
                Placement::Discarded { rule: rule.name }
            }
        }
    }
}

fn fill_once(target: &mut String, token: &str, filled: Placement, rule: &'static str) -> Placement {
    if target.is_empty() {
        *target = token.to_string();
        filled
    } else {
        Placement::Discarded { rule }
    }
}
