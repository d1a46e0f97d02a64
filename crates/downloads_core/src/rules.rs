//! Ordered classification rules for the heuristic tier.
//!
//! Each token is offered to the rules in ascending priority and lands in the
//! slot of the first rule whose predicate accepts it. Size and type rules look
//! only at the token's shape; the title rule also looks at what has already
//! been classified.
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

/// Tokens this long or longer never displace an existing title.
pub const MAX_TITLE_CHARS: usize = 100;

pub const FILE_TYPE_VOCABULARY: [&str; 11] = [
    "PDF", "DWG", "ZIP", "RFA", "SKP", "DOC", "XLS", "JPG", "PNG", "MP4", "Other",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    FileSize,
    FileType,
    Title,
    /// Category first, then product type.
    Descriptor,
}

/// Field values collected from one item's token stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenSlots {
    pub file_size: String,
    pub file_type: String,
    pub title: String,
    pub category: String,
    pub product_type: String,
}

#[derive(Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub slot: Slot,
    pub priority: u8,
    predicate: fn(&str, &TokenSlots) -> bool,
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("slot", &self.slot)
            .field("priority", &self.priority)
            .finish_non_exhaustive()
    }
}

impl Rule {
    pub fn matches(&self, token: &str, slots: &TokenSlots) -> bool {
        (self.predicate)(token, slots)
    }
}

static RULES: [Rule; 4] = [
    Rule {
        name: "file-size",
        slot: Slot::FileSize,
        priority: 0,
        predicate: size_shaped,
    },
    Rule {
        name: "file-type",
        slot: Slot::FileType,
        priority: 1,
        predicate: type_shaped,
    },
    Rule {
        name: "title",
        slot: Slot::Title,
        priority: 2,
        predicate: claims_title,
    },
    Rule {
        name: "descriptor",
        slot: Slot::Descriptor,
        priority: 3,
        predicate: unclaimed,
    },
];

/// Rules in evaluation order.
pub fn rules() -> &'static [Rule] {
    &RULES
}

/// First rule accepting `token`. The descriptor rule accepts everything, so
/// this only returns `None` for an empty table.
pub fn first_match(token: &str, slots: &TokenSlots) -> Option<&'static Rule> {
    RULES.iter().find(|rule| rule.matches(token, slots))
}

/// Bare byte counts ("2048") or a number with a unit ("1.2 MB", "512kb", "10 bytes").
pub fn is_file_size(token: &str) -> bool {
    static BARE: OnceLock<Regex> = OnceLock::new();
    static WITH_UNIT: OnceLock<Regex> = OnceLock::new();
    let bare = BARE.get_or_init(|| Regex::new(r"^\d+$").expect("valid file size pattern"));
    let with_unit = WITH_UNIT.get_or_init(|| {
        Regex::new(r"(?i)^\d+(\.\d+)?\s*(KB|MB|GB|bytes?)$").expect("valid file size pattern")
    });
    bare.is_match(token) || with_unit.is_match(token)
}

/// Short upper-case codes ("PDF", "MP4") or a member of the known vocabulary.
pub fn is_file_type(token: &str) -> bool {
    static CODE: OnceLock<Regex> = OnceLock::new();
    let code = CODE.get_or_init(|| Regex::new(r"^[A-Z0-9]{2,5}$").expect("valid file type pattern"));
    code.is_match(token) || FILE_TYPE_VOCABULARY.contains(&token)
}

/// Character count used for every length comparison.
pub fn token_len(token: &str) -> usize {
    token.chars().count()
}

fn size_shaped(token: &str, _: &TokenSlots) -> bool {
    is_file_size(token)
}

fn type_shaped(token: &str, _: &TokenSlots) -> bool {
    is_file_type(token)
}

fn unclaimed(_: &str, _: &TokenSlots) -> bool {
    true
}

fn claims_title(token: &str, slots: &TokenSlots) -> bool {
    if slots.title.is_empty() {
        return true;
    }
    let len = token_len(token);
    len > token_len(&slots.title) && len < MAX_TITLE_CHARS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rules_are_sorted_by_priority() {
        let priorities: Vec<u8> = rules().iter().map(|r| r.priority).collect();
        let mut sorted = priorities.clone();
        sorted.sort_unstable();
        assert_eq!(priorities, sorted);
    }

    #[test]
    fn file_size_accepts_numbers_and_units() {
        for token in ["2048", "1.2 MB", "512kb", "3GB", "10 bytes", "1 byte", "4.75 Mb"] {
            assert!(is_file_size(token), "{token} should be a size");
        }
        for token in ["1.2", "MB", "about 3 MB", "1.2 MB zipped", "v2", ""] {
            assert!(!is_file_size(token), "{token} should not be a size");
        }
    }

    #[test]
    fn file_type_accepts_codes_and_vocabulary() {
        for token in ["PDF", "MP4", "DOCX", "Other", "A1"] {
            assert!(is_file_type(token), "{token} should be a type");
        }
        for token in ["pdf", "X", "TOOLONG", "Brochure", "other"] {
            assert!(!is_file_type(token), "{token} should not be a type");
        }
    }

    #[test]
    fn title_rule_requires_strictly_longer_token() {
        let title = rules().iter().find(|r| r.slot == Slot::Title).unwrap();
        let empty = TokenSlots::default();
        assert!(title.matches("Anything", &empty));

        let filled = TokenSlots {
            title: "Brochure".to_string(),
            ..TokenSlots::default()
        };
        assert!(title.matches("Brochures", &filled));
        assert!(!title.matches("Catalogs", &filled));
        assert!(!title.matches("Short", &filled));
        assert!(!title.matches(&"x".repeat(MAX_TITLE_CHARS), &filled));
        assert!(title.matches(&"x".repeat(MAX_TITLE_CHARS - 1), &filled));
    }

    #[test]
    fn descriptor_rule_catches_everything_else() {
        let slots = TokenSlots {
            title: "Installation Guide".to_string(),
            ..TokenSlots::default()
        };
        let rule = first_match("Guides", &slots).unwrap();
        assert_eq!(rule.slot, Slot::Descriptor);
    }

    #[test]
    fn size_wins_over_type_for_bare_numbers() {
        let rule = first_match("2048", &TokenSlots::default()).unwrap();
        assert_eq!(rule.name, "file-size");
    }
}
