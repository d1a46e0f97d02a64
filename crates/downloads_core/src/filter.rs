use std::sync::Arc;

use engine_logging::engine_debug;

use crate::record::{is_usable_address, DownloadRecord};

/// A record is shown only with a name and a real address.
pub fn is_valid(record: &DownloadRecord) -> bool {
    !record.name.is_empty() && is_usable_address(&record.download_url)
}

/// Memoized validity projection.
///
/// The cache is keyed on the identity of the assembled sequence, not its
/// contents: handing in the same `Arc` returns the same filtered `Arc`.
#[derive(Debug, Default)]
pub struct ValidityFilter {
    memo: Option<Memo>,
}

#[derive(Debug)]
struct Memo {
    source: Arc<[DownloadRecord]>,
    visible: Arc<[DownloadRecord]>,
}

impl ValidityFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, assembled: &Arc<[DownloadRecord]>) -> Arc<[DownloadRecord]> {
        if let Some(memo) = &self.memo {
            if Arc::ptr_eq(&memo.source, assembled) {
                return Arc::clone(&memo.visible);
            }
        }

        let visible: Arc<[DownloadRecord]> =
            assembled.iter().filter(|r| is_valid(r)).cloned().collect();
        engine_debug!(
            "validity filter kept {} of {} records",
            visible.len(),
            assembled.len()
        );
        self.memo = Some(Memo {
            source: Arc::clone(assembled),
            visible: Arc::clone(&visible),
        });
        visible
    }
}
