use std::sync::Arc;

use engine_logging::{engine_debug, engine_info, set_extraction_pass};

use crate::adapter::SourceItem;
use crate::assemble::extract_records;
use crate::filter::ValidityFilter;
use crate::record::DownloadRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No pass has run since creation or the last invalidation.
    #[default]
    Pending,
    /// A pass produced the current records; further triggers are ignored.
    Extracted { generation: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassOutcome {
    Completed {
        generation: u64,
        assembled: usize,
        visible: usize,
    },
    /// The session already holds records for `generation`.
    Skipped { generation: u64 },
}

/// Run-once gate around an extraction pass.
///
/// A "source populated" trigger runs at most one pass; the result, even an
/// empty one, is kept until [`ExtractionSession::invalidate`] is called.
/// Generations increase with every completed pass and act as the cache key
/// consumers can compare.
#[derive(Debug)]
pub struct ExtractionSession {
    state: SessionState,
    last_generation: u64,
    assembled: Arc<[DownloadRecord]>,
    filter: ValidityFilter,
}

impl Default for ExtractionSession {
    fn default() -> Self {
        Self {
            state: SessionState::Pending,
            last_generation: 0,
            assembled: Arc::from(Vec::new()),
            filter: ValidityFilter::new(),
        }
    }
}

impl ExtractionSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_extracted(&self) -> bool {
        matches!(self.state, SessionState::Extracted { .. })
    }

    /// Generation of the records currently held, 0 before the first pass.
    pub fn generation(&self) -> u64 {
        match self.state {
            SessionState::Extracted { generation } => generation,
            SessionState::Pending => 0,
        }
    }

    pub fn on_source_populated<I: SourceItem>(&mut self, items: &[I]) -> PassOutcome {
        if let SessionState::Extracted { generation } = self.state {
            engine_debug!("source populated again; keeping generation {}", generation);
            return PassOutcome::Skipped { generation };
        }

        let generation = self.last_generation + 1;
        self.last_generation = generation;
        set_extraction_pass(generation);

        self.assembled = extract_records(items).into();
        self.state = SessionState::Extracted { generation };
        let visible = self.filter.apply(&self.assembled).len();
        engine_info!(
            "pass {}: found {} CMS items, {} usable",
            generation,
            self.assembled.len(),
            visible
        );

        PassOutcome::Completed {
            generation,
            assembled: self.assembled.len(),
            visible,
        }
    }

    /// Drops the current records and re-arms the gate for the next trigger.
    pub fn invalidate(&mut self) {
        if self.is_extracted() {
            engine_debug!("invalidating generation {}", self.generation());
        }
        self.state = SessionState::Pending;
        self.assembled = Arc::from(Vec::new());
        self.filter = ValidityFilter::new();
    }

    /// Every assembled record, including ones the validity filter drops.
    pub fn assembled_records(&self) -> &Arc<[DownloadRecord]> {
        &self.assembled
    }

    /// Records fit for display. The same `Arc` is returned until the next pass.
    pub fn visible_records(&mut self) -> Arc<[DownloadRecord]> {
        self.filter.apply(&self.assembled)
    }
}
