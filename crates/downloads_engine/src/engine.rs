use std::sync::Arc;

use downloads_core::{DownloadRecord, ExtractionSession, PassOutcome};
use engine_logging::engine_warn;

use crate::export::{write_export, ExportBatch, ExportError, ExportOptions, ExportSummary};
use crate::html::{HtmlSource, SourceError, SourceSelectors};
use crate::settings::SourceSettings;
use crate::snapshot::{load_snapshot, Snapshot, SnapshotError};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
    #[error(transparent)]
    Export(#[from] ExportError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observation {
    /// The trigger reached the session; see the outcome for whether it ran.
    Pass(PassOutcome),
    /// The configured slot is not in the snapshot. The gate stays armed.
    SourceMissing,
}

/// Drives an [`ExtractionSession`] from HTML page snapshots.
pub struct ExtractionEngine {
    settings: SourceSettings,
    selectors: SourceSelectors,
    session: ExtractionSession,
}

impl ExtractionEngine {
    pub fn new(settings: SourceSettings) -> Result<Self, EngineError> {
        let selectors = SourceSelectors::compile(&settings)?;
        Ok(Self {
            settings,
            selectors,
            session: ExtractionSession::new(),
        })
    }

    /// Signals that the page holding the collection is populated. Parses
    /// only when the session has no records yet.
    pub fn observe_html(&mut self, html: &str) -> Observation {
        if self.session.is_extracted() {
            return Observation::Pass(PassOutcome::Skipped {
                generation: self.session.generation(),
            });
        }

        let source = HtmlSource::parse(html, self.selectors.clone());
        match source.items() {
            Some(items) => Observation::Pass(self.session.on_source_populated(&items)),
            None => {
                engine_warn!(
                    "slot {:?} not found in snapshot; nothing extracted",
                    self.settings.slot_name
                );
                Observation::SourceMissing
            }
        }
    }

    pub fn observe_snapshot(&mut self, snapshot: &Snapshot) -> Observation {
        self.observe_html(&snapshot.html)
    }

    pub fn observe_file(&mut self, path: &std::path::Path) -> Result<Observation, EngineError> {
        let snapshot = load_snapshot(path)?;
        Ok(self.observe_snapshot(&snapshot))
    }

    pub fn invalidate(&mut self) {
        self.session.invalidate();
    }

    pub fn generation(&self) -> u64 {
        self.session.generation()
    }

    pub fn visible_records(&mut self) -> Arc<[DownloadRecord]> {
        self.session.visible_records()
    }

    pub fn assembled_records(&self) -> &Arc<[DownloadRecord]> {
        self.session.assembled_records()
    }

    /// Writes the current records to `output_dir`.
    pub fn export(
        &mut self,
        output_dir: &std::path::Path,
        options: &ExportOptions,
        extracted_utc: &str,
    ) -> Result<ExportSummary, EngineError> {
        let visible = self.session.visible_records();
        let assembled = Arc::clone(self.session.assembled_records());
        let dropped = assembled.len() - visible.len();
        let records: &[DownloadRecord] = if options.include_dropped {
            &assembled
        } else {
            &visible
        };
        let batch = ExportBatch {
            records,
            dropped,
            generation: self.session.generation(),
            extracted_utc,
        };
        Ok(write_export(output_dir, batch, options)?)
    }
}
