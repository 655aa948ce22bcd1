//! Repository seam between the dashboard and the plugin's storage.
//!
//! The dashboard only needs a handful of read queries plus recording an
//! outcome against an acceptance criterion. `JsonFileRepository` serves them
//! from the roadmap export the plugin writes.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use anyhow::{Context, Result, anyhow};

use crate::model::{
    AcceptanceCriterion, CriterionOutcome, Document, DocumentSummary, Roadmap, Track, TrackSummary,
};

/// Data access used by the dashboard presenters.
///
/// Implementations are called from blocking worker threads, never from the
/// UI loop.
pub trait Repository: Send + Sync {
    /// # Errors
    /// Returns an error if the backing store cannot be read.
    fn list_tracks(&self) -> Result<Vec<TrackSummary>>;

    /// # Errors
    /// Returns an error if the store cannot be read or the track does not exist.
    fn track(&self, id: &str) -> Result<Track>;

    /// # Errors
    /// Returns an error if the backing store cannot be read.
    fn list_documents(&self) -> Result<Vec<DocumentSummary>>;

    /// # Errors
    /// Returns an error if the store cannot be read or the document does not exist.
    fn document(&self, id: &str) -> Result<Document>;

    /// Records an outcome (and optional note) against an acceptance criterion.
    ///
    /// `position` is the criterion's index in the track as the caller saw it;
    /// ids are not guaranteed unique, so it picks between duplicates.
    ///
    /// # Errors
    /// Returns an error if the track or criterion does not exist or the
    /// store cannot be written.
    fn record_criterion_outcome(
        &self,
        track_id: &str,
        position: usize,
        criterion_id: &str,
        outcome: CriterionOutcome,
        note: Option<&str>,
    ) -> Result<()>;
}

/// Repository backed by a roadmap JSON export.
///
/// The file is re-read on every query so a retry always sees fresh data.
#[derive(Debug)]
pub struct JsonFileRepository {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(&self) -> Result<Roadmap> {
        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read roadmap from {}", self.path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse roadmap from {}", self.path.display()))
    }

    fn save(&self, roadmap: &Roadmap) -> Result<()> {
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let mut tmp = tempfile::NamedTempFile::new_in(dir)
            .with_context(|| format!("Failed to create temp file in {}", dir.display()))?;
        serde_json::to_writer_pretty(&mut tmp, roadmap).context("Failed to serialize roadmap")?;
        tmp.write_all(b"\n")?;

        // Temp files are created owner-only; keep the roadmap's own mode.
        let permissions = fs::metadata(&self.path)
            .with_context(|| format!("Failed to stat {}", self.path.display()))?
            .permissions();
        tmp.as_file()
            .set_permissions(permissions)
            .context("Failed to copy roadmap permissions")?;

        tmp.persist(&self.path)
            .with_context(|| format!("Failed to write roadmap to {}", self.path.display()))?;
        Ok(())
    }
}

impl Repository for JsonFileRepository {
    fn list_tracks(&self) -> Result<Vec<TrackSummary>> {
        let roadmap = self.load()?;
        Ok(roadmap
            .tracks
            .iter()
            .map(|track| TrackSummary::from_track(track, roadmap.iteration_for(&track.id)))
            .collect())
    }

    fn track(&self, id: &str) -> Result<Track> {
        self.load()?
            .tracks
            .into_iter()
            .find(|track| track.id == id)
            .ok_or_else(|| anyhow!("Track '{id}' not found"))
    }

    fn list_documents(&self) -> Result<Vec<DocumentSummary>> {
        Ok(self
            .load()?
            .documents
            .iter()
            .map(DocumentSummary::from)
            .collect())
    }

    fn document(&self, id: &str) -> Result<Document> {
        self.load()?
            .documents
            .into_iter()
            .find(|doc| doc.id == id)
            .ok_or_else(|| anyhow!("Document '{id}' not found"))
    }

    fn record_criterion_outcome(
        &self,
        track_id: &str,
        position: usize,
        criterion_id: &str,
        outcome: CriterionOutcome,
        note: Option<&str>,
    ) -> Result<()> {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let mut roadmap = self.load()?;
        let track = roadmap
            .tracks
            .iter_mut()
            .find(|track| track.id == track_id)
            .ok_or_else(|| anyhow!("Track '{track_id}' not found"))?;
        let index = locate_criterion(&track.criteria, position, criterion_id)
            .with_context(|| format!("Failed to locate criterion in track '{track_id}'"))?;
        let criterion = &mut track.criteria[index];

        criterion.status = outcome.status();
        criterion.note = note
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string);

        tracing::info!(
            track = track_id,
            criterion = criterion_id,
            status = criterion.status.label(),
            "recording criterion outcome"
        );
        self.save(&roadmap)
    }
}

/// Index of the criterion at `position` if its id still matches, otherwise of
/// the only criterion with that id.
fn locate_criterion(criteria: &[AcceptanceCriterion], position: usize, id: &str) -> Result<usize> {
    if criteria.get(position).is_some_and(|c| c.id == id) {
        return Ok(position);
    }
    let mut matches = criteria
        .iter()
        .enumerate()
        .filter(|(_, c)| c.id == id)
        .map(|(index, _)| index);
    match (matches.next(), matches.next()) {
        (Some(index), None) => Ok(index),
        (None, _) => Err(anyhow!("Criterion '{id}' not found")),
        (Some(_), Some(_)) => Err(anyhow!(
            "Criterion '{id}' is ambiguous: several criteria share it and the list has changed"
        )),
    }
}
