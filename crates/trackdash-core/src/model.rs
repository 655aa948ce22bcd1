//! Read-models for the task-tracking plugin.
//!
//! These mirror what the plugin stores; validation and business rules stay
//! with the plugin. The dashboard only reads them (and records criterion
//! outcomes through the repository).
//!
//! Every stored struct keeps the keys it does not know in `extra`, so
//! writing a roadmap back never drops fields the plugin owns.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Keys the dashboard does not model, carried through unchanged.
pub type Extra = Map<String, Value>;

/// Whole roadmap as stored by the plugin.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Roadmap {
    pub title: String,
    pub vision: String,
    pub tracks: Vec<Track>,
    pub iterations: Vec<Iteration>,
    pub documents: Vec<Document>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Roadmap {
    /// Returns the iteration number a track is scheduled in, if any.
    pub fn iteration_for(&self, track_id: &str) -> Option<u32> {
        self.iterations
            .iter()
            .find(|iteration| iteration.track_ids.iter().any(|id| id == track_id))
            .map(|iteration| iteration.number)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackStatus {
    #[default]
    NotStarted,
    InProgress,
    Complete,
    Blocked,
    Waiting,
}

impl TrackStatus {
    pub fn label(self) -> &'static str {
        match self {
            TrackStatus::NotStarted => "todo",
            TrackStatus::InProgress => "active",
            TrackStatus::Complete => "done",
            TrackStatus::Blocked => "blocked",
            TrackStatus::Waiting => "waiting",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Done,
    Blocked,
}

impl TaskStatus {
    pub fn label(self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "doing",
            TaskStatus::Done => "done",
            TaskStatus::Blocked => "blocked",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CriterionStatus {
    #[default]
    Pending,
    Verified,
    Skipped,
    Failed,
}

impl CriterionStatus {
    pub fn label(self) -> &'static str {
        match self {
            CriterionStatus::Pending => "pending",
            CriterionStatus::Verified => "verified",
            CriterionStatus::Skipped => "skipped",
            CriterionStatus::Failed => "failed",
        }
    }
}

/// Outcome recorded against an acceptance criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CriterionOutcome {
    Verify,
    Skip,
    Fail,
}

impl CriterionOutcome {
    pub fn status(self) -> CriterionStatus {
        match self {
            CriterionOutcome::Verify => CriterionStatus::Verified,
            CriterionOutcome::Skip => CriterionStatus::Skipped,
            CriterionOutcome::Fail => CriterionStatus::Failed,
        }
    }

    pub fn verb(self) -> &'static str {
        match self {
            CriterionOutcome::Verify => "Verify",
            CriterionOutcome::Skip => "Skip",
            CriterionOutcome::Fail => "Fail",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Track {
    pub id: String,
    pub title: String,
    pub status: TrackStatus,
    pub description: String,
    pub tasks: Vec<Task>,
    pub criteria: Vec<AcceptanceCriterion>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub status: TaskStatus,
    pub description: String,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AcceptanceCriterion {
    pub id: String,
    pub description: String,
    pub status: CriterionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Iteration {
    pub number: u32,
    pub goal: String,
    pub track_ids: Vec<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Adr,
    Plan,
    #[default]
    Note,
}

impl DocumentKind {
    pub fn label(self) -> &'static str {
        match self {
            DocumentKind::Adr => "ADR",
            DocumentKind::Plan => "plan",
            DocumentKind::Note => "note",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Document {
    pub id: String,
    pub title: String,
    pub kind: DocumentKind,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// One row of the track list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackSummary {
    pub id: String,
    pub title: String,
    pub status: TrackStatus,
    pub iteration: Option<u32>,
    pub task_count: usize,
    pub done_count: usize,
}

impl TrackSummary {
    pub fn from_track(track: &Track, iteration: Option<u32>) -> Self {
        Self {
            id: track.id.clone(),
            title: track.title.clone(),
            status: track.status,
            iteration,
            task_count: track.tasks.len(),
            done_count: track
                .tasks
                .iter()
                .filter(|task| task.status == TaskStatus::Done)
                .count(),
        }
    }
}

/// One row of the document list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSummary {
    pub id: String,
    pub title: String,
    pub kind: DocumentKind,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&Document> for DocumentSummary {
    fn from(doc: &Document) -> Self {
        Self {
            id: doc.id.clone(),
            title: doc.title.clone(),
            kind: doc.kind,
            updated_at: doc.updated_at,
        }
    }
}
