//! Effect handlers for the TUI runtime.
//!
//! Handlers are async functions that return a `UiEvent`; the runtime spawns
//! them and sends the result to the inbox. Repository calls are blocking and
//! run on `spawn_blocking`. Handlers never touch `AppState`.

use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use tokio_util::sync::CancellationToken;
use trackdash_core::Repository;
use trackdash_core::model::CriterionOutcome;

use crate::events::UiEvent;
use crate::screens::{Route, ScreenData, ScreenId};

/// Fetches everything a screen showing `route` needs.
///
/// # Errors
/// Returns an error if the repository fails or the route points at a
/// missing entity.
pub fn fetch_screen_data(repo: &dyn Repository, route: &Route) -> Result<ScreenData> {
    let data = match route {
        Route::Tracks => ScreenData::Tracks(repo.list_tracks()?),
        Route::Documents => ScreenData::Documents(repo.list_documents()?),
        Route::Track { id } => ScreenData::Track(repo.track(id)?),
        Route::Task { track_id, task_id } => {
            let track = repo.track(track_id)?;
            let task = track
                .tasks
                .iter()
                .find(|task| &task.id == task_id)
                .ok_or_else(|| anyhow!("Task '{task_id}' not found in track '{track_id}'"))?;
            ScreenData::task_reader(&track, task)
        }
        Route::Document { id } => ScreenData::document_reader(&repo.document(id)?),
    };
    Ok(data)
}

/// Loads data for `screen`, giving up early if `cancel` fires.
pub async fn load_screen(
    repo: Arc<dyn Repository>,
    screen: ScreenId,
    route: Route,
    cancel: CancellationToken,
) -> UiEvent {
    let label = route.title();
    let fetch = tokio::task::spawn_blocking(move || fetch_screen_data(repo.as_ref(), &route));

    let result = tokio::select! {
        biased;
        () = cancel.cancelled() => {
            tracing::debug!(route = %label, "load cancelled");
            Err("cancelled".to_string())
        }
        joined = fetch => match joined.context("Load task panicked") {
            Ok(Ok(data)) => Ok(data),
            Ok(Err(err)) | Err(err) => Err(format!("{err:#}")),
        },
    };

    UiEvent::Loaded { screen, result }
}

/// Persists an outcome, then re-reads the track so the screen shows it.
pub async fn record_outcome(
    repo: Arc<dyn Repository>,
    screen: ScreenId,
    track_id: String,
    position: usize,
    criterion_id: String,
    outcome: CriterionOutcome,
    note: Option<String>,
) -> UiEvent {
    let joined = tokio::task::spawn_blocking(move || {
        repo.record_criterion_outcome(
            &track_id,
            position,
            &criterion_id,
            outcome,
            note.as_deref(),
        )?;
        repo.track(&track_id)
    })
    .await
    .context("Record task panicked");

    let result = match joined {
        Ok(Ok(track)) => Ok(track),
        Ok(Err(err)) | Err(err) => Err(format!("{err:#}")),
    };
    UiEvent::OutcomeRecorded { screen, result }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::time::Duration;

    use anyhow::bail;
    use trackdash_core::model::{
        AcceptanceCriterion, CriterionStatus, Document, DocumentKind, DocumentSummary, Task,
        Track, TrackSummary,
    };

    use super::*;

    #[derive(Default)]
    struct FakeRepo {
        tracks: Mutex<Vec<Track>>,
        docs: Vec<Document>,
        delay: Option<Duration>,
        fail_writes: bool,
    }

    impl FakeRepo {
        fn sample() -> Self {
            Self {
                tracks: Mutex::new(vec![Track {
                    id: "core".into(),
                    title: "Core".into(),
                    tasks: vec![Task {
                        id: "t1".into(),
                        title: "Parse".into(),
                        description: "Parse the file.".into(),
                        ..Task::default()
                    }],
                    criteria: vec![AcceptanceCriterion {
                        id: "ac1".into(),
                        description: "Works".into(),
                        ..AcceptanceCriterion::default()
                    }],
                    ..Track::default()
                }]),
                docs: vec![Document {
                    id: "adr-1".into(),
                    title: "Use JSON".into(),
                    kind: DocumentKind::Adr,
                    body: "We use JSON.".into(),
                    ..Document::default()
                }],
                ..Self::default()
            }
        }
    }

    impl Repository for FakeRepo {
        fn list_tracks(&self) -> Result<Vec<TrackSummary>> {
            if let Some(delay) = self.delay {
                std::thread::sleep(delay);
            }
            let tracks = self.tracks.lock().unwrap();
            Ok(tracks.iter().map(|t| TrackSummary::from_track(t, None)).collect())
        }

        fn track(&self, id: &str) -> Result<Track> {
            let tracks = self.tracks.lock().unwrap();
            tracks
                .iter()
                .find(|t| t.id == id)
                .cloned()
                .ok_or_else(|| anyhow!("Track '{id}' not found"))
        }

        fn list_documents(&self) -> Result<Vec<DocumentSummary>> {
            Ok(self.docs.iter().map(DocumentSummary::from).collect())
        }

        fn document(&self, id: &str) -> Result<Document> {
            self.docs
                .iter()
                .find(|d| d.id == id)
                .cloned()
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
            if self.fail_writes {
                bail!("read-only store");
            }
            let mut tracks = self.tracks.lock().unwrap();
            let criterion = tracks
                .iter_mut()
                .find(|t| t.id == track_id)
                .and_then(|t| t.criteria.get_mut(position))
                .filter(|c| c.id == criterion_id)
                .ok_or_else(|| anyhow!("Criterion '{criterion_id}' not found"))?;
            criterion.status = outcome.status();
            criterion.note = note.map(str::to_string);
            Ok(())
        }
    }

    #[test]
    fn test_fetch_task_builds_reader() {
        let repo = FakeRepo::sample();
        let route = Route::Task {
            track_id: "core".into(),
            task_id: "t1".into(),
        };
        let Ok(ScreenData::Reader { title, body }) = fetch_screen_data(&repo, &route) else {
            panic!("expected reader data");
        };
        assert_eq!(title, "t1 · Parse");
        assert!(body.contains("Parse the file."));
    }

    #[test]
    fn test_fetch_missing_task_is_error() {
        let repo = FakeRepo::sample();
        let route = Route::Task {
            track_id: "core".into(),
            task_id: "nope".into(),
        };
        let err = fetch_screen_data(&repo, &route).unwrap_err();
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn test_fetch_document() {
        let repo = FakeRepo::sample();
        let route = Route::Document { id: "adr-1".into() };
        let Ok(ScreenData::Reader { title, body }) = fetch_screen_data(&repo, &route) else {
            panic!("expected reader data");
        };
        assert_eq!(title, "Use JSON");
        assert!(body.starts_with("Kind: ADR"));
    }

    #[tokio::test]
    async fn test_load_reports_screen_id() {
        let repo: Arc<dyn Repository> = Arc::new(FakeRepo::sample());
        let event = load_screen(repo, ScreenId(3), Route::Tracks, CancellationToken::new()).await;
        match event {
            UiEvent::Loaded {
                screen,
                result: Ok(ScreenData::Tracks(tracks)),
            } => {
                assert_eq!(screen, ScreenId(3));
                assert_eq!(tracks.len(), 1);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_load_error_is_stringified() {
        let repo: Arc<dyn Repository> = Arc::new(FakeRepo::sample());
        let route = Route::Track { id: "gone".into() };
        let event = load_screen(repo, ScreenId(0), route, CancellationToken::new()).await;
        assert!(matches!(
            event,
            UiEvent::Loaded { result: Err(msg), .. } if msg.contains("gone")
        ));
    }

    #[tokio::test]
    async fn test_cancelled_load_returns_early() {
        let repo: Arc<dyn Repository> = Arc::new(FakeRepo {
            delay: Some(Duration::from_millis(500)),
            ..FakeRepo::sample()
        });
        let cancel = CancellationToken::new();
        cancel.cancel();
        let event = load_screen(repo, ScreenId(1), Route::Tracks, cancel).await;
        assert!(matches!(
            event,
            UiEvent::Loaded { result: Err(msg), .. } if msg == "cancelled"
        ));
    }

    #[tokio::test]
    async fn test_record_outcome_returns_updated_track() {
        let repo: Arc<dyn Repository> = Arc::new(FakeRepo::sample());
        let event = record_outcome(
            repo,
            ScreenId(2),
            "core".into(),
            0,
            "ac1".into(),
            CriterionOutcome::Verify,
            Some("checked".into()),
        )
        .await;
        match event {
            UiEvent::OutcomeRecorded {
                screen,
                result: Ok(track),
            } => {
                assert_eq!(screen, ScreenId(2));
                assert_eq!(track.criteria[0].status, CriterionStatus::Verified);
                assert_eq!(track.criteria[0].note.as_deref(), Some("checked"));
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_record_failure_is_reported() {
        let repo: Arc<dyn Repository> = Arc::new(FakeRepo {
            fail_writes: true,
            ..FakeRepo::sample()
        });
        let event = record_outcome(
            repo,
            ScreenId(2),
            "core".into(),
            0,
            "ac1".into(),
            CriterionOutcome::Skip,
            None,
        )
        .await;
        assert!(matches!(
            event,
            UiEvent::OutcomeRecorded { result: Err(msg), .. } if msg == "read-only store"
        ));
    }
}
