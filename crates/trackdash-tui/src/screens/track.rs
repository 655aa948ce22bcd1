//! Track detail: a task list and an acceptance-criteria list behind tabs.
//!
//! Tasks are one line each and scroll with a `LinearViewport`. Criteria can
//! be expanded in place to show their wrapped description and note, so they
//! scroll with a `MultilineViewport`. Line counts come from
//! [`criterion_block`], the same function the renderer draws from, and are
//! recomputed on every call rather than stored.

use std::collections::{HashMap, HashSet};

use trackdash_core::model::{AcceptanceCriterion, CriterionOutcome, Track};

use super::{ActionInputState, Route};
use crate::command::NavCommand;
use crate::common::wrap_text;
use crate::viewport::{LinearViewport, MultilineViewport};

/// Indent of the wrapped body under an expanded criterion header.
pub const BLOCK_INDENT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackTab {
    Tasks,
    Criteria,
}

impl TrackTab {
    pub fn label(self) -> &'static str {
        match self {
            TrackTab::Tasks => "Tasks",
            TrackTab::Criteria => "Criteria",
        }
    }

    fn other(self) -> Self {
        match self {
            TrackTab::Tasks => TrackTab::Criteria,
            TrackTab::Criteria => TrackTab::Tasks,
        }
    }
}

/// One rendered line of a criterion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockLine {
    /// Status icon and id, plus the description when collapsed.
    Header,
    Text(String),
    Note(String),
}

/// Lines a criterion occupies at the given content width.
pub fn criterion_block(
    criterion: &AcceptanceCriterion,
    expanded: bool,
    width: usize,
) -> Vec<BlockLine> {
    let mut lines = vec![BlockLine::Header];
    if !expanded {
        return lines;
    }

    let body_width = width.saturating_sub(BLOCK_INDENT).max(1);
    lines.extend(
        wrap_text(&criterion.description, body_width)
            .into_iter()
            .map(BlockLine::Text),
    );
    if let Some(note) = criterion.note.as_deref() {
        lines.extend(
            wrap_text(&format!("Note: {note}"), body_width)
                .into_iter()
                .map(BlockLine::Note),
        );
    }
    lines
}

#[derive(Debug)]
pub struct TrackScreen {
    track: Track,
    tab: TrackTab,
    selected: usize,
    tasks_view: LinearViewport,
    criteria_view: MultilineViewport,
    /// Indices of expanded criteria. Ids may repeat, so items are keyed by
    /// position.
    expanded: HashSet<usize>,
    width: usize,
    height: usize,
}

impl TrackScreen {
    pub fn new(track: Track, width: usize, height: usize) -> Self {
        let mut screen = Self {
            track,
            tab: TrackTab::Tasks,
            selected: 0,
            tasks_view: LinearViewport::new(height),
            criteria_view: MultilineViewport::new(height),
            expanded: HashSet::new(),
            width,
            height,
        };
        screen.refresh();
        screen
    }

    pub fn track(&self) -> &Track {
        &self.track
    }

    pub fn tab(&self) -> TrackTab {
        self.tab
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn tasks_view(&self) -> &LinearViewport {
        &self.tasks_view
    }

    pub fn criteria_view(&self) -> &MultilineViewport {
        &self.criteria_view
    }

    pub fn is_expanded(&self, index: usize) -> bool {
        self.expanded.contains(&index)
    }

    /// Current per-criterion line counts at the current width.
    pub fn line_counts(&self) -> Vec<usize> {
        self.track
            .criteria
            .iter()
            .enumerate()
            .map(|(i, c)| criterion_block(c, self.is_expanded(i), self.width).len())
            .collect()
    }

    fn active_len(&self) -> usize {
        match self.tab {
            TrackTab::Tasks => self.track.tasks.len(),
            TrackTab::Criteria => self.track.criteria.len(),
        }
    }

    pub fn handle_nav(&mut self, cmd: NavCommand) -> Option<Route> {
        if cmd == NavCommand::Tab {
            self.switch_tab();
            return None;
        }
        match self.tab {
            TrackTab::Tasks => self.nav_tasks(cmd),
            TrackTab::Criteria => {
                self.nav_criteria(cmd);
                None
            }
        }
    }

    fn switch_tab(&mut self) {
        self.tab = self.tab.other();
        self.selected = 0;
        match self.tab {
            TrackTab::Tasks => self.tasks_view = LinearViewport::new(self.height),
            TrackTab::Criteria => self.criteria_view = MultilineViewport::new(self.height),
        }
        self.refresh();
        tracing::debug!(tab = self.tab.label(), "switched track tab");
    }

    fn nav_tasks(&mut self, cmd: NavCommand) -> Option<Route> {
        let total = self.track.tasks.len();
        let last = total.saturating_sub(1);
        let target = match cmd {
            NavCommand::Up => self.selected.saturating_sub(1),
            NavCommand::Down => (self.selected + 1).min(last),
            NavCommand::PageUp => self.tasks_view.page_up(total, self.selected),
            NavCommand::PageDown => self.tasks_view.page_down(total, self.selected),
            NavCommand::JumpStart => 0,
            NavCommand::JumpEnd => last,
            NavCommand::Tab => self.selected,
            NavCommand::Enter => {
                return self.track.tasks.get(self.selected).map(|task| Route::Task {
                    track_id: self.track.id.clone(),
                    task_id: task.id.clone(),
                });
            }
        };
        self.selected = self.tasks_view.ensure_visible(total, target);
        None
    }

    fn nav_criteria(&mut self, cmd: NavCommand) {
        let counts = self.line_counts();
        let last = counts.len().saturating_sub(1);
        let target = match cmd {
            NavCommand::Up => self.selected.saturating_sub(1),
            NavCommand::Down => (self.selected + 1).min(last),
            NavCommand::PageUp => self.page_target(&counts, false),
            NavCommand::PageDown => self.page_target(&counts, true),
            NavCommand::JumpStart => 0,
            NavCommand::JumpEnd => last,
            NavCommand::Tab => self.selected,
            NavCommand::Enter => {
                self.toggle_selected();
                return;
            }
        };
        self.selected = target.min(last);
        self.criteria_view.ensure_visible(&counts, self.selected);
    }

    /// Moves across as many criteria as fit in one page (at least one).
    fn page_target(&self, counts: &[usize], down: bool) -> usize {
        let height = self.criteria_view.height();
        let mut index = self.selected;
        let mut travelled = 0;
        loop {
            let next = if down {
                index + 1
            } else {
                match index.checked_sub(1) {
                    Some(prev) => prev,
                    None => break,
                }
            };
            let Some(&lines) = counts.get(next) else {
                break;
            };
            if travelled > 0 && travelled + lines > height {
                break;
            }
            travelled += lines;
            index = next;
        }
        index
    }

    fn toggle_selected(&mut self) {
        if self.selected >= self.track.criteria.len() {
            return;
        }
        if !self.expanded.remove(&self.selected) {
            self.expanded.insert(self.selected);
        }
        let counts = self.line_counts();
        self.criteria_view.ensure_visible(&counts, self.selected);
    }

    /// Opens the note modal for the selected criterion.
    pub fn start_action(&self, outcome: CriterionOutcome) -> Option<ActionInputState> {
        if self.tab != TrackTab::Criteria {
            return None;
        }
        let criterion = self.track.criteria.get(self.selected)?;
        Some(ActionInputState::new(
            self.track.id.clone(),
            self.selected,
            criterion,
            outcome,
        ))
    }

    /// Swaps in a re-read track, keeping tab, selection and expansion.
    ///
    /// When the criteria list changed shape, expansion follows ids that are
    /// unique in both lists and is dropped for the rest.
    pub fn replace_track(&mut self, track: Track) {
        let old = std::mem::replace(&mut self.track, track);
        let same_ids = old.criteria.len() == self.track.criteria.len()
            && old
                .criteria
                .iter()
                .zip(&self.track.criteria)
                .all(|(a, b)| a.id == b.id);

        if !same_ids {
            let old_ids = unique_positions(&old.criteria);
            let new_ids = unique_positions(&self.track.criteria);
            self.expanded = self
                .expanded
                .iter()
                .filter_map(|&index| {
                    let id = old.criteria.get(index)?.id.as_str();
                    if !old_ids.contains_key(id) {
                        return None;
                    }
                    new_ids.get(id).copied()
                })
                .collect();
        }
        self.refresh();
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.tasks_view.set_height(height);
        self.criteria_view.set_height(height);
        self.refresh();
    }

    /// Clamps the selection and scrolls the active list to it.
    fn refresh(&mut self) {
        self.selected = self.selected.min(self.active_len().saturating_sub(1));
        match self.tab {
            TrackTab::Tasks => {
                self.selected = self
                    .tasks_view
                    .ensure_visible(self.track.tasks.len(), self.selected);
            }
            TrackTab::Criteria => {
                let counts = self.line_counts();
                self.criteria_view.ensure_visible(&counts, self.selected);
            }
        }
    }

    pub fn position(&self) -> Option<String> {
        let total = self.active_len();
        (total > 0).then(|| format!("{}/{}", self.selected + 1, total))
    }
}

/// Positions of the ids that occur exactly once.
fn unique_positions(criteria: &[AcceptanceCriterion]) -> HashMap<&str, usize> {
    let mut seen: HashMap<&str, Option<usize>> = HashMap::new();
    for (index, criterion) in criteria.iter().enumerate() {
        seen.entry(criterion.id.as_str())
            .and_modify(|slot| *slot = None)
            .or_insert(Some(index));
    }
    seen.into_iter()
        .filter_map(|(id, index)| Some((id, index?)))
        .collect()
}

#[cfg(test)]
mod tests {
    use trackdash_core::model::{CriterionStatus, Task};

    use super::*;

    fn criterion(id: &str, description: &str) -> AcceptanceCriterion {
        AcceptanceCriterion {
            id: id.into(),
            description: description.into(),
            status: CriterionStatus::Pending,
            ..AcceptanceCriterion::default()
        }
    }

    fn track(tasks: usize, criteria: Vec<AcceptanceCriterion>) -> Track {
        Track {
            id: "core".into(),
            title: "Core".into(),
            tasks: (0..tasks)
                .map(|i| Task {
                    id: format!("t{i}"),
                    title: format!("Task {i}"),
                    ..Task::default()
                })
                .collect(),
            criteria,
            ..Track::default()
        }
    }

    fn many_criteria(n: usize) -> Vec<AcceptanceCriterion> {
        (0..n)
            .map(|i| {
                criterion(
                    &format!("ac{i}"),
                    "one two three four five six seven eight nine ten eleven twelve",
                )
            })
            .collect()
    }

    #[test]
    fn test_collapsed_criterion_is_one_line() {
        let c = criterion("ac1", "a long description that would wrap");
        assert_eq!(criterion_block(&c, false, 10), vec![BlockLine::Header]);
    }

    #[test]
    fn test_expanded_block_wraps_description_and_note() {
        let mut c = criterion("ac1", "alpha beta gamma");
        c.note = Some("ok".into());
        // body width 14 - 4 = 10
        let block = criterion_block(&c, true, 14);
        assert_eq!(
            block,
            vec![
                BlockLine::Header,
                BlockLine::Text("alpha beta".into()),
                BlockLine::Text("gamma".into()),
                BlockLine::Note("Note: ok".into()),
            ]
        );
    }

    #[test]
    fn test_enter_on_task_opens_task_route() {
        let mut screen = TrackScreen::new(track(3, Vec::new()), 40, 5);
        screen.handle_nav(NavCommand::Down);
        assert_eq!(
            screen.handle_nav(NavCommand::Enter),
            Some(Route::Task {
                track_id: "core".into(),
                task_id: "t1".into(),
            })
        );
    }

    #[test]
    fn test_tab_resets_selection_and_viewport() {
        let mut screen = TrackScreen::new(track(10, many_criteria(10)), 40, 3);
        screen.handle_nav(NavCommand::JumpEnd);
        assert_eq!(screen.selected(), 9);
        screen.handle_nav(NavCommand::Tab);
        assert_eq!(screen.tab(), TrackTab::Criteria);
        assert_eq!(screen.selected(), 0);
        assert_eq!(screen.criteria_view().offset(), 0);
        screen.handle_nav(NavCommand::JumpEnd);
        screen.handle_nav(NavCommand::Tab);
        assert_eq!(screen.tab(), TrackTab::Tasks);
        assert_eq!(screen.selected(), 0);
        assert_eq!(screen.tasks_view().offset(), 0);
    }

    #[test]
    fn test_enter_on_criterion_toggles_expansion() {
        let mut screen = TrackScreen::new(track(0, many_criteria(3)), 20, 10);
        screen.handle_nav(NavCommand::Tab);
        assert_eq!(screen.line_counts(), vec![1, 1, 1]);
        assert_eq!(screen.handle_nav(NavCommand::Enter), None);
        assert!(screen.is_expanded(0));
        assert!(screen.line_counts()[0] > 1);
        screen.handle_nav(NavCommand::Enter);
        assert!(!screen.is_expanded(0));
        assert_eq!(screen.line_counts(), vec![1, 1, 1]);
    }

    #[test]
    fn test_expanding_keeps_start_line_visible() {
        let mut screen = TrackScreen::new(track(0, many_criteria(20)), 40, 8);
        screen.handle_nav(NavCommand::Tab);
        for _ in 0..9 {
            screen.handle_nav(NavCommand::Down);
        }
        assert_eq!(screen.criteria_view().offset(), 2);
        screen.handle_nav(NavCommand::Enter);

        let counts = screen.line_counts();
        assert!(counts[9] > 1 && counts[9] <= 8);
        let start: usize = counts[..9].iter().sum();
        let offset = screen.criteria_view().offset();
        assert!(offset <= start && start < offset + 8);
        assert!(start + counts[9] <= offset + 8);
    }

    #[test]
    fn test_narrower_terminal_adds_lines() {
        let mut screen = TrackScreen::new(track(0, many_criteria(2)), 60, 10);
        screen.handle_nav(NavCommand::Tab);
        screen.handle_nav(NavCommand::Enter);
        let wide = screen.line_counts()[0];
        screen.resize(20, 10);
        assert!(screen.line_counts()[0] > wide);
        assert_eq!(screen.selected(), 0);
    }

    #[test]
    fn test_shrinking_keeps_deep_expanded_selection_visible() {
        let mut screen = TrackScreen::new(track(0, many_criteria(20)), 40, 8);
        screen.handle_nav(NavCommand::Tab);
        for _ in 0..12 {
            screen.handle_nav(NavCommand::Down);
        }
        screen.handle_nav(NavCommand::Enter);
        assert!(screen.is_expanded(12));

        screen.resize(20, 4);

        assert_eq!(screen.selected(), 12);
        let counts = screen.line_counts();
        let start: usize = counts[..12].iter().sum();
        let end = start + counts[12];
        let offset = screen.criteria_view().offset();
        assert!(start < offset + 4 && end > offset);
    }

    #[test]
    fn test_duplicate_ids_expand_independently() {
        let long = "one two three four five six seven eight nine ten";
        let criteria = vec![
            criterion("ac1", long),
            criterion("ac2", long),
            criterion("ac1", long),
        ];
        let mut screen = TrackScreen::new(track(0, criteria), 20, 10);
        screen.handle_nav(NavCommand::Tab);
        screen.handle_nav(NavCommand::JumpEnd);
        screen.handle_nav(NavCommand::Enter);

        let counts = screen.line_counts();
        assert_eq!(&counts[..2], &[1, 1]);
        assert!(counts[2] > 1);
        assert!(!screen.is_expanded(0));

        let input = screen.start_action(CriterionOutcome::Verify).unwrap();
        assert_eq!(input.position(), 2);
        assert_eq!(input.criterion_id(), "ac1");
    }

    #[test]
    fn test_replace_track_follows_unique_ids() {
        let mut screen = TrackScreen::new(track(0, many_criteria(4)), 40, 5);
        screen.handle_nav(NavCommand::Tab);
        screen.handle_nav(NavCommand::Down);
        screen.handle_nav(NavCommand::Down);
        screen.handle_nav(NavCommand::Enter);

        // ac0 removed: ac2 moves from index 2 to 1.
        let mut updated = track(0, many_criteria(4));
        updated.criteria.remove(0);
        screen.replace_track(updated);

        assert!(screen.is_expanded(1));
        assert!(!screen.is_expanded(2));
    }

    #[test]
    fn test_replace_track_drops_expansion_of_repeated_ids() {
        let long = "one two three four five six seven eight nine ten";
        let mut screen =
            TrackScreen::new(track(0, vec![criterion("ac1", long), criterion("ac2", long)]), 20, 10);
        screen.handle_nav(NavCommand::Tab);
        screen.handle_nav(NavCommand::Enter);

        let updated = track(
            0,
            vec![
                criterion("ac2", long),
                criterion("ac1", long),
                criterion("ac1", long),
            ],
        );
        screen.replace_track(updated);

        assert_eq!(screen.line_counts(), vec![1, 1, 1]);
    }

    #[test]
    fn test_page_down_moves_by_lines() {
        let mut screen = TrackScreen::new(track(0, many_criteria(20)), 40, 5);
        screen.handle_nav(NavCommand::Tab);
        screen.handle_nav(NavCommand::PageDown);
        assert_eq!(screen.selected(), 5);
        screen.handle_nav(NavCommand::PageUp);
        assert_eq!(screen.selected(), 0);
    }

    #[test]
    fn test_start_action_only_on_criteria_tab() {
        let mut screen = TrackScreen::new(track(2, many_criteria(2)), 40, 5);
        assert!(screen.start_action(CriterionOutcome::Verify).is_none());
        screen.handle_nav(NavCommand::Tab);
        let input = screen
            .start_action(CriterionOutcome::Fail)
            .expect("criteria tab supports actions");
        assert_eq!(input.criterion_id(), "ac0");
        assert_eq!(input.outcome(), CriterionOutcome::Fail);
    }

    #[test]
    fn test_replace_track_keeps_selection() {
        let mut screen = TrackScreen::new(track(0, many_criteria(4)), 40, 5);
        screen.handle_nav(NavCommand::Tab);
        screen.handle_nav(NavCommand::Down);
        screen.handle_nav(NavCommand::Down);
        screen.handle_nav(NavCommand::Enter);

        let mut updated = track(0, many_criteria(4));
        updated.criteria[2].status = CriterionStatus::Verified;
        screen.replace_track(updated);

        assert_eq!(screen.tab(), TrackTab::Criteria);
        assert_eq!(screen.selected(), 2);
        assert!(screen.is_expanded(2));
        assert_eq!(
            screen.track().criteria[2].status,
            CriterionStatus::Verified
        );
    }

    #[test]
    fn test_replace_with_fewer_items_clamps() {
        let mut screen = TrackScreen::new(track(0, many_criteria(4)), 40, 5);
        screen.handle_nav(NavCommand::Tab);
        screen.handle_nav(NavCommand::JumpEnd);
        screen.replace_track(track(0, many_criteria(2)));
        assert_eq!(screen.selected(), 1);
    }

    #[test]
    fn test_empty_track_is_inert() {
        let mut screen = TrackScreen::new(track(0, Vec::new()), 40, 5);
        for cmd in [
            NavCommand::Down,
            NavCommand::PageDown,
            NavCommand::Enter,
            NavCommand::Tab,
            NavCommand::JumpEnd,
            NavCommand::Enter,
        ] {
            assert_eq!(screen.handle_nav(cmd), None);
        }
        assert_eq!(screen.selected(), 0);
        assert_eq!(screen.position(), None);
        assert!(screen.start_action(CriterionOutcome::Skip).is_none());
    }
}
