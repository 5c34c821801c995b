use pitchtag_config::{PendingPointPolicy, Roster};
use pitchtag_types::{Point, Record, StatusReport};

use crate::error::TagError;
use crate::normalize::ImageExtent;
use crate::selection::{Selection, SelectionField};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecorderState {
    AwaitingSelection,
    AwaitingFirstPoint,
    AwaitingSecondPoint,
}

impl RecorderState {
    pub fn label(&self) -> &'static str {
        match self {
            RecorderState::AwaitingSelection => "awaiting selection",
            RecorderState::AwaitingFirstPoint => "awaiting first point",
            RecorderState::AwaitingSecondPoint => "awaiting second point",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    IncompleteSelection,
    OutOfBounds,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClickOutcome {
    /// Dropped without touching the buffer
    Ignored(IgnoreReason),
    /// First point of a pair buffered
    Buffered(Point),
    /// Pair finished; the buffer is empty again
    Completed(Record),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UndoOutcome {
    Removed { point: Point, pending: usize },
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectOutcome {
    pub changed: bool,
    /// Pending point dropped because the selection changed mid-pair
    pub discarded: Option<Point>,
}

/// Click-to-record state machine.
///
/// Collects a selection and up to two click points. The second accepted
/// click turns the pair into a [`Record`] and empties the buffer in the same
/// call, so no click can observe a half-emitted pair. Writing the record out
/// is left to the caller.
#[derive(Debug, Clone)]
pub struct Recorder {
    roster: Roster,
    extent: ImageExtent,
    policy: PendingPointPolicy,
    selection: Selection,
    points: Vec<Point>,
}

impl Recorder {
    pub fn new(roster: Roster, extent: ImageExtent, policy: PendingPointPolicy) -> Self {
        Self {
            roster,
            extent,
            policy,
            selection: Selection::default(),
            points: Vec::with_capacity(2),
        }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn pending(&self) -> &[Point] {
        &self.points
    }

    pub fn state(&self) -> RecorderState {
        if !self.selection.is_complete() {
            RecorderState::AwaitingSelection
        } else if self.points.is_empty() {
            RecorderState::AwaitingFirstPoint
        } else {
            RecorderState::AwaitingSecondPoint
        }
    }

    pub fn status(&self) -> StatusReport {
        StatusReport {
            state: self.state().label().to_string(),
            team: self.selection.team().map(str::to_string),
            player: self.selection.player().map(str::to_string),
            action: self.selection.action().map(str::to_string),
            pending: self.points.clone(),
        }
    }

    /// Set team or action (or a player of the selected team)
    pub fn set_selection(&mut self, field: SelectionField, value: &str) -> Result<SelectOutcome, TagError> {
        let changed = self.selection.set(field, value, &self.roster)?;
        Ok(self.after_selection_change(changed))
    }

    /// Player buttons carry their team, so this sets both
    pub fn select_player(&mut self, team: &str, player: &str) -> Result<SelectOutcome, TagError> {
        let changed = self.selection.set_player(team, player, &self.roster)?;
        Ok(self.after_selection_change(changed))
    }

    pub fn register_click(&mut self, point: Point) -> ClickOutcome {
        if !self.selection.is_complete() {
            return ClickOutcome::Ignored(IgnoreReason::IncompleteSelection);
        }
        if !self.extent.contains(point) {
            return ClickOutcome::Ignored(IgnoreReason::OutOfBounds);
        }

        self.points.push(point);
        if self.points.len() < 2 {
            return ClickOutcome::Buffered(point);
        }

        let record = self.emit_record();
        self.points.clear();
        ClickOutcome::Completed(record)
    }

    pub fn undo_last(&mut self) -> UndoOutcome {
        match self.points.pop() {
            Some(point) => UndoOutcome::Removed {
                point,
                pending: self.points.len(),
            },
            None => UndoOutcome::Empty,
        }
    }

    /// Swap in a freshly loaded roster, clearing selections it no longer
    /// contains
    pub fn reload(&mut self, roster: Roster) -> SelectOutcome {
        self.roster = roster;
        let changed = self.selection.retain_valid(&self.roster);
        self.after_selection_change(changed)
    }

    fn after_selection_change(&mut self, changed: bool) -> SelectOutcome {
        let discarded = match self.policy {
            PendingPointPolicy::Discard if changed => self.points.pop(),
            _ => None,
        };
        SelectOutcome { changed, discarded }
    }

    fn emit_record(&self) -> Record {
        let (start_x, start_y) = self.extent.normalize(self.points[0]);
        let (end_x, end_y) = self.extent.normalize(self.points[1]);

        Record {
            team: self.selection.team().unwrap_or_default().to_string(),
            player: self.selection.player().unwrap_or_default().to_string(),
            action: self.selection.action().unwrap_or_default().to_string(),
            start_x,
            start_y,
            end_x,
            end_y,
        }
    }
}

#[cfg(test)]
mod tests {
    use pitchtag_config::Team;

    use super::*;

    fn roster() -> Roster {
        Roster::new(
            [
                Team::new("Red", vec!["A".into(), "B".into()]),
                Team::new("Blue", vec!["X".into()]),
            ],
            vec!["Pass".into(), "Shot".into()],
        )
        .unwrap()
    }

    fn recorder(policy: PendingPointPolicy) -> Recorder {
        Recorder::new(roster(), ImageExtent::new(1000, 500), policy)
    }

    fn ready(policy: PendingPointPolicy) -> Recorder {
        let mut rec = recorder(policy);
        rec.select_player("Red", "A").unwrap();
        rec.set_selection(SelectionField::Action, "Shot").unwrap();
        rec
    }

    #[test]
    fn test_full_pair_emits_record() {
        let mut rec = ready(PendingPointPolicy::Discard);
        assert_eq!(rec.state(), RecorderState::AwaitingFirstPoint);

        let first = rec.register_click(Point::new(500.0, 250.0));
        assert_eq!(first, ClickOutcome::Buffered(Point::new(500.0, 250.0)));
        assert_eq!(rec.state(), RecorderState::AwaitingSecondPoint);

        let second = rec.register_click(Point::new(1000.0, 500.0));
        assert_eq!(
            second,
            ClickOutcome::Completed(Record {
                team: "Red".into(),
                player: "A".into(),
                action: "Shot".into(),
                start_x: 50,
                start_y: 50,
                end_x: 100,
                end_y: 100,
            })
        );
        assert!(rec.pending().is_empty());
        assert_eq!(rec.state(), RecorderState::AwaitingFirstPoint);
    }

    #[test]
    fn test_click_without_selection_is_dropped() {
        let mut rec = recorder(PendingPointPolicy::Discard);
        assert_eq!(rec.state(), RecorderState::AwaitingSelection);

        let outcome = rec.register_click(Point::new(10.0, 10.0));
        assert_eq!(
            outcome,
            ClickOutcome::Ignored(IgnoreReason::IncompleteSelection)
        );
        assert!(rec.pending().is_empty());
    }

    #[test]
    fn test_partial_selection_never_buffers() {
        let mut rec = recorder(PendingPointPolicy::Discard);
        rec.select_player("Blue", "X").unwrap();
        for _ in 0..3 {
            rec.register_click(Point::new(1.0, 1.0));
            assert_eq!(rec.pending().len(), 0);
        }
    }

    #[test]
    fn test_out_of_bounds_click_is_dropped() {
        let mut rec = ready(PendingPointPolicy::Discard);
        assert_eq!(
            rec.register_click(Point::new(1000.5, 10.0)),
            ClickOutcome::Ignored(IgnoreReason::OutOfBounds)
        );
        assert!(rec.pending().is_empty());
    }

    #[test]
    fn test_selection_persists_across_pairs() {
        let mut rec = ready(PendingPointPolicy::Discard);
        for _ in 0..3 {
            rec.register_click(Point::new(0.0, 0.0));
            let outcome = rec.register_click(Point::new(100.0, 100.0));
            assert!(matches!(outcome, ClickOutcome::Completed(ref r) if r.player == "A"));
        }
    }

    #[test]
    fn test_undo_pops_latest_point() {
        let mut rec = ready(PendingPointPolicy::Discard);
        rec.register_click(Point::new(10.0, 20.0));

        assert_eq!(
            rec.undo_last(),
            UndoOutcome::Removed {
                point: Point::new(10.0, 20.0),
                pending: 0,
            }
        );
        assert_eq!(rec.state(), RecorderState::AwaitingFirstPoint);
    }

    #[test]
    fn test_undo_on_empty_buffer_is_noop() {
        let mut rec = recorder(PendingPointPolicy::Discard);
        assert_eq!(rec.undo_last(), UndoOutcome::Empty);
        assert!(rec.pending().is_empty());
    }

    #[test]
    fn test_discard_policy_drops_pending_on_player_switch() {
        let mut rec = ready(PendingPointPolicy::Discard);
        rec.register_click(Point::new(10.0, 10.0));

        let outcome = rec.select_player("Red", "B").unwrap();
        assert!(outcome.changed);
        assert_eq!(outcome.discarded, Some(Point::new(10.0, 10.0)));
        assert!(rec.pending().is_empty());
    }

    #[test]
    fn test_keep_policy_attributes_pair_to_new_player() {
        let mut rec = ready(PendingPointPolicy::Keep);
        rec.register_click(Point::new(10.0, 10.0));

        let outcome = rec.select_player("Red", "B").unwrap();
        assert_eq!(outcome.discarded, None);

        match rec.register_click(Point::new(20.0, 20.0)) {
            ClickOutcome::Completed(record) => {
                assert_eq!(record.player, "B");
                assert_eq!(record.start_x, 1);
                assert_eq!(record.start_y, 2);
            }
            other => panic!("Expected a record, got {:?}", other),
        }
    }

    #[test]
    fn test_reselecting_same_player_keeps_pending() {
        let mut rec = ready(PendingPointPolicy::Discard);
        rec.register_click(Point::new(10.0, 10.0));

        let outcome = rec.select_player("Red", "A").unwrap();
        assert!(!outcome.changed);
        assert_eq!(rec.pending().len(), 1);
    }

    #[test]
    fn test_rejected_selection_keeps_pending() {
        let mut rec = ready(PendingPointPolicy::Discard);
        rec.register_click(Point::new(10.0, 10.0));

        assert!(rec.set_selection(SelectionField::Action, "Dribble").is_err());
        assert_eq!(rec.pending().len(), 1);
    }

    #[test]
    fn test_reload_clears_removed_player() {
        let mut rec = ready(PendingPointPolicy::Discard);
        rec.register_click(Point::new(10.0, 10.0));

        let renamed = Roster::new(
            [
                Team::new("Red", vec!["B".into()]),
                Team::new("Blue", vec!["X".into()]),
            ],
            vec!["Pass".into(), "Shot".into()],
        )
        .unwrap();

        let outcome = rec.reload(renamed);
        assert!(outcome.changed);
        assert!(outcome.discarded.is_some());
        assert_eq!(rec.state(), RecorderState::AwaitingSelection);
        assert_eq!(rec.selection().action(), Some("Shot"));
    }
}
