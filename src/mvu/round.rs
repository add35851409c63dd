use serde::Serialize;

use crate::error::BackendError;
use crate::model::{
    CourseContext, CourseTee, DEFAULT_HOLE_COUNT, HoleScore, HoleScoreRow, MAX_HOLE_COUNT,
    RoundLoad, RoundRecord, default_hole_scores, is_unsaved_round, merge_hole_scores,
};

mod round_effects;

pub use round_effects::{Deps, run_effect};

/// Hard ceiling on fetch attempts for one controller. Never reset.
pub const MAX_FETCH_ATTEMPTS: u32 = 3;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPhase {
    Idle,
    Loading,
    Success,
    NotFound,
    Failed,
    RetryExhausted,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FetchState {
    pub attempts: u32,
    pub has_error: bool,
    pub phase: FetchPhase,
}

impl FetchState {
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.phase == FetchPhase::Loading
    }

    #[must_use]
    pub fn ceiling_reached(&self) -> bool {
        self.attempts >= MAX_FETCH_ATTEMPTS
    }
}

impl Default for FetchState {
    fn default() -> Self {
        Self {
            attempts: 0,
            has_error: false,
            phase: FetchPhase::Idle,
        }
    }
}

/// Scratch space for the fetch currently in progress.
#[derive(Debug, Clone)]
struct PendingFetch {
    round_id: String,
    first_attempt: bool,
    round: Option<RoundRecord>,
    hole_rows: Vec<HoleScoreRow>,
}

#[derive(Debug, Clone)]
pub struct RoundModel {
    pub hole_scores: Vec<HoleScore>,
    pub course: Option<CourseContext>,
    pub hole_count: u32,
    pub fetch: FetchState,
    pending: Option<PendingFetch>,
    outcome: Option<RoundLoad>,
}

impl Default for RoundModel {
    fn default() -> Self {
        Self::new()
    }
}

impl RoundModel {
    #[must_use]
    pub fn new() -> Self {
        Self {
            hole_scores: default_hole_scores(DEFAULT_HOLE_COUNT),
            course: None,
            hole_count: DEFAULT_HOLE_COUNT,
            fetch: FetchState::default(),
            pending: None,
            outcome: None,
        }
    }

    /// Replaces the whole score card with `hole_count` unrecorded holes. Zero and counts
    /// above `MAX_HOLE_COUNT` are ignored.
    pub fn initialize_default_scores(&mut self, hole_count: u32) {
        if hole_count == 0 || hole_count > MAX_HOLE_COUNT {
            tracing::debug!(hole_count, "ignoring unusable hole count");
            return;
        }
        self.hole_count = hole_count;
        self.hole_scores = default_hole_scores(hole_count);
    }

    /// A changed, usable hole count always rebuilds the score card.
    pub fn set_hole_count(&mut self, hole_count: u32) {
        if hole_count != self.hole_count {
            self.initialize_default_scores(hole_count);
        }
    }

    /// Result of the last completed fetch, if it succeeded.
    pub fn take_outcome(&mut self) -> Option<RoundLoad> {
        self.outcome.take()
    }

    fn pending_round_id(&self) -> Option<String> {
        self.pending.as_ref().map(|p| p.round_id.clone())
    }

    /// Settles a non-successful call, folding into `RetryExhausted` at the ceiling.
    fn settle(&mut self, phase: FetchPhase) {
        self.pending = None;
        self.fetch.phase = if self.fetch.ceiling_reached() {
            FetchPhase::RetryExhausted
        } else {
            phase
        };
    }

    fn finish(&mut self, tees: Vec<CourseTee>) -> Vec<Effect> {
        let Some(pending) = self.pending.take() else {
            return vec![];
        };
        let Some(record) = pending.round else {
            return vec![];
        };
        let hole_count = record.effective_hole_count();
        let Some(summary) = record.course else {
            // round without a linked course: nothing to show, not an error either
            self.fetch.phase = FetchPhase::Idle;
            return vec![];
        };

        let course = CourseContext::new(summary, tees);
        self.course = Some(course.clone());
        if pending.hole_rows.is_empty() {
            self.initialize_default_scores(hole_count);
        } else {
            self.hole_count = hole_count;
            self.hole_scores = merge_hole_scores(hole_count, &pending.hole_rows);
        }
        self.fetch.has_error = false;
        self.fetch.phase = FetchPhase::Success;
        self.outcome = Some(RoundLoad {
            course,
            tee_id: record.tee_id,
            hole_count,
        });
        vec![]
    }
}

#[derive(Debug, Clone)]
pub enum Msg {
    FetchRequested(String),
    RoundCounted(u64),
    RoundLoaded(RoundRecord),
    HoleScoresLoaded(Vec<HoleScoreRow>),
    TeesLoaded(Vec<CourseTee>),
    Notified,
    Failed(BackendError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    CountRound(String),
    LoadRound(String),
    LoadHoleScores(String),
    LoadTees(String),
    NotifyLoadFailure,
}

pub fn update(model: &mut RoundModel, msg: Msg) -> Vec<Effect> {
    match msg {
        Msg::FetchRequested(round_id) => {
            if is_unsaved_round(&round_id) {
                return vec![];
            }
            if model.fetch.ceiling_reached() {
                model.pending = None;
                model.fetch.phase = FetchPhase::RetryExhausted;
                return vec![];
            }
            let first_attempt = model.fetch.attempts == 0;
            model.fetch.attempts += 1;
            model.fetch.phase = FetchPhase::Loading;
            model.outcome = None;
            model.pending = Some(PendingFetch {
                round_id: round_id.clone(),
                first_attempt,
                round: None,
                hole_rows: Vec::new(),
            });
            vec![Effect::CountRound(round_id)]
        }
        Msg::RoundCounted(count) => {
            let Some(round_id) = model.pending_round_id() else {
                return vec![];
            };
            if count == 0 {
                model.fetch.has_error = true;
                model.settle(FetchPhase::NotFound);
                vec![]
            } else {
                vec![Effect::LoadRound(round_id)]
            }
        }
        Msg::RoundLoaded(record) => {
            let Some(pending) = model.pending.as_mut() else {
                return vec![];
            };
            pending.round = Some(record);
            vec![Effect::LoadHoleScores(pending.round_id.clone())]
        }
        Msg::HoleScoresLoaded(rows) => {
            let Some(pending) = model.pending.as_mut() else {
                return vec![];
            };
            pending.hole_rows = rows;
            let course_id = pending.round.as_ref().and_then(|r| r.course_id.clone());
            match course_id {
                Some(course_id) => vec![Effect::LoadTees(course_id)],
                None => model.finish(Vec::new()),
            }
        }
        Msg::TeesLoaded(tees) => model.finish(tees),
        Msg::Notified => vec![],
        Msg::Failed(_) => {
            let Some(pending) = model.pending.as_ref() else {
                return vec![];
            };
            let first_attempt = pending.first_attempt;
            model.fetch.has_error = true;
            model.settle(FetchPhase::Failed);
            if first_attempt {
                vec![Effect::NotifyLoadFailure]
            } else {
                vec![]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CourseSummary;

    fn record(course: bool) -> RoundRecord {
        RoundRecord {
            id: "r1".into(),
            course_id: Some("c1".into()),
            tee_id: Some("t1".into()),
            hole_count: Some(9),
            date: None,
            course: course.then(|| CourseSummary {
                id: "c1".into(),
                name: "Links".into(),
                city: None,
                state: None,
                total_par: Some(36),
            }),
        }
    }

    #[test]
    fn fetch_walks_count_round_holes_tees() {
        let mut model = RoundModel::new();
        assert_eq!(
            update(&mut model, Msg::FetchRequested("r1".into())),
            vec![Effect::CountRound("r1".into())]
        );
        assert!(model.fetch.is_loading());
        assert_eq!(model.fetch.attempts, 1);
        assert_eq!(
            update(&mut model, Msg::RoundCounted(1)),
            vec![Effect::LoadRound("r1".into())]
        );
        assert_eq!(
            update(&mut model, Msg::RoundLoaded(record(true))),
            vec![Effect::LoadHoleScores("r1".into())]
        );
        assert_eq!(
            update(&mut model, Msg::HoleScoresLoaded(vec![])),
            vec![Effect::LoadTees("c1".into())]
        );
        assert!(update(&mut model, Msg::TeesLoaded(vec![])).is_empty());
        assert_eq!(model.fetch.phase, FetchPhase::Success);
        assert_eq!(model.hole_count, 9);
        assert_eq!(model.hole_scores.len(), 9);
        assert_eq!(model.fetch.attempts, 1);
        let outcome = model.take_outcome().unwrap();
        assert_eq!(outcome.tee_id.as_deref(), Some("t1"));
    }

    #[test]
    fn zero_count_is_not_found_without_notification() {
        let mut model = RoundModel::new();
        update(&mut model, Msg::FetchRequested("gone".into()));
        assert!(update(&mut model, Msg::RoundCounted(0)).is_empty());
        assert_eq!(model.fetch.phase, FetchPhase::NotFound);
        assert!(model.fetch.has_error);
        assert!(!model.fetch.is_loading());
    }

    #[test]
    fn only_the_first_failure_asks_for_a_notification() {
        let mut model = RoundModel::new();
        update(&mut model, Msg::FetchRequested("r1".into()));
        assert_eq!(
            update(&mut model, Msg::Failed(BackendError::new("offline"))),
            vec![Effect::NotifyLoadFailure]
        );
        update(&mut model, Msg::FetchRequested("r1".into()));
        assert!(update(&mut model, Msg::Failed(BackendError::new("offline"))).is_empty());
        assert_eq!(model.fetch.phase, FetchPhase::Failed);
    }

    #[test]
    fn third_failure_exhausts_and_gate_holds() {
        let mut model = RoundModel::new();
        for _ in 0..MAX_FETCH_ATTEMPTS {
            update(&mut model, Msg::FetchRequested("r1".into()));
            update(&mut model, Msg::Failed(BackendError::new("offline")));
        }
        assert_eq!(model.fetch.phase, FetchPhase::RetryExhausted);
        assert!(update(&mut model, Msg::FetchRequested("r1".into())).is_empty());
        assert_eq!(model.fetch.attempts, MAX_FETCH_ATTEMPTS);
        assert_eq!(model.fetch.phase, FetchPhase::RetryExhausted);
    }

    #[test]
    fn round_without_course_returns_to_idle() {
        let mut model = RoundModel::new();
        update(&mut model, Msg::FetchRequested("r1".into()));
        update(&mut model, Msg::RoundCounted(1));
        update(&mut model, Msg::RoundLoaded(record(false)));
        update(&mut model, Msg::HoleScoresLoaded(vec![]));
        update(&mut model, Msg::TeesLoaded(vec![]));
        assert_eq!(model.fetch.phase, FetchPhase::Idle);
        assert!(model.course.is_none());
        assert!(model.take_outcome().is_none());
        assert_eq!(model.hole_count, DEFAULT_HOLE_COUNT);
    }

    #[test]
    fn stale_messages_are_ignored() {
        let mut model = RoundModel::new();
        assert!(update(&mut model, Msg::RoundCounted(1)).is_empty());
        assert!(update(&mut model, Msg::Failed(BackendError::new("late"))).is_empty());
        assert_eq!(model.fetch, FetchState::default());
    }

    #[test]
    fn hole_count_change_rebuilds_scores() {
        let mut model = RoundModel::new();
        model.hole_scores[0].score = 5;
        model.set_hole_count(18);
        assert_eq!(model.hole_scores[0].score, 5);
        model.set_hole_count(9);
        assert_eq!(model.hole_scores.len(), 9);
        assert_eq!(model.hole_scores[0].score, 0);
        model.set_hole_count(0);
        assert_eq!(model.hole_count, 9);
        model.set_hole_count(MAX_HOLE_COUNT + 1);
        assert_eq!(model.hole_scores.len(), 9);
        model.initialize_default_scores(u32::MAX);
        assert_eq!(model.hole_count, 9);
    }
}
