#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use rusty_golf_rounds::backend::{RoundBackend, SqliteBackend};
use rusty_golf_rounds::error::BackendError;
use rusty_golf_rounds::model::{CourseSummary, CourseTee, HoleScoreRow, RoundRecord};
use rusty_golf_rounds::notify::{Notification, Notifier};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Count,
    Round,
    HoleScores,
    Tees,
}

/// In-process backend with canned rows, a call log, and switchable failures.
pub struct ScriptedBackend {
    pub count: u64,
    pub round: RoundRecord,
    pub hole_rows: Vec<HoleScoreRow>,
    pub tees: Vec<CourseTee>,
    fail_at: Mutex<Option<Step>>,
    calls: Mutex<Vec<Step>>,
    hold: Option<Arc<Notify>>,
    pub entered: Arc<Notify>,
    held_once: AtomicBool,
}

impl ScriptedBackend {
    pub fn new(round: RoundRecord) -> Self {
        Self {
            count: 1,
            round,
            hole_rows: Vec::new(),
            tees: Vec::new(),
            fail_at: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
            hold: None,
            entered: Arc::new(Notify::new()),
            held_once: AtomicBool::new(false),
        }
    }

    pub fn with_hole_rows(mut self, rows: Vec<HoleScoreRow>) -> Self {
        self.hole_rows = rows;
        self
    }

    pub fn with_tees(mut self, tees: Vec<CourseTee>) -> Self {
        self.tees = tees;
        self
    }

    pub fn with_count(mut self, count: u64) -> Self {
        self.count = count;
        self
    }

    /// The first count call parks until `release` is notified.
    pub fn holding(mut self, release: Arc<Notify>) -> Self {
        self.hold = Some(release);
        self
    }

    pub fn fail_at(&self, step: Option<Step>) {
        *self.fail_at.lock().unwrap() = step;
    }

    pub fn calls(&self) -> Vec<Step> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, step: Step) -> Result<(), BackendError> {
        self.calls.lock().unwrap().push(step);
        if *self.fail_at.lock().unwrap() == Some(step) {
            return Err(BackendError::new(format!("{step:?} failed: connection reset")));
        }
        Ok(())
    }
}

#[async_trait]
impl RoundBackend for ScriptedBackend {
    async fn count_rounds(&self, _round_id: &str) -> Result<u64, BackendError> {
        self.record(Step::Count)?;
        if let Some(release) = &self.hold {
            if !self.held_once.swap(true, Ordering::SeqCst) {
                self.entered.notify_one();
                release.notified().await;
            }
        }
        Ok(self.count)
    }

    async fn fetch_round(&self, _round_id: &str) -> Result<RoundRecord, BackendError> {
        self.record(Step::Round)?;
        Ok(self.round.clone())
    }

    async fn fetch_hole_scores(&self, _round_id: &str) -> Result<Vec<HoleScoreRow>, BackendError> {
        self.record(Step::HoleScores)?;
        Ok(self.hole_rows.clone())
    }

    async fn fetch_course_tees(&self, _course_id: &str) -> Result<Vec<CourseTee>, BackendError> {
        self.record(Step::Tees)?;
        Ok(self.tees.clone())
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn seen(&self) -> Vec<Notification> {
        self.seen.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.seen.lock().unwrap().push(notification);
    }
}

pub fn course() -> CourseSummary {
    CourseSummary {
        id: "c1".into(),
        name: "Pebble Beach Golf Links".into(),
        city: Some("Pebble Beach".into()),
        state: Some("CA".into()),
        total_par: Some(72),
    }
}

pub fn round(hole_count: Option<i64>) -> RoundRecord {
    RoundRecord {
        id: "r1".into(),
        course_id: Some("c1".into()),
        tee_id: Some("t-blue".into()),
        hole_count,
        date: None,
        course: Some(course()),
    }
}

pub fn tee(id: &str, name: &str) -> CourseTee {
    CourseTee {
        id: id.into(),
        course_id: "c1".into(),
        name: name.into(),
        color: None,
        course_rating: Some(72.1),
        slope_rating: Some(131),
    }
}

pub fn hole_row(hole_number: u32, score: u32, putts: u32, fairway: bool, green: bool) -> HoleScoreRow {
    HoleScoreRow {
        round_id: Some("r1".into()),
        hole_number,
        score: Some(score),
        putts: Some(putts),
        fairway_hit: Some(fairway),
        green_in_regulation: Some(green),
    }
}

/// Private in-memory sqlite with the schema and the round fixture loaded.
pub async fn setup_sqlite() -> Result<SqliteBackend, BackendError> {
    let backend = SqliteBackend::open_in_memory()?;
    backend.init_schema().await?;
    backend.execute_batch(include_str!("../round_fixture.sql")).await?;
    Ok(backend)
}
