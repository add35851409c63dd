use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::BackendError;

pub const DEFAULT_HOLE_COUNT: u32 = 18;
pub const DEFAULT_PAR: u32 = 4;
/// Largest card the controller will build.
pub const MAX_HOLE_COUNT: u32 = 72;

/// One hole of an in-progress round. Zero score or putts means unrecorded.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct HoleScore {
    pub hole_number: u32,
    pub par: u32,
    pub distance: u32,
    pub score: u32,
    pub putts: u32,
    pub fairway_hit: bool,
    pub green_in_regulation: bool,
}

impl HoleScore {
    #[must_use]
    pub fn unrecorded(hole_number: u32) -> Self {
        Self {
            hole_number,
            par: DEFAULT_PAR,
            distance: 0,
            score: 0,
            putts: 0,
            fairway_hit: false,
            green_in_regulation: false,
        }
    }

    /// Copies the recorded stats of a persisted row onto this hole.
    ///
    /// Par and distance are left alone: `hole_scores` rows are never trusted for them.
    fn apply_row(&mut self, row: &HoleScoreRow) {
        self.score = row.score.unwrap_or(0);
        self.putts = row.putts.unwrap_or(0);
        self.fairway_hit = row.fairway_hit.unwrap_or(false);
        self.green_in_regulation = row.green_in_regulation.unwrap_or(false);
    }
}

/// A row of the `hole_scores` table.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct HoleScoreRow {
    #[serde(default)]
    pub round_id: Option<String>,
    pub hole_number: u32,
    #[serde(default)]
    pub score: Option<u32>,
    #[serde(default)]
    pub putts: Option<u32>,
    #[serde(default)]
    pub fairway_hit: Option<bool>,
    #[serde(default)]
    pub green_in_regulation: Option<bool>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CourseSummary {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub total_par: Option<i32>,
}

/// A row of the `course_tees` table.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CourseTee {
    pub id: String,
    pub course_id: String,
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub course_rating: Option<f64>,
    #[serde(default)]
    pub slope_rating: Option<i32>,
}

/// A row of the `rounds` table, expanded with its course summary.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RoundRecord {
    pub id: String,
    #[serde(default)]
    pub course_id: Option<String>,
    #[serde(default)]
    pub tee_id: Option<String>,
    #[serde(default)]
    pub hole_count: Option<i64>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default, rename = "golf_courses")]
    pub course: Option<CourseSummary>,
}

impl RoundRecord {
    /// The stored hole count, or 18 when it is missing, not positive, or past the cap.
    #[must_use]
    pub fn effective_hole_count(&self) -> u32 {
        match self.hole_count {
            Some(n) if n > 0 => u32::try_from(n)
                .ok()
                .filter(|n| *n <= MAX_HOLE_COUNT)
                .unwrap_or(DEFAULT_HOLE_COUNT),
            _ => DEFAULT_HOLE_COUNT,
        }
    }

    /// Rejects rows whose hole count no score card can hold.
    ///
    /// # Errors
    /// Returns an error if the stored count is above `MAX_HOLE_COUNT`.
    pub fn check_hole_count(&self) -> Result<(), BackendError> {
        match self.hole_count {
            Some(n) if n > i64::from(MAX_HOLE_COUNT) => Err(BackendError::new(format!(
                "round {} has {n} holes, more than {MAX_HOLE_COUNT}",
                self.id
            ))),
            _ => Ok(()),
        }
    }
}

/// Course plus its tee options. Only ever built from backend data.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CourseContext {
    #[serde(flatten)]
    pub course: CourseSummary,
    pub course_tees: Vec<CourseTee>,
}

impl CourseContext {
    #[must_use]
    pub fn new(course: CourseSummary, course_tees: Vec<CourseTee>) -> Self {
        Self {
            course,
            course_tees,
        }
    }
}

/// What a successful round fetch hands back to the caller.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RoundLoad {
    pub course: CourseContext,
    pub tee_id: Option<String>,
    pub hole_count: u32,
}

#[must_use]
pub fn default_hole_scores(hole_count: u32) -> Vec<HoleScore> {
    (1..=hole_count).map(HoleScore::unrecorded).collect()
}

/// Builds the full-length score card for a round, overlaying persisted rows by hole number.
///
/// Rows are expected in ascending hole order; the first row for a hole wins and rows
/// outside `1..=hole_count` are ignored.
#[must_use]
pub fn merge_hole_scores(hole_count: u32, rows: &[HoleScoreRow]) -> Vec<HoleScore> {
    let mut holes = default_hole_scores(hole_count);
    let mut applied = vec![false; holes.len()];
    for row in rows {
        let Some(idx) = row.hole_number.checked_sub(1).map(|i| i as usize) else {
            continue;
        };
        if idx < holes.len() && !applied[idx] {
            holes[idx].apply_row(row);
            applied[idx] = true;
        }
    }
    holes
}

/// `""` and `"new"` stand for a round that has not been persisted yet.
#[must_use]
pub fn is_unsaved_round(round_id: &str) -> bool {
    round_id.is_empty() || round_id == "new"
}
