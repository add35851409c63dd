use serde::{Deserialize, Serialize};

pub const DEFAULT_SETS: u32 = 3;
pub const DEFAULT_REPS: u32 = 10;
pub const DEFAULT_DAY_DURATION: &str = "30 minutes";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Drill {
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub focus: Vec<String>,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
    Other,
}

impl Drill {
    /// Drills without a difficulty are treated as beginner drills.
    #[must_use]
    pub fn difficulty_level(&self) -> Difficulty {
        match self
            .difficulty
            .as_deref()
            .map(str::to_lowercase)
            .as_deref()
        {
            None | Some("beginner") => Difficulty::Beginner,
            Some("intermediate") => Difficulty::Intermediate,
            Some("advanced") => Difficulty::Advanced,
            Some(_) => Difficulty::Other,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct DrillWithSets {
    #[serde(default)]
    pub drill: Option<Drill>,
    #[serde(default)]
    pub sets: Option<u32>,
    #[serde(default)]
    pub reps: Option<u32>,
}

impl DrillWithSets {
    #[must_use]
    pub fn sets_or_default(&self) -> u32 {
        self.sets.filter(|s| *s > 0).unwrap_or(DEFAULT_SETS)
    }

    #[must_use]
    pub fn reps_or_default(&self) -> u32 {
        self.reps.filter(|r| *r > 0).unwrap_or(DEFAULT_REPS)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
pub struct DayPlan {
    #[serde(default)]
    pub focus: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub drills: Vec<DrillWithSets>,
}

impl DayPlan {
    #[must_use]
    pub fn duration_or_default(&self) -> &str {
        self.duration.as_deref().unwrap_or(DEFAULT_DAY_DURATION)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct RecommendedDrill {
    pub name: String,
    pub description: Option<String>,
    pub difficulty: Option<String>,
    pub duration: Option<String>,
    pub focus: Vec<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PracticeSession {
    pub focus: String,
    pub drills: Vec<String>,
    pub duration: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PracticeSchedule {
    pub duration: String,
    pub frequency: String,
    pub sessions: Vec<PracticeSession>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct GeneratedPracticePlan {
    pub problem: String,
    pub diagnosis: String,
    pub root_causes: Vec<String>,
    pub recommended_drills: Vec<RecommendedDrill>,
    pub practice_plan: PracticeSchedule,
}

/// Body returned by the `search-drills` function.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct DrillSearchResponse {
    #[serde(default)]
    pub drills: Vec<Drill>,
}
