use serde::{Deserialize, Serialize};

use super::goals::GoalSelection;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HandicapLevel {
    Beginner,
    Novice,
    Intermediate,
    Advanced,
    Expert,
    Pro,
}

impl HandicapLevel {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Novice => "novice",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
            Self::Expert => "expert",
            Self::Pro => "pro",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "beginner" => Some(Self::Beginner),
            "novice" => Some(Self::Novice),
            "intermediate" => Some(Self::Intermediate),
            "advanced" => Some(Self::Advanced),
            "expert" => Some(Self::Expert),
            "pro" => Some(Self::Pro),
            _ => None,
        }
    }
}

/// A row of the `profiles` table: onboarding answers for one user.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Profile {
    pub id: String,
    #[serde(default)]
    pub has_onboarded: bool,
    #[serde(default)]
    pub handicap_level: Option<HandicapLevel>,
    #[serde(default)]
    pub goals: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub selected_goals: Vec<String>,
    #[serde(default)]
    pub score_goal: Option<u32>,
    #[serde(default)]
    pub handicap_goal: Option<f32>,
}

impl Profile {
    /// The blank row created on a user's first visit.
    #[must_use]
    pub fn blank(user_id: &str) -> Self {
        Self {
            id: user_id.to_string(),
            has_onboarded: false,
            handicap_level: None,
            goals: None,
            first_name: None,
            last_name: None,
            avatar_url: None,
            selected_goals: Vec::new(),
            score_goal: None,
            handicap_goal: None,
        }
    }

    #[must_use]
    pub fn is_first_visit(&self) -> bool {
        !self.has_onboarded
    }

    #[must_use]
    pub fn goal_selection(&self) -> GoalSelection {
        GoalSelection {
            selected_goals: self.selected_goals.clone(),
            score_goal: self.score_goal,
            handicap_goal: self.handicap_goal,
        }
    }
}

/// Onboarding answers to write back. Unset text fields keep their stored value;
/// the goal selection is always written, so cleared targets become null.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handicap_level: Option<HandicapLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goals: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub selected_goals: Vec<String>,
    pub score_goal: Option<u32>,
    pub handicap_goal: Option<f32>,
    pub has_onboarded: bool,
}

impl ProfileUpdate {
    #[must_use]
    pub fn from_goals(selection: &GoalSelection) -> Self {
        Self {
            selected_goals: selection.selected_goals.clone(),
            score_goal: selection.score_goal,
            handicap_goal: selection.handicap_goal,
            has_onboarded: true,
            ..Self::default()
        }
    }
}
