use serde::{Deserialize, Serialize};

pub const LOWER_SCORE_GOAL: &str = "lower-score";
pub const HANDICAP_GOAL: &str = "handicap";

/// Goals picked during onboarding, plus the numeric targets some of them carry.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct GoalSelection {
    pub selected_goals: Vec<String>,
    pub score_goal: Option<u32>,
    pub handicap_goal: Option<f32>,
}

impl GoalSelection {
    /// Selects each id in order. Targets are kept only when their goal is selected.
    #[must_use]
    pub fn from_goal_ids(
        goal_ids: &[String],
        score_goal: Option<u32>,
        handicap_goal: Option<f32>,
    ) -> Self {
        let mut selection = Self::default();
        for goal_id in goal_ids {
            selection.toggle(goal_id, true);
        }
        if selection.is_selected(LOWER_SCORE_GOAL) {
            selection.score_goal = score_goal;
        }
        if selection.is_selected(HANDICAP_GOAL) {
            selection.handicap_goal = handicap_goal;
        }
        selection
    }

    pub fn toggle(&mut self, goal_id: &str, checked: bool) {
        if checked {
            if !self.is_selected(goal_id) {
                self.selected_goals.push(goal_id.to_string());
            }
            return;
        }
        self.selected_goals.retain(|g| g != goal_id);
        match goal_id {
            LOWER_SCORE_GOAL => self.score_goal = None,
            HANDICAP_GOAL => self.handicap_goal = None,
            _ => {}
        }
    }

    #[must_use]
    pub fn is_selected(&self, goal_id: &str) -> bool {
        self.selected_goals.iter().any(|g| g == goal_id)
    }
}
