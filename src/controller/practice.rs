use std::collections::HashMap;

use crate::error::StorageError;
use crate::model::DayPlan;
use crate::storage::{KeyValueStore, get_json, put_json};

#[must_use]
pub fn completion_key(plan_id: &str) -> String {
    format!("completed-drills-{plan_id}")
}

/// Drill completion flags for one practice plan, keyed by drill title.
pub struct PlanProgress<'a> {
    store: &'a dyn KeyValueStore,
    plan_id: Option<String>,
    completed: HashMap<String, bool>,
}

impl<'a> PlanProgress<'a> {
    /// Uses the saved flags for `plan_id` when present, else `fallback`.
    ///
    /// # Errors
    /// Returns an error if the store fails or holds a corrupt value.
    pub fn load(
        store: &'a dyn KeyValueStore,
        plan_id: Option<&str>,
        fallback: HashMap<String, bool>,
    ) -> Result<Self, StorageError> {
        let saved = match plan_id {
            Some(id) => get_json::<HashMap<String, bool>>(store, &completion_key(id))?,
            None => None,
        };
        Ok(Self {
            store,
            plan_id: plan_id.map(ToString::to_string),
            completed: saved.unwrap_or(fallback),
        })
    }

    /// Flips one drill and persists the whole map when the plan has an id.
    ///
    /// # Errors
    /// Returns an error if persisting fails; the in-memory flag is already flipped.
    pub fn toggle(&mut self, drill_title: &str) -> Result<bool, StorageError> {
        let now = !self.is_completed(drill_title);
        self.completed.insert(drill_title.to_string(), now);
        if let Some(plan_id) = &self.plan_id {
            put_json(self.store, &completion_key(plan_id), &self.completed)?;
        }
        Ok(now)
    }

    #[must_use]
    pub fn is_completed(&self, drill_title: &str) -> bool {
        self.completed.get(drill_title).copied().unwrap_or(false)
    }

    #[must_use]
    pub fn completed(&self) -> &HashMap<String, bool> {
        &self.completed
    }

    #[must_use]
    pub fn completion_percentage(&self, day_plan: &DayPlan) -> u32 {
        completion_percentage(day_plan, &self.completed)
    }
}

/// Share of a day's drills that are done, rounded to a whole percent.
///
/// Entries with missing drill data count toward the total but never as completed.
#[must_use]
pub fn completion_percentage(day_plan: &DayPlan, completed: &HashMap<String, bool>) -> u32 {
    let total = day_plan.drills.len();
    if total == 0 {
        return 0;
    }
    let done = day_plan
        .drills
        .iter()
        .filter_map(|d| d.drill.as_ref())
        .filter(|d| completed.get(&d.title).copied().unwrap_or(false))
        .count();
    // done <= total, so the ratio stays within 0..=100
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    let pct = ((done as f64 / total as f64) * 100.0).round() as u32;
    pct
}

/// Focus line for a day card, without a redundant `Day N: ` prefix.
#[must_use]
pub fn focus_text(day_plan: &DayPlan, day_number: u32) -> String {
    let Some(focus) = day_plan.focus.as_deref() else {
        return String::new();
    };
    let prefix = format!("Day {day_number}: ");
    focus.strip_prefix(&prefix).unwrap_or(focus).to_string()
}
