use crate::backend::DrillSearch;
use crate::error::CoreError;
use crate::model::{
    Drill, GeneratedPracticePlan, PracticeSchedule, PracticeSession, RecommendedDrill,
};

const DIAGNOSIS: &str = "AI analysis of your golf issue";
const ROOT_CAUSES: [&str; 2] = ["Technique", "Equipment"];
const PLAN_DURATION: &str = "4 weeks";
const PLAN_FREQUENCY: &str = "3 times per week";
const SESSION_FOCUS: &str = "Improving Technique";
const SESSION_DURATION: &str = "1 hour";

/// Turns a free-text golf problem into a practice plan built from matching drills.
///
/// # Errors
/// Returns an error if the drill search fails.
pub async fn generate_practice_plan(
    search: &dyn DrillSearch,
    issue: &str,
) -> Result<GeneratedPracticePlan, CoreError> {
    let drills = search.search_drills(issue).await?;
    tracing::debug!(issue, found = drills.len(), "drill search finished");
    Ok(plan_from_drills(issue, &drills))
}

#[must_use]
pub fn plan_from_drills(issue: &str, drills: &[Drill]) -> GeneratedPracticePlan {
    GeneratedPracticePlan {
        problem: issue.to_string(),
        diagnosis: DIAGNOSIS.to_string(),
        root_causes: ROOT_CAUSES.iter().map(ToString::to_string).collect(),
        recommended_drills: drills
            .iter()
            .map(|d| RecommendedDrill {
                name: d.title.clone(),
                description: d.overview.clone(),
                difficulty: d.difficulty.clone(),
                duration: d.duration.clone(),
                focus: d.focus.clone(),
            })
            .collect(),
        practice_plan: PracticeSchedule {
            duration: PLAN_DURATION.to_string(),
            frequency: PLAN_FREQUENCY.to_string(),
            sessions: vec![PracticeSession {
                focus: SESSION_FOCUS.to_string(),
                drills: drills.iter().map(|d| d.title.clone()).collect(),
                duration: SESSION_DURATION.to_string(),
            }],
        },
    }
}
