use rusty_golf_rounds::args::{self, CleanArgs, Command};
use rusty_golf_rounds::backend::{Backends, connect};
use rusty_golf_rounds::controller::analysis::generate_practice_plan;
use rusty_golf_rounds::controller::practice::{PlanProgress, focus_text};
use rusty_golf_rounds::controller::profile::{load_or_create_profile, save_onboarding};
use rusty_golf_rounds::error::CoreError;
use rusty_golf_rounds::logging;
use rusty_golf_rounds::model::{GoalSelection, ProfileUpdate};
use rusty_golf_rounds::notify::LogNotifier;
use rusty_golf_rounds::storage::JsonFileStore;
use rusty_golf_rounds::{FetchPhase, RoundDataController};

use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    logging::init_tracing();

    let args = args::args_checks()?;
    let output = run(args).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

async fn run(args: CleanArgs) -> Result<serde_json::Value, CoreError> {
    match args.command {
        Command::Round { round_id, attempts } => {
            let backends = connect(&args.backend).await?;
            load_round(backends, &round_id, attempts).await
        }
        Command::Analyze { issue } => {
            let backends = connect(&args.backend).await?;
            let plan = generate_practice_plan(backends.drills.as_ref(), &issue.join(" ")).await?;
            Ok(serde_json::to_value(plan)?)
        }
        Command::Progress {
            store,
            plan_id,
            day_plan,
            day,
            toggle,
        } => {
            let store = JsonFileStore::new(store);
            let mut progress = PlanProgress::load(&store, Some(plan_id.as_str()), HashMap::new())?;
            if let Some(title) = toggle {
                progress.toggle(&title)?;
            }
            Ok(json!({
                "plan_id": plan_id,
                "day": day,
                "focus": focus_text(&day_plan, day),
                "duration": day_plan.duration_or_default(),
                "completion_percentage": progress.completion_percentage(&day_plan),
                "completed": progress.completed(),
            }))
        }
        Command::Profile {
            user_id,
            save,
            handicap,
            goals,
            score_goal,
            handicap_goal,
            notes,
            first_name,
            last_name,
        } => {
            let backends = connect(&args.backend).await?;
            let profiles = backends.profiles.as_ref();
            let mut profile = load_or_create_profile(profiles, &user_id).await?;
            if save {
                let selection = GoalSelection::from_goal_ids(&goals, score_goal, handicap_goal);
                let update = ProfileUpdate {
                    handicap_level: handicap,
                    goals: notes,
                    first_name,
                    last_name,
                    ..ProfileUpdate::from_goals(&selection)
                };
                profile = save_onboarding(profiles, &user_id, &update).await?;
            }
            Ok(json!({
                "first_visit": profile.is_first_visit(),
                "profile": profile,
            }))
        }
    }
}

async fn load_round(
    backends: Backends,
    round_id: &str,
    attempts: u32,
) -> Result<serde_json::Value, CoreError> {
    let controller = RoundDataController::new(backends.rounds, Arc::new(LogNotifier));
    let mut load = None;
    for _ in 0..attempts {
        load = controller.fetch_round(round_id).await;
        if load.is_some() {
            break;
        }
        let phase = controller.snapshot().await.phase;
        if matches!(phase, FetchPhase::NotFound | FetchPhase::RetryExhausted | FetchPhase::Idle) {
            break;
        }
    }
    let snapshot = controller.snapshot().await;
    Ok(json!({ "load": load, "snapshot": snapshot }))
}
