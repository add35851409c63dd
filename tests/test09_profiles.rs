mod common;
use crate::common::setup_sqlite;

use rusty_golf_rounds::backend::ProfileBackend;
use rusty_golf_rounds::controller::profile::{load_or_create_profile, save_onboarding};
use rusty_golf_rounds::error::CoreError;
use rusty_golf_rounds::model::{GoalSelection, HandicapLevel, ProfileUpdate};

#[tokio::test]
async fn test09_first_visit_creates_a_blank_profile() -> Result<(), Box<dyn std::error::Error>> {
    let db = setup_sqlite().await?;
    assert!(db.fetch_profile("u1").await?.is_none());

    let profile = load_or_create_profile(&db, "u1").await?;
    assert!(profile.is_first_visit());
    assert!(profile.selected_goals.is_empty());

    let stored = db.fetch_profile("u1").await?.ok_or("profile row should exist")?;
    assert_eq!(stored, profile);

    // a second visit reads the row instead of inserting again
    let again = load_or_create_profile(&db, "u1").await?;
    assert_eq!(again, stored);
    Ok(())
}

#[tokio::test]
async fn test09_onboarding_answers_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    let db = setup_sqlite().await?;
    load_or_create_profile(&db, "u2").await?;

    let goals = vec!["lower-score".to_string(), "handicap".to_string()];
    let selection = GoalSelection::from_goal_ids(&goals, Some(85), Some(12.5));
    let update = ProfileUpdate {
        handicap_level: Some(HandicapLevel::Intermediate),
        goals: Some("Break 90 by summer".into()),
        first_name: Some("Sam".into()),
        ..ProfileUpdate::from_goals(&selection)
    };
    let saved = save_onboarding(&db, "u2", &update).await?;
    assert!(!saved.is_first_visit());
    assert_eq!(saved.handicap_level, Some(HandicapLevel::Intermediate));
    assert_eq!(saved.first_name.as_deref(), Some("Sam"));
    assert_eq!(saved.goal_selection(), selection);

    // unchecking lower-score clears its target; unset text keeps what was stored
    let mut selection = saved.goal_selection();
    selection.toggle("lower-score", false);
    let saved = save_onboarding(&db, "u2", &ProfileUpdate::from_goals(&selection)).await?;
    assert_eq!(saved.selected_goals, vec!["handicap"]);
    assert_eq!(saved.score_goal, None);
    assert_eq!(saved.handicap_goal, Some(12.5));
    assert_eq!(saved.first_name.as_deref(), Some("Sam"));
    assert_eq!(saved.goals.as_deref(), Some("Break 90 by summer"));
    Ok(())
}

#[tokio::test]
async fn test09_saving_without_a_row_is_not_found() -> Result<(), Box<dyn std::error::Error>> {
    let db = setup_sqlite().await?;
    let update = ProfileUpdate::from_goals(&GoalSelection::default());
    let result = save_onboarding(&db, "ghost", &update).await;
    assert!(matches!(result, Err(CoreError::NotFound(_))));
    Ok(())
}

#[test]
fn test09_targets_only_follow_selected_goals() {
    let ids = vec!["consistency".to_string()];
    let selection = GoalSelection::from_goal_ids(&ids, Some(80), Some(5.0));
    assert_eq!(selection.score_goal, None);
    assert_eq!(selection.handicap_goal, None);

    let ids = vec!["handicap".to_string(), "handicap".to_string()];
    let selection = GoalSelection::from_goal_ids(&ids, Some(80), Some(5.0));
    assert_eq!(selection.selected_goals, vec!["handicap"]);
    assert_eq!(selection.score_goal, None);
    assert_eq!(selection.handicap_goal, Some(5.0));
}
