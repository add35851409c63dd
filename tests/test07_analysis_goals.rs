mod common;
use crate::common::setup_sqlite;

use rusty_golf_rounds::controller::analysis::{generate_practice_plan, plan_from_drills};
use rusty_golf_rounds::model::{Difficulty, Drill, GoalSelection};

#[tokio::test]
async fn test07_plan_from_matching_drills() -> Result<(), Box<dyn std::error::Error>> {
    let db = setup_sqlite().await?;

    let plan = generate_practice_plan(&db, "slice").await?;
    assert_eq!(plan.problem, "slice");
    assert_eq!(plan.root_causes, vec!["Technique", "Equipment"]);
    assert_eq!(plan.recommended_drills.len(), 1);
    let towel = &plan.recommended_drills[0];
    assert_eq!(towel.name, "Towel Drill");
    assert_eq!(towel.difficulty.as_deref(), Some("intermediate"));
    assert_eq!(plan.practice_plan.duration, "4 weeks");
    assert_eq!(plan.practice_plan.frequency, "3 times per week");
    assert_eq!(plan.practice_plan.sessions.len(), 1);
    assert_eq!(plan.practice_plan.sessions[0].drills, vec!["Towel Drill"]);

    let nothing = generate_practice_plan(&db, "shanks off the hosel").await?;
    assert!(nothing.recommended_drills.is_empty());
    assert!(nothing.practice_plan.sessions[0].drills.is_empty());
    Ok(())
}

#[test]
fn test07_difficulty_levels() {
    let mut drill = Drill {
        id: None,
        title: "Gate Putting".into(),
        overview: None,
        difficulty: None,
        duration: None,
        category: None,
        focus: Vec::new(),
    };
    assert_eq!(drill.difficulty_level(), Difficulty::Beginner);
    drill.difficulty = Some("Advanced".into());
    assert_eq!(drill.difficulty_level(), Difficulty::Advanced);
    drill.difficulty = Some("tour".into());
    assert_eq!(drill.difficulty_level(), Difficulty::Other);

    let plan = plan_from_drills("putting", &[drill]);
    assert_eq!(plan.recommended_drills[0].name, "Gate Putting");
}

#[test]
fn test07_goal_toggles_clear_targets() {
    let mut goals = GoalSelection::default();
    goals.toggle("lower-score", true);
    goals.toggle("lower-score", true);
    goals.toggle("handicap", true);
    goals.toggle("consistency", true);
    assert_eq!(goals.selected_goals, vec!["lower-score", "handicap", "consistency"]);

    goals.score_goal = Some(85);
    goals.handicap_goal = Some(12.5);

    goals.toggle("consistency", false);
    assert_eq!(goals.score_goal, Some(85));

    goals.toggle("lower-score", false);
    assert!(!goals.is_selected("lower-score"));
    assert_eq!(goals.score_goal, None);
    assert_eq!(goals.handicap_goal, Some(12.5));

    goals.toggle("handicap", false);
    assert_eq!(goals.handicap_goal, None);
    assert!(!goals.is_selected("consistency"));
    assert!(goals.selected_goals.is_empty());
}
