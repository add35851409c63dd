mod common;
use crate::common::{RecordingNotifier, ScriptedBackend, Step, round};

use rusty_golf_rounds::model::default_hole_scores;
use rusty_golf_rounds::{FetchPhase, RoundDataController};
use std::sync::Arc;
use tokio::sync::Notify;

#[tokio::test]
async fn test04_second_fetch_is_rejected_while_one_is_in_flight()
-> Result<(), Box<dyn std::error::Error>> {
    let release = Arc::new(Notify::new());
    let backend = Arc::new(ScriptedBackend::new(round(Some(18))).holding(release.clone()));
    let controller = Arc::new(RoundDataController::new(
        backend.clone(),
        Arc::new(RecordingNotifier::default()),
    ));

    let first = {
        let controller = Arc::clone(&controller);
        tokio::spawn(async move { controller.fetch_round("r1").await })
    };
    backend.entered.notified().await;

    assert!(controller.is_loading().await);
    assert!(controller.fetch_round("r1").await.is_none());
    let snapshot = controller.snapshot().await;
    assert_eq!(snapshot.attempts, 1);
    assert_eq!(snapshot.phase, FetchPhase::Loading);
    assert_eq!(backend.calls(), vec![Step::Count]);

    release.notify_one();
    let load = first.await?;
    assert_eq!(load.map(|l| l.hole_count), Some(18));
    assert!(!controller.is_loading().await);

    // the guard is released once the first fetch settles
    assert!(controller.fetch_round("r1").await.is_some());
    assert_eq!(controller.snapshot().await.attempts, 2);
    Ok(())
}

#[tokio::test]
async fn test04_results_after_dispose_are_dropped() -> Result<(), Box<dyn std::error::Error>> {
    let release = Arc::new(Notify::new());
    let backend = Arc::new(ScriptedBackend::new(round(Some(9))).holding(release.clone()));
    backend.fail_at(Some(Step::Round));
    let notifier = Arc::new(RecordingNotifier::default());
    let controller = Arc::new(RoundDataController::new(backend.clone(), notifier.clone()));

    let first = {
        let controller = Arc::clone(&controller);
        tokio::spawn(async move { controller.fetch_round("r1").await })
    };
    backend.entered.notified().await;
    controller.dispose();
    assert!(controller.is_disposed());
    release.notify_one();

    assert!(first.await?.is_none());
    let snapshot = controller.snapshot().await;
    assert_eq!(snapshot.hole_scores, default_hole_scores(18));
    assert!(snapshot.course.is_none());
    assert!(!snapshot.has_error);
    // nothing after the count ran, so no failure and no toast
    assert_eq!(backend.calls(), vec![Step::Count]);
    assert!(notifier.seen().is_empty());
    Ok(())
}

#[tokio::test]
async fn test04_disposed_controller_ignores_new_fetches() {
    let backend = Arc::new(ScriptedBackend::new(round(Some(9))));
    let controller =
        RoundDataController::new(backend.clone(), Arc::new(RecordingNotifier::default()));

    controller.dispose();
    let before = controller.snapshot().await;
    assert!(controller.fetch_round("r1").await.is_none());
    assert!(controller.fetch_round("r1").await.is_none());

    let after = controller.snapshot().await;
    assert_eq!(after, before);
    assert_eq!(after.attempts, 0);
    assert!(!after.is_loading);
    assert_eq!(after.phase, FetchPhase::Idle);
    assert!(backend.calls().is_empty());
}
