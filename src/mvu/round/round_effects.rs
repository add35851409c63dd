use crate::backend::RoundBackend;
use crate::mvu::round::{Effect, Msg};
use crate::notify::{Notification, Notifier};

#[derive(Clone, Copy)]
pub struct Deps<'a> {
    pub backend: &'a dyn RoundBackend,
    pub notifier: &'a dyn Notifier,
}

pub async fn run_effect(effect: Effect, deps: Deps<'_>) -> Msg {
    match effect {
        Effect::CountRound(round_id) => match deps.backend.count_rounds(&round_id).await {
            Ok(count) => Msg::RoundCounted(count),
            Err(e) => Msg::Failed(e),
        },
        Effect::LoadRound(round_id) => match deps.backend.fetch_round(&round_id).await {
            Ok(record) => match record.check_hole_count() {
                Ok(()) => Msg::RoundLoaded(record),
                Err(e) => Msg::Failed(e),
            },
            Err(e) => Msg::Failed(e),
        },
        Effect::LoadHoleScores(round_id) => {
            match deps.backend.fetch_hole_scores(&round_id).await {
                Ok(rows) => Msg::HoleScoresLoaded(rows),
                Err(e) => Msg::Failed(e),
            }
        }
        Effect::LoadTees(course_id) => match deps.backend.fetch_course_tees(&course_id).await {
            Ok(tees) => Msg::TeesLoaded(tees),
            Err(e) => Msg::Failed(e),
        },
        Effect::NotifyLoadFailure => {
            deps.notifier.notify(Notification::round_load_failed());
            Msg::Notified
        }
    }
}
