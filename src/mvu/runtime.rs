use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex as AsyncMutex;

use crate::model::RoundLoad;
use crate::mvu::round::{Deps, FetchPhase, MAX_FETCH_ATTEMPTS, Msg, RoundModel, run_effect, update};

/// Shared "still mounted" flag. Results that land after `dispose` are dropped.
#[derive(Debug, Clone)]
pub struct Liveness(Arc<AtomicBool>);

impl Default for Liveness {
    fn default() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }
}

impl Liveness {
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    pub fn dispose(&self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Runs one round fetch: seeds the model with `FetchRequested` and drains effects.
///
/// The model lock is only held while applying a message, never across a backend call.
pub async fn run_fetch(
    model: &AsyncMutex<RoundModel>,
    round_id: &str,
    deps: Deps<'_>,
    liveness: &Liveness,
) -> Option<RoundLoad> {
    if !liveness.is_alive() {
        return None;
    }
    let mut effects = {
        let mut guard = model.lock().await;
        let effects = update(&mut guard, Msg::FetchRequested(round_id.to_string()));
        match guard.fetch.phase {
            FetchPhase::Loading => tracing::info!(
                round_id,
                "fetching round data (attempt {}/{MAX_FETCH_ATTEMPTS})",
                guard.fetch.attempts
            ),
            FetchPhase::RetryExhausted => {
                tracing::warn!(round_id, "max fetch attempts ({MAX_FETCH_ATTEMPTS}) reached");
            }
            _ => {}
        }
        effects
    };

    while let Some(effect) = effects.pop() {
        tracing::debug!(effect = ?effect, "effect_start");
        let msg = run_effect(effect, deps).await;
        tracing::debug!(msg = ?msg, "effect_done");

        if !liveness.is_alive() {
            tracing::debug!(round_id, "controller disposed, dropping fetch result");
            return None;
        }

        let mut guard = model.lock().await;
        match &msg {
            Msg::Failed(e) => tracing::error!(round_id, error = %e, "error fetching round data"),
            Msg::RoundCounted(0) => tracing::warn!(round_id, "no round found"),
            _ => {}
        }
        let next = update(&mut guard, msg);
        tracing::debug!(queued_effects = ?next, "update");
        effects.extend(next);
    }

    if !liveness.is_alive() {
        return None;
    }
    model.lock().await.take_outcome()
}
