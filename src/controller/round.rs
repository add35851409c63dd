use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex as AsyncMutex;

use crate::backend::RoundBackend;
use crate::model::{CourseContext, HoleScore, RoundLoad, is_unsaved_round};
use crate::mvu::round::{Deps, FetchPhase, RoundModel};
use crate::mvu::runtime::{Liveness, run_fetch};
use crate::notify::Notifier;

/// Point-in-time copy of everything the round screen renders.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct RoundSnapshot {
    pub is_loading: bool,
    pub hole_scores: Vec<HoleScore>,
    pub course: Option<CourseContext>,
    pub hole_count: u32,
    pub has_error: bool,
    pub phase: FetchPhase,
    pub attempts: u32,
}

/// Owns the hole-by-hole state of one round screen and loads it from the backend.
///
/// Backend failures never escape: they end up in `has_error`, the phase, and at most one
/// user notification per controller.
pub struct RoundDataController {
    model: AsyncMutex<RoundModel>,
    backend: Arc<dyn RoundBackend>,
    notifier: Arc<dyn Notifier>,
    in_flight: AtomicBool,
    liveness: Liveness,
}

struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl RoundDataController {
    #[must_use]
    pub fn new(backend: Arc<dyn RoundBackend>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            model: AsyncMutex::new(RoundModel::new()),
            backend,
            notifier,
            in_flight: AtomicBool::new(false),
            liveness: Liveness::default(),
        }
    }

    pub async fn snapshot(&self) -> RoundSnapshot {
        let model = self.model.lock().await;
        RoundSnapshot {
            is_loading: model.fetch.is_loading(),
            hole_scores: model.hole_scores.clone(),
            course: model.course.clone(),
            hole_count: model.hole_count,
            has_error: model.fetch.has_error,
            phase: model.fetch.phase,
            attempts: model.fetch.attempts,
        }
    }

    pub async fn is_loading(&self) -> bool {
        self.model.lock().await.fetch.is_loading()
    }

    pub async fn has_error(&self) -> bool {
        self.model.lock().await.fetch.has_error
    }

    pub async fn hole_scores(&self) -> Vec<HoleScore> {
        self.model.lock().await.hole_scores.clone()
    }

    pub async fn course(&self) -> Option<CourseContext> {
        self.model.lock().await.course.clone()
    }

    pub async fn hole_count(&self) -> u32 {
        self.model.lock().await.hole_count
    }

    pub async fn initialize_default_scores(&self, hole_count: u32) {
        self.model
            .lock()
            .await
            .initialize_default_scores(hole_count);
    }

    pub async fn set_hole_count(&self, hole_count: u32) {
        self.model.lock().await.set_hole_count(hole_count);
    }

    /// Loads a persisted round. Returns `None` for unsaved ids, a disposed controller,
    /// rejected concurrent calls, an exhausted retry budget, a missing round, or any
    /// backend failure.
    pub async fn fetch_round(&self, round_id: &str) -> Option<RoundLoad> {
        if is_unsaved_round(round_id) {
            return None;
        }
        if self.is_disposed() {
            tracing::debug!(round_id, "controller disposed, ignoring fetch");
            return None;
        }
        let Some(_guard) = InFlightGuard::acquire(&self.in_flight) else {
            tracing::warn!(round_id, "round fetch already in flight, rejecting");
            return None;
        };
        let deps = Deps {
            backend: self.backend.as_ref(),
            notifier: self.notifier.as_ref(),
        };
        run_fetch(&self.model, round_id, deps, &self.liveness).await
    }

    /// Marks the owning screen as gone; in-flight results are discarded.
    pub fn dispose(&self) {
        self.liveness.dispose();
    }

    #[must_use]
    pub fn is_disposed(&self) -> bool {
        !self.liveness.is_alive()
    }
}
