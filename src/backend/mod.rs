use async_trait::async_trait;
use std::sync::Arc;

use crate::error::{BackendError, CoreError};
use crate::model::{CourseTee, Drill, HoleScoreRow, Profile, ProfileUpdate, RoundRecord};

pub mod rest;
pub mod sqlite;

pub use rest::{RestBackend, RestConfig};
pub use sqlite::SqliteBackend;

/// Table-level queries the round controller needs from the hosted backend.
#[async_trait]
pub trait RoundBackend: Send + Sync {
    /// Count-only existence check on `rounds`.
    async fn count_rounds(&self, round_id: &str) -> Result<u64, BackendError>;
    /// Single `rounds` row with its `golf_courses` summary. Errors when the row is absent.
    async fn fetch_round(&self, round_id: &str) -> Result<RoundRecord, BackendError>;
    /// All `hole_scores` rows of a round, ordered by hole number ascending.
    async fn fetch_hole_scores(&self, round_id: &str) -> Result<Vec<HoleScoreRow>, BackendError>;
    async fn fetch_course_tees(&self, course_id: &str) -> Result<Vec<CourseTee>, BackendError>;
}

/// The remote `search-drills` function.
#[async_trait]
pub trait DrillSearch: Send + Sync {
    async fn search_drills(&self, query: &str) -> Result<Vec<Drill>, BackendError>;
}

/// Onboarding data in the `profiles` table, keyed by user id.
#[async_trait]
pub trait ProfileBackend: Send + Sync {
    /// `None` when the user has no row yet.
    async fn fetch_profile(&self, user_id: &str) -> Result<Option<Profile>, BackendError>;
    /// Inserts the blank, not-yet-onboarded row.
    async fn create_profile(&self, user_id: &str) -> Result<(), BackendError>;
    /// Writes onboarding answers. Updating a user without a row is a no-op.
    async fn save_profile(&self, user_id: &str, update: &ProfileUpdate)
    -> Result<(), BackendError>;
}

#[derive(Debug, Clone)]
pub enum BackendConfig {
    Rest(RestConfig),
    Sqlite {
        db_name: String,
        startup_sql: Option<String>,
    },
}

/// One backend seen through each of its roles.
#[derive(Clone)]
pub struct Backends {
    pub rounds: Arc<dyn RoundBackend>,
    pub drills: Arc<dyn DrillSearch>,
    pub profiles: Arc<dyn ProfileBackend>,
}

/// Opens the configured backend. Sqlite databases get the schema, then the startup sql.
///
/// # Errors
/// Returns an error if the client cannot be built or the database cannot be prepared.
pub async fn connect(config: &BackendConfig) -> Result<Backends, CoreError> {
    match config {
        BackendConfig::Rest(rest) => {
            let backend = Arc::new(RestBackend::new(rest.clone())?);
            Ok(Backends {
                rounds: backend.clone(),
                drills: backend.clone(),
                profiles: backend,
            })
        }
        BackendConfig::Sqlite {
            db_name,
            startup_sql,
        } => {
            let backend = SqliteBackend::open(db_name)?;
            backend.init_schema().await?;
            if let Some(sql) = startup_sql.as_ref().filter(|s| !s.trim().is_empty()) {
                backend.execute_batch(sql.clone()).await?;
            }
            let backend = Arc::new(backend);
            Ok(Backends {
                rounds: backend.clone(),
                drills: backend.clone(),
                profiles: backend,
            })
        }
    }
}
