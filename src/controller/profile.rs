use crate::backend::ProfileBackend;
use crate::error::CoreError;
use crate::model::{Profile, ProfileUpdate};

/// Reads a user's profile, creating the blank row on their first visit.
///
/// # Errors
/// Returns an error if the backend fails to read or insert the row.
pub async fn load_or_create_profile(
    backend: &dyn ProfileBackend,
    user_id: &str,
) -> Result<Profile, CoreError> {
    if let Some(profile) = backend.fetch_profile(user_id).await? {
        return Ok(profile);
    }
    tracing::info!(user_id, "no profile found, creating one");
    backend.create_profile(user_id).await?;
    Ok(Profile::blank(user_id))
}

/// Stores onboarding answers and returns the profile as persisted.
///
/// # Errors
/// Returns an error if the write fails or the user has no profile row.
pub async fn save_onboarding(
    backend: &dyn ProfileBackend,
    user_id: &str,
    update: &ProfileUpdate,
) -> Result<Profile, CoreError> {
    backend.save_profile(user_id, update).await?;
    backend
        .fetch_profile(user_id)
        .await?
        .ok_or_else(|| CoreError::NotFound(format!("profile for user {user_id}")))
}
