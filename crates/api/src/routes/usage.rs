use axum::{Json, extract::State};
use chrono::Utc;

use scribekit_transcription::report::{monthly_usage, UsageReport};

use crate::{error::ApiError, state::AppState};

/// Usage for the current UTC month, derived from the provider's job list.
pub async fn get_usage(State(state): State<AppState>) -> Result<Json<UsageReport>, ApiError> {
    let jobs = state
        .provider
        .list_jobs()
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok(Json(monthly_usage(&jobs, Utc::now())))
}
