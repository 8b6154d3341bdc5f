//! Profile route handlers.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::Serialize;

use crate::error::{AppError, Result};
use crate::models::ProfileResponse;
use crate::state::AppState;
use crate::validation::ProfileInput;

/// Successful response body: `{ "data": ... }`.
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub data: T,
}

/// Register a profile.
///
/// `POST /profile`
#[tracing::instrument(skip_all)]
pub async fn create(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ProfileInput>, JsonRejection>,
) -> Result<(StatusCode, Json<DataResponse<ProfileResponse>>)> {
    let Json(input) = payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let validated = input.validate()?;
    let profile = state.profiles().create_profile(validated).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: profile })))
}
