use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::instrument;

use crate::core::error::Error;
use crate::core::state::AppState;
use crate::types::{request, response};

#[instrument(skip_all)]
pub(crate) async fn sign_up(
    State(state): State<AppState>,
    Json(params): Json<request::SignUpData>,
) -> Result<(StatusCode, Json<response::SignedUp>), Error> {
    let user = state.user_controller.sign_up(params).await?;

    Ok((StatusCode::CREATED, Json(response::SignedUp { user })))
}

#[instrument(skip_all)]
pub(crate) async fn sign_in(
    State(state): State<AppState>,
    Json(params): Json<request::SignInData>,
) -> Result<Json<response::Token>, Error> {
    let token = state.user_controller.sign_in(params).await?;

    Ok(Json(response::Token { token }))
}
