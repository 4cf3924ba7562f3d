use axum::extract::{Extension, Json, Query, State};
use axum::http::StatusCode;
use tracing::instrument;

use crate::core::error::Error;
use crate::core::state::AppState;
use crate::types::{request, response};
use crate::utils::auth::Subject;

#[instrument(skip(state, subject, params))]
pub(crate) async fn post(
    State(state): State<AppState>,
    Extension(subject): Extension<Subject>,
    Json(params): Json<request::NewOrderData>,
) -> Result<(StatusCode, Json<response::OrderEnvelope>), Error> {
    let order = state.order_controller.create(params).await?;

    tracing::info!(order_id = order.id, submitted_by = subject.0, "order submitted");

    Ok((StatusCode::CREATED, Json(response::OrderEnvelope { order })))
}

#[instrument(skip_all)]
pub(crate) async fn get_by_email(
    State(state): State<AppState>,
    Query(params): Query<request::OrdersByEmailParams>,
) -> Result<Json<response::Orders>, Error> {
    let orders = state.order_controller.list_by_email(&params.email).await?;

    Ok(Json(response::Orders { orders }))
}
