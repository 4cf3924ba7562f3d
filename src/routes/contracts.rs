use axum::extract::{Extension, Json, Path, Query, State};
use axum::http::StatusCode;
use tracing::instrument;

use crate::core::error::Error;
use crate::core::state::AppState;
use crate::types::{request, response};
use crate::utils::auth::Subject;
use crate::utils::filters::{self, CONTRACT_SORT};

#[instrument(skip(state, subject, params))]
pub(crate) async fn post(
    State(state): State<AppState>,
    Extension(subject): Extension<Subject>,
    Json(params): Json<request::NewContractData>,
) -> Result<(StatusCode, Json<response::ContractEnvelope>), Error> {
    let contract = state.contract_controller.create(params).await?;

    tracing::info!(contract_id = contract.id, created_by = subject.0, "contract created");

    Ok((
        StatusCode::CREATED,
        Json(response::ContractEnvelope { contract }),
    ))
}

#[instrument(skip(state))]
pub(crate) async fn get(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<response::ContractEnvelope>, Error> {
    let contract = state.contract_controller.get(id).await?;

    Ok(Json(response::ContractEnvelope { contract }))
}

#[instrument(skip(state))]
pub(crate) async fn get_all(
    State(state): State<AppState>,
    Query(params): Query<request::ListContractsParams>,
) -> Result<Json<response::Contracts>, Error> {
    let filters = filters::normalize(
        params.page.as_deref(),
        params.page_size.as_deref(),
        params.sort.as_deref(),
        &CONTRACT_SORT,
    )?;

    let contracts = state
        .contract_controller
        .list(&params.title, &filters)
        .await?;

    Ok(Json(response::Contracts { contracts }))
}

#[instrument(skip(state, subject))]
pub(crate) async fn delete(
    State(state): State<AppState>,
    Extension(subject): Extension<Subject>,
    Path(id): Path<i64>,
) -> Result<StatusCode, Error> {
    state.contract_controller.delete(id).await?;

    tracing::info!(contract_id = id, deleted_by = subject.0, "contract deleted");

    Ok(StatusCode::NO_CONTENT)
}
