use axum::{
    Router,
    extract::{MatchedPath, Request},
    http::Method,
    middleware,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{self, CorsLayer},
    trace::TraceLayer,
};
use tracing::info_span;

use crate::Service;
use crate::core::state::AppState;
use crate::routes::{contracts, orders, users};
use crate::utils;

pub(crate) fn routes(service: Service, state: AppState) -> Router {
    let router = match service {
        Service::Users => user_router(),
        Service::Contracts => contract_router(state.clone()),
        Service::Orders => order_router(state.clone()),
    };

    Router::new()
        .route("/v1/healthcheck", get(|| async { "available" }))
        .merge(router)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                        let matched_path = request
                            .extensions()
                            .get::<MatchedPath>()
                            .map(MatchedPath::as_str);

                        info_span!(
                            "request",
                            method = ?request.method(),
                            matched_path,
                        )
                    }),
                )
                .layer(
                    CorsLayer::new()
                        .allow_methods([Method::GET, Method::POST, Method::DELETE])
                        .allow_origin(cors::Any),
                ),
        )
}

// /v1/users/...
fn user_router() -> Router<AppState> {
    Router::new()
        .route("/v1/users/signup", post(users::sign_up))
        .route("/v1/users/signin", post(users::sign_in))
}

// /v1/contracts/...
fn contract_router(state: AppState) -> Router<AppState> {
    let authorized_routes = Router::new()
        .route("/v1/contracts", post(contracts::post))
        .route("/v1/contracts/{id}", axum::routing::delete(contracts::delete))
        .route_layer(middleware::from_fn_with_state(state, utils::auth::authorize));

    Router::new()
        .route("/v1/contracts", get(contracts::get_all))
        .route("/v1/contracts/{id}", get(contracts::get))
        .merge(authorized_routes)
}

// /v1/orders/...
fn order_router(state: AppState) -> Router<AppState> {
    let authorized_routes = Router::new()
        .route("/v1/orders", post(orders::post))
        .route_layer(middleware::from_fn_with_state(state, utils::auth::authorize));

    Router::new()
        .route("/v1/orders", get(orders::get_by_email))
        .merge(authorized_routes)
}
