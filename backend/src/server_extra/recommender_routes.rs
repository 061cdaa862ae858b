use axum::{
    Json,
    body::Body,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::recommender::{RecommendRequest, RecommenderError};
use tracing::info;

use crate::api::recommend::recommend_from;
use crate::recommender::meta::build_rs_meta;
use crate::server_extra::ApiState;

pub async fn rs_meta(State(state): State<ApiState>) -> Response {
    Json(build_rs_meta(&state.dataset.projects)).into_response()
}

async fn _recommend(state: ApiState, request: RecommendRequest) -> anyhow::Result<Response> {
    info!("Recommending for features {:?}, k={:?}", request.selected_features, request.k);
    let ApiState { dataset, default_k } = state;
    let items = tokio::task::spawn_blocking(move || recommend_from(&dataset, &request, default_k)).await??;
    Ok(Json(items).into_response())
}

pub async fn recommend(State(state): State<ApiState>, Json(request): Json<RecommendRequest>) -> Response {
    match _recommend(state, request).await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!("recommend: request failed: {:#?}", e);
            let status = if e.downcast_ref::<RecommenderError>().is_some() {
                StatusCode::BAD_REQUEST
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            (status, Body::from(e.to_string())).into_response()
        }
    }
}
