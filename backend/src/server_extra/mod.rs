//! Plain HTTP routes served next to the frontend's server functions.

pub mod dataset_routes;
pub mod recommender_routes;

use std::sync::Arc;

use axum::{Router, http::Method, routing::{get, post}};
use tower_http::cors::{Any, CorsLayer};

use crate::data_utils::dataset_store::Dataset;

#[derive(Debug, Clone)]
pub struct ApiState {
    pub dataset: Arc<Dataset>,
    pub default_k: usize,
}

pub fn router(state: ApiState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);
    Router::new()
        .route("/api/projects", get(dataset_routes::projects))
        .route("/api/city-coordinates", get(dataset_routes::city_coordinates))
        .route("/api/rs-meta", get(recommender_routes::rs_meta))
        .route("/api/recommend", post(recommender_routes::recommend))
        .layer(cors)
        .with_state(state)
}
