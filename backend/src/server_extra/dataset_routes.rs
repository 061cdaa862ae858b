use axum::{Json, extract::State};
use common::project::{CityCoordinate, ProjectRecord};

use crate::server_extra::ApiState;

pub async fn projects(State(state): State<ApiState>) -> Json<Vec<ProjectRecord>> {
    Json(state.dataset.projects.clone())
}

pub async fn city_coordinates(State(state): State<ApiState>) -> Json<Vec<CityCoordinate>> {
    Json(state.dataset.coordinates.clone())
}
