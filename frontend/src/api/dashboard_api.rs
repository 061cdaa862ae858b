//! Client API calls for the dashboard and the recommender.

use common::{
    project::{CityCoordinate, ProjectRecord},
    recommender::{RecommendRequest, RecommendedProject, RsMeta},
};
use dioxus::prelude::*;

#[server]
pub async fn list_projects() -> Result<Vec<ProjectRecord>, ServerFnError> {
    let x = backend::api::projects::list_projects().await;
    x.map_err(|e| ServerFnError::ServerError { message: e.to_string(), code: 500, details: None })
}

#[server]
pub async fn list_city_coordinates() -> Result<Vec<CityCoordinate>, ServerFnError> {
    let x = backend::api::projects::list_city_coordinates().await;
    x.map_err(|e| ServerFnError::ServerError { message: e.to_string(), code: 500, details: None })
}

#[server]
pub async fn recommender_meta() -> Result<RsMeta, ServerFnError> {
    let x = backend::api::recommend::rs_meta().await;
    x.map_err(|e| ServerFnError::ServerError { message: e.to_string(), code: 500, details: None })
}

#[server]
pub async fn recommend(request: RecommendRequest) -> Result<Vec<RecommendedProject>, ServerFnError> {
    let x = backend::api::recommend::recommend(request).await;
    x.map_err(|e| {
        let code = if e.downcast_ref::<common::recommender::RecommenderError>().is_some() { 400 } else { 500 };
        ServerFnError::ServerError { message: e.to_string(), code, details: None }
    })
}
