use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use backend::data_utils::dataset_store::Dataset;
use backend::server_extra::{ApiState, router};
use common::project::{CityCoordinate, ProjectRecord};
use common::recommender::{RecommendedProject, RsMeta};
use tower::ServiceExt;

fn app() -> Router {
    let projects = ["France", "Germany", "France", "Italy"]
        .iter()
        .enumerate()
        .map(|(i, country)| ProjectRecord {
            intervention_name: Some(format!("Project {i}")),
            country: Some(country.to_string()),
            total_cost: Some(format!("{}", (i + 1) * 1000)),
            ..Default::default()
        })
        .collect();
    let coordinates = vec![CityCoordinate {
        city: "Lyon".into(),
        country: "France".into(),
        latitude: 45.76,
        longitude: 4.83,
    }];
    router(ApiState { dataset: Arc::new(Dataset { projects, coordinates }), default_k: 3 })
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec()
}

fn post_json(uri: &str, json: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(json.to_string()))
        .unwrap()
}

#[tokio::test]
async fn rs_meta_lists_countries() {
    let response = app()
        .oneshot(Request::builder().uri("/api/rs-meta").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let meta: RsMeta = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(meta.categorical["country"], vec!["France", "Germany", "Italy"]);
    assert_eq!(meta.numeric_ranges["total_cost"].max, 4000.0);
}

#[tokio::test]
async fn recommend_ranks_matching_country_first() {
    let response = app()
        .oneshot(post_json(
            "/api/recommend",
            r#"{"selected_features":["country"],"preferences":{"country":"Italy"}}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let items: Vec<RecommendedProject> = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(items[0].record.country.as_deref(), Some("Italy"));
}

#[tokio::test]
async fn unknown_feature_is_a_bad_request() {
    let response = app()
        .oneshot(post_json("/api/recommend", r#"{"selected_features":["colour"]}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let text = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(text.contains("colour"));
}

#[tokio::test]
async fn dataset_routes_return_everything() {
    let response = app()
        .oneshot(Request::builder().uri("/api/projects").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let projects: Vec<ProjectRecord> = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(projects.len(), 4);

    let response = app()
        .oneshot(Request::builder().uri("/api/city-coordinates").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let coords: Vec<CityCoordinate> = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(coords[0].city, "Lyon");
}
