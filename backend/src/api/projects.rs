//! Dataset listings served to the dashboard.

use common::project::{CityCoordinate, ProjectRecord};

use crate::data_utils::dataset_store::get_dataset;

pub async fn list_projects() -> anyhow::Result<Vec<ProjectRecord>> {
    let dataset = get_dataset().await?;
    Ok(dataset.projects.clone())
}

pub async fn list_city_coordinates() -> anyhow::Result<Vec<CityCoordinate>> {
    let dataset = get_dataset().await?;
    Ok(dataset.coordinates.clone())
}
