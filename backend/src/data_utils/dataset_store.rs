//! Loads the dataset from disk once and shares it across requests.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use common::project::{CityCoordinate, ProjectRecord};
use tokio::sync::OnceCell;

use crate::config::get_config;
use crate::data_utils::csv_utils::{parse_coordinates_csv, parse_projects_csv};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub projects: Vec<ProjectRecord>,
    pub coordinates: Vec<CityCoordinate>,
}

pub async fn load_dataset(projects_path: &Path, coordinates_path: &Path) -> anyhow::Result<Dataset> {
    let raw = tokio::fs::read(projects_path)
        .await
        .with_context(|| format!("Failed to read dataset {}", projects_path.display()))?;
    let projects = parse_projects_csv(raw.as_slice())?;

    // the map is optional, the rest of the dashboard works without it
    let coordinates = match tokio::fs::read(coordinates_path).await {
        Ok(raw) => parse_coordinates_csv(raw.as_slice())?,
        Err(e) => {
            tracing::warn!("no city coordinates at {}: {}", coordinates_path.display(), e);
            Vec::new()
        }
    };
    tracing::info!(
        "loaded {} projects from {} and {} city coordinates",
        projects.len(),
        projects_path.display(),
        coordinates.len()
    );
    Ok(Dataset { projects, coordinates })
}

/// The configured dataset, read once per process.
pub async fn get_dataset() -> anyhow::Result<Arc<Dataset>> {
    static DATASET: OnceCell<Arc<Dataset>> = OnceCell::const_new();
    let dataset = DATASET
        .get_or_try_init(|| async {
            let config = get_config();
            load_dataset(&config.dataset_path, &config.coordinates_path).await.map(Arc::new)
        })
        .await?;
    Ok(Arc::clone(dataset))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_coordinates_are_not_fatal() {
        let dir = std::env::temp_dir().join(format!("nbs-dataset-{}", std::process::id()));
        tokio::fs::create_dir_all(&dir).await.unwrap();
        let projects = dir.join("cleaned.csv");
        tokio::fs::write(&projects, "intervention_name,country\nA,France\n").await.unwrap();

        let dataset = load_dataset(&projects, &dir.join("missing.csv")).await.unwrap();
        assert_eq!(dataset.projects.len(), 1);
        assert!(dataset.coordinates.is_empty());

        assert!(load_dataset(&dir.join("absent.csv"), &dir.join("missing.csv")).await.is_err());
        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
}
