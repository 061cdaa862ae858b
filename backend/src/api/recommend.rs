//! Recommendation and model metadata endpoints.

use anyhow::Context;
use common::recommender::{RecommendRequest, RecommendedProject, RecommenderError, RsMeta, clamp_k, parse_features};

use crate::config::get_config;
use crate::data_utils::dataset_store::{Dataset, get_dataset};
use crate::recommender::meta::build_rs_meta;
use crate::recommender::model::Recommender;

/// Fits a recommender for the requested features and ranks the dataset against the
/// request's preferences.
pub fn recommend_from(
    dataset: &Dataset,
    request: &RecommendRequest,
    default_k: usize,
) -> Result<Vec<RecommendedProject>, RecommenderError> {
    let features = parse_features(&request.selected_features)?;
    let k = clamp_k(request.k.unwrap_or(default_k as i64));
    Recommender::fit(&dataset.projects, &features).recommend(&request.preferences, k)
}

pub async fn recommend(request: RecommendRequest) -> anyhow::Result<Vec<RecommendedProject>> {
    let dataset = get_dataset().await?;
    let default_k = get_config().default_k;
    let result = tokio::task::spawn_blocking(move || recommend_from(&dataset, &request, default_k))
        .await
        .context("recommender task failed")??;
    Ok(result)
}

pub async fn rs_meta() -> anyhow::Result<RsMeta> {
    let dataset = get_dataset().await?;
    Ok(build_rs_meta(&dataset.projects))
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::project::ProjectRecord;

    fn dataset() -> Dataset {
        let projects = (0..12)
            .map(|i| ProjectRecord {
                intervention_name: Some(format!("P{i}")),
                country: Some(if i % 2 == 0 { "France" } else { "Spain" }.into()),
                ..Default::default()
            })
            .collect();
        Dataset { projects, coordinates: Vec::new() }
    }

    #[test]
    fn k_defaults_and_clamps() {
        let data = dataset();
        let request = RecommendRequest::default();
        assert_eq!(recommend_from(&data, &request, 5).unwrap().len(), 5);
        let request = RecommendRequest { k: Some(50), ..Default::default() };
        assert_eq!(recommend_from(&data, &request, 5).unwrap().len(), 10);
        let request = RecommendRequest { k: Some(0), ..Default::default() };
        assert_eq!(recommend_from(&data, &request, 5).unwrap().len(), 3);
    }

    #[test]
    fn unknown_feature_is_reported() {
        let request = RecommendRequest { selected_features: vec!["colour".into()], ..Default::default() };
        assert_eq!(
            recommend_from(&dataset(), &request, 5),
            Err(RecommenderError::UnknownFeature("colour".into()))
        );
    }
}
