//! Content-based recommender: projects and the user's preferences are embedded in one
//! feature space and ranked by cosine similarity.
//!
//! Numeric columns are median-filled, optionally `ln(1 + x)` compressed, then
//! standardized. Categoricals are one-hot over their sorted levels, funding is
//! multi-hot over the sorted tag vocabulary.

use std::collections::{BTreeMap, BTreeSet};

use common::project::{NumericField, ProjectRecord, TextField, UNKNOWN};
use common::recommender::{
    FeatureKind, PreferenceValue, RecommendedProject, RecommenderError, RecommenderFeature, split_multivalue,
};

fn numeric_value(record: &ProjectRecord, feature: RecommenderFeature) -> Option<f64> {
    match feature {
        RecommenderFeature::Duration => record.duration(),
        RecommenderFeature::NbsArea => record.number(NumericField::NbsArea),
        RecommenderFeature::TotalCost => record.number(NumericField::TotalCost),
        _ => None,
    }
}

fn categorical_value(record: &ProjectRecord, feature: RecommenderFeature) -> Option<&str> {
    match feature {
        RecommenderFeature::Country => record.text(TextField::Country),
        RecommenderFeature::Status => record.text(TextField::Status),
        RecommenderFeature::PreviousAreaType => record.text(TextField::PreviousAreaType),
        _ => None,
    }
}

pub fn funding_tags(record: &ProjectRecord) -> Vec<String> {
    record.sources_of_funding.as_deref().map(split_multivalue).unwrap_or_default()
}

fn median(values: &mut [f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    Some(if values.len() % 2 == 0 { (values[mid - 1] + values[mid]) / 2.0 } else { values[mid] })
}

#[derive(Debug, Clone, PartialEq)]
struct NumericColumn {
    feature: RecommenderFeature,
    mean: f64,
    std: f64,
}

impl NumericColumn {
    fn scale(&self, value: f64) -> f64 {
        let value = if self.feature.uses_log1p() { value.max(0.0).ln_1p() } else { value };
        let std = if self.std == 0.0 { 1.0 } else { self.std };
        (value - self.mean) / std
    }
}

#[derive(Debug, Clone, PartialEq)]
struct CategoricalColumn {
    feature: RecommenderFeature,
    levels: Vec<String>,
}

impl CategoricalColumn {
    fn one_hot(&self, level: Option<&str>, out: &mut Vec<f64>) {
        let start = out.len();
        out.resize(start + self.levels.len(), 0.0);
        if let Some(j) = level.and_then(|l| self.levels.iter().position(|x| x == l)) {
            out[start + j] = 1.0;
        }
    }
}

fn multi_hot(vocab: &[String], tags: &[String], out: &mut Vec<f64>) {
    let start = out.len();
    out.resize(start + vocab.len(), 0.0);
    for tag in tags {
        if let Ok(j) = vocab.binary_search(tag) {
            out[start + j] = 1.0;
        }
    }
}

/// A recommender fitted on one dataset for one feature selection.
#[derive(Debug, Clone)]
pub struct Recommender<'a> {
    dataset: &'a [ProjectRecord],
    numeric: Vec<NumericColumn>,
    categorical: Vec<CategoricalColumn>,
    funding_vocab: Option<Vec<String>>,
    rows: Vec<Vec<f64>>,
}

impl<'a> Recommender<'a> {
    pub fn fit(dataset: &'a [ProjectRecord], features: &[RecommenderFeature]) -> Self {
        let numeric_features: Vec<_> = features.iter().copied().filter(|f| f.kind() == FeatureKind::Numeric).collect();
        let categorical_features: Vec<_> =
            features.iter().copied().filter(|f| f.kind() == FeatureKind::Categorical).collect();
        let use_funding = features.contains(&RecommenderFeature::SourcesOfFunding);

        // median-filled, transformed numeric columns, one Vec per feature
        let mut numeric = Vec::with_capacity(numeric_features.len());
        let mut numeric_data = Vec::with_capacity(numeric_features.len());
        for feature in numeric_features {
            let raw: Vec<Option<f64>> = dataset.iter().map(|r| numeric_value(r, feature)).collect();
            let mut present: Vec<f64> = raw.iter().flatten().copied().collect();
            let fill = median(&mut present).unwrap_or(0.0);
            let values: Vec<f64> = raw
                .into_iter()
                .map(|v| v.unwrap_or(fill))
                .map(|v| if feature.uses_log1p() { v.max(0.0).ln_1p() } else { v })
                .collect();
            let (mean, std) = if values.is_empty() {
                (0.0, 1.0)
            } else {
                let n = values.len() as f64;
                let mean = values.iter().sum::<f64>() / n;
                let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
                (mean, var.sqrt())
            };
            let std_or_one = if std == 0.0 { 1.0 } else { std };
            numeric_data.push(values.into_iter().map(|v| (v - mean) / std_or_one).collect::<Vec<_>>());
            numeric.push(NumericColumn { feature, mean, std });
        }

        let categorical: Vec<CategoricalColumn> = categorical_features
            .into_iter()
            .map(|feature| {
                let levels: BTreeSet<&str> =
                    dataset.iter().map(|r| categorical_value(r, feature).unwrap_or(UNKNOWN)).collect();
                CategoricalColumn { feature, levels: levels.into_iter().map(str::to_string).collect() }
            })
            .collect();

        let funding: Option<Vec<Vec<String>>> = use_funding.then(|| dataset.iter().map(funding_tags).collect());
        let funding_vocab = funding.as_ref().map(|all| {
            all.iter().flatten().cloned().collect::<BTreeSet<_>>().into_iter().collect::<Vec<_>>()
        });

        let rows = dataset
            .iter()
            .enumerate()
            .map(|(i, record)| {
                let mut row: Vec<f64> = numeric_data.iter().map(|column| column[i]).collect();
                for column in &categorical {
                    column.one_hot(Some(categorical_value(record, column.feature).unwrap_or(UNKNOWN)), &mut row);
                }
                if let (Some(vocab), Some(tags)) = (&funding_vocab, &funding) {
                    multi_hot(vocab, &tags[i], &mut row);
                }
                row
            })
            .collect();

        tracing::info!(
            "recommender fitted on {} projects with features {:?}",
            dataset.len(),
            features.iter().map(|f| f.key()).collect::<Vec<_>>()
        );
        Self { dataset, numeric, categorical, funding_vocab, rows }
    }

    pub fn dimension(&self) -> usize {
        self.numeric.len()
            + self.categorical.iter().map(|c| c.levels.len()).sum::<usize>()
            + self.funding_vocab.as_ref().map_or(0, Vec::len)
    }

    /// Embeds the user's preferences. Missing numerics sit at the mean, unknown levels
    /// and tags contribute nothing.
    pub fn user_vector(&self, preferences: &BTreeMap<String, PreferenceValue>) -> Result<Vec<f64>, RecommenderError> {
        let mut vector = Vec::with_capacity(self.dimension());
        for column in &self.numeric {
            let value = match preferences.get(column.feature.key()) {
                Some(pref) => pref.as_number(column.feature)?,
                None => None,
            };
            vector.push(value.map_or(0.0, |v| column.scale(v)));
        }
        for column in &self.categorical {
            let level = preferences.get(column.feature.key()).and_then(PreferenceValue::as_level);
            column.one_hot(level.as_deref(), &mut vector);
        }
        if let Some(vocab) = &self.funding_vocab {
            let tags = preferences
                .get(RecommenderFeature::SourcesOfFunding.key())
                .map(PreferenceValue::as_tags)
                .unwrap_or_default();
            multi_hot(vocab, &tags, &mut vector);
        }
        Ok(vector)
    }

    /// Top `k` projects by descending similarity. Ties keep dataset order.
    pub fn recommend(
        &self,
        preferences: &BTreeMap<String, PreferenceValue>,
        k: usize,
    ) -> Result<Vec<RecommendedProject>, RecommenderError> {
        let user = self.user_vector(preferences)?;
        let mut scored: Vec<(usize, f64)> =
            self.rows.iter().enumerate().map(|(i, row)| (i, cosine_similarity(row, &user))).collect();
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));

        Ok(scored
            .into_iter()
            .take(k)
            .map(|(i, similarity)| {
                let record = &self.dataset[i];
                RecommendedProject { record: record.clone(), duration: record.duration(), similarity }
            })
            .collect())
    }
}

/// Cosine similarity where a zero norm is treated as 1.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let norm = |v: &[f64]| {
        let n = v.iter().map(|x| x * x).sum::<f64>().sqrt();
        if n == 0.0 { 1.0 } else { n }
    };
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    dot / (norm(a) * norm(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(name: &str, country: &str, cost: &str, funding: &str) -> ProjectRecord {
        ProjectRecord {
            intervention_name: Some(name.into()),
            country: Some(country.into()),
            total_cost: Some(cost.into()),
            sources_of_funding: Some(funding.into()),
            begin_year: Some("2010".into()),
            end_year: Some("2015".into()),
            ..Default::default()
        }
    }

    fn sample() -> Vec<ProjectRecord> {
        vec![
            project("A", "France", "1000", "EU; City"),
            project("B", "Germany", "1000000", "Private"),
            project("C", "France", "Unknown", "Unknown"),
        ]
    }

    fn prefs(pairs: &[(&str, PreferenceValue)]) -> BTreeMap<String, PreferenceValue> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
    }

    #[test]
    fn median_of_even_and_odd_sets() {
        assert_eq!(median(&mut [3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&mut [4.0, 1.0]), Some(2.5));
        assert_eq!(median(&mut []), None);
    }

    #[test]
    fn cosine_handles_zero_vectors() {
        assert!((cosine_similarity(&[1.0, 0.0], &[2.0, 0.0]) - 1.0).abs() < 1e-12);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
    }

    #[test]
    fn categorical_match_ranks_first() {
        let data = sample();
        let model = Recommender::fit(&data, &[RecommenderFeature::Country]);
        assert_eq!(model.dimension(), 2);
        let ranked = model
            .recommend(&prefs(&[("country", PreferenceValue::Text("Germany".into()))]), 3)
            .unwrap();
        assert_eq!(ranked[0].record.display_name(), "B");
        assert!((ranked[0].similarity - 1.0).abs() < 1e-12);
        // remaining ties stay in dataset order
        assert_eq!(ranked[1].record.display_name(), "A");
        assert_eq!(ranked[2].record.display_name(), "C");
    }

    #[test]
    fn funding_vocabulary_is_sorted_and_skips_unknown() {
        let data = sample();
        let model = Recommender::fit(&data, &[RecommenderFeature::SourcesOfFunding]);
        assert_eq!(
            model.funding_vocab.as_deref(),
            Some(&["City".to_string(), "EU".to_string(), "Private".to_string()][..])
        );
        let ranked = model
            .recommend(&prefs(&[("sources_of_funding", PreferenceValue::Text("private".into()))]), 3)
            .unwrap();
        // tags are case sensitive, so nothing matches
        assert!(ranked.iter().all(|r| r.similarity == 0.0));
    }

    #[test]
    fn numeric_preference_uses_log_scaled_cost() {
        let data = sample();
        let model = Recommender::fit(&data, &[RecommenderFeature::TotalCost]);
        let ranked = model
            .recommend(&prefs(&[("total_cost", PreferenceValue::Number(2_000_000.0))]), 3)
            .unwrap();
        // A is the only project cheaper than the dataset mean
        assert_eq!(ranked[2].record.display_name(), "A");
        assert!(ranked[2].similarity < 0.0);
        assert_eq!(ranked[0].duration, Some(5.0));
    }

    #[test]
    fn text_in_numeric_preference_is_rejected() {
        let data = sample();
        let model = Recommender::fit(&data, &[RecommenderFeature::Duration]);
        let err = model.recommend(&prefs(&[("duration", PreferenceValue::Text("long".into()))]), 3);
        assert_eq!(err, Err(RecommenderError::NonNumericPreference("duration".into())));
    }

    #[test]
    fn k_limits_results() {
        let data = sample();
        let model = Recommender::fit(&data, &RecommenderFeature::ALL);
        assert_eq!(model.recommend(&BTreeMap::new(), 2).unwrap().len(), 2);
    }
}
