//! Types exchanged with the recommender endpoints, and the client-side request bookkeeping.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::project::ProjectRecord;

pub const MIN_K: usize = 3;
pub const MAX_K: usize = 10;
pub const DEFAULT_K: usize = 5;
pub const NO_RECOMMENDATIONS_MESSAGE: &str = "No recommendations returned.";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecommenderError {
    #[error("unknown recommender feature: {0}")]
    UnknownFeature(String),
    #[error("preference for {0} must be a number")]
    NonNumericPreference(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureKind {
    Categorical,
    Numeric,
    Multitag,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommenderFeature {
    Country,
    Status,
    Duration,
    NbsArea,
    PreviousAreaType,
    TotalCost,
    SourcesOfFunding,
}

impl RecommenderFeature {
    pub const ALL: [RecommenderFeature; 7] = [
        RecommenderFeature::Country,
        RecommenderFeature::Status,
        RecommenderFeature::Duration,
        RecommenderFeature::NbsArea,
        RecommenderFeature::PreviousAreaType,
        RecommenderFeature::TotalCost,
        RecommenderFeature::SourcesOfFunding,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            RecommenderFeature::Country => "country",
            RecommenderFeature::Status => "status",
            RecommenderFeature::Duration => "duration",
            RecommenderFeature::NbsArea => "nbs_area",
            RecommenderFeature::PreviousAreaType => "previous_area_type",
            RecommenderFeature::TotalCost => "total_cost",
            RecommenderFeature::SourcesOfFunding => "sources_of_funding",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RecommenderFeature::Country => "Country",
            RecommenderFeature::Status => "Status (present stage)",
            RecommenderFeature::Duration => "Duration (end_year - begin_year)",
            RecommenderFeature::NbsArea => "NbS Area (m²)",
            RecommenderFeature::PreviousAreaType => "Area Before Intervention",
            RecommenderFeature::TotalCost => "Total Cost",
            RecommenderFeature::SourcesOfFunding => "Sources of Funding",
        }
    }

    pub fn kind(&self) -> FeatureKind {
        match self {
            RecommenderFeature::Country | RecommenderFeature::Status | RecommenderFeature::PreviousAreaType => {
                FeatureKind::Categorical
            }
            RecommenderFeature::Duration | RecommenderFeature::NbsArea | RecommenderFeature::TotalCost => {
                FeatureKind::Numeric
            }
            RecommenderFeature::SourcesOfFunding => FeatureKind::Multitag,
        }
    }

    /// Heavy-tailed numerics are compressed with `ln(1 + x)` before scaling.
    pub fn uses_log1p(&self) -> bool {
        matches!(self, RecommenderFeature::NbsArea | RecommenderFeature::TotalCost)
    }
}

impl fmt::Display for RecommenderFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for RecommenderFeature {
    type Err = RecommenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RecommenderFeature::ALL
            .into_iter()
            .find(|f| f.key() == s)
            .ok_or_else(|| RecommenderError::UnknownFeature(s.to_string()))
    }
}

/// Resolves requested keys, keeping request order and dropping repeats. No keys means
/// every feature.
pub fn parse_features(keys: &[String]) -> Result<Vec<RecommenderFeature>, RecommenderError> {
    if keys.is_empty() {
        return Ok(RecommenderFeature::ALL.to_vec());
    }
    let mut features = Vec::with_capacity(keys.len());
    for key in keys {
        let feature = key.parse::<RecommenderFeature>()?;
        if !features.contains(&feature) {
            features.push(feature);
        }
    }
    Ok(features)
}

/// A user's stated preference for one feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PreferenceValue {
    Number(f64),
    Text(String),
    Tags(Vec<String>),
}

impl PreferenceValue {
    /// Numeric reading of the preference. Blank text counts as unset.
    pub fn as_number(&self, feature: RecommenderFeature) -> Result<Option<f64>, RecommenderError> {
        match self {
            PreferenceValue::Number(n) => Ok(Some(*n)),
            PreferenceValue::Text(t) if t.trim().is_empty() => Ok(None),
            PreferenceValue::Text(t) => t
                .trim()
                .parse::<f64>()
                .map(Some)
                .map_err(|_| RecommenderError::NonNumericPreference(feature.key().to_string())),
            PreferenceValue::Tags(_) => Err(RecommenderError::NonNumericPreference(feature.key().to_string())),
        }
    }

    /// Categorical reading. Numbers are rendered as text, tag lists have no level.
    pub fn as_level(&self) -> Option<String> {
        match self {
            PreferenceValue::Text(t) if !t.is_empty() => Some(t.clone()),
            PreferenceValue::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Funding tags, from either a list or a delimited string.
    pub fn as_tags(&self) -> Vec<String> {
        match self {
            PreferenceValue::Tags(tags) => tags
                .iter()
                .map(|t| t.trim())
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect(),
            PreferenceValue::Text(text) => split_multivalue(text),
            PreferenceValue::Number(_) => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RecommendRequest {
    #[serde(default)]
    pub selected_features: Vec<String>,
    #[serde(default)]
    pub preferences: BTreeMap<String, PreferenceValue>,
    /// Result count; the server default applies when absent.
    #[serde(default)]
    pub k: Option<i64>,
}

pub fn clamp_k(k: i64) -> usize {
    k.clamp(MIN_K as i64, MAX_K as i64) as usize
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NumericExtent {
    pub min: f64,
    pub max: f64,
}

/// Choices offered by the preference form.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RsMeta {
    pub categorical: BTreeMap<String, Vec<String>>,
    pub numeric_ranges: BTreeMap<String, NumericExtent>,
    pub funding_tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendedProject {
    #[serde(flatten)]
    pub record: ProjectRecord,
    pub duration: Option<f64>,
    pub similarity: f64,
}

impl RecommendedProject {
    /// `(label, value)` lines shown on a result card, skipping empty fields.
    pub fn details(&self) -> Vec<(&'static str, String)> {
        let r = &self.record;
        let numeric = |raw: Option<&str>| raw.and_then(crate::project::coerce_number).map(format_number);
        [
            ("Status", r.status.clone()),
            ("Total cost (€)", numeric(r.total_cost.as_deref())),
            ("NbS area (m²)", numeric(r.nbs_area.as_deref())),
            ("Duration (years)", self.duration.map(format_number)),
            ("Area before", r.previous_area_type.clone()),
            ("Funding", r.sources_of_funding.clone()),
            ("Spatial scale", r.spatial_scale.clone()),
            ("NbS type", r.nbs_type.clone()),
        ]
        .into_iter()
        .filter_map(|(label, value)| value.filter(|v| !v.trim().is_empty()).map(|v| (label, v)))
        .collect()
    }

    pub fn location(&self) -> String {
        match (self.record.city.as_deref(), self.record.country.as_deref()) {
            (Some(city), Some(country)) => format!("{city}, {country}"),
            (Some(only), None) | (None, Some(only)) => only.to_string(),
            (None, None) => String::new(),
        }
    }
}

/// Splits a funding cell on newlines, `;` or `,`. `unknown` in any case means no tags.
pub fn split_multivalue(text: &str) -> Vec<String> {
    let text = text.trim();
    if text.is_empty() || text.eq_ignore_ascii_case("unknown") {
        return Vec::new();
    }
    text.split(['\n', ';', ','])
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Thousands-separated with at most three decimals.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }
    let rounded = format!("{:.3}", value.abs());
    let (int_part, frac_part) = rounded.split_once('.').unwrap_or((rounded.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    let sign = if value < 0.0 && (int_part != "0" || !frac_part.is_empty()) { "-" } else { "" };
    if frac_part.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac_part}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket(u64);

/// Issues tickets for in-flight recommendation requests. Only the most recently issued
/// ticket may apply its response.
#[derive(Debug, Clone, Default)]
pub struct RequestGate {
    latest: u64,
}

impl RequestGate {
    pub fn issue(&mut self) -> RequestTicket {
        self.latest += 1;
        RequestTicket(self.latest)
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        ticket.0 == self.latest
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum RecommendationsView {
    #[default]
    Idle,
    Loading,
    Ready(Vec<RecommendedProject>),
    Empty,
    Failed(String),
}

impl RecommendationsView {
    pub fn from_result(result: Result<Vec<RecommendedProject>, String>) -> Self {
        match result {
            Ok(items) if items.is_empty() => RecommendationsView::Empty,
            Ok(items) => RecommendationsView::Ready(items),
            Err(message) => RecommendationsView::Failed(message),
        }
    }

    /// Applies a response only when its ticket is still the latest one.
    pub fn settle(
        &mut self,
        gate: &RequestGate,
        ticket: RequestTicket,
        result: Result<Vec<RecommendedProject>, String>,
    ) -> bool {
        if !gate.is_current(ticket) {
            tracing::debug!(?ticket, "stale recommendation response dropped");
            return false;
        }
        *self = Self::from_result(result);
        true
    }

    pub fn message(&self) -> Option<&'static str> {
        match self {
            RecommendationsView::Empty | RecommendationsView::Failed(_) => Some(NO_RECOMMENDATIONS_MESSAGE),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feature_keys_round_trip_and_reject_unknown() {
        for feature in RecommenderFeature::ALL {
            assert_eq!(feature.key().parse::<RecommenderFeature>(), Ok(feature));
        }
        assert_eq!(
            "budget".parse::<RecommenderFeature>(),
            Err(RecommenderError::UnknownFeature("budget".into()))
        );
    }

    #[test]
    fn empty_feature_list_selects_everything() {
        assert_eq!(parse_features(&[]).unwrap().len(), 7);
        let picked = parse_features(&["total_cost".into(), "country".into(), "total_cost".into()]).unwrap();
        assert_eq!(picked, vec![RecommenderFeature::TotalCost, RecommenderFeature::Country]);
    }

    #[test]
    fn k_is_clamped() {
        assert_eq!(clamp_k(1), 3);
        assert_eq!(clamp_k(7), 7);
        assert_eq!(clamp_k(99), 10);
    }

    #[test]
    fn request_defaults_when_fields_missing() {
        let request: RecommendRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request, RecommendRequest::default());
        let request: RecommendRequest = serde_json::from_str(
            r#"{"selected_features":["country"],"preferences":{"country":"France","total_cost":1000,"sources_of_funding":["EU"]},"k":4}"#,
        )
        .unwrap();
        assert_eq!(request.k, Some(4));
        assert_eq!(request.preferences["country"], PreferenceValue::Text("France".into()));
        assert_eq!(request.preferences["total_cost"], PreferenceValue::Number(1000.0));
        assert_eq!(request.preferences["sources_of_funding"].as_tags(), vec!["EU"]);
    }

    #[test]
    fn multivalue_split() {
        assert_eq!(split_multivalue("EU; City,\nPrivate"), vec!["EU", "City", "Private"]);
        assert!(split_multivalue("UNKNOWN").is_empty());
        assert!(split_multivalue("  ").is_empty());
    }

    #[test]
    fn numeric_preferences() {
        let f = RecommenderFeature::TotalCost;
        assert_eq!(PreferenceValue::Text(" 12.5 ".into()).as_number(f), Ok(Some(12.5)));
        assert_eq!(PreferenceValue::Text("".into()).as_number(f), Ok(None));
        assert!(PreferenceValue::Text("lots".into()).as_number(f).is_err());
    }

    #[test]
    fn number_formatting() {
        assert_eq!(format_number(1234567.0), "1,234,567");
        assert_eq!(format_number(1234.5), "1,234.5");
        assert_eq!(format_number(0.12345), "0.123");
        assert_eq!(format_number(-1000.0), "-1,000");
        assert_eq!(format_number(f64::NAN), "");
    }

    #[test]
    fn last_request_wins() {
        let mut gate = RequestGate::default();
        let mut view = RecommendationsView::Loading;
        let first = gate.issue();
        let second = gate.issue();
        assert!(view.settle(&gate, second, Ok(vec![])));
        assert_eq!(view, RecommendationsView::Empty);
        assert!(!view.settle(&gate, first, Err("timeout".into())));
        assert_eq!(view.message(), Some(NO_RECOMMENDATIONS_MESSAGE));
    }

    #[test]
    fn failures_render_like_empty_results() {
        let view = RecommendationsView::from_result(Err("boom".into()));
        assert_eq!(view.message(), Some(NO_RECOMMENDATIONS_MESSAGE));
        assert_eq!(RecommendationsView::Idle.message(), None);
    }
}
