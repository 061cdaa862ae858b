//! Project records as loaded from the NbS dataset.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Placeholder written by the data cleaning step for absent categorical values.
pub const UNKNOWN: &str = "Unknown";

/// Dataset columns in display order.
pub const COLUMNS: [&str; 15] = [
    "intervention_name",
    "country",
    "city",
    "begin_year",
    "end_year",
    "status",
    "spatial_scale",
    "nbs_area",
    "previous_area_type",
    "nbs_type",
    "total_cost",
    "sources_of_funding",
    "environmental_impacts",
    "economic_impacts",
    "link",
];

/// One row of the dataset. Every attribute is optional text; numeric columns keep
/// the raw cell so that coercion failures stay observable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ProjectRecord {
    pub intervention_name: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub begin_year: Option<String>,
    pub end_year: Option<String>,
    pub status: Option<String>,
    pub spatial_scale: Option<String>,
    pub nbs_area: Option<String>,
    pub previous_area_type: Option<String>,
    pub nbs_type: Option<String>,
    pub total_cost: Option<String>,
    pub sources_of_funding: Option<String>,
    pub environmental_impacts: Option<String>,
    pub economic_impacts: Option<String>,
    pub link: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TextField {
    InterventionName,
    Country,
    City,
    Status,
    SpatialScale,
    PreviousAreaType,
    SourcesOfFunding,
    Link,
}

/// Fields holding several `;` delimited categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TagField {
    NbsType,
    EnvironmentalImpacts,
    EconomicImpacts,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NumericField {
    BeginYear,
    EndYear,
    NbsArea,
    TotalCost,
}

impl ProjectRecord {
    /// Builds a record from a header-keyed row. Empty cells are treated as absent,
    /// unknown columns are ignored.
    pub fn from_row(row: &HashMap<String, String>) -> Self {
        let cell = |key: &str| {
            row.get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(|v| v.to_string())
        };
        // keep in sync with COLUMNS
        Self {
            intervention_name: cell("intervention_name"),
            country: cell("country"),
            city: cell("city"),
            begin_year: cell("begin_year"),
            end_year: cell("end_year"),
            status: cell("status"),
            spatial_scale: cell("spatial_scale"),
            nbs_area: cell("nbs_area"),
            previous_area_type: cell("previous_area_type"),
            nbs_type: cell("nbs_type"),
            total_cost: cell("total_cost"),
            sources_of_funding: cell("sources_of_funding"),
            environmental_impacts: cell("environmental_impacts"),
            economic_impacts: cell("economic_impacts"),
            link: cell("link"),
        }
    }

    /// Raw cell by CSV column name.
    pub fn column(&self, name: &str) -> Option<&str> {
        let value = match name {
            "intervention_name" => &self.intervention_name,
            "country" => &self.country,
            "city" => &self.city,
            "begin_year" => &self.begin_year,
            "end_year" => &self.end_year,
            "status" => &self.status,
            "spatial_scale" => &self.spatial_scale,
            "nbs_area" => &self.nbs_area,
            "previous_area_type" => &self.previous_area_type,
            "nbs_type" => &self.nbs_type,
            "total_cost" => &self.total_cost,
            "sources_of_funding" => &self.sources_of_funding,
            "environmental_impacts" => &self.environmental_impacts,
            "economic_impacts" => &self.economic_impacts,
            "link" => &self.link,
            _ => return None,
        };
        value.as_deref()
    }

    /// Identity used by the comparison set. Not guaranteed unique in the data.
    pub fn id(&self) -> Option<&str> {
        self.intervention_name.as_deref()
    }

    pub fn display_name(&self) -> &str {
        self.intervention_name.as_deref().unwrap_or("Unnamed project")
    }

    pub fn text(&self, field: TextField) -> Option<&str> {
        let value = match field {
            TextField::InterventionName => &self.intervention_name,
            TextField::Country => &self.country,
            TextField::City => &self.city,
            TextField::Status => &self.status,
            TextField::SpatialScale => &self.spatial_scale,
            TextField::PreviousAreaType => &self.previous_area_type,
            TextField::SourcesOfFunding => &self.sources_of_funding,
            TextField::Link => &self.link,
        };
        value.as_deref()
    }

    pub fn raw_tags(&self, field: TagField) -> Option<&str> {
        let value = match field {
            TagField::NbsType => &self.nbs_type,
            TagField::EnvironmentalImpacts => &self.environmental_impacts,
            TagField::EconomicImpacts => &self.economic_impacts,
        };
        value.as_deref()
    }

    /// Individual tags of a multi-tag field. Missing and `Unknown` fields have no tags.
    pub fn tags(&self, field: TagField) -> impl Iterator<Item = &str> {
        self.raw_tags(field)
            .filter(|raw| *raw != UNKNOWN)
            .into_iter()
            .flat_map(|raw| raw.split(';'))
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
    }

    pub fn raw_number(&self, field: NumericField) -> Option<&str> {
        let value = match field {
            NumericField::BeginYear => &self.begin_year,
            NumericField::EndYear => &self.end_year,
            NumericField::NbsArea => &self.nbs_area,
            NumericField::TotalCost => &self.total_cost,
        };
        value.as_deref()
    }

    pub fn number(&self, field: NumericField) -> Option<f64> {
        self.raw_number(field).and_then(coerce_number)
    }

    /// Years must coerce to a whole number.
    pub fn year(&self, field: NumericField) -> Option<i32> {
        self.number(field).and_then(|y| {
            if y.fract() == 0.0 && y >= i32::MIN as f64 && y <= i32::MAX as f64 {
                Some(y as i32)
            } else {
                None
            }
        })
    }

    /// `end_year - begin_year`, when both coerce.
    pub fn duration(&self) -> Option<f64> {
        Some(self.number(NumericField::EndYear)? - self.number(NumericField::BeginYear)?)
    }

    /// Text matched by the free-text search facet: name, country, city, nbs type,
    /// previous area and funding, absent fields skipped, lowercased.
    pub fn search_text(&self) -> String {
        [
            &self.intervention_name,
            &self.country,
            &self.city,
            &self.nbs_type,
            &self.previous_area_type,
            &self.sources_of_funding,
        ]
        .into_iter()
        .filter_map(|v| v.as_deref())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
    }
}

/// Lenient numeric coercion of a raw cell. Anything that is not a finite number is `None`.
pub fn coerce_number(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Coordinates of a `(city, country)` pair, used to place map glyphs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityCoordinate {
    pub city: String,
    pub country: String,
    pub latitude: f64,
    #[serde(alias = "longtitude")]
    pub longitude: f64,
}
