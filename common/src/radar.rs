//! Normalization of compared projects onto the radar chart axes.
//!
//! Axis maxima come from the whole dataset and are computed once at load. Cost is
//! log10-scaled before both the max and the per-record ratio.

use serde::{Deserialize, Serialize};

use crate::project::{NumericField, ProjectRecord};

/// Extra room above the largest value so no point sits on the rim.
pub const RADAR_HEADROOM: f64 = 1.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RadarAxis {
    NbsArea,
    TotalCost,
    Duration,
}

impl RadarAxis {
    pub const ALL: [RadarAxis; 3] = [RadarAxis::NbsArea, RadarAxis::TotalCost, RadarAxis::Duration];

    pub fn label(&self) -> &'static str {
        match self {
            RadarAxis::NbsArea => "NbS Area (m2)",
            RadarAxis::TotalCost => "Total Cost (€)",
            RadarAxis::Duration => "Duration",
        }
    }

    fn raw(&self, record: &ProjectRecord) -> f64 {
        match self {
            RadarAxis::NbsArea => record.number(NumericField::NbsArea).unwrap_or(0.0),
            RadarAxis::TotalCost => record.number(NumericField::TotalCost).unwrap_or(0.0),
            RadarAxis::Duration => record.duration().unwrap_or(0.0),
        }
    }

    fn scaled(&self, record: &ProjectRecord) -> f64 {
        let raw = self.raw(record);
        match self {
            RadarAxis::TotalCost => raw.max(1.0).log10(),
            _ => raw,
        }
    }
}

/// Per-axis maxima (headroom included) over the full dataset.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RadarMaxima {
    pub nbs_area: f64,
    pub total_cost: f64,
    pub duration: f64,
}

impl RadarMaxima {
    pub fn compute(dataset: &[ProjectRecord]) -> Self {
        let max_of = |axis: RadarAxis| {
            dataset.iter().map(|r| axis.raw(r)).fold(None, |acc: Option<f64>, v| {
                Some(acc.map_or(v, |m| m.max(v)))
            })
        };
        let area = max_of(RadarAxis::NbsArea).unwrap_or(0.0);
        let duration = max_of(RadarAxis::Duration).unwrap_or(0.0);
        let cost = max_of(RadarAxis::TotalCost).unwrap_or(1.0).max(1.0);
        Self {
            nbs_area: area * RADAR_HEADROOM,
            total_cost: cost.log10() * RADAR_HEADROOM,
            duration: duration * RADAR_HEADROOM,
        }
    }

    pub fn get(&self, axis: RadarAxis) -> f64 {
        match axis {
            RadarAxis::NbsArea => self.nbs_area,
            RadarAxis::TotalCost => self.total_cost,
            RadarAxis::Duration => self.duration,
        }
    }

    /// Ratio of the record's axis value to the axis max. A zero max divides by 1.
    pub fn normalize(&self, record: &ProjectRecord, axis: RadarAxis) -> f64 {
        let max = self.get(axis);
        let max = if max == 0.0 { 1.0 } else { max };
        axis.scaled(record) / max
    }

    pub fn series(&self, record: &ProjectRecord) -> RadarSeries {
        RadarSeries {
            name: record.display_name().to_string(),
            values: RadarAxis::ALL
                .iter()
                .map(|&axis| RadarValue { axis, raw: axis.raw(record), normalized: self.normalize(record, axis) })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarValue {
    pub axis: RadarAxis,
    pub raw: f64,
    pub normalized: f64,
}

/// One polygon on the radar chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarSeries {
    pub name: String,
    pub values: Vec<RadarValue>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(area: &str, cost: &str, begin: &str, end: &str) -> ProjectRecord {
        ProjectRecord {
            intervention_name: Some(format!("p-{area}")),
            nbs_area: Some(area.into()),
            total_cost: Some(cost.into()),
            begin_year: Some(begin.into()),
            end_year: Some(end.into()),
            ..Default::default()
        }
    }

    #[test]
    fn area_is_scaled_against_dataset_max_with_headroom() {
        let data = vec![project("1000", "10", "2000", "2010"), project("500", "1000", "2000", "2005")];
        let maxima = RadarMaxima::compute(&data);
        let ratio = maxima.normalize(&data[1], RadarAxis::NbsArea);
        assert!((ratio - 500.0 / (1000.0 * 1.1)).abs() < 1e-12);
        assert!((ratio - 0.4545).abs() < 1e-4);
    }

    #[test]
    fn cost_is_log_scaled() {
        let data = vec![project("1", "1000", "2000", "2001"), project("1", "10", "2000", "2001")];
        let maxima = RadarMaxima::compute(&data);
        assert!((maxima.total_cost - 3.0 * 1.1).abs() < 1e-9);
        let ratio = maxima.normalize(&data[1], RadarAxis::TotalCost);
        assert!((ratio - 1.0 / 3.3).abs() < 1e-9);
    }

    #[test]
    fn missing_values_count_as_zero() {
        let data = vec![project("Unknown", "Unknown", "Unknown", "2001")];
        let maxima = RadarMaxima::compute(&data);
        let series = maxima.series(&data[0]);
        assert!(series.values.iter().all(|v| v.normalized == 0.0));
    }
}
