//! Aggregations feeding the overview charts and the map layer.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::filter_state::NumericRange;
use crate::project::{CityCoordinate, NumericField, ProjectRecord, UNKNOWN};

pub const TOP_COUNTRIES: usize = 15;
pub const COST_BINS: usize = 10;
pub const OTHER_COUNTRIES: &str = "Other";
pub const EMPTY_RESULTS_MESSAGE: &str = "No project found for the selected filters.";

pub fn results_header(count: usize) -> String {
    format!("{count} Project(s)")
}

/// Counts in first-seen key order.
fn count_first_seen<'a, I>(keys: I) -> Vec<(String, u64)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut counts: Vec<(String, u64)> = Vec::new();
    for key in keys {
        match index.get(key) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(key, counts.len());
                counts.push((key.to_string(), 1));
            }
        }
    }
    counts
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryCount {
    pub country: String,
    pub count: u64,
    pub is_other: bool,
}

/// Projects per country, largest first. Past `top` groups the remainder is summed
/// into a trailing `Other` bar.
pub fn country_counts<'a, I>(records: I, top: usize) -> Vec<CountryCount>
where
    I: IntoIterator<Item = &'a ProjectRecord>,
{
    let mut counts = count_first_seen(records.into_iter().map(|r| r.country.as_deref().unwrap_or(UNKNOWN)));
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    let mut bars: Vec<CountryCount> = counts
        .iter()
        .take(top)
        .map(|(country, count)| CountryCount { country: country.clone(), count: *count, is_other: false })
        .collect();
    if counts.len() > top {
        bars.push(CountryCount {
            country: OTHER_COUNTRIES.to_string(),
            count: counts[top..].iter().map(|(_, c)| c).sum(),
            is_other: true,
        });
    }
    bars
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub x0: f64,
    pub x1: f64,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostHistogram {
    pub domain: NumericRange,
    pub bins: Vec<HistogramBin>,
}

/// Histogram of the positive total costs. `None` when no record has one.
pub fn cost_histogram<'a, I>(records: I, bins: usize) -> Option<CostHistogram>
where
    I: IntoIterator<Item = &'a ProjectRecord>,
{
    let values: Vec<f64> = records
        .into_iter()
        .filter_map(|r| r.number(NumericField::TotalCost))
        .filter(|v| *v > 0.0)
        .collect();
    let first = *values.first()?;
    let (lo, hi) = values.iter().fold((first, first), |(lo, hi), v| (lo.min(*v), hi.max(*v)));
    let count = bins as f64;
    let domain = nice_domain(lo, hi, count);

    let thresholds: Vec<f64> = ticks(domain.min, domain.max, count)
        .into_iter()
        .filter(|t| *t > domain.min && *t < domain.max)
        .collect();
    let mut edges = Vec::with_capacity(thresholds.len() + 2);
    edges.push(domain.min);
    edges.extend(thresholds.iter().copied());
    edges.push(domain.max);

    let mut histogram: Vec<HistogramBin> = edges
        .windows(2)
        .map(|w| HistogramBin { x0: w[0], x1: w[1], count: 0 })
        .collect();
    for value in values {
        if value < domain.min || value > domain.max {
            continue;
        }
        let index = thresholds.partition_point(|t| *t <= value);
        histogram[index].count += 1;
    }
    Some(CostHistogram { domain, bins: histogram })
}

/// Tick layout in the usual 1-2-5 progression. `inverse` marks sub-unit steps,
/// kept as an integer reciprocal so tick values stay exact.
#[derive(Debug, Clone, Copy, PartialEq)]
struct TickSpec {
    first: f64,
    last: f64,
    inc: f64,
    inverse: bool,
}

impl TickSpec {
    fn value(&self, i: f64) -> f64 {
        if self.inverse { i / self.inc } else { i * self.inc }
    }
}

fn tick_spec(start: f64, stop: f64, count: f64) -> Option<TickSpec> {
    let step = (stop - start) / count.max(0.0);
    if !step.is_finite() || step <= 0.0 {
        return None;
    }
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    let spec = if power < 0.0 {
        let inc = 10f64.powf(-power) / factor;
        let mut first = (start * inc).round();
        let mut last = (stop * inc).round();
        if first / inc < start {
            first += 1.0;
        }
        if last / inc > stop {
            last -= 1.0;
        }
        TickSpec { first, last, inc, inverse: true }
    } else {
        let inc = 10f64.powf(power) * factor;
        let mut first = (start / inc).round();
        let mut last = (stop / inc).round();
        if first * inc < start {
            first += 1.0;
        }
        if last * inc > stop {
            last -= 1.0;
        }
        TickSpec { first, last, inc, inverse: false }
    };
    if spec.last < spec.first && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    Some(spec)
}

/// Round tick values inside `[start, stop]`, approximately `count` of them.
pub fn ticks(start: f64, stop: f64, count: f64) -> Vec<f64> {
    if start == stop {
        return vec![start];
    }
    let Some(spec) = tick_spec(start, stop, count) else {
        return Vec::new();
    };
    if spec.last < spec.first {
        return Vec::new();
    }
    let n = (spec.last - spec.first) as usize;
    (0..=n).map(|k| spec.value(spec.first + k as f64)).collect()
}

/// Widens `[start, stop]` outwards to round tick values.
pub fn nice_domain(start: f64, stop: f64, count: f64) -> NumericRange {
    let (mut start, mut stop) = (start, stop);
    let mut previous: Option<(f64, bool)> = None;
    for _ in 0..10 {
        let Some(spec) = tick_spec(start, stop, count) else {
            break;
        };
        if previous == Some((spec.inc, spec.inverse)) {
            break;
        }
        if spec.inverse {
            start = (start * spec.inc).floor() / spec.inc;
            stop = (stop * spec.inc).ceil() / spec.inc;
        } else {
            start = (start / spec.inc).floor() * spec.inc;
            stop = (stop / spec.inc).ceil() * spec.inc;
        }
        previous = Some((spec.inc, spec.inverse));
    }
    NumericRange::new(start, stop)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearCount {
    pub year: i32,
    pub count: u64,
}

/// Projects per start year, ascending. Records without a numeric year are skipped.
pub fn projects_by_year<'a, I>(records: I) -> Vec<YearCount>
where
    I: IntoIterator<Item = &'a ProjectRecord>,
{
    let mut counts = BTreeMap::new();
    for year in records.into_iter().filter_map(|r| r.year(NumericField::BeginYear)) {
        *counts.entry(year).or_insert(0) += 1;
    }
    counts.into_iter().map(|(year, count)| YearCount { year, count }).collect()
}

/// Projects located in one city, placed by its coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct CityGroup<'a> {
    pub city: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    pub projects: Vec<&'a ProjectRecord>,
}

/// Groups records by `(city, country)` in first-seen order. Pairs with no known
/// coordinate are left off the map.
pub fn group_by_city<'a, I>(records: I, coordinates: &[CityCoordinate]) -> Vec<CityGroup<'a>>
where
    I: IntoIterator<Item = &'a ProjectRecord>,
{
    let lookup: HashMap<(&str, &str), &CityCoordinate> = coordinates
        .iter()
        .map(|c| ((c.city.as_str(), c.country.as_str()), c))
        .collect();

    let mut index: HashMap<(&'a str, &'a str), usize> = HashMap::new();
    let mut groups: Vec<CityGroup<'a>> = Vec::new();
    let mut dropped = 0usize;
    for record in records {
        let (Some(city), Some(country)) = (record.city.as_deref(), record.country.as_deref()) else {
            dropped += 1;
            continue;
        };
        if let Some(&i) = index.get(&(city, country)) {
            groups[i].projects.push(record);
            continue;
        }
        let Some(coord) = lookup.get(&(city, country)) else {
            dropped += 1;
            continue;
        };
        index.insert((city, country), groups.len());
        groups.push(CityGroup {
            city: city.to_string(),
            country: country.to_string(),
            latitude: coord.latitude,
            longitude: coord.longitude,
            projects: vec![record],
        });
    }
    if dropped > 0 {
        tracing::debug!(dropped, groups = groups.len(), "records without coordinates left off the map");
    }
    groups
}

/// Slice counts of one column within a city group, missing values as `Unknown`.
pub fn category_breakdown(group: &[&ProjectRecord], column: &str) -> Vec<(String, u64)> {
    count_first_seen(group.iter().map(|r| r.column(column).unwrap_or(UNKNOWN)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(country: Option<&str>, city: Option<&str>) -> ProjectRecord {
        ProjectRecord {
            country: country.map(String::from),
            city: city.map(String::from),
            ..Default::default()
        }
    }

    fn costing(cost: &str) -> ProjectRecord {
        ProjectRecord { total_cost: Some(cost.into()), ..Default::default() }
    }

    #[test]
    fn country_counts_fold_tail_into_other() {
        let mut data = Vec::new();
        for (country, n) in [("A", 1), ("B", 3), ("C", 2), ("D", 1)] {
            data.extend((0..n).map(|_| at(Some(country), None)));
        }
        data.push(at(None, None));
        let bars = country_counts(&data, 2);
        assert_eq!(bars.len(), 3);
        assert_eq!((bars[0].country.as_str(), bars[0].count), ("B", 3));
        assert_eq!((bars[1].country.as_str(), bars[1].count), ("C", 2));
        assert_eq!(bars[2], CountryCount { country: "Other".into(), count: 3, is_other: true });
    }

    #[test]
    fn country_ties_keep_first_seen_order() {
        let data = vec![at(Some("Z"), None), at(None, None), at(Some("A"), None)];
        let names: Vec<_> = country_counts(&data, TOP_COUNTRIES).into_iter().map(|b| b.country).collect();
        assert_eq!(names, vec!["Z", "Unknown", "A"]);
    }

    #[test]
    fn nice_domain_rounds_outwards() {
        assert_eq!(nice_domain(0.2, 9.7, 10.0), NumericRange::new(0.0, 10.0));
        assert_eq!(nice_domain(130.0, 870.0, 10.0), NumericRange::new(100.0, 900.0));
        assert_eq!(ticks(0.0, 1.0, 5.0), vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
    }

    #[test]
    fn histogram_bins_positive_costs() {
        let data = vec![costing("150"), costing("300"), costing("0"), costing("Unknown"), costing("870")];
        let histo = cost_histogram(&data, COST_BINS).unwrap();
        assert_eq!(histo.domain, NumericRange::new(100.0, 900.0));
        assert_eq!(histo.bins.len(), 8);
        assert_eq!(histo.bins[0], HistogramBin { x0: 100.0, x1: 200.0, count: 1 });
        assert_eq!(histo.bins[2].count, 1);
        // the upper bound belongs to the last bin
        assert_eq!(histo.bins[7].count, 1);
        assert_eq!(histo.bins.iter().map(|b| b.count).sum::<u64>(), 3);
    }

    #[test]
    fn histogram_of_one_value_has_single_bin() {
        let histo = cost_histogram(&[costing("42")], COST_BINS).unwrap();
        assert_eq!(histo.bins, vec![HistogramBin { x0: 42.0, x1: 42.0, count: 1 }]);
        assert!(cost_histogram(&[costing("0")], COST_BINS).is_none());
    }

    #[test]
    fn timeline_is_sorted_by_year() {
        let data: Vec<_> = ["2020", "2011", "2020", "n/a"]
            .into_iter()
            .map(|y| ProjectRecord { begin_year: Some(y.into()), ..Default::default() })
            .collect();
        assert_eq!(
            projects_by_year(&data),
            vec![YearCount { year: 2011, count: 1 }, YearCount { year: 2020, count: 2 }]
        );
    }

    #[test]
    fn city_groups_drop_missing_coordinates() {
        let coords = vec![CityCoordinate { city: "Lyon".into(), country: "France".into(), latitude: 45.7, longitude: 4.8 }];
        let data = vec![
            at(Some("France"), Some("Lyon")),
            at(Some("France"), Some("Nowhere")),
            at(Some("France"), Some("Lyon")),
            at(None, Some("Lyon")),
        ];
        let groups = group_by_city(&data, &coords);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].projects.len(), 2);
        assert_eq!(groups[0].latitude, 45.7);
    }

    #[test]
    fn breakdown_counts_missing_as_unknown() {
        let park = ProjectRecord { nbs_type: Some("Park".into()), ..Default::default() };
        let none = ProjectRecord::default();
        let slices = category_breakdown(&[&park, &none, &park], "nbs_type");
        assert_eq!(slices, vec![("Park".to_string(), 2), ("Unknown".to_string(), 1)]);
        assert_eq!(results_header(3), "3 Project(s)");
    }
}
