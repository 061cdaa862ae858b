//! CSV readers for the project table and the city coordinate table.

use std::collections::HashMap;
use std::io::Read;

use anyhow::Context;
use common::project::{CityCoordinate, ProjectRecord};

fn reader<R: Read>(input: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input)
}

/// Reads the cleaned project table. Each row is keyed by the header names.
pub fn parse_projects_csv<R: Read>(input: R) -> anyhow::Result<Vec<ProjectRecord>> {
    let mut projects = Vec::new();
    for (line, row) in reader(input).deserialize::<HashMap<String, String>>().enumerate() {
        let row = row.with_context(|| format!("Failed to read project row {}", line + 1))?;
        projects.push(ProjectRecord::from_row(&row));
    }
    Ok(projects)
}

/// Reads the geocoded city table. Rows whose coordinates do not parse are skipped.
pub fn parse_coordinates_csv<R: Read>(input: R) -> anyhow::Result<Vec<CityCoordinate>> {
    let mut coordinates = Vec::new();
    let mut skipped = 0usize;
    for row in reader(input).deserialize::<CityCoordinate>() {
        match row {
            Ok(coordinate) => coordinates.push(coordinate),
            Err(e) if e.is_io_error() => return Err(e).context("Failed to read coordinates"),
            Err(e) => {
                tracing::warn!("skipping coordinate row: {}", e);
                skipped += 1;
            }
        }
    }
    if skipped > 0 {
        tracing::warn!("{} coordinate rows skipped", skipped);
    }
    Ok(coordinates)
}
