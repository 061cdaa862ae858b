//! Dataset ingestion and the process-wide dataset cache.

pub mod csv_utils;
pub mod dataset_store;
