//! Backend for the NbS dashboard: dataset loading, the recommender and HTTP routes.

pub mod api;
pub mod config;
pub mod data_utils;
pub mod recommender;
pub mod server_extra;
