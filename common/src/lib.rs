//! Common library exports shared between frontend and backend.

extern crate serde;

pub mod project;
pub mod filter_state;
pub mod filter_engine;
pub mod facet_options;
pub mod active_filters;
pub mod selection;
pub mod radar;
pub mod aggregate;
pub mod dashboard;
pub mod recommender;
