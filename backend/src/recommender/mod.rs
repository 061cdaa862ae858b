//! Recommender model and the metadata backing its preference form.

pub mod meta;
pub mod model;
