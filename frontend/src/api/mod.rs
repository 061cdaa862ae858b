//! Server functions called by the frontend.

pub mod dashboard_api;
