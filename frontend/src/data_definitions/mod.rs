//! Client-side state shared between pages and components.

pub mod dashboard_context;
pub mod url_param;
pub mod view_sinks;
