//! Panels of the exploration dashboard. Each one reads the shared
//! [`DashboardContext`](crate::data_definitions::dashboard_context::DashboardContext)
//! and reports widget events through its callbacks.

pub mod active_filter_bar;
pub mod city_map;
pub mod compare_bar;
pub mod comparison_view;
pub mod facet_panel;
pub mod overview_strip;
pub mod results_list;
