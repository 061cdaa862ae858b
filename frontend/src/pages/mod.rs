pub mod dashboard_page;
pub mod database_page;
pub mod not_found_page;
pub mod recommender_page;
