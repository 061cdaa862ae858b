use common::filter_state::FilterState;
use dioxus::prelude::*;

use crate::components::navbar::Navbar;
use crate::data_definitions::url_param::UrlParam;
use crate::pages::dashboard_page::{DashboardPage, SharedDashboardPage};
use crate::pages::database_page::DatabasePage;
use crate::pages::not_found_page::NotFoundPage;
use crate::pages::recommender_page::RecommenderPage;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Navbar)]


    #[route("/")]
    DashboardPage {},


    #[route("/dashboard/:filters")]
    SharedDashboardPage { filters: UrlParam<FilterState> },


    #[route("/recommender")]
    RecommenderPage {},

    #[route("/database")]
    DatabasePage {},

    #[end_layout]

    #[route("/:..segments")]
    NotFoundPage { segments: Vec<String> },
}

impl Route {
    pub fn shared_dashboard(state: FilterState) -> Self {
        Self::SharedDashboardPage { filters: UrlParam::from(state) }
    }
}
