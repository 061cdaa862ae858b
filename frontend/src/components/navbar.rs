//! Side navigation bar component.

use dioxus::prelude::*;

use crate::components::error_boundary::GlobalErrorBoundary;
use crate::routes::Route;

use dioxus_free_icons::icons::md_action_icons::MdDashboard;
use dioxus_free_icons::icons::md_action_icons::MdList;
use dioxus_free_icons::icons::md_action_icons::MdThumbUp;
use dioxus_free_icons::{Icon, IconShape};


/// Shared navbar component.
#[component]
pub fn Navbar() -> Element {
    rsx! {

        div {
            id:"x-nav-container",

            style:"
                display:flex;
                flex-direction: row;
                width: 100%;
                height: 100%;
            ",


            div {
                id:"x-nav-sidebar",
                style:"
                    display:flex;
                    flex-direction: column;
                    gap: 40px;
                    width: 70px;
                    height: 100%;
                    background-color: #1F3B2D;
                    border: 1px solid #000000;
                    padding: 16px;
                ",

                NavbarTopLogo{},
                NavbarIconLinks{},

                div {
                    style: "flex-grow:1;"
                }
            },

            div {
                id:"x-page-container",
                style: "flex-grow:1; min-width: 100px; overflow-y: auto;",
                GlobalErrorBoundary {
                    boundary_name: "Navbar".to_string(),
                    Outlet::<Route> {}
                }
            }
        }

    }
}

#[component]
fn NavbarTopLogo() -> Element {
    rsx! {
        Link {
            to: Route::DashboardPage { },
            span {
                style: "color:#A8D5BA; font-weight: bold; font-size: 18px;",
                "NbS"
            }
        }
    }
}

#[component]
fn NavbarIconLinks() -> Element {
    rsx! {
        div {
            style: "
                display:flex;
                flex-direction: column;
                gap: 24px;
                width: 38px;
                align-items: center;
                justify-content: center;
            ",
            IconLink { to: Route::DashboardPage { }, icon: MdDashboard, label: "Dashboard" }
            IconLink { to: Route::RecommenderPage { }, icon: MdThumbUp, label: "Recommender" }
            IconLink { to: Route::DatabasePage { }, icon: MdList, label: "Database" }
        }
    }
}

#[component]
fn IconLink<T: IconShape + Clone + PartialEq + 'static> (to: Route, icon: T, label: String) -> Element {
    rsx! {
        Link {
            to: to,
            span {
                title: "{label}",
                style: "color:white;",
                Icon { icon: icon, style: "width: 26px; height: 26px;" }
            }
        }
    }
}
