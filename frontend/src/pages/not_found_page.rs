use dioxus::prelude::*;

use crate::routes::Route;

#[component]
pub fn NotFoundPage(segments: Vec<String>) -> Element {
    let path = segments.join("/");
    rsx! {
        Title { "Page not found" }
        div {
            style: "display: flex; flex-direction: column; align-items: center; gap: 16px; padding: 40px;",
            h1 { "Page not found" }
            p { style: "color: #555555;", "Nothing lives at /{path}." }
            Link { to: Route::DashboardPage {}, "Back to the dashboard" }
        }
    }
}
