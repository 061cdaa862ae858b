use dioxus::prelude::*;

use crate::components::error_boundary::ComponentErrorBoundary;

/// Shows a loading indicator while server data is pending and catches the errors
/// of whatever it wraps.
#[component]
pub fn SuspendWrapper(children: Element) -> Element {
    rsx! {
        SuspenseBoundary {
            fallback: |_: SuspenseContext| rsx! {
                div {
                    class: "centered",
                    LoadingIndicator {}
                }
            },
            ComponentErrorBoundary {
                children
            }
        }
    }
}

#[component]
pub fn LoadingIndicator(#[props(default = "Loading...".to_string())] label: String) -> Element {
    rsx! {
        div { class: "loading-indicator", "{label}" }
    }
}
