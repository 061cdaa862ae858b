//! Error boundaries for the whole app and for single panels.

use dioxus::{logger::tracing, prelude::*};

fn error_text(err: &ErrorContext) -> String {
    match err.error() {
        Some(e) => format!("{:#?}", e.0),
        None => "Unknown error".to_string(),
    }
}

/// Replaces everything below it with an error page and a way back to the dashboard.
#[component]
pub fn GlobalErrorBoundary(boundary_name: ReadSignal<String>, children: Element) -> Element {
    rsx! {
        ErrorBoundary {
            handle_error: move |err: ErrorContext| {
                let details = error_text(&err);
                tracing::error!("{} boundary caught: {}", boundary_name, details);
                rsx! {
                    div {
                        class: "error-page",
                        h1 { class: "error-title", "Something went wrong" }
                        p { class: "error-boundary-name", "Boundary: {boundary_name}" }
                        a { class: "error-link", href: "/", "Return to Dashboard" }
                        pre { class: "error-details", "{details}" }
                    }
                }
            },
            children
        }
    }
}

/// Keeps a failing panel from taking the page down. Offers a retry.
#[component]
pub fn ComponentErrorBoundary(children: Element) -> Element {
    rsx! {
        ErrorBoundary {
            handle_error: |err: ErrorContext| {
                let error_txt = error_text(&err);
                rsx! {
                    ComponentErrorDisplay {
                        error_txt,
                        button {
                            onclick: move |_| err.clear_errors(),
                            "Try Again"
                        }
                    }
                }
            },
            div {
                width: "100%",
                height: "100%",
                {children}
            }
        }
    }
}

#[component]
pub fn ComponentErrorDisplay(error_txt: ReadSignal<String>, children: Element) -> Element {
    rsx! {
        div {
            class: "error-panel",
            h2 { class: "error-title", "Could not load this panel" }
            pre { class: "error-details", "{error_txt}" }
            {children}
        }
    }
}
