use common::recommender::{RecommendationsView, RecommendedProject};
use dioxus::prelude::*;

use crate::components::suspend_boundary::LoadingIndicator;

#[component]
pub fn RecommendationCards(view: ReadSignal<RecommendationsView>) -> Element {
    let view = view.read().clone();
    if let Some(message) = view.message() {
        return rsx! {
            div { style: "color: #888888; margin: 8px;", "{message}" }
        };
    }

    match view {
        RecommendationsView::Idle => rsx! {},
        RecommendationsView::Loading => rsx! { LoadingIndicator { label: "Finding similar projects..." } },
        RecommendationsView::Ready(items) => rsx! {
            div {
                id: "x-rs-results",
                style: "
                    display: grid;
                    grid-template-columns: repeat(auto-fill, minmax(280px, 1fr));
                    gap: 10px;
                    padding: 8px;
                ",
                for (index, item) in items.into_iter().enumerate() {
                    RecommendationCard { key: "{index}", position: index + 1, item }
                }
            }
        },
        RecommendationsView::Empty | RecommendationsView::Failed(_) => rsx! {},
    }
}

#[component]
fn RecommendationCard(position: usize, item: RecommendedProject) -> Element {
    let title = item.record.intervention_name.clone().unwrap_or_else(|| "(no title)".to_string());
    let location = item.location();
    let details = item.details();

    rsx! {
        div {
            class: "rs-card",
            style: "border: 1px solid #DDDDDD; border-radius: 8px; padding: 10px 14px;",
            div { style: "font-weight: 600;", "{position}. {title}" }
            div { style: "color: #777777; font-size: 13px;", "{location}" }
            div {
                style: "margin-top: 4px;",
                for (label, value) in details {
                    div { style: "font-size: 13px;", strong { "{label}: " } "{value}" }
                }
            }
            if let Some(link) = item.record.link.clone() {
                div {
                    style: "font-size: 13px; margin-top: 4px;",
                    a { href: "{link}", target: "_blank", rel: "noopener noreferrer", "open" }
                }
            }
        }
    }
}
