use common::recommender::RecommenderFeature;
use dioxus::prelude::*;

/// Available features on the left, chosen ones on the right in the order they were picked.
#[component]
pub fn FeatureChips(mut selected: Signal<Vec<RecommenderFeature>>) -> Element {
    let chosen = selected.read().clone();
    let available: Vec<RecommenderFeature> =
        RecommenderFeature::ALL.into_iter().filter(|f| !chosen.contains(f)).collect();

    rsx! {
        div {
            id: "x-rs-features",
            style: "display: flex; flex-direction: row; gap: 16px;",
            ChipColumn {
                title: "Available features",
                features: available,
                on_click: move |feature: RecommenderFeature| selected.write().push(feature),
            }
            ChipColumn {
                title: "Selected features",
                features: chosen,
                on_click: move |feature: RecommenderFeature| selected.write().retain(|f| *f != feature),
            }
        }
    }
}

#[component]
fn ChipColumn(title: String, features: Vec<RecommenderFeature>, on_click: Callback<RecommenderFeature>) -> Element {
    rsx! {
        div {
            style: "
                flex: 1 1 0;
                display: flex;
                flex-direction: column;
                gap: 6px;
                min-height: 120px;
                border: 1px dashed #AAAAAA;
                border-radius: 8px;
                padding: 8px;
            ",
            span { style: "font-weight: bold;", "{title}" }
            for feature in features {
                div {
                    key: "{feature}",
                    class: "chip",
                    style: "cursor: pointer;",
                    onclick: move |_| on_click.call(feature),
                    "{feature.label()}"
                }
            }
        }
    }
}
