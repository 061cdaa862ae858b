use common::project::COLUMNS;
use dioxus::prelude::*;

use crate::{
    api::dashboard_api::list_projects,
    components::{error_boundary::ComponentErrorDisplay, suspend_boundary::SuspendWrapper},
};

/// The raw dataset as a table.
#[component]
pub fn DatabasePage() -> Element {
    rsx! {
        Title { "NbS Database" }
        SuspendWrapper {
            DatabaseTable {}
        }
    }
}

#[component]
fn DatabaseTable() -> Element {
    let projects = use_resource(list_projects).suspend()?.cloned();
    let projects = match projects {
        Err(e) => return rsx! {ComponentErrorDisplay { error_txt: format!("{:#?}", e) }},
        Ok(p) => p,
    };

    rsx! {
        div {
            id: "x-table-container",
            style: "padding: 12px; overflow: auto;",
            table {
                class: "data-table",
                thead {
                    tr {
                        for column in COLUMNS {
                            th { "{column}" }
                        }
                    }
                }
                tbody {
                    for (index, record) in projects.iter().enumerate() {
                        tr {
                            key: "{index}",
                            for column in COLUMNS {
                                td { "{record.column(column).unwrap_or_default()}" }
                            }
                        }
                    }
                }
            }
        }
    }
}
