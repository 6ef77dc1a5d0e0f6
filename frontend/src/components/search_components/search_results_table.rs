//! Result rows with keyword hits marked in the description column.

use common::{
    orchestrator::ResultsView,
    search_result::ResultRow,
    text_highlight::{HighlightTextSpan, cell_text, highlight_keywords},
};
use dioxus::prelude::*;

use crate::api::search_api::SearchSession;

const COLUMNS: [&str; 10] = [
    "Item No",
    "Description",
    "Product Division",
    "Material Group",
    "Material Group Desc",
    "Manufacturer Name",
    "Manufacturer Item No",
    "Sales Status",
    "Product Manager",
    "Sub Item",
];


#[component]
pub fn SearchResultsTable() -> Element {
    let orchestrator = use_context::<SearchSession>().orchestrator;
    let results = orchestrator.read().results().clone();

    let (rows, keywords, count) = match results {
        ResultsView::Rows { rows, keywords, count } => (rows, keywords, count),
        placeholder => {
            let text = placeholder.placeholder_text().unwrap_or_default();
            return rsx! {
                p { class: "placeholder-text", "{text}" }
            };
        }
    };

    rsx! {
        div {
            class: "result-count",
            "Total Results: "
            strong { "{count}" }
        }
        div {
            class: "results-table-wrapper",
            table {
                class: "results-table",
                thead {
                    tr {
                        for column in COLUMNS {
                            th { "{column}" }
                        }
                    }
                }
                tbody {
                    for (i, row) in rows.into_iter().enumerate() {
                        ResultTableRow { key: "{i}", row, keywords: keywords.clone() }
                    }
                }
            }
        }
    }
}

#[component]
fn ResultTableRow(row: ResultRow, keywords: String) -> Element {
    let description = row.description.as_deref().filter(|d| !d.is_empty());
    let description_cell = match description {
        Some(d) => render_highlight_text_span(highlight_keywords(d, &keywords)),
        None => rsx! { "{cell_text(None)}" },
    };
    rsx! {
        tr {
            td { "{cell_text(row.item_no.as_deref())}" }
            td { {description_cell} }
            td { "{cell_text(row.product_division.as_deref())}" }
            td { "{cell_text(row.material_group.as_deref())}" }
            td { "{cell_text(row.material_group_desc.as_deref())}" }
            td { "{cell_text(row.manufacturer_name.as_deref())}" }
            td { "{cell_text(row.manufacturer_item_no.as_deref())}" }
            td { "{cell_text(row.sales_status.as_deref())}" }
            td { "{cell_text(row.product_manager.as_deref())}" }
            td { "{cell_text(row.sub_item.as_deref())}" }
        }
    }
}

fn render_highlight_text_span(spans: Vec<HighlightTextSpan>) -> Element {
    let spans = spans.into_iter().map(|i| {
        if i.is_highlighted {
            rsx! { mark { key: "{i.index}", "{i.text}" } }
        } else {
            rsx! { span { key: "{i.index}", "{i.text}" } }
        }
    }).collect::<Vec<_>>();
    rsx! {
        {spans.into_iter()}
    }
}
