use dioxus::prelude::*;

use common::orchestrator::SearchOrchestrator;
use crate::{
    api::search_api::{SearchSession, api_client},
    components::{
        error_boundary::PanelErrorBoundary,
        search_components::{
            search_facets::SearchFacetsSidebar, search_input_top_bar::SearchInputTopBar,
            search_results_table::SearchResultsTable, upload_panel::UploadPanel,
        },
    },
};

/// Search page
#[component]
pub fn SearchPage() -> Element {
    let orchestrator = use_signal(SearchOrchestrator::new);
    let client = use_hook(api_client);
    use_context_provider(move || SearchSession { orchestrator, client });

    let title = match orchestrator.read().dataset() {
        Some(dataset) => format!("Product Search: {}", dataset.file_name),
        None => "Product Search".to_string(),
    };

    rsx! {
        Title { "{title}" }
        div {
            id: "x-search-page-root-component",
            section {
                id: "x-upload-section",
                PanelErrorBoundary { panel_name: "Upload".to_string(), UploadPanel {} }
            }
            section {
                id: "x-search-section",
                PanelErrorBoundary { panel_name: "Search".to_string(), SearchInputTopBar {} }
            }
            div {
                id: "x-search-results-bottom-space",
                aside {
                    id: "x-search-facets-left-panel",
                    PanelErrorBoundary { panel_name: "Filters".to_string(), SearchFacetsSidebar {} }
                }
                main {
                    id: "x-search-results-right-panel",
                    PanelErrorBoundary { panel_name: "Results".to_string(), SearchResultsTable {} }
                }
            }
        }
    }
}
