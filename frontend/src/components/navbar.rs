//! Top header bar wrapping every page.

use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::md_action_icons::MdSearch;

use crate::components::error_boundary::GlobalErrorBoundary;
use crate::routes::Route;


#[component]
pub fn Navbar() -> Element {
    rsx! {
        div {
            id: "x-nav-container",
            header {
                id: "x-nav-header",
                Link {
                    to: Route::SearchPage {},
                    class: "x-nav-title",
                    Icon { icon: MdSearch, style: "width: 28px; height: 28px;" }
                    h1 { "Product Search" }
                }
                p { class: "x-nav-subtitle", "Upload a spreadsheet, then search and filter its rows" }
            }
            div {
                id: "x-page-container",
                GlobalErrorBoundary {
                    boundary_name: "Navbar".to_string(),
                    Outlet::<Route> {}
                }
            }
        }
    }
}
