pub mod upload_panel;
pub mod search_input_top_bar;
pub mod search_facets;
pub mod search_results_table;
pub mod status_line;
