//! Narrowing of a facet's option list by the text typed in its search box.


/// Case-insensitive substring match against the trimmed query. An empty
/// query returns the options unchanged.
pub fn filter_options(options: &[String], query: &str) -> Vec<String> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return options.to_vec();
    }
    options
        .iter()
        .filter(|option| option.to_lowercase().contains(&query))
        .cloned()
        .collect()
}
