//! Utilities for highlighting keyword hits in result descriptions.

use serde::{Deserialize, Serialize};


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighlightTextSpan {
    pub text: String,
    pub is_highlighted: bool,
    pub index: u64,
}

/// Placeholder for absent or blank cells.
pub const EMPTY_CELL: &str = "-";

pub fn cell_text(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => EMPTY_CELL,
    }
}

fn fold(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}

/// Splits `text` into spans, marking every case-insensitive occurrence of
/// every whitespace-separated keyword. Overlapping hits merge into one span.
pub fn highlight_keywords(text: &str, keywords: &str) -> Vec<HighlightTextSpan> {
    let chars: Vec<char> = text.chars().collect();
    let folded: Vec<char> = chars.iter().map(|c| fold(*c)).collect();
    let mut marked = vec![false; chars.len()];

    for token in keywords.split_whitespace() {
        let token: Vec<char> = token.chars().map(fold).collect();
        if token.is_empty() || token.len() > folded.len() {
            continue;
        }
        for start in 0..=(folded.len() - token.len()) {
            if folded[start..start + token.len()] == token[..] {
                marked[start..start + token.len()].iter_mut().for_each(|m| *m = true);
            }
        }
    }

    let mut spans: Vec<HighlightTextSpan> = Vec::new();
    for (c, is_highlighted) in chars.into_iter().zip(marked) {
        match spans.last_mut() {
            Some(span) if span.is_highlighted == is_highlighted => span.text.push(c),
            _ => {
                let index = spans.len() as u64;
                spans.push(HighlightTextSpan { text: c.to_string(), is_highlighted, index });
            }
        }
    }
    spans
}
