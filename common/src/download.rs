//! Exported spreadsheet payloads and their download filename.

pub const DEFAULT_EXPORT_FILENAME: &str = "search_results.xlsx";


#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Finds the first `filename=` or `filename*=` parameter, drops a `UTF-8''`
/// prefix and quotes, then percent-decodes. Falls back to
/// [`DEFAULT_EXPORT_FILENAME`].
pub fn filename_from_content_disposition(header: Option<&str>) -> String {
    let Some(header) = header else {
        return DEFAULT_EXPORT_FILENAME.to_string();
    };
    let lowered = header.to_ascii_lowercase();

    let mut search_from = 0;
    while let Some(found) = lowered[search_from..].find("filename") {
        let mut pos = search_from + found + "filename".len();
        search_from = pos;
        if lowered[pos..].starts_with('*') {
            pos += 1;
        }
        if !lowered[pos..].starts_with('=') {
            continue;
        }
        pos += 1;
        let raw = header[pos..].split(';').next().unwrap_or_default();
        if raw.is_empty() {
            continue;
        }
        let cleaned = raw.replacen("UTF-8''", "", 1).replace('"', "");
        let cleaned = cleaned.trim();
        if cleaned.is_empty() {
            break;
        }
        return match urlencoding::decode(cleaned) {
            Ok(decoded) => decoded.into_owned(),
            Err(_) => cleaned.to_string(),
        };
    }
    DEFAULT_EXPORT_FILENAME.to_string()
}
