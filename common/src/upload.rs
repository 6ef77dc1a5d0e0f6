//! Client-side upload pre-checks and progress accounting.

use crate::error::ValidationError;


pub const ALLOWED_EXTENSIONS: [&str; 2] = ["xlsx", "csv"];

pub fn validate_upload_file_name(file_name: Option<&str>) -> Result<&str, ValidationError> {
    let file_name = file_name
        .filter(|name| !name.trim().is_empty())
        .ok_or(ValidationError::NoFileSelected)?;
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .ok_or(ValidationError::UnsupportedFileType)?;
    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(ValidationError::UnsupportedFileType);
    }
    Ok(file_name)
}


/// Turns transmitted byte counts into a non-decreasing 0-100 percentage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadProgress {
    total: u64,
    sent: u64,
    last_reported: Option<u8>,
}

impl UploadProgress {
    pub fn new(total: u64) -> Self {
        Self { total, sent: 0, last_reported: None }
    }

    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 100;
        }
        let sent = self.sent.min(self.total);
        ((sent as f64 / self.total as f64) * 100.0).round() as u8
    }

    /// Records `bytes` more sent. Returns the percentage only when it moved
    /// past the last one reported.
    pub fn advance(&mut self, bytes: u64) -> Option<u8> {
        self.sent = self.sent.saturating_add(bytes);
        self.report()
    }

    pub fn report(&mut self) -> Option<u8> {
        let pct = self.percent();
        match self.last_reported {
            Some(last) if pct <= last => None,
            _ => {
                self.last_reported = Some(pct);
                Some(pct)
            }
        }
    }
}


/// Progress bar state shared by overlapping uploads. Only the most recently
/// started upload may move or hide it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressBar {
    run: u64,
    percent: Option<u8>,
}

impl ProgressBar {
    /// Hands the bar to a new upload and returns its run number.
    pub fn start(&mut self) -> u64 {
        self.run += 1;
        self.run
    }

    pub fn show(&mut self, run: u64, percent: u8) {
        if run == self.run {
            self.percent = Some(percent);
        }
    }

    pub fn hide(&mut self, run: u64) {
        if run == self.run {
            self.percent = None;
        }
    }

    pub fn percent(&self) -> Option<u8> {
        self.percent
    }
}
