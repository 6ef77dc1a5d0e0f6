use common::{search_result::UploadResponse, upload::UploadProgress};
use reqwest::multipart::{Form, Part};
use tracing::{info, warn};

use crate::client::{ApiClient, error_from_response, read_json};

#[cfg(not(target_arch = "wasm32"))]
const UPLOAD_CHUNK_SIZE: usize = 64 * 1024;

/// Receives upload percentages, 0 to 100, never decreasing.
#[cfg(not(target_arch = "wasm32"))]
pub trait ProgressSink: FnMut(u8) + Send + 'static {}
#[cfg(not(target_arch = "wasm32"))]
impl<T: FnMut(u8) + Send + 'static> ProgressSink for T {}

/// Receives upload percentages, 0 to 100, never decreasing.
#[cfg(target_arch = "wasm32")]
pub trait ProgressSink: FnMut(u8) + 'static {}
#[cfg(target_arch = "wasm32")]
impl<T: FnMut(u8) + 'static> ProgressSink for T {}

struct ProgressReporter<P> {
    progress: UploadProgress,
    sink: P,
}

impl<P: ProgressSink> ProgressReporter<P> {
    fn start(total: u64, sink: P) -> Self {
        let mut reporter = Self { progress: UploadProgress::new(total), sink };
        if let Some(pct) = reporter.progress.report() {
            (reporter.sink)(pct);
        }
        reporter
    }

    fn advance(&mut self, bytes: u64) {
        if let Some(pct) = self.progress.advance(bytes) {
            (self.sink)(pct);
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn finish(&mut self) {
        self.advance(u64::MAX);
    }
}

/// Streams the file in chunks so progress follows what reqwest has sent.
#[cfg(not(target_arch = "wasm32"))]
fn streamed_part<P: ProgressSink>(bytes: Vec<u8>, mut reporter: ProgressReporter<P>) -> Part {
    use bytes::Bytes;
    use futures::StreamExt;

    let total = bytes.len() as u64;
    let data = Bytes::from(bytes);
    let chunks: Vec<Bytes> = (0..data.len())
        .step_by(UPLOAD_CHUNK_SIZE)
        .map(|start| data.slice(start..(start + UPLOAD_CHUNK_SIZE).min(data.len())))
        .collect();
    let stream = futures::stream::iter(chunks).map(move |chunk| {
        reporter.advance(chunk.len() as u64);
        Ok::<Bytes, std::io::Error>(chunk)
    });
    Part::stream_with_length(reqwest::Body::wrap_stream(stream), total)
}

fn spreadsheet_mime(file_name: &str) -> &'static str {
    if file_name.to_ascii_lowercase().ends_with(".csv") {
        "text/csv"
    } else {
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    }
}

impl ApiClient {
    /// `POST /upload` as multipart field `file`.
    pub async fn upload<P: ProgressSink>(&self, file_name: &str, bytes: Vec<u8>, on_progress: P) -> anyhow::Result<UploadResponse> {
        info!("uploading {} ({} bytes)", file_name, bytes.len());
        let reporter = ProgressReporter::start(bytes.len() as u64, on_progress);

        #[cfg(not(target_arch = "wasm32"))]
        let part = streamed_part(bytes, reporter);
        // browser fetch does not expose request body progress
        #[cfg(target_arch = "wasm32")]
        let part = Part::bytes(bytes);

        let part = part.file_name(file_name.to_string()).mime_str(spreadsheet_mime(file_name))?;
        let form = Form::new().part("file", part);
        let response = self.http.post(self.endpoint("upload")).multipart(form).send().await?;

        #[cfg(target_arch = "wasm32")]
        {
            let mut reporter = reporter;
            reporter.finish();
        }

        let status = response.status();
        if !status.is_success() {
            return Err(error_from_response(response).await);
        }
        let body: UploadResponse = read_json(response, "upload").await?;
        if body.success {
            info!("upload accepted: {:?} rows", body.row_count);
        } else {
            warn!("upload refused: {}", body.message);
        }
        Ok(body)
    }
}
