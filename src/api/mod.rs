/// HTTP boundary to the gallery backend
///
/// All network traffic goes through `ApiClient`. The backend authenticates
/// uploads with an HTTP-only session cookie, so the client keeps a cookie
/// store for the life of the process; nothing is persisted to disk.

pub mod types;

use std::path::{Path, PathBuf};
use std::time::Duration;

use bytes::Bytes;
use futures::{SinkExt, Stream, StreamExt};
use iced::widget::image::Handle;
use reqwest::multipart::{Form, Part};
use reqwest::{Body, StatusCode};

use types::{
    LoginRequest, PageResponse, SearchResponse, StatusResponse, UploadResponse,
};

/// Backend base URL used when GLIMPSE_API_URL is not set
const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Per-request timeout. Uploads stream for longer than this allows, so the
/// upload path builds its own request without the client-wide limit.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Size of generated grid thumbnails (square)
const THUMBNAIL_SIZE: u32 = 512;

/// Upload bodies are streamed in chunks of this size; one progress event
/// is emitted per chunk.
const UPLOAD_CHUNK_SIZE: usize = 64 * 1024;

/// Everything that can go wrong talking to the backend
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The server was unreachable or answered with an error status
    #[error("Could not reach the server.")]
    Transport(String),
    /// The server answered 2xx but reported a failure in the body
    #[error("{0}")]
    Backend(String),
    /// The response body did not decode
    #[error("Unexpected response from the server.")]
    Malformed(String),
    #[error("Invalid credentials.")]
    InvalidCredentials,
    #[error("Not signed in.")]
    NotAuthenticated,
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Malformed(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::Transport(err.to_string())
    }
}

/// Progress reporting for a streaming upload
#[derive(Debug, Clone)]
pub enum UploadEvent {
    /// Percentage of the file body handed to the transport so far
    Progressed(u8),
    /// The server answered; carries its verdict
    Finished(UploadResponse),
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: String,
}

impl ApiClient {
    /// Build a client from the GLIMPSE_API_URL environment variable,
    /// falling back to the local development backend.
    pub fn from_env() -> Self {
        let base = std::env::var("GLIMPSE_API_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(base)
    }

    pub fn new(base: impl Into<String>) -> Self {
        // If this fails, the app cannot function at all
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to construct the HTTP client");

        let mut base = base.into();
        while base.ends_with('/') {
            base.pop();
        }

        ApiClient { http, base }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Turn a stored media location into a fetchable URL.
    /// The backend hands out absolute S3 URLs or paths relative to itself.
    pub fn resolve_media_url(&self, location: &str) -> String {
        if location.starts_with("http://") || location.starts_with("https://") {
            location.to_string()
        } else if location.starts_with('/') {
            format!("{}{}", self.base, location)
        } else {
            format!("{}/{}", self.base, location)
        }
    }

    /// Fetch one page of the collection
    pub async fn list_images(self, page: u32, page_size: u32) -> Result<PageResponse, ApiError> {
        let response = self
            .http
            .get(format!("{}/images", self.base))
            .query(&[("page", page), ("page_size", page_size)])
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json::<PageResponse>().await?)
    }

    /// Run a semantic search.
    /// A 200 body carrying `error` is still a failed search.
    pub async fn search(self, query: String) -> Result<Vec<types::ImageRecord>, ApiError> {
        let response = self
            .http
            .get(format!("{}/search", self.base))
            .query(&[("q", query.as_str())])
            .send()
            .await?
            .error_for_status()?;

        let body: SearchResponse = response.json().await?;
        if let Some(error) = body.error {
            return Err(ApiError::Backend(error));
        }

        Ok(body.results)
    }

    /// Ask the backend whether the session cookie is still good
    pub async fn auth_status(self) -> Result<bool, ApiError> {
        let response = self
            .http
            .get(format!("{}/auth/status", self.base))
            .send()
            .await?
            .error_for_status()?;

        let body: StatusResponse = response.json().await?;
        Ok(body.logged_in)
    }

    /// Sign in. The session cookie lands in the client's cookie store.
    pub async fn login(self, username: String, password: String) -> Result<(), ApiError> {
        let response = self
            .http
            .post(format!("{}/auth/login", self.base))
            .json(&LoginRequest { username, password })
            .send()
            .await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(ApiError::InvalidCredentials);
        }
        response.error_for_status()?;
        Ok(())
    }

    /// Best-effort sign-out; the caller drops its local state regardless
    pub async fn logout(self) -> Result<(), ApiError> {
        self.http
            .post(format!("{}/auth/logout", self.base))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// Fetch media bytes and downscale them to a grid thumbnail
    pub async fn fetch_thumbnail(self, url: String) -> Result<Handle, ApiError> {
        let data = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        // Decoding and resizing are CPU-heavy; keep them off the executor
        tokio::task::spawn_blocking(move || decode_thumbnail(&data))
            .await
            .map_err(|err| ApiError::Transport(err.to_string()))?
    }
}

/// Decode fetched media and resize it for the grid
fn decode_thumbnail(data: &[u8]) -> Result<Handle, ApiError> {
    let decoded =
        image::load_from_memory(data).map_err(|err| ApiError::Malformed(err.to_string()))?;

    let thumbnail = decoded.resize(
        THUMBNAIL_SIZE,
        THUMBNAIL_SIZE,
        image::imageops::FilterType::Lanczos3,
    );

    let rgba = thumbnail.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(Handle::from_rgba(width, height, rgba.into_raw()))
}

/// Upload one file as `multipart/form-data`, reporting progress per chunk.
///
/// The file body is split into fixed-size chunks and wrapped in a stream;
/// each chunk emits one `Progressed` event before it is handed to the
/// transport, so percentages are non-decreasing from 0 to 100 within a
/// single attempt.
pub fn upload(
    client: ApiClient,
    path: PathBuf,
) -> impl Stream<Item = Result<UploadEvent, ApiError>> {
    iced::stream::try_channel(16, move |mut output| async move {
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| "upload".to_string());
        let mime = content_type_for(&path);

        let data = tokio::fs::read(&path).await?;
        let total = data.len().max(1);

        let _ = output.send(UploadEvent::Progressed(0)).await;

        let progress = output.clone();
        let chunks: Vec<Bytes> = data
            .chunks(UPLOAD_CHUNK_SIZE)
            .map(Bytes::copy_from_slice)
            .collect();

        let body = futures::stream::iter(chunks.into_iter().enumerate()).then(
            move |(index, chunk)| {
                let mut progress = progress.clone();
                async move {
                    let sent = ((index + 1) * UPLOAD_CHUNK_SIZE).min(total);
                    let percent = (sent * 100 / total) as u8;
                    let _ = progress.send(UploadEvent::Progressed(percent)).await;
                    Ok::<Bytes, std::io::Error>(chunk)
                }
            },
        );

        let part = Part::stream_with_length(Body::wrap_stream(body), total as u64)
            .file_name(filename)
            .mime_str(mime)
            .map_err(|err| ApiError::Transport(err.to_string()))?;
        let form = Form::new().part("file", part);

        // No client-wide timeout here: a large file on a slow link is fine
        let response = client
            .http
            .post(format!("{}/upload/single", client.base))
            .multipart(form)
            .timeout(Duration::from_secs(600))
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::NotAuthenticated);
        }
        if !status.is_success() {
            // FastAPI puts the human-readable reason under "detail"
            let detail = response
                .json::<serde_json::Value>()
                .await
                .ok()
                .and_then(|value| {
                    value
                        .get("detail")
                        .and_then(|detail| detail.as_str())
                        .map(String::from)
                });
            return Err(match detail {
                Some(message) => ApiError::Backend(message),
                None => ApiError::Transport(format!("server returned {status}")),
            });
        }

        let outcome: UploadResponse = response.json().await?;
        let _ = output.send(UploadEvent::Finished(outcome)).await;
        Ok(())
    })
}

/// Lowercased file extension, if any
pub fn file_extension(path: &Path) -> Option<String> {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
}

/// Content type for the multipart file part.
/// Mirrors the extension map the backend uses when storing uploads.
pub fn content_type_for(path: &Path) -> &'static str {
    match file_extension(path).as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("heic") => "image/heic",
        Some("heif") => "image/heif",
        _ => "application/octet-stream",
    }
}
