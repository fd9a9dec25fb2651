/// Upload flow state: file selection, in-progress percentage, and outcome.
///
/// Uploads are single-flight. Progress within one attempt is monotonic
/// non-decreasing from 0 to 100, and exactly one of {none, success,
/// failure} holds at any time.

use std::path::{Path, PathBuf};

use crate::api::types::UploadResponse;
use crate::api::ApiError;

/// File extensions accepted for upload. A client-side early guard only;
/// the backend is the authority on real validation.
pub const ALLOWED_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "webp", "heic", "heif"];

/// Result of the most recent upload attempt
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Outcome {
    #[default]
    None,
    Success,
    Failed(String),
}

#[derive(Debug, Default)]
pub struct Upload {
    selected: Option<PathBuf>,
    progress: u8,
    uploading: bool,
    outcome: Outcome,
}

impl Upload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a file for upload, rejecting unsupported extensions up front
    pub fn select(&mut self, path: PathBuf) {
        if self.uploading {
            return;
        }
        if !is_supported(&path) {
            self.outcome = Outcome::Failed(format!(
                "Unsupported file type. Allowed: {}",
                ALLOWED_EXTENSIONS.join(", ")
            ));
            return;
        }
        self.selected = Some(path);
        self.outcome = Outcome::None;
    }

    pub fn clear_selection(&mut self) {
        if self.uploading {
            return;
        }
        self.selected = None;
        self.outcome = Outcome::None;
    }

    /// Start an upload attempt. Returns the file to send, or `None` when
    /// the attempt is rejected: another upload is running, nothing is
    /// selected, or the session is not authenticated.
    pub fn begin(&mut self, authenticated: bool) -> Option<PathBuf> {
        if self.uploading {
            return None;
        }
        if !authenticated {
            self.outcome = Outcome::Failed("Sign in to upload.".to_string());
            return None;
        }
        let Some(path) = self.selected.clone() else {
            self.outcome = Outcome::Failed("Select an image first.".to_string());
            return None;
        };

        self.uploading = true;
        self.progress = 0;
        self.outcome = Outcome::None;
        Some(path)
    }

    /// Progress updates never go backwards within an attempt
    pub fn progressed(&mut self, percent: u8) {
        if !self.uploading {
            return;
        }
        self.progress = self.progress.max(percent.min(100));
    }

    pub fn finish(&mut self, result: Result<UploadResponse, ApiError>) {
        if !self.uploading {
            return;
        }
        self.uploading = false;

        match result {
            Ok(response) if response.success => {
                self.progress = 100;
                self.selected = None;
                self.outcome = Outcome::Success;
            }
            Ok(response) => {
                self.outcome = Outcome::Failed(
                    response
                        .error
                        .unwrap_or_else(|| "Upload failed.".to_string()),
                );
            }
            Err(err) => {
                self.outcome = Outcome::Failed(err.to_string());
            }
        }
    }

    /// Drop everything, e.g. when the operator logs out. A still-running
    /// upload resolves as a silent no-op afterwards.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn selected(&self) -> Option<&Path> {
        self.selected.as_deref()
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn is_uploading(&self) -> bool {
        self.uploading
    }

    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }
}

/// Extension allow-list check
pub fn is_supported(path: &Path) -> bool {
    matches!(
        crate::api::file_extension(path).as_deref(),
        Some(ext) if ALLOWED_EXTENSIONS.contains(&ext)
    )
}
