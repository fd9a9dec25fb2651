/// Cache of grid thumbnails built from fetched media.
///
/// Each image's media URL is fetched at most once per process: `request`
/// claims an id before the fetch goes out, and a failed fetch parks the id
/// so it renders as a placeholder instead of refetching in a loop.

use std::collections::{HashMap, HashSet};

use iced::widget::image::Handle;

use crate::api::ApiError;

#[derive(Debug, Default)]
pub struct ThumbnailCache {
    ready: HashMap<i64, Handle>,
    pending: HashSet<i64>,
    failed: HashSet<i64>,
}

impl ThumbnailCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim an id for fetching. `false` when it is already cached,
    /// in flight, or known bad.
    pub fn request(&mut self, id: i64) -> bool {
        if self.ready.contains_key(&id) || self.pending.contains(&id) || self.failed.contains(&id)
        {
            return false;
        }
        self.pending.insert(id);
        true
    }

    pub fn store(&mut self, id: i64, result: Result<Handle, ApiError>) {
        self.pending.remove(&id);
        match result {
            Ok(handle) => {
                self.ready.insert(id, handle);
            }
            Err(_) => {
                self.failed.insert(id);
            }
        }
    }

    pub fn get(&self, id: i64) -> Option<&Handle> {
        self.ready.get(&id)
    }
}
