/// State management module
///
/// This module holds all controller state, one file per flow:
/// - Page-fetch bookkeeping shared by paginated consumers (pager.rs)
/// - Infinite-scroll gallery browsing (gallery.rs)
/// - Semantic search (search.rs)
/// - Authenticated upload (upload.rs)
/// - Session status, login and logout (session.rs)
/// - Single-image focus overlay (lightbox.rs)
/// - Fetched-media thumbnail cache (thumbs.rs)
///
/// Controllers never touch the view layer; views read controller state and
/// dispatch messages, and the update loop in main.rs is the only writer.

pub mod gallery;
pub mod lightbox;
pub mod pager;
pub mod search;
pub mod session;
pub mod thumbs;
pub mod upload;
