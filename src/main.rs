use iced::keyboard;
use iced::widget::image::Handle;
use iced::widget::{column, scrollable};
use iced::{Element, Length, Subscription, Task, Theme};

mod api;
mod state;
mod ui;

use api::types::{ImageRecord, PageResponse};
use api::{ApiClient, ApiError, UploadEvent};
use state::gallery::{Gallery, PageFetch};
use state::lightbox::Lightbox;
use state::search::Search;
use state::session::Session;
use state::thumbs::ThumbnailCache;
use state::upload::Upload;

/// The screens reachable from the navigation bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Search,
    Gallery,
    Admin,
}

/// Main application state
pub struct Glimpse {
    /// HTTP boundary to the gallery backend
    api: ApiClient,
    /// Which screen is showing
    route: Route,
    search: Search,
    gallery: Gallery,
    session: Session,
    upload: Upload,
    lightbox: Lightbox,
    thumbs: ThumbnailCache,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// User picked a destination in the navigation bar
    Navigate(Route),

    // Search
    QueryChanged(String),
    SearchSubmitted,
    /// User clicked one of the quick suggestion chips
    QuickTermPicked(&'static str),
    SearchFinished(u64, Result<Vec<ImageRecord>, ApiError>),

    // Gallery
    GalleryScrolled(scrollable::Viewport),
    GalleryRetried,
    PageLoaded(PageFetch, Result<PageResponse, ApiError>),

    // Thumbnails
    ThumbnailFetched(i64, Result<Handle, ApiError>),

    // Session
    StatusChecked(Result<bool, ApiError>),
    UsernameChanged(String),
    PasswordChanged(String),
    LoginSubmitted,
    LoginFinished(Result<(), ApiError>),
    LogoutPressed,
    LogoutFinished(Result<(), ApiError>),

    // Upload
    PickFilePressed,
    SelectionCleared,
    UploadPressed,
    UploadProgressed(Result<UploadEvent, ApiError>),

    // Lightbox
    ImageOpened(ImageRecord),
    LightboxClosed,
    EscapePressed,
}

impl Glimpse {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let api = ApiClient::from_env();
        println!("🔎 Glimpse starting, backend at {}", api.base());

        (
            Glimpse {
                api,
                route: Route::Search,
                search: Search::new(),
                gallery: Gallery::new(),
                session: Session::new(),
                upload: Upload::new(),
                lightbox: Lightbox::default(),
                thumbs: ThumbnailCache::new(),
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Navigate(route) => {
                self.route = route;
                match route {
                    Route::Gallery => {
                        // A fresh mount: the gallery starts over from page 1
                        self.gallery.reset();
                        match self.gallery.load_first_page() {
                            Some(fetch) => self.fetch_page(fetch),
                            None => Task::none(),
                        }
                    }
                    Route::Admin => {
                        if self.session.begin_check() {
                            let api = self.api.clone();
                            Task::perform(api.auth_status(), Message::StatusChecked)
                        } else {
                            Task::none()
                        }
                    }
                    Route::Search => Task::none(),
                }
            }

            // ========== Search ==========
            Message::QueryChanged(query) => {
                self.search.set_query(query);
                Task::none()
            }
            Message::SearchSubmitted => {
                let request = self.search.submit();
                self.start_search(request)
            }
            Message::QuickTermPicked(term) => {
                let request = self.search.submit_term(term);
                self.start_search(request)
            }
            Message::SearchFinished(seq, result) => {
                self.search.apply(seq, result);
                let wanted = self.media_for(self.search.results());
                self.queue_thumbnails(wanted)
            }

            // ========== Gallery ==========
            Message::GalleryScrolled(viewport) => {
                if ui::gallery::near_end(&viewport) {
                    if let Some(fetch) = self.gallery.load_next_page() {
                        return self.fetch_page(fetch);
                    }
                }
                Task::none()
            }
            Message::GalleryRetried => match self.gallery.retry() {
                Some(fetch) => self.fetch_page(fetch),
                None => Task::none(),
            },
            Message::PageLoaded(fetch, result) => {
                self.gallery.apply(fetch, result);
                let wanted = self.media_for(self.gallery.images());
                self.queue_thumbnails(wanted)
            }

            // ========== Thumbnails ==========
            Message::ThumbnailFetched(id, result) => {
                if let Err(err) = &result {
                    eprintln!("⚠️  Thumbnail fetch failed for image {id}: {err:?}");
                }
                self.thumbs.store(id, result);
                Task::none()
            }

            // ========== Session ==========
            Message::StatusChecked(result) => {
                self.session.finish_check(result);
                Task::none()
            }
            Message::UsernameChanged(username) => {
                self.session.set_username(username);
                Task::none()
            }
            Message::PasswordChanged(password) => {
                self.session.set_password(password);
                Task::none()
            }
            Message::LoginSubmitted => match self.session.begin_login() {
                Some(credentials) => {
                    let api = self.api.clone();
                    Task::perform(
                        api.login(credentials.username, credentials.password),
                        Message::LoginFinished,
                    )
                }
                None => Task::none(),
            },
            Message::LoginFinished(result) => {
                self.session.finish_login(result);
                Task::none()
            }
            Message::LogoutPressed => {
                // Local state drops to signed-out right away; the remote
                // call is best-effort
                self.session.logout();
                self.upload.reset();
                let api = self.api.clone();
                Task::perform(api.logout(), Message::LogoutFinished)
            }
            Message::LogoutFinished(_) => Task::none(),

            // ========== Upload ==========
            Message::PickFilePressed => {
                // Native picker, filtered to the extensions we accept
                let file = rfd::FileDialog::new()
                    .set_title("Select an image to upload")
                    .add_filter("Images", &state::upload::ALLOWED_EXTENSIONS)
                    .pick_file();

                if let Some(path) = file {
                    self.upload.select(path);
                }
                Task::none()
            }
            Message::SelectionCleared => {
                self.upload.clear_selection();
                Task::none()
            }
            Message::UploadPressed => {
                let authenticated = self.session.is_authenticated();
                match self.upload.begin(authenticated) {
                    Some(path) => {
                        println!("⬆️  Uploading {}", path.display());
                        Task::run(api::upload(self.api.clone(), path), Message::UploadProgressed)
                    }
                    None => Task::none(),
                }
            }
            Message::UploadProgressed(event) => {
                match event {
                    Ok(UploadEvent::Progressed(percent)) => self.upload.progressed(percent),
                    Ok(UploadEvent::Finished(response)) => {
                        if response.success {
                            println!("✅ Upload complete");
                        }
                        self.upload.finish(Ok(response));
                    }
                    Err(err) => {
                        // An expired session routes the operator back to
                        // the login form
                        if err == ApiError::NotAuthenticated {
                            self.session.logout();
                        }
                        self.upload.finish(Err(err));
                    }
                }
                Task::none()
            }

            // ========== Lightbox ==========
            Message::ImageOpened(image) => {
                self.lightbox.open(image);
                Task::none()
            }
            Message::LightboxClosed | Message::EscapePressed => {
                self.lightbox.close();
                Task::none()
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let page: Element<Message> = match self.route {
            Route::Search => ui::search::view(&self.search, &self.thumbs),
            Route::Gallery => ui::gallery::view(&self.gallery, &self.thumbs),
            Route::Admin => ui::admin::view(&self.session, &self.upload),
        };

        let base: Element<Message> = column![ui::navigation(self.route), page]
            .width(Length::Fill)
            .height(Length::Fill)
            .into();

        match self.lightbox.current() {
            Some(record) => ui::lightbox::view(base, record, &self.thumbs),
            None => base,
        }
    }

    /// Listen for Escape while the lightbox is open
    fn subscription(&self) -> Subscription<Message> {
        if self.lightbox.is_open() {
            keyboard::on_key_press(|key, _modifiers| match key {
                keyboard::Key::Named(keyboard::key::Named::Escape) => {
                    Some(Message::EscapePressed)
                }
                _ => None,
            })
        } else {
            Subscription::none()
        }
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }

    /// Kick off one page fetch, tagged so late responses for a previous
    /// mount are ignored
    fn fetch_page(&self, fetch: PageFetch) -> Task<Message> {
        let api = self.api.clone();
        Task::perform(
            api.list_images(fetch.request.page, fetch.request.page_size),
            move |result| Message::PageLoaded(fetch, result),
        )
    }

    fn start_search(&self, request: Option<state::search::SearchRequest>) -> Task<Message> {
        match request {
            Some(request) => {
                let api = self.api.clone();
                let seq = request.seq;
                Task::perform(api.search(request.query), move |result| {
                    Message::SearchFinished(seq, result)
                })
            }
            None => Task::none(),
        }
    }

    /// Resolve the media URL for every record we might need a thumbnail for
    fn media_for(&self, records: &[ImageRecord]) -> Vec<(i64, String)> {
        records
            .iter()
            .map(|record| (record.id, self.api.resolve_media_url(&record.s3_url)))
            .collect()
    }

    /// Fetch thumbnails for any record not already cached or in flight
    fn queue_thumbnails(&mut self, wanted: Vec<(i64, String)>) -> Task<Message> {
        let mut tasks = Vec::new();
        for (id, url) in wanted {
            if self.thumbs.request(id) {
                let api = self.api.clone();
                tasks.push(Task::perform(api.fetch_thumbnail(url), move |result| {
                    Message::ThumbnailFetched(id, result)
                }));
            }
        }
        Task::batch(tasks)
    }
}

fn main() -> iced::Result {
    iced::application("Glimpse", Glimpse::update, Glimpse::view)
        .subscription(Glimpse::subscription)
        .theme(Glimpse::theme)
        .centered()
        .run_with(Glimpse::new)
}
