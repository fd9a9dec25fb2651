/// View layer
///
/// Pure presentation: every function here reads controller state and builds
/// an Element; user intent flows back out as Messages handled in main.rs.
/// Nothing in this module owns state.

pub mod admin;
pub mod gallery;
pub mod lightbox;
pub mod search;

use iced::widget::{button, container, image, row, text};
use iced::{Element, Length};
use iced_aw::Wrap;

use crate::api::types::ImageRecord;
use crate::state::thumbs::ThumbnailCache;
use crate::{Message, Route};

/// Square size of one grid tile
const TILE_SIZE: f32 = 220.0;

/// Top navigation bar shared by every screen
pub fn navigation(current: Route) -> Element<'static, Message> {
    let link = |label: &'static str, route: Route| {
        let style: fn(&iced::Theme, button::Status) -> button::Style = if current == route {
            button::primary
        } else {
            button::text
        };
        button(text(label).size(16))
            .style(style)
            .padding(10)
            .on_press(Message::Navigate(route))
    };

    container(
        row![
            link("Search", Route::Search),
            link("Gallery", Route::Gallery),
            link("Upload", Route::Admin),
        ]
        .spacing(12),
    )
    .width(Length::Fill)
    .center_x(Length::Fill)
    .padding(12)
    .into()
}

/// Flowing grid of image tiles; clicking a tile opens the lightbox
pub(crate) fn image_grid<'a>(
    images: &'a [ImageRecord],
    thumbs: &'a ThumbnailCache,
) -> Element<'a, Message> {
    let tiles: Vec<Element<'a, Message>> = images
        .iter()
        .map(|record| tile(record, thumbs))
        .collect();

    Wrap::with_elements(tiles)
        .spacing(10.0)
        .line_spacing(10.0)
        .into()
}

fn tile<'a>(record: &'a ImageRecord, thumbs: &'a ThumbnailCache) -> Element<'a, Message> {
    let content: Element<'a, Message> = match thumbs.get(record.id) {
        Some(handle) => image(handle.clone())
            .width(Length::Fill)
            .height(Length::Fill)
            .content_fit(iced::ContentFit::Cover)
            .into(),
        // Media still fetching (or failed): show the filename instead
        None => container(text(record.filename.as_str()).size(12))
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into(),
    };

    button(container(content).width(TILE_SIZE).height(TILE_SIZE))
        .style(button::secondary)
        .padding(2)
        .on_press(Message::ImageOpened(record.clone()))
        .into()
}
