/// Gallery page: infinite-scroll grid over the whole collection.
///
/// The scrollable reports its viewport on every scroll event; when the
/// visible bottom edge comes within `LOAD_AHEAD` of the content end, the
/// update loop asks the gallery controller for the next page. A single
/// approach produces a burst of scroll events, so exactly-once loading is
/// guaranteed by the controller's busy flag, not here.

use iced::widget::{button, column, scrollable, text};
use iced::{Element, Length};

use crate::state::gallery::Gallery;
use crate::state::thumbs::ThumbnailCache;
use crate::Message;

/// Lead distance, in pixels, at which the next page starts loading
const LOAD_AHEAD: f32 = 400.0;

/// True when the viewport has scrolled close enough to the content end
/// that the next page should be requested
pub fn near_end(viewport: &scrollable::Viewport) -> bool {
    let offset = viewport.absolute_offset();
    let visible_bottom = offset.y + viewport.bounds().height;
    should_load_more(visible_bottom, viewport.content_bounds().height)
}

fn should_load_more(visible_bottom: f32, content_height: f32) -> bool {
    visible_bottom >= content_height - LOAD_AHEAD
}

pub fn view<'a>(gallery: &'a Gallery, thumbs: &'a ThumbnailCache) -> Element<'a, Message> {
    let header = column![
        text("Image Gallery").size(28),
        text("Browse all your uploaded images")
            .size(14)
            .style(text::secondary),
    ]
    .spacing(4);

    let body: Element<'a, Message> = if gallery.images().is_empty() {
        // Three distinct empty-looking states: failed, still loading,
        // and a genuinely empty collection
        if let Some(error) = gallery.error() {
            column![
                text(error).size(14).style(text::danger),
                button(text("Retry").size(14))
                    .padding(8)
                    .on_press(Message::GalleryRetried),
            ]
            .spacing(12)
            .into()
        } else if gallery.known_empty() {
            column![
                text("No images uploaded yet").size(18),
                text("Upload some images to see them in the gallery")
                    .size(14)
                    .style(text::secondary),
            ]
            .spacing(6)
            .into()
        } else {
            text("Loading images...").size(14).style(text::secondary).into()
        }
    } else {
        let mut grid = column![super::image_grid(gallery.images(), thumbs)].spacing(16);

        if let Some(error) = gallery.error() {
            grid = grid.push(text(error).size(14).style(text::danger));
            grid = grid.push(
                button(text("Retry").size(14))
                    .padding(8)
                    .on_press(Message::GalleryRetried),
            );
        } else if gallery.is_loading() {
            grid = grid.push(text("Loading more...").size(14).style(text::secondary));
        }

        scrollable(grid.padding(4))
            .on_scroll(Message::GalleryScrolled)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    };

    column![header, body].spacing(16).padding(24).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_far_from_the_end_does_not_trigger() {
        // 2000 px of content, viewing the first 700
        assert!(!should_load_more(700.0, 2000.0));
    }

    #[test]
    fn test_within_lead_distance_triggers() {
        assert!(should_load_more(1650.0, 2000.0));
        assert!(should_load_more(2000.0, 2000.0));
    }

    #[test]
    fn test_content_shorter_than_viewport_triggers() {
        // One partial page on a tall window; the controller's has_more
        // guard decides whether anything is actually fetched
        assert!(should_load_more(720.0, 300.0));
    }
}
