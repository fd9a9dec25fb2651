/// Modal overlay focusing one image.
///
/// A click on the backdrop, the close button, or Escape closes it. The
/// overlay holds its own copy of the record, so the grid underneath may
/// change freely while it is open.

use iced::widget::{button, center, column, container, image, mouse_area, opaque, stack, text};
use iced::{Element, Length};

use crate::api::types::ImageRecord;
use crate::state::thumbs::ThumbnailCache;
use crate::Message;

pub fn view<'a>(
    base: Element<'a, Message>,
    record: &'a ImageRecord,
    thumbs: &'a ThumbnailCache,
) -> Element<'a, Message> {
    let media: Element<'a, Message> = match thumbs.get(record.id) {
        Some(handle) => image(handle.clone()).width(Length::Fill).into(),
        None => container(text("Loading image...").size(14))
            .center_x(Length::Fill)
            .padding(40)
            .into(),
    };

    let caption = record
        .caption
        .as_deref()
        .filter(|caption| !caption.is_empty())
        .unwrap_or("no caption");

    let mut details = column![media, text(caption).size(14)].spacing(10);
    if let Some(line) = record.uploaded_at.as_deref().and_then(upload_date_line) {
        details = details.push(text(line).size(12).style(text::secondary));
    }
    details = details.push(
        button(text("Close").size(14))
            .style(button::secondary)
            .padding(8)
            .on_press(Message::LightboxClosed),
    );

    let card = container(details)
        .padding(16)
        .width(Length::Fixed(720.0))
        .style(container::rounded_box);

    // The inner opaque keeps clicks on the card from reaching the
    // backdrop's close handler
    stack![
        base,
        opaque(mouse_area(center(opaque(card))).on_press(Message::LightboxClosed)),
    ]
    .into()
}

/// Human-readable upload date, when the backend sent a parseable timestamp
fn upload_date_line(raw: &str) -> Option<String> {
    let parsed = chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").ok()?;
    Some(format!("Uploaded {}", parsed.format("%Y-%m-%d %H:%M")))
}
