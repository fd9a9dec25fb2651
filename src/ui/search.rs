/// Search page: query bar, quick-term shortcuts, and the current result set

use iced::widget::{button, column, container, row, text, text_input};
use iced::{Element, Length};

use crate::state::search::{Search, QUICK_TERMS};
use crate::state::thumbs::ThumbnailCache;
use crate::Message;

pub fn view<'a>(search: &'a Search, thumbs: &'a ThumbnailCache) -> Element<'a, Message> {
    let bar = row![
        text_input("Search your images...", search.query())
            .on_input(Message::QueryChanged)
            .on_submit(Message::SearchSubmitted)
            .padding(10)
            .size(18),
        button(text("Search").size(16))
            .padding(10)
            .on_press(Message::SearchSubmitted),
    ]
    .spacing(8);

    let quick = row(QUICK_TERMS.into_iter().map(|term| {
        button(text(term).size(14))
            .style(button::secondary)
            .padding(8)
            .on_press(Message::QuickTermPicked(term))
            .into()
    }))
    .spacing(8);

    let mut content = column![bar, quick].spacing(16).max_width(900);

    if search.is_loading() {
        content = content.push(text("Searching...").size(14).style(text::secondary));
    }
    if let Some(error) = search.error() {
        content = content.push(text(error).size(14).style(text::danger));
    }

    if !search.results().is_empty() {
        content = content.push(super::image_grid(search.results(), thumbs));
    } else if search.has_searched() && !search.is_loading() && search.error().is_none() {
        content = content.push(text("No matches. Try a different phrase.").size(14));
    } else if !search.has_searched() && !search.is_loading() {
        content = content.push(
            column![
                text("Start typing to search your images").size(18),
                text("Try searching for \"sunset\", \"mountains\", or \"people\"")
                    .size(14)
                    .style(text::secondary),
            ]
            .spacing(6),
        );
    }

    container(content)
        .width(Length::Fill)
        .center_x(Length::Fill)
        .padding(24)
        .into()
}
