/// Admin page: session gate, login form, and the upload panel

use iced::widget::{button, column, container, progress_bar, row, text, text_input};
use iced::{Element, Length};

use crate::state::session::Session;
use crate::state::upload::{Outcome, Upload};
use crate::Message;

pub fn view<'a>(session: &'a Session, upload: &'a Upload) -> Element<'a, Message> {
    let header = column![
        text("Admin Console").size(28),
        text("Manage uploads and trigger indexing updates.")
            .size(14)
            .style(text::secondary),
    ]
    .spacing(4);

    let body: Element<'a, Message> = if session.is_checking() {
        text("Checking session...").size(14).style(text::secondary).into()
    } else if !session.is_authenticated() {
        login_form(session)
    } else {
        upload_panel(upload)
    };

    container(column![header, body].spacing(20).max_width(560))
        .width(Length::Fill)
        .center_x(Length::Fill)
        .padding(24)
        .into()
}

fn login_form<'a>(session: &'a Session) -> Element<'a, Message> {
    let mut form = column![
        text_input("Username", session.username())
            .on_input(Message::UsernameChanged)
            .padding(10),
        text_input("Password", session.password())
            .secure(true)
            .on_input(Message::PasswordChanged)
            .on_submit(Message::LoginSubmitted)
            .padding(10),
    ]
    .spacing(12);

    if let Some(error) = session.error() {
        form = form.push(text(error).size(14).style(text::danger));
    }

    let label = if session.is_logging_in() {
        "Signing in..."
    } else {
        "Sign in"
    };

    form.push(
        button(text(label).size(16))
            .padding(10)
            .on_press_maybe((!session.is_logging_in()).then_some(Message::LoginSubmitted)),
    )
    .into()
}

fn upload_panel<'a>(upload: &'a Upload) -> Element<'a, Message> {
    let mut panel = column![
        row![
            text("Authenticated. Upload a file to update the gallery.").size(14),
            button(text("Log out").size(14))
                .style(button::secondary)
                .padding(8)
                .on_press(Message::LogoutPressed),
        ]
        .spacing(12),
        button(text("Select an image file").size(14))
            .style(button::secondary)
            .padding(8)
            .on_press(Message::PickFilePressed),
    ]
    .spacing(12);

    if let Some(path) = upload.selected() {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();
        panel = panel.push(
            row![
                text(name).size(14),
                button(text("Remove").size(12))
                    .style(button::danger)
                    .padding(6)
                    .on_press_maybe(
                        (!upload.is_uploading()).then_some(Message::SelectionCleared)
                    ),
            ]
            .spacing(12),
        );
    }

    if upload.is_uploading() {
        panel = panel.push(progress_bar(0.0..=100.0, f32::from(upload.progress())));
    }

    match upload.outcome() {
        Outcome::Failed(message) => {
            panel = panel.push(text(message.as_str()).size(14).style(text::danger));
        }
        Outcome::Success => {
            panel = panel.push(text("Upload complete.").size(14).style(text::success));
        }
        Outcome::None => {}
    }

    let label = if upload.is_uploading() {
        "Uploading..."
    } else {
        "Upload image"
    };

    panel
        .push(
            button(text(label).size(16))
                .padding(10)
                .on_press_maybe((!upload.is_uploading()).then_some(Message::UploadPressed)),
        )
        .into()
}
