use iced::alignment::Horizontal;
use iced::widget::{button, column, container, row, scrollable, text, text_input};
use iced::{Element, Length};
use tldl_core::{ChatView, Role, Turn, chat, landing};

use crate::Message;

fn bubble(turn: &Turn) -> Element<'_, Message> {
    let align = match turn.role {
        Role::User => Horizontal::Right,
        Role::Assistant => Horizontal::Left,
    };
    let style = match turn.role {
        Role::User => container::bordered_box,
        Role::Assistant => container::rounded_box,
    };

    container(container(text(turn.content.as_str())).padding([8, 16]).style(style))
        .width(Length::Fill)
        .align_x(align)
        .into()
}

pub fn view(view: &ChatView) -> Element<'_, Message> {
    let mut transcript = view
        .transcript()
        .iter()
        .fold(column![].spacing(12), |col, turn| col.push(bubble(turn)));
    if view.is_loading() {
        transcript = transcript.push(
            container(text(chat::THINKING).size(14))
                .padding([8, 16])
                .style(container::rounded_box),
        );
    }

    let input = row![
        text_input("Ask a question about the podcast...", view.input())
            .on_input(Message::InputChanged)
            .on_submit(Message::Send)
            .padding(8)
            .width(Length::Fill),
        button("Send").on_press_maybe(view.can_send().then_some(Message::Send)),
    ]
    .spacing(8);

    let back = container(
        button("Back")
            .on_press(Message::Back)
            .style(button::secondary),
    )
    .width(Length::Fill)
    .align_x(Horizontal::Center);

    container(
        column![
            text(landing::CHAT_DESCRIPTION).size(14),
            scrollable(transcript.padding(16)).height(Length::Fixed(400.0)),
            input,
            back,
        ]
        .spacing(16),
    )
    .padding(16)
    .style(container::rounded_box)
    .into()
}
