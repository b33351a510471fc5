use iced::widget::{button, column, container, row, text, text_input};
use iced::{Element, Length};
use tldl_core::{LandingView, PanelBody, Tab};

use crate::Message;

pub fn view(view: &LandingView) -> Element<'_, Message> {
    let header = column![
        text("TL;DL").size(56),
        text("Don't Pod Around").size(32),
        text("Get instant summaries and chat with your favorite podcasts").size(16),
    ]
    .spacing(8);

    let form = row![
        text_input("Paste your YouTube podcast link here...", view.link())
            .on_input(Message::LinkChanged)
            .on_submit(Message::Submit)
            .padding(12)
            .width(Length::Fill),
        button("Summarize").on_press(Message::Submit).padding(12),
    ]
    .spacing(16);

    let tabs = Tab::ALL.into_iter().fold(row![].spacing(8), |tabs, tab| {
        let style = if tab == view.selected() {
            button::primary
        } else {
            button::secondary
        };
        tabs.push(
            button(text(tab.label()))
                .width(Length::Fill)
                .style(style)
                .on_press_maybe(view.is_unlocked().then_some(Message::TabSelected(tab))),
        )
    });

    let panel = view.panel(view.selected());
    let body: Element<'_, Message> = match panel.body {
        PanelBody::Notice(notice) => text(notice).size(14).into(),
        PanelBody::Error(message) => text(message).style(text::danger).into(),
        PanelBody::Content(content) => text(content).into(),
    };

    let card = container(column![text(panel.description).size(14), body].spacing(12))
        .padding(16)
        .width(Length::Fill)
        .style(container::rounded_box);

    column![header, form, tabs, card].spacing(24).into()
}
