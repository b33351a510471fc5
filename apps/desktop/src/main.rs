use iced::alignment::Horizontal;
use iced::widget::{button, column, container};
use iced::{Element, Length, Task};
use tldl_core::{
    ChatView, ClientConfig, LandingView, Outcome, SendOutcome, Session, Tab, TabSelection,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod chat;
mod landing;

fn main() -> iced::Result {
    init_tracing();

    let config = match ClientConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    info!(api_url = %config.api_url, storage = %config.storage_path.display(), "starting");

    let session = Session::from_config(&config);
    iced::application(move || App::new(session.clone()), App::update, App::view)
        .title("TL;DL")
        .run()
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,wgpu=warn,naga=warn,iced=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

enum Screen {
    Landing(LandingView),
    Chat(ChatView),
}

struct App {
    session: Session,
    screen: Screen,
    /// Bumped on every navigation. Results for an older mount are dropped.
    mount: u64,
}

#[derive(Debug, Clone)]
enum Message {
    LinkChanged(String),
    Submit,
    SummaryFetched {
        mount: u64,
        link: String,
        outcome: Outcome,
    },
    TakeawaysFetched {
        mount: u64,
        outcome: Outcome,
    },
    TabSelected(Tab),
    InputChanged(String),
    Send,
    ReplyReceived {
        mount: u64,
        outcome: Outcome,
    },
    OpenChat,
    Back,
}

impl App {
    fn new(session: Session) -> (Self, Task<Message>) {
        (
            Self {
                session,
                screen: Screen::Landing(LandingView::new()),
                mount: 0,
            },
            Task::none(),
        )
    }

    fn navigate(&mut self, screen: Screen) {
        self.mount += 1;
        self.screen = screen;
    }

    fn is_stale(&self, mount: u64) -> bool {
        if mount != self.mount {
            debug!(mount, current = self.mount, "dropping result for an unmounted view");
            return true;
        }
        false
    }

    fn request(
        &self,
        request: tldl_core::SummarizeRequest,
        to_message: impl FnOnce(Outcome) -> Message + Send + 'static,
    ) -> Task<Message> {
        let session = self.session.clone();
        Task::perform(async move { session.request(request).await }, to_message)
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        let mount = self.mount;

        match message {
            Message::LinkChanged(link) => {
                if let Screen::Landing(view) = &mut self.screen {
                    view.set_link(link);
                }
                Task::none()
            }
            Message::Submit => {
                let Screen::Landing(view) = &mut self.screen else {
                    return Task::none();
                };
                let Some(request) = view.submit(&self.session) else {
                    return Task::none();
                };
                let link = request.youtube_url.clone();
                self.request(request, move |outcome| Message::SummaryFetched {
                    mount,
                    link,
                    outcome,
                })
            }
            Message::SummaryFetched {
                mount: origin,
                link,
                outcome,
            } => {
                if self.is_stale(origin) {
                    return Task::none();
                }
                let Screen::Landing(view) = &mut self.screen else {
                    return Task::none();
                };
                match view.summary_settled(&self.session, &link, outcome) {
                    Some(takeaways) => self.request(takeaways, move |outcome| {
                        Message::TakeawaysFetched { mount, outcome }
                    }),
                    None => Task::none(),
                }
            }
            Message::TakeawaysFetched {
                mount: origin,
                outcome,
            } => {
                if self.is_stale(origin) {
                    return Task::none();
                }
                if let Screen::Landing(view) = &mut self.screen {
                    view.takeaways_settled(outcome);
                }
                Task::none()
            }
            Message::TabSelected(tab) => {
                let Screen::Landing(view) = &mut self.screen else {
                    return Task::none();
                };
                if view.select(tab) == TabSelection::OpenChat {
                    self.navigate(Screen::Chat(ChatView::new()));
                }
                Task::none()
            }
            Message::InputChanged(input) => {
                if let Screen::Chat(view) = &mut self.screen {
                    view.set_input(input);
                }
                Task::none()
            }
            Message::Send => {
                let Screen::Chat(view) = &mut self.screen else {
                    return Task::none();
                };
                if !view.can_send() {
                    return Task::none();
                }
                match view.send(&self.session) {
                    SendOutcome::Dispatched(request) => self.request(request, move |outcome| {
                        Message::ReplyReceived { mount, outcome }
                    }),
                    SendOutcome::Ignored | SendOutcome::MissingLink => Task::none(),
                }
            }
            Message::ReplyReceived {
                mount: origin,
                outcome,
            } => {
                if self.is_stale(origin) {
                    return Task::none();
                }
                if let Screen::Chat(view) = &mut self.screen {
                    view.reply_settled(outcome);
                }
                Task::none()
            }
            Message::OpenChat => {
                if !matches!(self.screen, Screen::Chat(_)) {
                    self.navigate(Screen::Chat(ChatView::new()));
                }
                Task::none()
            }
            Message::Back => {
                self.navigate(Screen::Landing(LandingView::new()));
                Task::none()
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        let page = match &self.screen {
            Screen::Landing(view) => landing::view(view),
            Screen::Chat(view) => chat::view(view),
        };

        // Mounted at the root, present on every screen.
        let chat_button = container(
            button("Chat")
                .on_press(Message::OpenChat)
                .style(button::secondary),
        )
        .width(Length::Fill)
        .align_x(Horizontal::Right);

        column![page, chat_button]
            .padding(24)
            .spacing(16)
            .max_width(900)
            .into()
    }
}
