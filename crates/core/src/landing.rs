//! Landing view: link submission, summary and takeaways panels.
//!
//! The view never performs I/O on its own. [`LandingView::submit`] and
//! [`LandingView::summary_settled`] hand back the request the caller must
//! dispatch; settled results are fed back in the order they arrive.
//!
//! Resubmitting while a request is in flight is allowed. Both responses race
//! and whichever settles last wins, the same holds for the summary and
//! takeaways chains relative to each other.

use tracing::{info, warn};

use crate::{
    session::Session,
    types::{Outcome, SummarizeRequest},
};

pub const SUMMARY_DESCRIPTION: &str =
    "A concise overview of the main points discussed in the podcast.";
pub const TAKEAWAYS_DESCRIPTION: &str = "Key points and insights from the podcast discussion.";
pub const CHAT_DESCRIPTION: &str = "Ask questions about the podcast content.";

pub const SUMMARY_LOADING: &str = "Generating summary... This may take a few minutes.";
pub const SUMMARY_LOCKED: &str = "Please submit a podcast link to view the summary.";
pub const SUMMARY_FALLBACK: &str = "No summary available yet.";
pub const TAKEAWAYS_LOADING: &str = "Loading key takeaways...";
pub const TAKEAWAYS_LOCKED: &str = "Please submit a podcast link to view the takeaways.";
pub const TAKEAWAYS_FALLBACK: &str = "No takeaways available yet.";
pub const CHAT_LOCKED: &str = "Please submit a podcast link to start chatting.";
pub const CHAT_PROMPT: &str = "Submit a YouTube podcast link to start chatting about it.";
pub const GENERIC_FAILURE: &str = "Something went wrong";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    QuickSummary,
    KeyTakeaways,
    Chat,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::QuickSummary, Tab::KeyTakeaways, Tab::Chat];

    pub fn label(self) -> &'static str {
        match self {
            Tab::QuickSummary => "Quick Summary",
            Tab::KeyTakeaways => "Key Takeaways",
            Tab::Chat => "Chat",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Tab::QuickSummary => SUMMARY_DESCRIPTION,
            Tab::KeyTakeaways => TAKEAWAYS_DESCRIPTION,
            Tab::Chat => CHAT_DESCRIPTION,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SummaryState {
    #[default]
    Idle,
    Loading,
    /// Empty when the service answered without a summary.
    Ready(String),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TakeawaysState {
    #[default]
    Idle,
    Loading,
    Ready(String),
    /// The takeaways request failed. Only logged, rendered as the fallback.
    Unavailable,
}

/// What selecting a tab means for the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabSelection {
    Selected(Tab),
    /// The chat tab is a navigation trigger, not a panel.
    OpenChat,
    Locked,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelBody {
    /// Status or placeholder copy.
    Notice(&'static str),
    Error(String),
    Content(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Panel {
    pub description: &'static str,
    pub body: PanelBody,
}

#[derive(Debug, Clone, Default)]
pub struct LandingView {
    link: String,
    unlocked: bool,
    summary: SummaryState,
    takeaways: TakeawaysState,
    selected: Tab,
}

impl LandingView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn link(&self) -> &str {
        &self.link
    }

    pub fn set_link(&mut self, link: impl Into<String>) {
        self.link = link.into();
    }

    /// True once an initial summary request has succeeded.
    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    pub fn summary(&self) -> &SummaryState {
        &self.summary
    }

    pub fn takeaways(&self) -> &TakeawaysState {
        &self.takeaways
    }

    pub fn selected(&self) -> Tab {
        self.selected
    }

    pub fn is_loading(&self) -> bool {
        self.summary == SummaryState::Loading
    }

    pub fn is_takeaways_loading(&self) -> bool {
        self.takeaways == TakeawaysState::Loading
    }

    /// Store the link for the chat view and start the summary request.
    ///
    /// Returns `None` when the link could not be stored; the failure is then
    /// shown in the summary panel and nothing is dispatched.
    pub fn submit(&mut self, session: &Session) -> Option<SummarizeRequest> {
        let link = self.link.clone();

        if let Err(e) = session.remember_link(&link) {
            warn!(error = %e, "could not store media link");
            self.summary = SummaryState::Failed(failure_text(e.to_string()));
            return None;
        }

        info!(youtube_url = %link, "summary requested");
        self.summary = SummaryState::Loading;
        Some(SummarizeRequest::summary(link))
    }

    /// Apply the summary result for `link`.
    ///
    /// On success the view unlocks and the takeaways request for the same
    /// link is returned; it is already marked as loading.
    pub fn summary_settled(
        &mut self,
        session: &Session,
        link: &str,
        outcome: Outcome,
    ) -> Option<SummarizeRequest> {
        match outcome {
            Outcome::Answered(summary) => self.summary = SummaryState::Ready(summary),
            Outcome::Malformed => self.summary = SummaryState::Ready(String::new()),
            Outcome::Failed(reason) => {
                self.summary = SummaryState::Failed(failure_text(reason));
                return None;
            }
        }

        self.unlocked = true;
        self.takeaways = TakeawaysState::Loading;
        Some(SummarizeRequest::with_query(
            link,
            session.takeaways_prompt(),
        ))
    }

    pub fn takeaways_settled(&mut self, outcome: Outcome) {
        self.takeaways = match outcome {
            Outcome::Answered(takeaways) => TakeawaysState::Ready(takeaways),
            Outcome::Malformed => TakeawaysState::Ready(String::new()),
            Outcome::Failed(reason) => {
                warn!(%reason, "error fetching takeaways");
                TakeawaysState::Unavailable
            }
        };
    }

    pub fn select(&mut self, tab: Tab) -> TabSelection {
        if !self.unlocked {
            return TabSelection::Locked;
        }
        match tab {
            Tab::Chat => TabSelection::OpenChat,
            tab => {
                self.selected = tab;
                TabSelection::Selected(tab)
            }
        }
    }

    /// Rendering policy for one panel. Pure.
    pub fn panel(&self, tab: Tab) -> Panel {
        let body = match tab {
            Tab::QuickSummary => match &self.summary {
                SummaryState::Loading => PanelBody::Notice(SUMMARY_LOADING),
                SummaryState::Failed(message) => PanelBody::Error(message.clone()),
                _ if !self.unlocked => PanelBody::Notice(SUMMARY_LOCKED),
                SummaryState::Ready(summary) if !summary.is_empty() => {
                    PanelBody::Content(summary.clone())
                }
                _ => PanelBody::Content(SUMMARY_FALLBACK.to_string()),
            },
            Tab::KeyTakeaways => match &self.takeaways {
                TakeawaysState::Loading => PanelBody::Notice(TAKEAWAYS_LOADING),
                _ if !self.unlocked => PanelBody::Notice(TAKEAWAYS_LOCKED),
                TakeawaysState::Ready(takeaways) if !takeaways.is_empty() => {
                    PanelBody::Content(takeaways.clone())
                }
                _ => PanelBody::Content(TAKEAWAYS_FALLBACK.to_string()),
            },
            Tab::Chat if self.unlocked => PanelBody::Content(CHAT_PROMPT.to_string()),
            Tab::Chat => PanelBody::Notice(CHAT_LOCKED),
        };

        Panel {
            description: tab.description(),
            body,
        }
    }
}

fn failure_text(reason: String) -> String {
    if reason.trim().is_empty() {
        GENERIC_FAILURE.to_string()
    } else {
        reason
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        client::MockSummarizeClient,
        config::DEFAULT_TAKEAWAYS_PROMPT,
        error::TldlError,
        storage::{LinkStore, MEDIA_LINK_KEY, MemoryStore},
        types::SummarizeResponse,
    };

    struct Harness {
        store: Arc<MemoryStore>,
        session: Session,
    }

    fn harness(client: MockSummarizeClient) -> Harness {
        let store = Arc::new(MemoryStore::new());
        let session = Session::new(store.clone(), Arc::new(client), DEFAULT_TAKEAWAYS_PROMPT);
        Harness { store, session }
    }

    struct FailingStore;

    impl LinkStore for FailingStore {
        fn get(&self, _key: &str) -> crate::Result<Option<String>> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &str) -> crate::Result<()> {
            Err(TldlError::IoError(std::io::Error::other("disk full")))
        }
    }

    #[test]
    fn fresh_view_is_locked_with_prompts() {
        let view = LandingView::new();
        assert!(!view.is_unlocked());
        assert_eq!(
            view.panel(Tab::QuickSummary).body,
            PanelBody::Notice(SUMMARY_LOCKED)
        );
        assert_eq!(
            view.panel(Tab::KeyTakeaways).body,
            PanelBody::Notice(TAKEAWAYS_LOCKED)
        );
        assert_eq!(view.panel(Tab::Chat).body, PanelBody::Notice(CHAT_LOCKED));
    }

    #[test]
    fn locked_tabs_cannot_be_selected() {
        let mut view = LandingView::new();
        for tab in Tab::ALL {
            assert_eq!(view.select(tab), TabSelection::Locked);
        }
        assert_eq!(view.selected(), Tab::QuickSummary);
    }

    #[test]
    fn submit_stores_link_and_requests_summary() {
        let h = harness(MockSummarizeClient::new());
        let mut view = LandingView::new();
        view.set_link("https://youtu.be/abc");

        let request = view.submit(&h.session).unwrap();

        assert_eq!(request, SummarizeRequest::summary("https://youtu.be/abc"));
        assert!(view.is_loading());
        assert_eq!(
            view.panel(Tab::QuickSummary).body,
            PanelBody::Notice(SUMMARY_LOADING)
        );
        assert_eq!(
            h.store.get(MEDIA_LINK_KEY).unwrap().as_deref(),
            Some("https://youtu.be/abc")
        );
    }

    #[test]
    fn storage_failure_is_shown_and_nothing_dispatched() {
        let session = Session::new(
            Arc::new(FailingStore),
            Arc::new(MockSummarizeClient::new()),
            DEFAULT_TAKEAWAYS_PROMPT,
        );
        let mut view = LandingView::new();
        view.set_link("url1");

        assert_eq!(view.submit(&session), None);
        assert!(!view.is_loading());
        assert!(matches!(
            view.panel(Tab::QuickSummary).body,
            PanelBody::Error(message) if message.contains("disk full")
        ));
    }

    #[tokio::test]
    async fn successful_summary_unlocks_and_requests_takeaways() {
        let mut client = MockSummarizeClient::new();
        client
            .expect_summarize()
            .withf(|req| req.query.is_none())
            .times(1)
            .returning(|_| {
                Ok(SummarizeResponse {
                    summary: Some("S1".into()),
                })
            });
        let h = harness(client);
        let mut view = LandingView::new();
        view.set_link("https://youtu.be/abc");

        let request = view.submit(&h.session).unwrap();
        let outcome = h.session.request(request).await;
        let takeaways = view
            .summary_settled(&h.session, "https://youtu.be/abc", outcome)
            .unwrap();

        assert!(view.is_unlocked());
        assert!(!view.is_loading());
        assert_eq!(
            view.panel(Tab::QuickSummary).body,
            PanelBody::Content("S1".into())
        );
        assert_eq!(
            takeaways,
            SummarizeRequest::with_query("https://youtu.be/abc", DEFAULT_TAKEAWAYS_PROMPT)
        );
        assert!(view.is_takeaways_loading());
        assert_eq!(
            view.panel(Tab::KeyTakeaways).body,
            PanelBody::Notice(TAKEAWAYS_LOADING)
        );
    }

    #[test]
    fn failed_summary_stays_locked_and_skips_takeaways() {
        let h = harness(MockSummarizeClient::new());
        let mut view = LandingView::new();
        view.set_link("https://youtu.be/abc");
        view.submit(&h.session).unwrap();

        let next = view.summary_settled(
            &h.session,
            "https://youtu.be/abc",
            Outcome::Failed("Service responded with HTTP 500".into()),
        );

        assert_eq!(next, None);
        assert!(!view.is_unlocked());
        assert!(!view.is_loading());
        assert_eq!(view.takeaways(), &TakeawaysState::Idle);
        assert_eq!(
            view.panel(Tab::QuickSummary).body,
            PanelBody::Error("Service responded with HTTP 500".into())
        );
    }

    #[test]
    fn repeated_failures_overwrite_error() {
        let h = harness(MockSummarizeClient::new());
        let mut view = LandingView::new();
        view.set_link("url1");

        for reason in ["first", "second", ""] {
            view.submit(&h.session).unwrap();
            view.summary_settled(&h.session, "url1", Outcome::Failed(reason.into()));
        }

        assert!(!view.is_unlocked());
        assert_eq!(
            view.summary(),
            &SummaryState::Failed(GENERIC_FAILURE.to_string())
        );
    }

    #[test]
    fn failed_takeaways_fall_back_quietly() {
        let h = harness(MockSummarizeClient::new());
        let mut view = LandingView::new();
        view.set_link("https://youtu.be/abc");
        view.submit(&h.session).unwrap();
        view.summary_settled(&h.session, "https://youtu.be/abc", Outcome::Answered("S1".into()));

        view.takeaways_settled(Outcome::Failed("connection refused".into()));

        assert!(!view.is_takeaways_loading());
        assert_eq!(
            view.panel(Tab::QuickSummary).body,
            PanelBody::Content("S1".into())
        );
        assert_eq!(
            view.panel(Tab::KeyTakeaways).body,
            PanelBody::Content(TAKEAWAYS_FALLBACK.into())
        );
    }

    #[test]
    fn takeaways_render_when_ready() {
        let h = harness(MockSummarizeClient::new());
        let mut view = LandingView::new();
        view.set_link("url1");
        view.submit(&h.session).unwrap();
        view.summary_settled(&h.session, "url1", Outcome::Answered("S1".into()));
        view.takeaways_settled(Outcome::Answered("1. A\n2. B".into()));

        assert_eq!(
            view.panel(Tab::KeyTakeaways).body,
            PanelBody::Content("1. A\n2. B".into())
        );
    }

    #[test]
    fn summary_without_text_uses_fallback_but_unlocks() {
        let h = harness(MockSummarizeClient::new());
        let mut view = LandingView::new();
        view.set_link("url1");
        view.submit(&h.session).unwrap();

        assert!(view.summary_settled(&h.session, "url1", Outcome::Malformed).is_some());
        assert!(view.is_unlocked());
        assert_eq!(
            view.panel(Tab::QuickSummary).body,
            PanelBody::Content(SUMMARY_FALLBACK.into())
        );
    }

    #[test]
    fn unlocked_tabs_select_and_chat_navigates() {
        let h = harness(MockSummarizeClient::new());
        let mut view = LandingView::new();
        view.set_link("url1");
        view.submit(&h.session).unwrap();
        view.summary_settled(&h.session, "url1", Outcome::Answered("S1".into()));

        assert_eq!(
            view.select(Tab::KeyTakeaways),
            TabSelection::Selected(Tab::KeyTakeaways)
        );
        assert_eq!(view.select(Tab::Chat), TabSelection::OpenChat);
        assert_eq!(view.selected(), Tab::KeyTakeaways);
        assert_eq!(
            view.panel(Tab::Chat).body,
            PanelBody::Content(CHAT_PROMPT.into())
        );
    }

    #[test]
    fn later_failure_keeps_tabs_unlocked() {
        let h = harness(MockSummarizeClient::new());
        let mut view = LandingView::new();
        view.set_link("url1");
        view.submit(&h.session).unwrap();
        view.summary_settled(&h.session, "url1", Outcome::Answered("S1".into()));

        view.set_link("url2");
        view.submit(&h.session).unwrap();
        view.summary_settled(&h.session, "url2", Outcome::Failed("boom".into()));

        assert!(view.is_unlocked());
        assert_eq!(view.panel(Tab::QuickSummary).body, PanelBody::Error("boom".into()));
    }
}
