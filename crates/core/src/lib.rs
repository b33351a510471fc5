//! TL;DL Core Library
//!
//! Client-side state and request plumbing for a podcast summarization
//! service: the landing view (summary and key takeaways), the chat view
//! (follow-up questions) and the session that bridges them.

pub mod chat;
pub mod client;
pub mod config;
pub mod error;
pub mod format;
pub mod landing;
pub mod session;
pub mod storage;
pub mod types;

// Re-export commonly used items at crate root
pub use chat::{ChatView, SendOutcome};
pub use client::{HttpSummarizeClient, SummarizeClient};
pub use config::ClientConfig;
pub use error::{Result, TldlError};
pub use format::{format_duration, format_panel, format_turn};
pub use landing::{LandingView, Panel, PanelBody, SummaryState, Tab, TabSelection, TakeawaysState};
pub use session::Session;
pub use storage::{FileStore, LinkStore, MEDIA_LINK_KEY, MemoryStore};
pub use types::{Outcome, Role, SummarizeRequest, SummarizeResponse, Turn};
