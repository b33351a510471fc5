use std::sync::Arc;

use tracing::{debug, warn};

use crate::{
    client::{HttpSummarizeClient, SummarizeClient},
    config::ClientConfig,
    error::Result,
    storage::{FileStore, LinkStore, MEDIA_LINK_KEY},
    types::{Outcome, SummarizeRequest},
};

/// Application-level context shared by the landing and chat views.
///
/// Owns the link store that bridges the two views and the client both of them
/// talk to. Cloning is cheap; clones share the same store and client.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn LinkStore>,
    client: Arc<dyn SummarizeClient>,
    takeaways_prompt: Arc<str>,
}

impl Session {
    pub fn new(
        store: Arc<dyn LinkStore>,
        client: Arc<dyn SummarizeClient>,
        takeaways_prompt: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            store,
            client,
            takeaways_prompt: takeaways_prompt.into(),
        }
    }

    /// File-backed store plus HTTP client, as configured.
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(
            Arc::new(FileStore::new(&config.storage_path)),
            Arc::new(HttpSummarizeClient::new(config.api_url.clone())),
            config.takeaways_prompt.as_str(),
        )
    }

    pub fn takeaways_prompt(&self) -> &str {
        &self.takeaways_prompt
    }

    pub fn remember_link(&self, link: &str) -> Result<()> {
        self.store.set(MEDIA_LINK_KEY, link)
    }

    /// The stored media link, if any. Empty values count as absent.
    pub fn media_link(&self) -> Result<Option<String>> {
        Ok(self
            .store
            .get(MEDIA_LINK_KEY)?
            .filter(|link| !link.is_empty()))
    }

    /// Issue one request and flatten the result. Never retries.
    pub async fn request(&self, request: SummarizeRequest) -> Outcome {
        debug!(youtube_url = %request.youtube_url, query = ?request.query, "request dispatched");
        let outcome = Outcome::from(self.client.summarize(&request).await);
        match &outcome {
            Outcome::Answered(_) => debug!("request answered"),
            Outcome::Malformed => warn!("response carried no summary"),
            Outcome::Failed(reason) => warn!(%reason, "request failed"),
        }
        outcome
    }
}
