//! ClientPoller: the portal's only talker to the backend
//!
//! Every operation turns its outcome into display state. Failures are logged
//! and rendered, never returned; the next scheduled tick is the retry.

use crate::api::BackendApi;
use crate::model::Notice;
use crate::state::StateHandle;
use crate::PortalError;

/// Polls the backend and writes results into the shared display state
#[derive(Debug)]
pub struct ClientPoller {
    api: BackendApi,
    state: StateHandle,
}

impl ClientPoller {
    pub fn new(api: BackendApi, state: StateHandle) -> Self {
        Self { api, state }
    }

    pub fn state(&self) -> &StateHandle {
        &self.state
    }

    /// Poll `/health` and update the status indicators
    pub async fn check_health(&self) {
        match self.api.health().await {
            Ok(response) => {
                let mut state = self.state.write().await;
                state.health.apply_response(&response);
                tracing::debug!("Health: {:?}", state.health);
            }
            Err(e) => {
                tracing::warn!("Health check failed: {}", e);
                self.state.write().await.health.mark_unreachable();
            }
        }
    }

    /// Poll `/api/stats`; the displayed count only changes when a new one arrives
    pub async fn fetch_stats(&self) {
        match self.api.stats().await {
            Ok(stats) => match stats.total_messages {
                Some(total) => self.state.write().await.update_stats(total),
                None => tracing::debug!("Stats response carried no total_messages"),
            },
            Err(e) => tracing::warn!("Fetching stats failed: {}", e),
        }
    }

    /// Fetch `/api/messages` and replace the rendered list
    pub async fn fetch_messages(&self) {
        match self.api.messages().await {
            Ok(messages) => {
                tracing::debug!("Fetched {} messages", messages.len());
                self.state.write().await.replace_messages(messages);
            }
            Err(e) => {
                tracing::warn!("Loading messages failed: {}", e);
                self.state.write().await.fail_messages();
            }
        }
    }

    /// Periodic refresh of the message list and the count
    pub async fn refresh(&self) {
        tokio::join!(self.fetch_messages(), self.fetch_stats());
    }

    /// Post a new message and report the outcome to the submitter.
    ///
    /// On success the list and count are re-fetched before returning. On
    /// failure nothing is refreshed; keeping the typed values is up to the
    /// caller, which owns the form.
    pub async fn submit_message(&self, author: &str, content: &str) -> Notice {
        let notice = match self.api.create_message(author, content).await {
            Ok(()) => {
                self.fetch_messages().await;
                self.fetch_stats().await;
                Notice::Sent
            }
            Err(PortalError::Application { status }) => {
                tracing::warn!("Backend rejected message with HTTP {}", status);
                Notice::Rejected
            }
            Err(e) => {
                tracing::warn!("Submitting message failed: {}", e);
                Notice::NetworkError
            }
        };

        tracing::info!("Message submission: {}", notice);
        notice
    }
}
