//! Fetching and publishing a user's contribution calendar.
//!
//! `ContributionFetcher` owns the most recent [`ContributionSnapshot`]. Each
//! fetch sends one GraphQL request; a successful fetch replaces the snapshot
//! wholesale and notifies subscribers, a failed one leaves it as it was.

use crate::contributions::{self, ContributionSnapshot};
use crate::error::FetchError;
use crate::github::GitHubClient;
use std::sync::Arc;
use tokio::sync::watch;

#[derive(Clone)]
pub struct ContributionFetcher {
    api_url: String,
    published: Arc<watch::Sender<ContributionSnapshot>>,
}

impl ContributionFetcher {
    pub fn new(api_url: impl Into<String>) -> Self {
        let (published, _) = watch::channel(ContributionSnapshot::default());

        Self {
            api_url: api_url.into(),
            published: Arc::new(published),
        }
    }

    /// The last successfully fetched snapshot (empty before the first one).
    pub fn current(&self) -> ContributionSnapshot {
        self.published.borrow().clone()
    }

    /// Receives every snapshot published after this call.
    pub fn subscribe(&self) -> watch::Receiver<ContributionSnapshot> {
        self.published.subscribe()
    }

    /// Fetches `username`'s calendar and publishes it.
    ///
    /// Concurrent calls are not coordinated: whichever completes last
    /// determines the published snapshot.
    pub async fn fetch_contributions(
        &self,
        username: &str,
        token: &str,
    ) -> Result<ContributionSnapshot, FetchError> {
        match self.fetch(username, token).await {
            Ok(snapshot) => {
                self.published.send_replace(snapshot.clone());
                tracing::info!(
                    username = %username,
                    days = snapshot.days.len(),
                    today = snapshot.today_contribution_count,
                    "Published contributions"
                );
                Ok(snapshot)
            }
            Err(e) => {
                tracing::error!(username = %username, "Failed to fetch contributions: {}", e);
                Err(e)
            }
        }
    }

    /// Like [`fetch_contributions`](Self::fetch_contributions), then hands the
    /// outcome to `on_complete` whether it succeeded or not.
    pub async fn fetch_contributions_then<F>(
        &self,
        username: &str,
        token: &str,
        on_complete: F,
    ) -> Result<ContributionSnapshot, FetchError>
    where
        F: FnOnce(&Result<ContributionSnapshot, FetchError>),
    {
        let result = self.fetch_contributions(username, token).await;
        on_complete(&result);
        result
    }

    // The client is built per call because the token is a per-call argument.
    async fn fetch(&self, username: &str, token: &str) -> Result<ContributionSnapshot, FetchError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(FetchError::InvalidUsername);
        }

        let client = GitHubClient::new(&self.api_url, token)?;
        let calendar = client.fetch_calendar(username).await?;

        Ok(ContributionSnapshot::from_calendar(
            calendar,
            &contributions::local_today(),
        ))
    }
}
