//! GitHub GraphQL access for the contribution calendar.

use crate::contributions::ContributionCalendar;
use crate::error::FetchError;
use octocrab::service::middleware::retry::RetryConfig;
use octocrab::Octocrab;
use serde::{Deserialize, Serialize};

/// Public GitHub API. The GraphQL endpoint is `<base>/graphql`.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// The login is passed as a variable, never spliced into the document.
pub const CONTRIBUTIONS_QUERY: &str = "\
query($login: String!) {
    user(login: $login) {
        contributionsCollection {
            contributionCalendar {
                totalContributions
                weeks {
                    contributionDays {
                        contributionCount
                        date
                    }
                }
            }
        }
    }
}";

#[derive(Debug, Serialize)]
pub struct GraphQlRequest<'a> {
    pub query: &'a str,
    pub variables: LoginVariables<'a>,
}

#[derive(Debug, Serialize)]
pub struct LoginVariables<'a> {
    pub login: &'a str,
}

impl<'a> GraphQlRequest<'a> {
    pub fn contributions(login: &'a str) -> Self {
        Self {
            query: CONTRIBUTIONS_QUERY,
            variables: LoginVariables { login },
        }
    }
}

/// Top-level GraphQL response. `data` and `errors` may both be present.
#[derive(Debug, Deserialize)]
pub struct ContributionsEnvelope {
    data: Option<ResponseData>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct ResponseData {
    user: Option<User>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct User {
    contributions_collection: ContributionsCollection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContributionsCollection {
    contribution_calendar: ContributionCalendar,
}

impl ContributionsEnvelope {
    /// Unwraps the calendar, turning GraphQL-level failures into errors.
    pub fn into_calendar(self, login: &str) -> Result<ContributionCalendar, FetchError> {
        if !self.errors.is_empty() {
            return Err(FetchError::GraphQl(
                self.errors.into_iter().map(|e| e.message).collect(),
            ));
        }

        let data = self
            .data
            .ok_or_else(|| FetchError::Decode("response carried no data".to_string()))?;
        let user = data
            .user
            .ok_or_else(|| FetchError::UserNotFound(login.to_string()))?;

        Ok(user.contributions_collection.contribution_calendar)
    }
}

/// A GitHub client authenticated with a single bearer token.
#[derive(Clone)]
pub struct GitHubClient {
    octocrab: Octocrab,
}

impl GitHubClient {
    pub fn new(api_url: &str, token: &str) -> Result<Self, FetchError> {
        let builder = Octocrab::builder()
            .base_uri(api_url)
            .map_err(|e| FetchError::InvalidEndpoint(format!("{api_url}: {e}")))?;

        let octocrab = builder
            .personal_token(token.to_string())
            .add_retry_config(RetryConfig::None)
            .build()?;

        Ok(Self { octocrab })
    }

    /// Sends exactly one GraphQL request for `login`'s contribution calendar.
    pub async fn fetch_calendar(&self, login: &str) -> Result<ContributionCalendar, FetchError> {
        let request = GraphQlRequest::contributions(login);
        let envelope: ContributionsEnvelope = self.octocrab.graphql(&request).await?;
        envelope.into_calendar(login)
    }
}
