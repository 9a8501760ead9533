use thiserror::Error;

/// Why a contribution fetch did not publish a new snapshot.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("GitHub returned an error: {0}")]
    Protocol(String),
    #[error("Unexpected response shape: {0}")]
    Decode(String),
    #[error("GraphQL errors: {}", .0.join("; "))]
    GraphQl(Vec<String>),
    #[error("GitHub user not found: {0}")]
    UserNotFound(String),
    #[error("No GitHub token configured")]
    MissingCredential,
    #[error("Username must not be empty")]
    InvalidUsername,
    #[error("Invalid GitHub API endpoint: {0}")]
    InvalidEndpoint(String),
}

impl FetchError {
    /// Configuration problems on our side, as opposed to upstream failures.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            FetchError::MissingCredential
                | FetchError::InvalidUsername
                | FetchError::InvalidEndpoint(_)
        )
    }

    pub fn is_rate_limited(&self) -> bool {
        match self {
            FetchError::Protocol(message) => message.to_lowercase().contains("rate limit"),
            FetchError::GraphQl(messages) => messages
                .iter()
                .any(|m| m.to_lowercase().contains("rate limit")),
            _ => false,
        }
    }
}

impl From<octocrab::Error> for FetchError {
    fn from(err: octocrab::Error) -> Self {
        match err {
            octocrab::Error::GitHub { source, .. } => FetchError::Protocol(source.message),
            octocrab::Error::Serde { source, .. } => FetchError::Decode(source.to_string()),
            octocrab::Error::Json { source, .. } => FetchError::Decode(source.to_string()),
            other => FetchError::Transport(other.to_string()),
        }
    }
}
