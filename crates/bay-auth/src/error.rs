use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid access token: {0}")]
    InvalidToken(String),

    #[error("access token is missing the {0} claim")]
    MissingClaim(&'static str),

    #[error("no acting user; set remote.access_token")]
    NotAuthenticated,
}
