use derive_more::{Display, Error};

#[derive(Debug, Display, Error)]
pub enum ClientError {
    #[display(fmt = "Invalid credentials")]
    InvalidCredentials,

    #[display(fmt = "Not logged in")]
    NotLoggedIn,

    #[display(fmt = "Request failed: {}", _0)]
    Http(#[error(source)] reqwest::Error),

    /// Non-success answer from the API, with its `error`/`message` text.
    #[display(fmt = "Server returned {}: {}", status, message)]
    Server { status: u16, message: String },

    #[display(fmt = "I/O error: {}", _0)]
    Io(#[error(source)] std::io::Error),

    #[display(fmt = "{}", _0)]
    Invalid(#[error(not(source))] String),
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        ClientError::Http(e)
    }
}

impl From<std::io::Error> for ClientError {
    fn from(e: std::io::Error) -> Self {
        ClientError::Io(e)
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
