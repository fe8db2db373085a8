use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("unexpected payload: {0}")]
    UnexpectedPayload(String),

    #[error("invalid month key: {0}")]
    InvalidMonthKey(String),

    #[error("invalid month range: {from}..{to}")]
    InvalidMonthRange { from: String, to: String },
}
