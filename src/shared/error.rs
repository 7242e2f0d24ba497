use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ConfidenceScoreValidationError {
    #[error("Confidence score must be a finite number")]
    InvalidConfidenceScoreNotFinite,

    #[error("Confidence score {0} is outside the [0, 1] range")]
    InvalidConfidenceScoreOutOfBounds(f64),
}

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum SentimentScoreValidationError {
    #[error("Sentiment score must be a finite number")]
    InvalidSentimentScoreNotFinite,

    #[error("Sentiment score {0} is outside the [0, 1] range")]
    InvalidSentimentScoreOutOfBounds(f64),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TickerSymbolValidationError {
    #[error("Ticker symbol can't be empty")]
    InvalidTickerSymbolEmpty,

    #[error("Ticker symbol is {0} characters long, the maximum is 10")]
    InvalidTickerSymbolTooLong(usize),

    #[error("Ticker symbol contains invalid character `{0}`")]
    InvalidTickerSymbolCharacter(char),
}
