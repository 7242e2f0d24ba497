use std::fmt;

use strum::{Display, EnumString};

pub mod error;

use error::{
    ConfidenceScoreValidationError, SentimentScoreValidationError, TickerSymbolValidationError,
};

/// Kind of tradable instrument tracked by the platform.
///
/// Fixed at asset creation; the ingestion tasks pick the matching data provider by kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, sqlx::Type)]
#[strum(serialize_all = "UPPERCASE")]
#[sqlx(rename_all = "UPPERCASE")]
pub enum AssetKind {
    Stock,
    Crypto,
}

/// Prediction look-ahead window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, sqlx::Type)]
pub enum PredictionHorizon {
    #[strum(serialize = "1D")]
    #[sqlx(rename = "1D")]
    OneDay,
    #[strum(serialize = "7D")]
    #[sqlx(rename = "7D")]
    SevenDays,
    #[strum(serialize = "30D")]
    #[sqlx(rename = "30D")]
    ThirtyDays,
}

impl PredictionHorizon {
    /// Every supported horizon, shortest first.
    pub const ALL: [Self; 3] = [Self::OneDay, Self::SevenDays, Self::ThirtyDays];

    /// Returns the horizon length in days.
    pub const fn as_days(&self) -> i64 {
        match self {
            Self::OneDay => 1,
            Self::SevenDays => 7,
            Self::ThirtyDays => 30,
        }
    }
}

/// User subscription tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, sqlx::Type)]
#[strum(serialize_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum SubscriptionPlan {
    #[default]
    Free,
    Premium,
}

impl SubscriptionPlan {
    /// Prediction horizons visible to this tier.
    ///
    /// Free users see the short horizons; the 30-day horizon is premium-only.
    pub fn allowed_horizons(&self) -> &'static [PredictionHorizon] {
        match self {
            Self::Free => &[PredictionHorizon::OneDay, PredictionHorizon::SevenDays],
            Self::Premium => &PredictionHorizon::ALL,
        }
    }
}

/// Origin of a sentiment observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, sqlx::Type)]
#[strum(serialize_all = "PascalCase")]
#[sqlx(rename_all = "PascalCase")]
pub enum SentimentSource {
    Twitter,
    Reddit,
    News,
    Forum,
    Telegram,
}

impl SentimentSource {
    /// Every supported source kind.
    pub const ALL: [Self; 5] = [
        Self::Twitter,
        Self::Reddit,
        Self::News,
        Self::Forum,
        Self::Telegram,
    ];
}

/// Validated prediction confidence, bounded to [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct ConfidenceScore(f64);

impl ConfidenceScore {
    /// Returns the confidence as an `f64` in [0, 1].
    pub fn as_f64(&self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for ConfidenceScore {
    type Error = ConfidenceScoreValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() {
            return Err(ConfidenceScoreValidationError::InvalidConfidenceScoreNotFinite);
        }

        if !(0. ..=1.).contains(&value) {
            return Err(ConfidenceScoreValidationError::InvalidConfidenceScoreOutOfBounds(value));
        }

        Ok(Self(value))
    }
}

impl fmt::Display for ConfidenceScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Validated sentiment score, bounded to [0, 1].
///
/// 0 is maximally bearish mood, 1 maximally bullish.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct SentimentScore(f64);

impl SentimentScore {
    /// Returns the score as an `f64` in [0, 1].
    pub fn as_f64(&self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for SentimentScore {
    type Error = SentimentScoreValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() {
            return Err(SentimentScoreValidationError::InvalidSentimentScoreNotFinite);
        }

        if !(0. ..=1.).contains(&value) {
            return Err(SentimentScoreValidationError::InvalidSentimentScoreOutOfBounds(value));
        }

        Ok(Self(value))
    }
}

impl fmt::Display for SentimentScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.0)
    }
}

/// Validated ticker symbol: non-empty, at most [`TickerSymbol::MAX_LEN`] characters,
/// normalized to uppercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TickerSymbol(String);

impl TickerSymbol {
    /// Maximum symbol length: 10 characters.
    pub const MAX_LEN: usize = 10;

    /// Returns the normalized symbol as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for TickerSymbol {
    type Error = TickerSymbolValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_uppercase();

        if normalized.is_empty() {
            return Err(TickerSymbolValidationError::InvalidTickerSymbolEmpty);
        }

        if normalized.chars().count() > Self::MAX_LEN {
            return Err(TickerSymbolValidationError::InvalidTickerSymbolTooLong(
                normalized.chars().count(),
            ));
        }

        if let Some(invalid) = normalized
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '-')))
        {
            return Err(TickerSymbolValidationError::InvalidTickerSymbolCharacter(
                invalid,
            ));
        }

        Ok(Self(normalized))
    }
}

impl TryFrom<String> for TickerSymbol {
    type Error = TickerSymbolValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl AsRef<str> for TickerSymbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TickerSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests;
