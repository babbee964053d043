use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Reader sentiment on a news article, from most to least bullish.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Sentiment {
    UltraBullish,
    Positive,
    Neutral,
    Negative,
    UltraBearish,
}

impl Sentiment {
    pub const ALL: [Sentiment; 5] = [
        Sentiment::UltraBullish,
        Sentiment::Positive,
        Sentiment::Neutral,
        Sentiment::Negative,
        Sentiment::UltraBearish,
    ];

    /// The label the backend stores and the frontend displays.
    pub fn as_str(self) -> &'static str {
        match self {
            Sentiment::UltraBullish => "Ultra-Bullish",
            Sentiment::Positive => "Positive",
            Sentiment::Neutral => "Neutral",
            Sentiment::Negative => "Negative",
            Sentiment::UltraBearish => "Ultra-Bearish",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A fully rendered news article, ready to insert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsDraft {
    pub category: String,
    pub title: String,
    pub content: String,
    pub source: String,
    pub author: String,
    pub published_at: NaiveDateTime,
}
