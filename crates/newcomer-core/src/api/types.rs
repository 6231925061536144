//! Wire payloads exchanged with the answer-and-content backend.
//!
//! Field names follow the backend's request models, including its
//! `language_preferance` spelling.

use serde::{Deserialize, Serialize};

use crate::models::{Event, FaqItem, UserPreferences};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub status: String,
    pub interests: Vec<String>,
    pub country: String,
    pub state: String,
    #[serde(rename = "language_preferance")]
    pub language_preference: String,
    pub question: String,
}

impl ChatRequest {
    pub fn new(preferences: &UserPreferences, question: impl Into<String>) -> Self {
        Self {
            status: preferences.visa_status.clone(),
            interests: preferences.interests_vec(),
            country: preferences.country.clone(),
            state: preferences.state.clone(),
            language_preference: preferences.language_preference.clone(),
            question: question.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub answer: String,
}

/// FAQ requests carry only status and language
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqRequest {
    pub status: String,
    #[serde(rename = "language_preferance")]
    pub language_preference: String,
}

impl FaqRequest {
    pub fn new(preferences: &UserPreferences) -> Self {
        Self {
            status: preferences.visa_status.clone(),
            language_preference: preferences.language_preference.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqResponse {
    #[serde(default)]
    pub faqs: Vec<FaqItem>,
}

/// Shared by the preset-question and recommendation operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalizedRequest {
    pub status: String,
    pub interests: Vec<String>,
    pub country: String,
    pub state: String,
    #[serde(rename = "language_preferance")]
    pub language_preference: String,
}

impl PersonalizedRequest {
    pub fn new(preferences: &UserPreferences) -> Self {
        Self {
            status: preferences.visa_status.clone(),
            interests: preferences.interests_vec(),
            country: preferences.country.clone(),
            state: preferences.state.clone(),
            language_preference: preferences.language_preference.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetQuestionsResponse {
    #[serde(default)]
    pub queries: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendedLocation {
    #[serde(default, deserialize_with = "lenient_string")]
    pub venue_name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub is_virtual: bool,
}

impl RecommendedLocation {
    /// "venue, city, state" without empty parts; virtual events say so
    pub fn display(&self) -> String {
        if self.is_virtual {
            return "Online".to_string();
        }
        [&self.venue_name, &self.city, &self.state]
            .iter()
            .map(|part| part.trim())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// An event as the recommendations operation returns it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendedEvent {
    pub id: serde_json::Value,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub start_datetime: String,
    pub location: RecommendedLocation,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub image_url: String,
}

impl From<RecommendedEvent> for Event {
    fn from(event: RecommendedEvent) -> Self {
        let id = match &event.id {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        let (date, time) = split_datetime(&event.start_datetime);
        Event {
            id,
            title: event.name,
            date,
            time,
            location: event.location.display(),
            description: event.description,
            category: event.category,
            image_ref: event.image_url,
        }
    }
}

/// Split "2024-01-15T14:00:00" into ("2024-01-15", "2:00 PM").
/// Unparseable values are kept whole as the date.
fn split_datetime(raw: &str) -> (String, String) {
    let raw = raw.trim();
    let parsed = chrono::DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.naive_local())
        .or_else(|_| chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .or_else(|_| chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S"));
    match parsed {
        Ok(dt) => (
            dt.format("%Y-%m-%d").to_string(),
            dt.format("%-I:%M %p").to_string(),
        ),
        Err(_) => (raw.to_string(), String::new()),
    }
}

/// Accept a string, a number, null, or a one-element array wrapping one of
/// those. The backend occasionally serializes scalar fields as 1-tuples.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    fn flatten(value: serde_json::Value) -> String {
        match value {
            serde_json::Value::String(s) => s,
            serde_json::Value::Null => String::new(),
            serde_json::Value::Array(items) => items.into_iter().next().map(flatten).unwrap_or_default(),
            other => other.to_string(),
        }
    }
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(flatten(value))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationsResponse {
    #[serde(default)]
    pub events: Vec<RecommendedEvent>,
}
