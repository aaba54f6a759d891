//! Data models for the flashcard system

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// A flashcard with a question, an answer and an optional image path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Stable identity, independent of the card's position in the store.
    /// Cards written before ids existed load as nil and are assigned one on open.
    #[serde(default = "Uuid::nil")]
    pub id: Uuid,
    pub question: String,
    pub answer: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "empty_string_as_none"
    )]
    pub image: Option<String>,
}

impl Card {
    pub fn new(question: String, answer: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            question,
            answer,
            image: None,
        }
    }

    pub fn with_image(mut self, image: Option<String>) -> Self {
        self.image = image.filter(|path| !path.trim().is_empty());
        self
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

/// Suppression state of a card that has been rated at least once
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SuppressionRecord {
    /// The card is hidden from study while now < this instant.
    /// Absent means the window has already elapsed.
    #[serde(default, with = "timestamp::option")]
    pub suppress_until: Option<DateTime<Utc>>,
    #[serde(default, with = "timestamp::option")]
    pub last_reviewed: Option<DateTime<Utc>>,
}

impl SuppressionRecord {
    pub fn new(suppress_until: DateTime<Utc>, last_reviewed: DateTime<Utc>) -> Self {
        Self {
            suppress_until: Some(suppress_until),
            last_reviewed: Some(last_reviewed),
        }
    }

    /// Whether the card is still hidden at `now`
    pub fn is_suppressed_at(&self, now: DateTime<Utc>) -> bool {
        self.suppress_until.map_or(false, |until| now < until)
    }
}

/// Study availability of a card at a given instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CardStatus {
    Available,
    Suppressed { until: DateTime<Utc> },
}

impl CardStatus {
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available)
    }
}

/// Totals shown on the statistics screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_cards: usize,
    pub available_cards: usize,
    pub suppressed_cards: usize,
}

/// One line of the per-card status table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardStatusRow {
    pub index: usize,
    pub id: Uuid,
    pub question: String,
    pub status: CardStatus,
}

/// Lenient ISO-8601 timestamp (de)serialization.
///
/// Writes RFC 3339 in UTC. Reads RFC 3339, or a naive date-time / date in
/// local time, which is what older progress files contain.
pub mod timestamp {
    use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};

    const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

    pub fn format(value: &DateTime<Utc>) -> String {
        value.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    }

    pub fn parse(text: &str) -> Result<DateTime<Utc>, String> {
        let text = text.trim();

        if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
            return Ok(parsed.with_timezone(&Utc));
        }

        let naive = NAIVE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
            .or_else(|| {
                NaiveDate::parse_from_str(text, "%Y-%m-%d")
                    .ok()
                    .and_then(|date| date.and_hms_opt(0, 0, 0))
            })
            .ok_or_else(|| format!("invalid timestamp: {:?}", text))?;

        // Nonexistent local times (DST gaps) fall back to reading the value as UTC
        Ok(Local
            .from_local_datetime(&naive)
            .earliest()
            .map(|local| local.with_timezone(&Utc))
            .unwrap_or_else(|| Utc.from_utc_datetime(&naive)))
    }

    pub mod option {
        use chrono::{DateTime, Utc};
        use serde::{de, Deserialize, Deserializer, Serializer};

        pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match value {
                Some(value) => serializer.serialize_str(&super::format(value)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
        where
            D: Deserializer<'de>,
        {
            let text: Option<String> = Option::deserialize(deserializer)?;
            match text.as_deref().map(str::trim) {
                None | Some("") => Ok(None),
                Some(text) => super::parse(text).map(Some).map_err(de::Error::custom),
            }
        }
    }
}
