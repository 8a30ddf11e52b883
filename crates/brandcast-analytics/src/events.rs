//! The global social-media event log.

use brandcast_common::{Brand, BrandcastError, Result, Sentiment};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M",
];

/// Parses the timestamp layouts seen in the exports.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .map(|d| d.and_time(NaiveTime::MIN))
        })
}

#[derive(Debug, Deserialize)]
struct RawEvent {
    brand_name: String,
    timestamp: String,
    day_of_week: String,
    sentiment_label: String,
    engagement_rate: Option<f64>,
}

/// One post in the event log.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub brand: String,
    pub timestamp: NaiveDateTime,
    pub day_of_week: String,
    pub sentiment: Sentiment,
    /// Blank cells are `None` and do not contribute to means.
    pub engagement_rate: Option<f64>,
}

/// Immutable, table-ordered event log.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    pub fn new(events: Vec<Event>) -> Self {
        Self { events }
    }

    /// Reads the CSV export. Columns other than the ones used are ignored.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(BrandcastError::missing_dataset(path));
        }

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)?;

        let mut events = Vec::new();
        for (index, row) in reader.deserialize::<RawEvent>().enumerate() {
            let raw = row?;
            let timestamp = parse_timestamp(&raw.timestamp).ok_or_else(|| {
                BrandcastError::dataset(format!(
                    "unparseable timestamp '{}' at row {}",
                    raw.timestamp,
                    index + 1
                ))
            })?;
            events.push(Event {
                brand: raw.brand_name,
                timestamp,
                day_of_week: raw.day_of_week,
                sentiment: Sentiment::from_label(&raw.sentiment_label),
                engagement_rate: raw.engagement_rate.filter(|r| !r.is_nan()),
            });
        }

        info!("Loaded {} events from {}", events.len(), path.display());
        Ok(Self { events })
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// The brand's events in table order.
    pub fn for_brand<'a>(&'a self, brand: &'a Brand) -> impl Iterator<Item = &'a Event> + 'a {
        self.events.iter().filter(move |e| e.brand == brand.as_str())
    }
}
