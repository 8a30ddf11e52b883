//! Best posting day and sentiment mix.

use crate::events::{Event, EventLog};
use brandcast_common::{Brand, BrandcastError, Result, Sentiment};
use brandcast_config::Config;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Percentages over the recent window. `neutral` is whatever remains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SentimentMix {
    pub positive: u32,
    pub negative: u32,
    pub neutral: u32,
}

impl SentimentMix {
    /// Positive and negative shares truncated toward zero, computed in
    /// floating point the way a dataframe ratio would be.
    pub fn from_counts(positive: usize, negative: usize, total: usize) -> Self {
        if total == 0 {
            return Self {
                positive: 0,
                negative: 0,
                neutral: 100,
            };
        }
        let pct = |count: usize| ((count as f64 / total as f64) * 100.0) as u32;
        let positive = pct(positive);
        let negative = pct(negative);
        debug_assert!(positive + negative <= 100);
        Self {
            positive,
            negative,
            neutral: 100u32.saturating_sub(positive + negative),
        }
    }
}

/// Auxiliary statistics for one brand.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrandInsights {
    pub brand: Brand,
    /// `None` when no weekday group has a numeric engagement mean.
    pub best_day: Option<String>,
    pub sentiment: SentimentMix,
    /// Events in the sentiment window.
    pub events_considered: usize,
}

/// Weekday with the highest mean engagement. Groups are visited in label
/// order and the first maximum wins; blank rates and blank weekdays are
/// skipped.
pub fn best_day<'a, I>(events: I) -> Option<String>
where
    I: IntoIterator<Item = &'a Event>,
{
    let mut groups: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for event in events {
        let day = event.day_of_week.trim();
        if day.is_empty() {
            continue;
        }
        let entry = groups.entry(day).or_insert((0.0, 0));
        if let Some(rate) = event.engagement_rate {
            entry.0 += rate;
            entry.1 += 1;
        }
    }

    let mut best: Option<(&str, f64)> = None;
    for (day, (sum, count)) in groups {
        if count == 0 {
            continue;
        }
        let mean = sum / count as f64;
        match best {
            Some((_, top)) if mean <= top => {}
            _ => best = Some((day, mean)),
        }
    }
    best.map(|(day, _)| day.to_string())
}

/// Sentiment mix over the last `window` events.
pub fn sentiment_mix(events: &[&Event], window: usize) -> (SentimentMix, usize) {
    let recent = &events[events.len().saturating_sub(window)..];
    let count = |wanted: Sentiment| recent.iter().filter(|e| e.sentiment == wanted).count();
    let mix = SentimentMix::from_counts(
        count(Sentiment::Positive),
        count(Sentiment::Negative),
        recent.len(),
    );
    (mix, recent.len())
}

/// Computes brand insights.
pub trait Analytics: Send + Sync {
    fn insights(&self, brand: &Brand) -> Result<BrandInsights>;
}

/// Insights over an in-memory event log.
#[derive(Debug, Clone)]
pub struct EventAnalytics {
    log: Arc<EventLog>,
    sentiment_window: usize,
}

impl EventAnalytics {
    pub fn new(log: Arc<EventLog>, sentiment_window: usize) -> Self {
        Self {
            log,
            sentiment_window,
        }
    }

    pub fn from_config(log: Arc<EventLog>, config: &Config) -> Self {
        Self::new(log, config.analytics.sentiment_window)
    }
}

impl Analytics for EventAnalytics {
    #[instrument(skip(self), fields(brand = %brand))]
    fn insights(&self, brand: &Brand) -> Result<BrandInsights> {
        let subset: Vec<&Event> = self.log.for_brand(brand).collect();
        if subset.is_empty() {
            return Err(BrandcastError::no_data(brand.as_str()));
        }

        let best_day = best_day(subset.iter().copied());
        let (sentiment, events_considered) = sentiment_mix(&subset, self.sentiment_window);
        debug!(
            "{} events for {}, best day {:?}, sentiment {:?}",
            subset.len(),
            brand,
            best_day,
            sentiment
        );

        Ok(BrandInsights {
            brand: brand.clone(),
            best_day,
            sentiment,
            events_considered,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use proptest::prelude::*;

    fn event(brand: &str, day: &str, sentiment: Sentiment, rate: Option<f64>) -> Event {
        Event {
            brand: brand.to_string(),
            timestamp: NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_time(NaiveTime::MIN),
            day_of_week: day.to_string(),
            sentiment,
            engagement_rate: rate,
        }
    }

    fn analytics(events: Vec<Event>) -> EventAnalytics {
        EventAnalytics::new(Arc::new(EventLog::new(events)), 100)
    }

    #[test]
    fn test_best_day_picks_highest_mean() {
        let events = vec![
            event("Nike", "Monday", Sentiment::Neutral, Some(0.1)),
            event("Nike", "Monday", Sentiment::Neutral, Some(0.3)),
            event("Nike", "Friday", Sentiment::Neutral, Some(0.25)),
        ];
        // Monday mean 0.2, Friday 0.25.
        assert_eq!(best_day(&events), Some("Friday".to_string()));
    }

    #[test]
    fn test_best_day_tie_goes_to_first_label() {
        let events = vec![
            event("Nike", "Tuesday", Sentiment::Neutral, Some(0.5)),
            event("Nike", "Monday", Sentiment::Neutral, Some(0.5)),
        ];
        assert_eq!(best_day(&events), Some("Monday".to_string()));
    }

    #[test]
    fn test_best_day_skips_blank_rates() {
        let events = vec![
            event("Nike", "Monday", Sentiment::Neutral, None),
            event("Nike", "Monday", Sentiment::Neutral, Some(0.1)),
            event("Nike", "Sunday", Sentiment::Neutral, None),
        ];
        assert_eq!(best_day(&events), Some("Monday".to_string()));
        assert_eq!(best_day(&events[2..]), None);
    }

    #[test]
    fn test_best_day_ignores_blank_weekday() {
        let events = vec![
            event("Nike", "Monday", Sentiment::Positive, Some(0.1)),
            event("Nike", "", Sentiment::Positive, Some(0.9)),
            event("Nike", "  ", Sentiment::Positive, Some(0.8)),
        ];
        assert_eq!(best_day(&events), Some("Monday".to_string()));
        assert_eq!(best_day(&events[1..]), None);

        let insights = analytics(events).insights(&Brand::new("Nike").unwrap()).unwrap();
        assert_eq!(insights.best_day.as_deref(), Some("Monday"));
        assert_eq!(insights.events_considered, 3);
    }

    #[test]
    fn test_all_positive_window() {
        let events: Vec<Event> = (0..150)
            .map(|_| event("Nike", "Monday", Sentiment::Positive, Some(0.1)))
            .collect();
        let insights = analytics(events).insights(&Brand::new("Nike").unwrap()).unwrap();
        assert_eq!(
            insights.sentiment,
            SentimentMix {
                positive: 100,
                negative: 0,
                neutral: 0
            }
        );
        assert_eq!(insights.events_considered, 100);
    }

    #[test]
    fn test_window_uses_most_recent_rows() {
        let mut events: Vec<Event> = (0..100)
            .map(|_| event("Nike", "Monday", Sentiment::Negative, Some(0.1)))
            .collect();
        events.extend((0..100).map(|_| event("Nike", "Monday", Sentiment::Positive, Some(0.1))));
        let insights = analytics(events).insights(&Brand::new("Nike").unwrap()).unwrap();
        assert_eq!(insights.sentiment.positive, 100);
        assert_eq!(insights.sentiment.negative, 0);
    }

    #[test]
    fn test_only_brand_rows_count() {
        let events = vec![
            event("Apple", "Monday", Sentiment::Negative, Some(0.9)),
            event("Nike", "Sunday", Sentiment::Positive, Some(0.1)),
            event("Nike", "Sunday", Sentiment::Neutral, Some(0.1)),
            event("Nike", "Sunday", Sentiment::Unlabeled, Some(0.1)),
        ];
        let insights = analytics(events).insights(&Brand::new("Nike").unwrap()).unwrap();
        assert_eq!(insights.best_day.as_deref(), Some("Sunday"));
        assert_eq!(insights.events_considered, 3);
        assert_eq!(
            insights.sentiment,
            SentimentMix {
                positive: 33,
                negative: 0,
                neutral: 67
            }
        );
    }

    #[test]
    fn test_float_truncation_matches_ratio_then_scale() {
        // 29/100 * 100 is 28.999... in floating point.
        let mix = SentimentMix::from_counts(29, 0, 100);
        assert_eq!(mix.positive, 28);
        assert_eq!(mix.neutral, 72);
    }

    #[test]
    fn test_empty_subset_is_no_data() {
        let events = vec![event("Apple", "Monday", Sentiment::Positive, Some(0.1))];
        let err = analytics(events)
            .insights(&Brand::new("Nike").unwrap())
            .unwrap_err();
        assert!(matches!(err, BrandcastError::NoData { .. }));
    }

    proptest! {
        #[test]
        fn prop_percentages_never_negative(pos in 0usize..200, neg in 0usize..200, other in 0usize..200) {
            let total = pos + neg + other;
            prop_assume!(total > 0);
            let mix = SentimentMix::from_counts(pos, neg, total);
            prop_assert!(mix.positive + mix.negative <= 100);
            prop_assert_eq!(mix.positive + mix.negative + mix.neutral, 100);
        }
    }
}
