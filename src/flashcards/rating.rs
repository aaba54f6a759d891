//! Difficulty ratings and suppression delays
//!
//! The scheduler accepts any non-negative day count. The four tiers here are
//! what the study screen offers:
//! - Hard: 1 day
//! - Medium: 3 days
//! - Easy: 7 days
//! - Perfect: 14 days

use chrono::Duration;
use serde::{Deserialize, Serialize};

use super::error::{FlashcardError, Result};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Self-rated difficulty of a reviewed card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Rating {
    Hard,
    Medium,
    Easy,
    Perfect,
}

impl Rating {
    pub const ALL: [Rating; 4] = [Rating::Hard, Rating::Medium, Rating::Easy, Rating::Perfect];

    pub fn label(&self) -> &'static str {
        match self {
            Rating::Hard => "Hard",
            Rating::Medium => "Medium",
            Rating::Easy => "Easy",
            Rating::Perfect => "Perfect",
        }
    }

    /// Map a single-key study command to a rating
    pub fn from_key(key: char) -> Option<Self> {
        match key.to_ascii_lowercase() {
            'h' | '1' => Some(Rating::Hard),
            'm' | '2' => Some(Rating::Medium),
            'e' | '3' => Some(Rating::Easy),
            'p' | '4' => Some(Rating::Perfect),
            _ => None,
        }
    }
}

/// Day counts for each rating tier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingDelays {
    pub hard: f64,
    pub medium: f64,
    pub easy: f64,
    pub perfect: f64,
}

impl Default for RatingDelays {
    fn default() -> Self {
        Self {
            hard: 1.0,
            medium: 3.0,
            easy: 7.0,
            perfect: 14.0,
        }
    }
}

impl RatingDelays {
    pub fn days(&self, rating: Rating) -> f64 {
        match rating {
            Rating::Hard => self.hard,
            Rating::Medium => self.medium,
            Rating::Easy => self.easy,
            Rating::Perfect => self.perfect,
        }
    }

    pub fn validate(&self) -> Result<()> {
        for rating in Rating::ALL {
            delay_duration(self.days(rating))?;
        }
        Ok(())
    }
}

/// Convert a (possibly fractional) day count to calendar time
pub fn delay_duration(days: f64) -> Result<Duration> {
    if !days.is_finite() || days < 0.0 {
        return Err(FlashcardError::validation(format!(
            "delay must be a non-negative number of days, got {}",
            days
        )));
    }

    let millis = (days * MILLIS_PER_DAY).round() as i64;
    Duration::try_milliseconds(millis)
        .ok_or_else(|| FlashcardError::validation(format!("delay of {} days is too large", days)))
}

/// Format a day count to a short human-readable string
pub fn format_interval(days: f64) -> String {
    if days < 1.0 {
        let hours = (days * 24.0).round() as i64;
        if hours == 0 {
            "now".to_string()
        } else {
            format!("{}h", hours)
        }
    } else if days < 7.0 {
        format!("{}d", days.round() as i64)
    } else if days < 30.0 {
        format!("{}w", (days / 7.0).floor() as i64)
    } else if days < 365.0 {
        format!("{}mo", (days / 30.0).floor() as i64)
    } else {
        format!("{}y", (days / 365.0).floor() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tiers() {
        let delays = RatingDelays::default();
        assert_eq!(delays.days(Rating::Hard), 1.0);
        assert_eq!(delays.days(Rating::Medium), 3.0);
        assert_eq!(delays.days(Rating::Easy), 7.0);
        assert_eq!(delays.days(Rating::Perfect), 14.0);
    }

    #[test]
    fn test_fractional_days() {
        assert_eq!(delay_duration(0.5).unwrap(), Duration::hours(12));
        assert_eq!(delay_duration(0.0).unwrap(), Duration::zero());
        assert_eq!(delay_duration(14.0).unwrap(), Duration::days(14));
    }

    #[test]
    fn test_rejects_negative_and_non_finite() {
        assert!(matches!(delay_duration(-1.0), Err(FlashcardError::Validation(_))));
        assert!(matches!(delay_duration(f64::NAN), Err(FlashcardError::Validation(_))));
        assert!(matches!(delay_duration(f64::INFINITY), Err(FlashcardError::Validation(_))));
    }

    #[test]
    fn test_from_key() {
        assert_eq!(Rating::from_key('h'), Some(Rating::Hard));
        assert_eq!(Rating::from_key('P'), Some(Rating::Perfect));
        assert_eq!(Rating::from_key('3'), Some(Rating::Easy));
        assert_eq!(Rating::from_key('x'), None);
    }

    #[test]
    fn test_invalid_configured_delay() {
        let delays = RatingDelays {
            medium: -2.0,
            ..RatingDelays::default()
        };
        assert!(delays.validate().is_err());
        assert!(RatingDelays::default().validate().is_ok());
    }

    #[test]
    fn test_format_interval() {
        assert_eq!(format_interval(0.0), "now");
        assert_eq!(format_interval(0.5), "12h");
        assert_eq!(format_interval(1.0), "1d");
        assert_eq!(format_interval(3.0), "3d");
        assert_eq!(format_interval(7.0), "1w");
        assert_eq!(format_interval(14.0), "2w");
        assert_eq!(format_interval(90.0), "3mo");
        assert_eq!(format_interval(730.0), "2y");
    }
}
