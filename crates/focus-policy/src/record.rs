//! Serde record form of a blocking policy
//!
//! The persisted shape keeps hour/minute fields and upper-case day
//! names so stored documents stay readable and stable across releases.

use crate::BlockingPolicy;
use chrono::Weekday;
use focus_util::{DaySet, PolicyId, WallClock};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A blocking policy as stored on disk.
///
/// System policies are compiled in and never serialized; a parsed
/// record is always a user policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyRecord {
    pub id: String,
    pub name: String,
    pub start_hour: u8,
    pub start_minute: u8,
    pub end_hour: u8,
    pub end_minute: u8,
    /// Upper-case day names, e.g. `["MONDAY", "TUESDAY"]`.
    pub days: Vec<String>,
}

impl From<&BlockingPolicy> for PolicyRecord {
    fn from(policy: &BlockingPolicy) -> Self {
        Self {
            id: policy.id.as_str().to_string(),
            name: policy.name.clone(),
            start_hour: policy.start.hour,
            start_minute: policy.start.minute,
            end_hour: policy.end.hour,
            end_minute: policy.end.minute,
            days: policy.days.days().iter().map(|d| day_name(*d).to_string()).collect(),
        }
    }
}

impl PolicyRecord {
    /// Convert a stored record back into a policy.
    ///
    /// Returns `None` for records with out-of-range times or unknown
    /// day names; callers drop such records rather than failing the
    /// whole document.
    pub fn into_policy(self) -> Option<BlockingPolicy> {
        let start = WallClock::new(self.start_hour, self.start_minute)?;
        let end = WallClock::new(self.end_hour, self.end_minute)?;

        let mut days = DaySet::NONE;
        for name in &self.days {
            match parse_day(name) {
                Some(day) => days = days.with(day),
                None => {
                    warn!(policy_id = %self.id, day = %name, "Unknown day name in stored policy");
                    return None;
                }
            }
        }

        Some(BlockingPolicy {
            id: PolicyId::new(self.id),
            name: self.name,
            start,
            end,
            days,
            is_system_policy: false,
        })
    }
}

fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "MONDAY",
        Weekday::Tue => "TUESDAY",
        Weekday::Wed => "WEDNESDAY",
        Weekday::Thu => "THURSDAY",
        Weekday::Fri => "FRIDAY",
        Weekday::Sat => "SATURDAY",
        Weekday::Sun => "SUNDAY",
    }
}

fn parse_day(name: &str) -> Option<Weekday> {
    match name {
        "MONDAY" => Some(Weekday::Mon),
        "TUESDAY" => Some(Weekday::Tue),
        "WEDNESDAY" => Some(Weekday::Wed),
        "THURSDAY" => Some(Weekday::Thu),
        "FRIDAY" => Some(Weekday::Fri),
        "SATURDAY" => Some(Weekday::Sat),
        "SUNDAY" => Some(Weekday::Sun),
        _ => None,
    }
}
