//! The blocking policy entity and its activation predicate

use chrono::{DateTime, Datelike, Local, Timelike};
use focus_util::{DaySet, PolicyId, WallClock};

/// Well-known id of the built-in "Always Block" policy.
pub const ALWAYS_BLOCK_ID: &str = "system_always_block";

/// A reusable blocking policy with time constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockingPolicy {
    pub id: PolicyId,
    pub name: String,
    pub start: WallClock,
    pub end: WallClock,
    pub days: DaySet,
    /// True for built-in policies. System policies cannot be edited
    /// or deleted.
    pub is_system_policy: bool,
}

impl BlockingPolicy {
    /// Create a new user policy with a fresh id.
    pub fn new(name: impl Into<String>, start: WallClock, end: WallClock, days: DaySet) -> Self {
        Self {
            id: PolicyId::generate(),
            name: name.into(),
            start,
            end,
            days,
            is_system_policy: false,
        }
    }

    /// Check if this policy is active at a specific instant.
    ///
    /// A window with `start == end` is degenerate and never active.
    pub fn is_active_at(&self, dt: &DateTime<Local>) -> bool {
        if !self.days.contains(dt.weekday()) {
            return false;
        }

        let time = dt.time();
        let t = match WallClock::new(time.hour() as u8, time.minute() as u8) {
            Some(t) => t,
            None => return false,
        };

        if self.start == self.end {
            return false;
        }

        if self.start < self.end {
            // Normal range (e.g. 07:00-10:00)
            t >= self.start && t < self.end
        } else {
            // Overnight range (e.g. 22:00-06:00)
            t >= self.start || t < self.end
        }
    }

    /// Human-readable time range, e.g. "07:00 - 10:00".
    pub fn time_range_string(&self) -> String {
        format!("{} - {}", self.start, self.end)
    }

    /// Short description of the day set.
    pub fn days_string(&self) -> String {
        if self.days == DaySet::ALL_DAYS {
            return "Every day".to_string();
        }
        if self.days == DaySet::WEEKENDS {
            return "Weekends".to_string();
        }
        if self.days == DaySet::WEEKDAYS {
            return "Weekdays".to_string();
        }

        self.days
            .days()
            .iter()
            .map(|d| short_day_name(*d))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// The built-in always-on policy covering every day, 00:00-23:59.
    pub fn always_block() -> Self {
        Self {
            id: PolicyId::new(ALWAYS_BLOCK_ID),
            name: "Always Block".to_string(),
            start: WallClock { hour: 0, minute: 0 },
            end: WallClock {
                hour: 23,
                minute: 59,
            },
            days: DaySet::ALL_DAYS,
            is_system_policy: true,
        }
    }

    /// The fixed set of built-in system policies.
    pub fn system_policies() -> Vec<Self> {
        vec![Self::always_block()]
    }
}

fn short_day_name(day: chrono::Weekday) -> &'static str {
    match day {
        chrono::Weekday::Mon => "Mon",
        chrono::Weekday::Tue => "Tue",
        chrono::Weekday::Wed => "Wed",
        chrono::Weekday::Thu => "Thu",
        chrono::Weekday::Fri => "Fri",
        chrono::Weekday::Sat => "Sat",
        chrono::Weekday::Sun => "Sun",
    }
}
