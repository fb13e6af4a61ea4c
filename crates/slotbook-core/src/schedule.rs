//! # Schedule Module
//!
//! Time-of-day values, interval overlap, and the weekly availability
//! template bookable items carry.
//!
//! ## Interval Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  Booking slots are HALF-OPEN intervals: [start, end)                │
//! │                                                                     │
//! │  [09:00, 10:00) and [10:00, 11:00)  -> back to back, NO overlap     │
//! │  [09:00, 10:00) and [09:30, 10:30)  -> overlap                      │
//! │                                                                     │
//! │  Rule: a.start < b.end  AND  b.start < a.end                        │
//! │                                                                     │
//! │  Note: dynamic pricing windows (pricing module) are inclusive on    │
//! │  BOTH ends. That asymmetry is intentional; do not unify.            │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ValidationError, ValidationResult};

// =============================================================================
// Time Of Day
// =============================================================================

/// A time of day as minutes since midnight (0..1440).
///
/// ## Design Decisions
/// - **u16 minutes**: total order, cheap comparisons, no time zones
/// - **Serde as "HH:MM"**: templates and requests read naturally in JSON
///
/// ## Example
/// ```rust
/// use slotbook_core::schedule::TimeOfDay;
///
/// let t: TimeOfDay = "09:30".parse().unwrap();
/// assert_eq!(t.to_string(), "09:30");
/// assert!(t < "10:00".parse().unwrap());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    /// Creates a time of day from an hour and minute.
    pub const fn new(hour: u8, minute: u8) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(TimeOfDay(hour as u16 * 60 + minute as u16))
        } else {
            None
        }
    }

    /// Creates a time of day from minutes since midnight.
    pub const fn from_minutes(minutes: u16) -> Option<Self> {
        if minutes < 24 * 60 {
            Some(TimeOfDay(minutes))
        } else {
            None
        }
    }

    /// Minutes since midnight.
    #[inline]
    pub const fn minutes(&self) -> u16 {
        self.0
    }

    /// The hour component (0..24).
    #[inline]
    pub const fn hour(&self) -> u8 {
        (self.0 / 60) as u8
    }

    /// The minute component (0..60).
    #[inline]
    pub const fn minute(&self) -> u8 {
        (self.0 % 60) as u8
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// Parses "HH:MM" (24-hour clock).
impl FromStr for TimeOfDay {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidFormat {
            field: "time".to_string(),
            reason: format!("'{}' is not a valid HH:MM time", s),
        };

        let (h, m) = s.trim().split_once(':').ok_or_else(invalid)?;
        let hour: u8 = h.parse().map_err(|_| invalid())?;
        let minute: u8 = m.parse().map_err(|_| invalid())?;

        TimeOfDay::new(hour, minute).ok_or_else(invalid)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = ValidationError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(t: TimeOfDay) -> String {
        t.to_string()
    }
}

// =============================================================================
// Time Slot
// =============================================================================

/// A half-open `[start, end)` interval within a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeSlot {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl TimeSlot {
    /// Creates a slot without validating it; call [`TimeSlot::validate`]
    /// before persisting.
    pub const fn new(start: TimeOfDay, end: TimeOfDay) -> Self {
        TimeSlot { start, end }
    }

    /// Checks whether two half-open intervals overlap.
    ///
    /// An interval ending exactly when another begins does NOT overlap.
    /// Symmetric and total; no failure mode.
    ///
    /// ## Example
    /// ```rust
    /// use slotbook_core::schedule::TimeSlot;
    ///
    /// let morning: TimeSlot = slot("09:00", "10:00");
    /// let next: TimeSlot = slot("10:00", "11:00");
    /// assert!(!morning.overlaps(&next));
    ///
    /// fn slot(s: &str, e: &str) -> TimeSlot {
    ///     TimeSlot::new(s.parse().unwrap(), e.parse().unwrap())
    /// }
    /// ```
    #[inline]
    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// A slot must start strictly before it ends.
    pub fn validate(&self) -> ValidationResult<()> {
        if self.start >= self.end {
            return Err(ValidationError::InvertedInterval {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

// =============================================================================
// Weekday
// =============================================================================

/// Day of week, serialized as the three-letter uppercase abbreviation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Weekday {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => Weekday::Mon,
            chrono::Weekday::Tue => Weekday::Tue,
            chrono::Weekday::Wed => Weekday::Wed,
            chrono::Weekday::Thu => Weekday::Thu,
            chrono::Weekday::Fri => Weekday::Fri,
            chrono::Weekday::Sat => Weekday::Sat,
            chrono::Weekday::Sun => Weekday::Sun,
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let abbrev = match self {
            Weekday::Mon => "MON",
            Weekday::Tue => "TUE",
            Weekday::Wed => "WED",
            Weekday::Thu => "THU",
            Weekday::Fri => "FRI",
            Weekday::Sat => "SAT",
            Weekday::Sun => "SUN",
        };
        f.write_str(abbrev)
    }
}

// =============================================================================
// Availability Template
// =============================================================================

/// Weekly availability template for a bookable item.
///
/// The same `time_slots` apply to every open day; bookings snap to these
/// slots exactly (no partial or shifted slots).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    /// Days of the week the item can be booked on.
    pub days: Vec<Weekday>,

    /// Bookable slots, in template order.
    pub time_slots: Vec<TimeSlot>,
}

impl Availability {
    /// Whether the template opens on the given weekday.
    pub fn is_open_on(&self, day: Weekday) -> bool {
        self.days.contains(&day)
    }

    /// Whether the requested slot exactly matches a template slot.
    pub fn has_slot(&self, slot: &TimeSlot) -> bool {
        self.time_slots.contains(slot)
    }

    /// Validates the template: at least one day, at least one slot,
    /// every slot well-formed.
    pub fn validate(&self) -> ValidationResult<()> {
        if self.days.is_empty() {
            return Err(ValidationError::Empty {
                field: "availability.days".to_string(),
            });
        }

        if self.time_slots.is_empty() {
            return Err(ValidationError::Empty {
                field: "availability.time_slots".to_string(),
            });
        }

        for slot in &self.time_slots {
            slot.validate()?;
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
