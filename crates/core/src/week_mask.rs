//! Compact weekday sets.
//!
//! A day set is stored as a 7-bit integer where bit `i` marks canonical weekday `i`,
//! counting Sunday as 0 through Saturday as 6. For example `[0, 2, 4]`
//! (Sunday, Tuesday, Thursday) encodes to `0b0010101 == 21`.

use std::fmt;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::errors::{SlotError, SlotResult};

/// Canonical weekday order, indexed by bit position.
const CANONICAL_DAYS: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// A set of weekdays packed into the low seven bits of a `u8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct WeekMask(u8);

impl WeekMask {
    /// The empty set. A window with this mask never runs.
    pub const EMPTY: WeekMask = WeekMask(0);

    /// Every day of the week.
    pub const ALL: WeekMask = WeekMask(0b111_1111);

    /// Builds a mask from raw bits, rejecting anything outside `0..=127`.
    pub fn new(bits: u8) -> SlotResult<Self> {
        if bits > Self::ALL.0 {
            return Err(SlotError::InvalidWindow(format!(
                "day mask {} is outside 0..=127",
                bits
            )));
        }
        Ok(Self(bits))
    }

    /// Encodes a set of weekdays. Duplicates and ordering are irrelevant.
    pub fn encode<I>(days: I) -> Self
    where
        I: IntoIterator<Item = Weekday>,
    {
        Self(
            days.into_iter()
                .fold(0u8, |mask, day| mask | (1 << day_index(day))),
        )
    }

    /// Decodes the mask into weekdays in canonical order (Sunday first).
    pub fn decode(self) -> Vec<Weekday> {
        CANONICAL_DAYS
            .iter()
            .copied()
            .filter(|day| self.contains(*day))
            .collect()
    }

    pub fn contains(self, day: Weekday) -> bool {
        self.0 & (1 << day_index(day)) != 0
    }

    /// Whether a window with this mask runs on `date`.
    pub fn runs_on(self, date: NaiveDate) -> bool {
        self.contains(date.weekday())
    }

    /// Builds a mask from canonical day indices (Sunday = 0 .. Saturday = 6).
    pub fn from_day_indices(indices: &[u8]) -> SlotResult<Self> {
        let mut days = Vec::with_capacity(indices.len());
        for &index in indices {
            let day = CANONICAL_DAYS.get(usize::from(index)).ok_or_else(|| {
                SlotError::InvalidWindow(format!(
                    "weekday index {} is outside 0..=6 (Sunday = 0)",
                    index
                ))
            })?;
            days.push(*day);
        }
        Ok(Self::encode(days))
    }

    /// Canonical day indices contained in the mask, ascending.
    pub fn day_indices(self) -> Vec<u8> {
        self.decode().into_iter().map(day_index).collect()
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// Canonical index of a weekday, Sunday = 0 .. Saturday = 6.
///
/// chrono numbers days from Monday, so the native index is shifted by one and wrapped.
/// Every mask test goes through here.
pub fn day_index(day: Weekday) -> u8 {
    ((day.num_days_from_monday() + 1) % 7) as u8
}

impl TryFrom<u8> for WeekMask {
    type Error = SlotError;

    fn try_from(bits: u8) -> SlotResult<Self> {
        Self::new(bits)
    }
}

impl From<WeekMask> for u8 {
    fn from(mask: WeekMask) -> Self {
        mask.0
    }
}

impl fmt::Display for WeekMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.decode().iter().map(|d| d.to_string()).collect();
        write!(f, "[{}]", names.join(","))
    }
}
