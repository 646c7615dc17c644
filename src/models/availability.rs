use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeekdayCode {
    Mo,
    Tu,
    We,
    Th,
    Fr,
    Sa,
    Su,
}

impl WeekdayCode {
    pub const ALL: [WeekdayCode; 7] = [
        WeekdayCode::Mo,
        WeekdayCode::Tu,
        WeekdayCode::We,
        WeekdayCode::Th,
        WeekdayCode::Fr,
        WeekdayCode::Sa,
        WeekdayCode::Su,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WeekdayCode::Mo => "Mo",
            WeekdayCode::Tu => "Tu",
            WeekdayCode::We => "We",
            WeekdayCode::Th => "Th",
            WeekdayCode::Fr => "Fr",
            WeekdayCode::Sa => "Sa",
            WeekdayCode::Su => "Su",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|code| code.as_str().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for WeekdayCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A selectable day within the displayed week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDay {
    pub weekday_code: WeekdayCode,
    pub day_number: u8,
}

impl CalendarDay {
    pub fn new(weekday_code: WeekdayCode, day_number: u8) -> Self {
        Self {
            weekday_code,
            day_number,
        }
    }
}

impl fmt::Display for CalendarDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.weekday_code, self.day_number)
    }
}

/// A fixed time range with an advisory availability label. The label is
/// display text only and is not derived from real bookings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub range: String,
    pub status_label: String,
}

impl TimeSlot {
    pub fn new(range: impl Into<String>, status_label: impl Into<String>) -> Self {
        Self {
            range: range.into(),
            status_label: status_label.into(),
        }
    }
}
