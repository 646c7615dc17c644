use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{Appliance, CalendarDay, Technician, TimeSlot, WeekdayCode};

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid catalog json: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("catalog has no {0}")]
    Empty(&'static str),

    #[error("duplicate {kind} id: {id}")]
    DuplicateId { kind: &'static str, id: String },

    #[error("day number out of range: {0}")]
    DayOutOfRange(u8),

    #[error("weekday listed more than once: {0}")]
    DuplicateWeekday(WeekdayCode),

    #[error("default day {0} is not part of the week")]
    DefaultDayOutsideWeek(CalendarDay),
}

/// Option lists offered to a booking session.
///
/// Loaded once at start-up and shared read-only between sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingCatalog {
    pub appliances: Vec<Appliance>,
    pub technicians: Vec<Technician>,
    pub week: Vec<CalendarDay>,
    pub default_day: CalendarDay,
    pub slots: Vec<TimeSlot>,
}

impl BookingCatalog {
    pub fn from_json(s: &str) -> Result<Self, CatalogError> {
        let catalog: BookingCatalog = serde_json::from_str(s)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.technicians.is_empty() {
            return Err(CatalogError::Empty("technicians"));
        }
        if self.week.is_empty() {
            return Err(CatalogError::Empty("days"));
        }
        if self.slots.is_empty() {
            return Err(CatalogError::Empty("time slots"));
        }

        let mut seen = HashSet::new();
        for appliance in &self.appliances {
            if !seen.insert(appliance.id.as_str()) {
                return Err(CatalogError::DuplicateId {
                    kind: "appliance",
                    id: appliance.id.clone(),
                });
            }
        }

        let mut seen = HashSet::new();
        for technician in &self.technicians {
            if !seen.insert(technician.id.as_str()) {
                return Err(CatalogError::DuplicateId {
                    kind: "technician",
                    id: technician.id.clone(),
                });
            }
        }

        let mut seen = HashSet::new();
        for day in &self.week {
            if !(1..=31).contains(&day.day_number) {
                return Err(CatalogError::DayOutOfRange(day.day_number));
            }
            if !seen.insert(day.weekday_code) {
                return Err(CatalogError::DuplicateWeekday(day.weekday_code));
            }
        }

        if !self.week.contains(&self.default_day) {
            return Err(CatalogError::DefaultDayOutsideWeek(self.default_day.clone()));
        }

        Ok(())
    }

    pub fn search_appliances(&self, query: &str) -> Vec<&Appliance> {
        self.appliances.iter().filter(|a| a.matches(query)).collect()
    }

    pub fn appliance(&self, id: &str) -> Option<&Appliance> {
        self.appliances.iter().find(|a| a.id == id)
    }

    pub fn technician(&self, id: &str) -> Option<&Technician> {
        self.technicians.iter().find(|t| t.id == id)
    }

    /// First entry of the directory, used when a session starts.
    pub fn default_technician(&self) -> Option<&Technician> {
        self.technicians.first()
    }

    pub fn day(&self, code: WeekdayCode) -> Option<&CalendarDay> {
        self.week.iter().find(|d| d.weekday_code == code)
    }

    pub fn has_technician(&self, technician: &Technician) -> bool {
        self.technicians.contains(technician)
    }

    pub fn has_day(&self, day: &CalendarDay) -> bool {
        self.week.contains(day)
    }
}

impl Default for BookingCatalog {
    fn default() -> Self {
        let week = WeekdayCode::ALL
            .into_iter()
            .zip(1u8..)
            .map(|(code, n)| CalendarDay::new(code, n))
            .collect();

        Self {
            appliances: vec![
                Appliance::new("1", "Washing Machine", "washingmachine.png"),
                Appliance::new("2", "Refrigerator", "Ref.png"),
                Appliance::new("3", "Air Conditioner", "Ac.png"),
                Appliance::new("4", "TV", "TV.png"),
            ],
            technicians: vec![
                Technician::new("jane-doe", "Jane Doe", "Plumbing"),
                Technician::new("john-smith", "John Smith", "Plumbing"),
                Technician::new("alice-johnson", "Alice Johnson", "Plumbing"),
            ],
            week,
            default_day: CalendarDay::new(WeekdayCode::We, 3),
            slots: vec![
                TimeSlot::new("9:00 am - 10:00 am", "open slot"),
                TimeSlot::new("10:00 am - 11:00 am", "no conflicts"),
                TimeSlot::new("2:00 pm - 4:00 pm", "no conflicts, fast response"),
                TimeSlot::new("4:00 pm - 5:00 pm", "open slot"),
            ],
        }
    }
}
