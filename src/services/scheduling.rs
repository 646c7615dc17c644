use crate::models::{BookingCatalog, CalendarDay, Technician, TimeSlot};

/// Source of bookable time slots for a technician on a given day.
pub trait AvailabilitySchedule: Send + Sync {
    /// Ordered slot list. The first entry is the one a session selects
    /// automatically after a day change.
    fn slots_for(&self, technician: &Technician, day: &CalendarDay) -> Vec<TimeSlot>;
}

/// The same slot list for every technician and day.
///
/// Status labels are copied as configured; nothing here looks at existing
/// bookings.
#[derive(Debug, Clone)]
pub struct FixedSchedule {
    slots: Vec<TimeSlot>,
}

impl FixedSchedule {
    pub fn new(slots: Vec<TimeSlot>) -> Self {
        Self { slots }
    }

    pub fn from_catalog(catalog: &BookingCatalog) -> Self {
        Self::new(catalog.slots.clone())
    }
}

impl AvailabilitySchedule for FixedSchedule {
    fn slots_for(&self, _technician: &Technician, _day: &CalendarDay) -> Vec<TimeSlot> {
        self.slots.clone()
    }
}
