pub mod appliance;
pub mod availability;
pub mod booking;
pub mod catalog;

pub use appliance::{Appliance, Technician};
pub use availability::{CalendarDay, TimeSlot, WeekdayCode};
pub use booking::{BookingDraft, BookingRecord, PaymentMethod};
pub use catalog::{BookingCatalog, CatalogError};
