use async_trait::async_trait;
use serde::Serialize;

use crate::models::BookingRecord;

/// Confirmation card shown to the customer once a booking is committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub heading: String,
    pub date_line: String,
    pub appliance: String,
    pub schedule: String,
    pub payment_method: String,
    pub note: String,
}

impl Notification {
    pub fn from_record(record: &BookingRecord, month_label: &str) -> Self {
        let day = record.day();
        let date = format!("{}/{} {}", day.weekday_code, month_label, day.day_number);
        let slot = &record.slot().range;

        Self {
            heading: format!("Booking with {}", record.technician().display_name),
            date_line: format!("{date}, {slot}"),
            appliance: record.appliance().display_name.clone(),
            schedule: format!("{date} ({slot})"),
            payment_method: record.payment_method().label().to_string(),
            note: record.note().to_string(),
        }
    }
}

#[async_trait]
pub trait BookingNotifier: Send + Sync {
    async fn notify(&self, notification: &Notification) -> anyhow::Result<()>;
}

/// Writes confirmations to the log. Used when no delivery channel is wired up.
pub struct LogNotifier;

#[async_trait]
impl BookingNotifier for LogNotifier {
    async fn notify(&self, notification: &Notification) -> anyhow::Result<()> {
        tracing::info!(
            heading = %notification.heading,
            schedule = %notification.schedule,
            appliance = %notification.appliance,
            payment = %notification.payment_method,
            "booking confirmation"
        );
        Ok(())
    }
}
