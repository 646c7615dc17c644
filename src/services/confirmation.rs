use crate::models::{BookingDraft, BookingRecord};
use crate::services::session::BookingError;

/// Advisory note attached to every confirmed booking.
pub const BOOKING_NOTE: &str = "please call 30 minutes before arrival";

/// Freeze a draft into a booking record. The draft is only read.
pub fn assemble(draft: &BookingDraft) -> Result<BookingRecord, BookingError> {
    let mut missing = Vec::new();
    if draft.appliance().is_none() {
        missing.push("appliance");
    }
    if draft.payment_method().is_none() {
        missing.push("payment method");
    }

    match (draft.appliance(), draft.payment_method()) {
        (Some(appliance), Some(payment_method)) => Ok(BookingRecord::new(
            appliance.clone(),
            draft.technician().clone(),
            draft.selected_day().clone(),
            draft.selected_slot().clone(),
            payment_method,
            BOOKING_NOTE,
        )),
        _ => Err(BookingError::IncompleteDraft { missing }),
    }
}
