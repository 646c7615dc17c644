use serde::{Deserialize, Serialize};

use super::{Appliance, CalendarDay, Technician, TimeSlot};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    DigitalWallet,
    CashOnDelivery,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 2] = [PaymentMethod::DigitalWallet, PaymentMethod::CashOnDelivery];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::DigitalWallet => "digital_wallet",
            PaymentMethod::CashOnDelivery => "cash_on_delivery",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "digital_wallet" => Some(PaymentMethod::DigitalWallet),
            "cash_on_delivery" => Some(PaymentMethod::CashOnDelivery),
            _ => None,
        }
    }

    /// Customer-facing name shown on the payment step and the confirmation.
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::DigitalWallet => "G-cash",
            PaymentMethod::CashOnDelivery => "Cash on Delivery",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            PaymentMethod::DigitalWallet => "Fast, secure mobile wallet payment.",
            PaymentMethod::CashOnDelivery => "Pay directly to Technician after Service",
        }
    }
}

/// In-progress booking state. Only `BookingSession` mutates a draft; everyone
/// else sees it through the read accessors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingDraft {
    appliance: Option<Appliance>,
    technician: Technician,
    selected_day: CalendarDay,
    selected_slot: TimeSlot,
    payment_method: Option<PaymentMethod>,
}

impl BookingDraft {
    pub(crate) fn scheduled(
        appliance: Appliance,
        technician: Technician,
        selected_day: CalendarDay,
        selected_slot: TimeSlot,
    ) -> Self {
        Self {
            appliance: Some(appliance),
            technician,
            selected_day,
            selected_slot,
            payment_method: None,
        }
    }

    pub(crate) fn set_technician(&mut self, technician: Technician) {
        self.technician = technician;
    }

    /// Day and slot change together so a slot never outlives its day.
    pub(crate) fn set_schedule(&mut self, day: CalendarDay, slot: TimeSlot) {
        self.selected_day = day;
        self.selected_slot = slot;
    }

    pub(crate) fn set_slot(&mut self, slot: TimeSlot) {
        self.selected_slot = slot;
    }

    pub(crate) fn with_payment_method(self, payment_method: Option<PaymentMethod>) -> Self {
        Self {
            payment_method,
            ..self
        }
    }

    #[cfg(test)]
    pub(crate) fn without_appliance(self) -> Self {
        Self {
            appliance: None,
            ..self
        }
    }

    pub fn appliance(&self) -> Option<&Appliance> {
        self.appliance.as_ref()
    }

    pub fn technician(&self) -> &Technician {
        &self.technician
    }

    pub fn selected_day(&self) -> &CalendarDay {
        &self.selected_day
    }

    pub fn selected_slot(&self) -> &TimeSlot {
        &self.selected_slot
    }

    pub fn payment_method(&self) -> Option<PaymentMethod> {
        self.payment_method
    }
}

/// Frozen result of a completed booking flow.
///
/// There is no public constructor: a record only comes out of
/// `services::confirmation::assemble`, which refuses incomplete drafts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingRecord {
    appliance: Appliance,
    technician: Technician,
    day: CalendarDay,
    slot: TimeSlot,
    payment_method: PaymentMethod,
    note: String,
}

impl BookingRecord {
    pub(crate) fn new(
        appliance: Appliance,
        technician: Technician,
        day: CalendarDay,
        slot: TimeSlot,
        payment_method: PaymentMethod,
        note: &str,
    ) -> Self {
        Self {
            appliance,
            technician,
            day,
            slot,
            payment_method,
            note: note.to_string(),
        }
    }

    pub fn appliance(&self) -> &Appliance {
        &self.appliance
    }

    pub fn technician(&self) -> &Technician {
        &self.technician
    }

    pub fn day(&self) -> &CalendarDay {
        &self.day
    }

    pub fn slot(&self) -> &TimeSlot {
        &self.slot
    }

    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    pub fn note(&self) -> &str {
        &self.note
    }
}
