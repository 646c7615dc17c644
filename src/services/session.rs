use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::models::{
    Appliance, BookingCatalog, BookingDraft, BookingRecord, CalendarDay, PaymentMethod,
    Technician, TimeSlot,
};
use crate::services::confirmation;
use crate::services::scheduling::AvailabilitySchedule;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingError {
    #[error("cannot {operation} while the session is {stage}")]
    InvalidTransition {
        operation: &'static str,
        stage: SessionStage,
    },

    #[error("booking draft is incomplete: missing {}", .missing.join(", "))]
    IncompleteDraft { missing: Vec<&'static str> },

    #[error("precondition violated: {0}")]
    PreconditionViolation(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStage {
    ApplianceChosen,
    SchedulingInProgress,
    PaymentChosen,
    Committed,
}

impl SessionStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStage::ApplianceChosen => "appliance_chosen",
            SessionStage::SchedulingInProgress => "scheduling_in_progress",
            SessionStage::PaymentChosen => "payment_chosen",
            SessionStage::Committed => "committed",
        }
    }
}

impl fmt::Display for SessionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle of one booking attempt. Each variant owns exactly the data that
/// exists at that point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    ApplianceChosen(Appliance),
    SchedulingInProgress(BookingDraft),
    PaymentChosen(BookingDraft),
    Committed(BookingRecord),
}

impl SessionState {
    pub fn stage(&self) -> SessionStage {
        match self {
            SessionState::ApplianceChosen(_) => SessionStage::ApplianceChosen,
            SessionState::SchedulingInProgress(_) => SessionStage::SchedulingInProgress,
            SessionState::PaymentChosen(_) => SessionStage::PaymentChosen,
            SessionState::Committed(_) => SessionStage::Committed,
        }
    }
}

/// The day and slot currently proposed to the customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotSuggestion {
    pub day: CalendarDay,
    pub slot: TimeSlot,
}

/// Workflow engine for a single booking attempt.
///
/// Option lists and availability are injected at construction. The state
/// only changes through the transition methods below; an operation invoked
/// in the wrong stage is refused and leaves the session as it was.
pub struct BookingSession {
    catalog: Arc<BookingCatalog>,
    schedule: Arc<dyn AvailabilitySchedule>,
    state: SessionState,
}

impl fmt::Debug for BookingSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BookingSession")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl BookingSession {
    pub fn new(
        catalog: Arc<BookingCatalog>,
        schedule: Arc<dyn AvailabilitySchedule>,
        appliance: Appliance,
    ) -> Self {
        Self {
            catalog,
            schedule,
            state: SessionState::ApplianceChosen(appliance),
        }
    }

    /// `new` followed by `initialize`.
    pub fn begin(
        catalog: Arc<BookingCatalog>,
        schedule: Arc<dyn AvailabilitySchedule>,
        appliance: Appliance,
    ) -> Result<Self, BookingError> {
        let mut session = Self::new(catalog, schedule, appliance);
        session.initialize()?;
        Ok(session)
    }

    pub fn stage(&self) -> SessionStage {
        self.state.stage()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn catalog(&self) -> &BookingCatalog {
        &self.catalog
    }

    pub fn appliance(&self) -> Option<&Appliance> {
        match &self.state {
            SessionState::ApplianceChosen(appliance) => Some(appliance),
            SessionState::SchedulingInProgress(draft) | SessionState::PaymentChosen(draft) => {
                draft.appliance()
            }
            SessionState::Committed(record) => Some(record.appliance()),
        }
    }

    pub fn draft(&self) -> Option<&BookingDraft> {
        match &self.state {
            SessionState::SchedulingInProgress(draft) | SessionState::PaymentChosen(draft) => {
                Some(draft)
            }
            _ => None,
        }
    }

    pub fn record(&self) -> Option<&BookingRecord> {
        match &self.state {
            SessionState::Committed(record) => Some(record),
            _ => None,
        }
    }

    /// Slots offered for the draft's current technician and day.
    pub fn available_slots(&self) -> Vec<TimeSlot> {
        self.draft()
            .map(|d| self.schedule.slots_for(d.technician(), d.selected_day()))
            .unwrap_or_default()
    }

    pub fn suggestion(&self) -> Option<SlotSuggestion> {
        self.draft().map(|d| SlotSuggestion {
            day: d.selected_day().clone(),
            slot: d.selected_slot().clone(),
        })
    }

    /// Enter scheduling with the default technician, the default day and the
    /// first slot of that day.
    pub fn initialize(&mut self) -> Result<(), BookingError> {
        let SessionState::ApplianceChosen(appliance) = &self.state else {
            return Err(invalid("initialize", &self.state));
        };

        let technician = self
            .catalog
            .default_technician()
            .cloned()
            .ok_or_else(|| {
                BookingError::PreconditionViolation("technician directory is empty".to_string())
            })?;
        let day = self.catalog.default_day.clone();
        let slot = first_slot(self.schedule.as_ref(), &technician, &day)?;

        tracing::info!(
            appliance = %appliance.id,
            technician = %technician.id,
            day = %day,
            slot = %slot.range,
            "booking session initialized"
        );

        let draft = BookingDraft::scheduled(appliance.clone(), technician, day, slot);
        self.state = SessionState::SchedulingInProgress(draft);
        Ok(())
    }

    /// Changing technician keeps the selected day and slot.
    pub fn select_technician(&mut self, technician: Technician) -> Result<(), BookingError> {
        let draft = scheduling_draft(&mut self.state, "select a technician")?;
        if !self.catalog.has_technician(&technician) {
            return Err(BookingError::PreconditionViolation(format!(
                "technician {} is not in the directory",
                technician.id
            )));
        }

        tracing::debug!(technician = %technician.id, "technician selected");
        draft.set_technician(technician);
        Ok(())
    }

    /// Select a day and reset the slot to the first one offered that day.
    pub fn select_day(&mut self, day: CalendarDay) -> Result<(), BookingError> {
        let draft = scheduling_draft(&mut self.state, "select a day")?;
        if !self.catalog.has_day(&day) {
            return Err(BookingError::PreconditionViolation(format!(
                "day {day} is not in the displayed week"
            )));
        }
        let slot = first_slot(self.schedule.as_ref(), draft.technician(), &day)?;

        tracing::debug!(day = %day, slot = %slot.range, "day selected");
        draft.set_schedule(day, slot);
        Ok(())
    }

    pub fn select_slot(&mut self, slot: TimeSlot) -> Result<(), BookingError> {
        let draft = scheduling_draft(&mut self.state, "select a time slot")?;
        let offered = self
            .schedule
            .slots_for(draft.technician(), draft.selected_day());
        if !offered.contains(&slot) {
            return Err(BookingError::PreconditionViolation(format!(
                "slot {} is not offered on {}",
                slot.range,
                draft.selected_day()
            )));
        }

        tracing::debug!(slot = %slot.range, "slot selected");
        draft.set_slot(slot);
        Ok(())
    }

    /// Record the payment method. Allowed again while on the payment step so
    /// the customer can switch methods before committing.
    pub fn choose_payment_method(&mut self, method: PaymentMethod) -> Result<(), BookingError> {
        let draft = match &self.state {
            SessionState::SchedulingInProgress(draft) | SessionState::PaymentChosen(draft) => draft,
            other => return Err(invalid("choose a payment method", other)),
        };

        let draft = draft.clone().with_payment_method(Some(method));
        tracing::info!(method = method.as_str(), "payment method chosen");
        self.state = SessionState::PaymentChosen(draft);
        Ok(())
    }

    /// Leave the payment step. The chosen method is discarded.
    pub fn return_to_scheduling(&mut self) -> Result<(), BookingError> {
        let SessionState::PaymentChosen(draft) = &self.state else {
            return Err(invalid("return to scheduling", &self.state));
        };

        let draft = draft.clone().with_payment_method(None);
        tracing::debug!("returned to scheduling");
        self.state = SessionState::SchedulingInProgress(draft);
        Ok(())
    }

    /// Freeze the draft. On failure the session keeps its current state.
    pub fn commit(&mut self) -> Result<BookingRecord, BookingError> {
        let draft = match &self.state {
            SessionState::SchedulingInProgress(draft) | SessionState::PaymentChosen(draft) => draft,
            other => return Err(invalid("commit", other)),
        };

        let record = confirmation::assemble(draft)?;
        tracing::info!(
            appliance = %record.appliance().id,
            technician = %record.technician().id,
            day = %record.day(),
            slot = %record.slot().range,
            method = record.payment_method().as_str(),
            "booking committed"
        );
        self.state = SessionState::Committed(record.clone());
        Ok(record)
    }
}

fn invalid(operation: &'static str, state: &SessionState) -> BookingError {
    BookingError::InvalidTransition {
        operation,
        stage: state.stage(),
    }
}

fn scheduling_draft<'a>(
    state: &'a mut SessionState,
    operation: &'static str,
) -> Result<&'a mut BookingDraft, BookingError> {
    match state {
        SessionState::SchedulingInProgress(draft) => Ok(draft),
        other => Err(invalid(operation, other)),
    }
}

fn first_slot(
    schedule: &dyn AvailabilitySchedule,
    technician: &Technician,
    day: &CalendarDay,
) -> Result<TimeSlot, BookingError> {
    schedule
        .slots_for(technician, day)
        .into_iter()
        .next()
        .ok_or_else(|| {
            BookingError::PreconditionViolation(format!(
                "no slots offered for {} on {day}",
                technician.id
            ))
        })
}
