use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::config::AppConfig;
use crate::models::BookingCatalog;
use crate::services::notify::BookingNotifier;
use crate::services::scheduling::{AvailabilitySchedule, FixedSchedule};
use crate::services::session::BookingSession;

pub struct AppState {
    pub config: AppConfig,
    pub catalog: Arc<BookingCatalog>,
    pub schedule: Arc<dyn AvailabilitySchedule>,
    pub notifier: Box<dyn BookingNotifier>,
    /// Open booking attempts keyed by session id. Committed and abandoned
    /// sessions are removed.
    pub sessions: Mutex<HashMap<String, BookingSession>>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        catalog: BookingCatalog,
        notifier: Box<dyn BookingNotifier>,
    ) -> Self {
        let schedule = Arc::new(FixedSchedule::from_catalog(&catalog));
        Self {
            config,
            catalog: Arc::new(catalog),
            schedule,
            notifier,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    pub fn sessions(&self) -> MutexGuard<'_, HashMap<String, BookingSession>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
