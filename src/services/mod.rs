pub mod confirmation;
pub mod notify;
pub mod scheduling;
pub mod session;
