pub mod backend;
pub mod broker;
pub mod lan;
pub mod types;

// Re-export the main types for easy access
pub use backend::SessionBackend;
pub use broker::{broker_task, SessionBroker};
pub use types::{JoinOutcome, RawSessionResult, ServerListing, SessionQuery, SessionSettings};
