pub mod gate;
pub mod task;

// Re-export the main types for easy access
pub use gate::{GateState, LobbyGate, TravelOrder};
pub use task::gate_task;
