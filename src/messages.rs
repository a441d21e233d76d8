use crate::session::{JoinOutcome, RawSessionResult, ServerListing};

/// Everything the broker task reacts to: menu commands plus backend
/// completion notifications. Completions re-enter on the same channel, which
/// keeps the broker single-threaded.
#[derive(Debug)]
pub enum BrokerMessage {
    // Menu commands
    Host { server_name: String },
    RefreshServerList,
    Join { index: usize },
    // Backend completions
    CreateComplete { session_name: String, success: bool },
    DestroyComplete { session_name: String, success: bool },
    FindComplete { success: bool, results: Vec<RawSessionResult> },
    JoinComplete { session_name: String, outcome: JoinOutcome },
}

/// Player admission events delivered to the lobby gate by the host process.
#[derive(Debug)]
pub enum GateMessage {
    PlayerJoined,
    PlayerLeft,
}

/// Events published to the menu presentation layer.
#[derive(Debug, Clone)]
pub enum MenuEvent {
    /// Discovered servers, in discovery order. `Join { index }` indexes into
    /// the most recently published list.
    ServerList(Vec<ServerListing>),
    /// Transient on-screen notice ("Hosting", "Joining 1.2.3.4:7777", ...).
    Notice(String),
}
