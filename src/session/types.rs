use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Settings a session is created and advertised with. The `extra` bag carries
/// custom advertised attributes, notably the human-readable server name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSettings {
    pub lan_match: bool,
    pub max_public_connections: u32,
    pub advertise: bool,
    pub presence: bool,
    pub extra: HashMap<String, String>,
}

impl SessionSettings {
    pub fn set(&mut self, key: &str, value: String) {
        self.extra.insert(key.to_string(), value);
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.extra.get(key).map(String::as_str)
    }
}

/// Discovery query parameters. `presence_only` filters out sessions of
/// unrelated games that don't advertise presence.
#[derive(Debug, Clone)]
pub struct SessionQuery {
    pub max_results: usize,
    pub presence_only: bool,
}

/// Raw discovery result as the backend reports it. Held by the broker between
/// a find and a join; a new search replaces the whole list.
#[derive(Debug, Clone)]
pub struct RawSessionResult {
    pub session_id: Uuid,
    pub host_username: String,
    pub host_addr: String,
    pub max_public_connections: u32,
    pub open_public_connections: u32,
    pub settings: SessionSettings,
}

/// Read-only snapshot of a discovered session for the menu layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerListing {
    pub name: String,
    pub max_players: u32,
    pub current_players: u32,
    pub host_username: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinOutcome {
    Success,
    SessionIsFull,
    SessionDoesNotExist,
    CouldNotRetrieveAddress,
    AlreadyInSession,
    UnknownError,
}
