use crate::messages::MenuEvent;
use crate::session::backend::SessionBackend;
use crate::session::types::{RawSessionResult, SessionQuery, SessionSettings};
use crate::world::WorldLink;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use uuid::Uuid;

/// World stand-in that records every travel it was asked to perform.
#[derive(Default)]
pub struct RecordingWorld {
    pub server_travels: Mutex<Vec<(String, bool)>>,
    pub client_travels: Mutex<Vec<(String, bool)>>,
}

impl WorldLink for RecordingWorld {
    fn server_travel(&self, map_url: &str, seamless: bool) {
        self.server_travels
            .lock()
            .unwrap()
            .push((map_url.to_string(), seamless));
    }

    fn client_travel(&self, address: &str, absolute: bool) {
        self.client_travels
            .lock()
            .unwrap()
            .push((address.to_string(), absolute));
    }
}

#[derive(Debug, Clone)]
pub enum BackendRequest {
    Create {
        session_name: String,
        settings: SessionSettings,
    },
    Destroy {
        session_name: String,
    },
    Find {
        query: SessionQuery,
    },
    Join {
        session_name: String,
        session_id: Uuid,
    },
}

/// Backend that records requests and never completes them on its own; tests
/// inject the completion messages they want the broker to see.
pub struct MockBackend {
    pub requests: Arc<Mutex<Vec<BackendRequest>>>,
    pub connect_string: Option<String>,
}

impl SessionBackend for MockBackend {
    fn backend_name(&self) -> &'static str {
        "mock"
    }

    fn is_lan(&self) -> bool {
        true
    }

    fn create_session(&mut self, session_name: &str, settings: SessionSettings) {
        self.requests.lock().unwrap().push(BackendRequest::Create {
            session_name: session_name.to_string(),
            settings,
        });
    }

    fn destroy_session(&mut self, session_name: &str) {
        self.requests.lock().unwrap().push(BackendRequest::Destroy {
            session_name: session_name.to_string(),
        });
    }

    fn find_sessions(&mut self, query: SessionQuery) {
        self.requests
            .lock()
            .unwrap()
            .push(BackendRequest::Find { query });
    }

    fn join_session(&mut self, session_name: &str, result: &RawSessionResult) {
        self.requests.lock().unwrap().push(BackendRequest::Join {
            session_name: session_name.to_string(),
            session_id: result.session_id,
        });
    }

    fn resolve_connect_string(&self, _session_name: &str) -> Option<String> {
        self.connect_string.clone()
    }
}

pub fn drain_menu(rx: &mut mpsc::UnboundedReceiver<MenuEvent>) -> Vec<MenuEvent> {
    let mut events = Vec::new();
    while let Ok(ev) = rx.try_recv() {
        events.push(ev);
    }
    events
}
