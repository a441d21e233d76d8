use crate::messages::BrokerMessage;
use crate::session::backend::SessionBackend;
use crate::session::types::{JoinOutcome, RawSessionResult, SessionQuery, SessionSettings};
use rand::Rng;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info};
use uuid::Uuid;

/// Requests understood by the LAN session registry. Every request carries the
/// channel its completion should be posted on, so the registry never holds
/// broker state.
#[derive(Debug)]
pub enum RegistryRequest {
    Advertise {
        session_id: Uuid,
        session_name: String,
        host_username: String,
        host_addr: String,
        settings: SessionSettings,
        reply_to: mpsc::UnboundedSender<BrokerMessage>,
    },
    Withdraw {
        session_id: Uuid,
        session_name: String,
        reply_to: mpsc::UnboundedSender<BrokerMessage>,
    },
    Search {
        query: SessionQuery,
        reply_to: mpsc::UnboundedSender<BrokerMessage>,
    },
    Join {
        session_id: Uuid,
        session_name: String,
        reply_to: mpsc::UnboundedSender<BrokerMessage>,
    },
}

struct AdvertisedSession {
    session_id: Uuid,
    host_username: String,
    host_addr: String,
    settings: SessionSettings,
    joined: u32,
}

/// Registry task owning the table of advertised sessions. Stands in for the
/// broadcast discovery a real LAN subsystem would do.
pub async fn registry_task(mut rx: mpsc::UnboundedReceiver<RegistryRequest>) {
    let mut sessions: HashMap<Uuid, AdvertisedSession> = HashMap::new();

    info!("LAN session registry started");

    while let Some(req) = rx.recv().await {
        match req {
            RegistryRequest::Advertise {
                session_id,
                session_name,
                host_username,
                host_addr,
                settings,
                reply_to,
            } => {
                debug!(
                    "Advertising session {} ({}) at {}",
                    session_id, host_username, host_addr
                );
                sessions.insert(
                    session_id,
                    AdvertisedSession {
                        session_id,
                        host_username,
                        host_addr,
                        settings,
                        joined: 0,
                    },
                );
                let _ = reply_to.send(BrokerMessage::CreateComplete {
                    session_name,
                    success: true,
                });
            }

            RegistryRequest::Withdraw {
                session_id,
                session_name,
                reply_to,
            } => {
                let existed = sessions.remove(&session_id).is_some();
                debug!("Withdrawing session {} (existed: {})", session_id, existed);
                let _ = reply_to.send(BrokerMessage::DestroyComplete {
                    session_name,
                    success: existed,
                });
            }

            RegistryRequest::Search { query, reply_to } => {
                let results: Vec<RawSessionResult> = sessions
                    .values()
                    .filter(|s| !query.presence_only || s.settings.presence)
                    .take(query.max_results)
                    .map(|s| RawSessionResult {
                        session_id: s.session_id,
                        host_username: s.host_username.clone(),
                        host_addr: s.host_addr.clone(),
                        max_public_connections: s.settings.max_public_connections,
                        open_public_connections: s
                            .settings
                            .max_public_connections
                            .saturating_sub(s.joined),
                        settings: s.settings.clone(),
                    })
                    .collect();
                debug!("Search matched {} session(s)", results.len());
                let _ = reply_to.send(BrokerMessage::FindComplete {
                    success: true,
                    results,
                });
            }

            RegistryRequest::Join {
                session_id,
                session_name,
                reply_to,
            } => {
                let outcome = match sessions.get_mut(&session_id) {
                    None => JoinOutcome::SessionDoesNotExist,
                    Some(s) if s.joined >= s.settings.max_public_connections => {
                        JoinOutcome::SessionIsFull
                    }
                    Some(s) => {
                        s.joined += 1;
                        JoinOutcome::Success
                    }
                };
                debug!("Join of session {}: {:?}", session_id, outcome);
                let _ = reply_to.send(BrokerMessage::JoinComplete {
                    session_name,
                    outcome,
                });
            }
        }
    }
    debug!("LAN session registry task ended");
}

/// LAN flavour of the session backend: talks to the in-process registry over
/// a channel and remembers which advertisement is its own.
pub struct LanBackend {
    registry_tx: mpsc::UnboundedSender<RegistryRequest>,
    broker_tx: mpsc::UnboundedSender<BrokerMessage>,
    host_username: String,
    host_addr: String,
    own_session_id: Option<Uuid>,
    pending_connect: Option<String>,
}

impl LanBackend {
    pub fn new(
        registry_tx: mpsc::UnboundedSender<RegistryRequest>,
        broker_tx: mpsc::UnboundedSender<BrokerMessage>,
        host_username: String,
    ) -> Self {
        // Ephemeral-range listen port for the synthesized connect string.
        let port: u16 = rand::rng().random_range(49152..u16::MAX);
        Self {
            registry_tx,
            broker_tx,
            host_username,
            host_addr: format!("127.0.0.1:{}", port),
            own_session_id: None,
            pending_connect: None,
        }
    }
}

impl SessionBackend for LanBackend {
    fn backend_name(&self) -> &'static str {
        "LAN"
    }

    fn is_lan(&self) -> bool {
        true
    }

    fn create_session(&mut self, session_name: &str, settings: SessionSettings) {
        let session_id = Uuid::new_v4();
        self.own_session_id = Some(session_id);
        let sent = self.registry_tx.send(RegistryRequest::Advertise {
            session_id,
            session_name: session_name.to_string(),
            host_username: self.host_username.clone(),
            host_addr: self.host_addr.clone(),
            settings,
            reply_to: self.broker_tx.clone(),
        });
        if sent.is_err() {
            let _ = self.broker_tx.send(BrokerMessage::CreateComplete {
                session_name: session_name.to_string(),
                success: false,
            });
        }
    }

    fn destroy_session(&mut self, session_name: &str) {
        let session_id = self.own_session_id.take();
        let sent = session_id.map(|session_id| {
            self.registry_tx.send(RegistryRequest::Withdraw {
                session_id,
                session_name: session_name.to_string(),
                reply_to: self.broker_tx.clone(),
            })
        });
        if !matches!(sent, Some(Ok(()))) {
            let _ = self.broker_tx.send(BrokerMessage::DestroyComplete {
                session_name: session_name.to_string(),
                success: false,
            });
        }
    }

    fn find_sessions(&mut self, query: SessionQuery) {
        let sent = self.registry_tx.send(RegistryRequest::Search {
            query,
            reply_to: self.broker_tx.clone(),
        });
        if sent.is_err() {
            let _ = self.broker_tx.send(BrokerMessage::FindComplete {
                success: false,
                results: Vec::new(),
            });
        }
    }

    fn join_session(&mut self, session_name: &str, result: &RawSessionResult) {
        self.pending_connect = if result.host_addr.is_empty() {
            None
        } else {
            Some(result.host_addr.clone())
        };
        let sent = self.registry_tx.send(RegistryRequest::Join {
            session_id: result.session_id,
            session_name: session_name.to_string(),
            reply_to: self.broker_tx.clone(),
        });
        if sent.is_err() {
            let _ = self.broker_tx.send(BrokerMessage::JoinComplete {
                session_name: session_name.to_string(),
                outcome: JoinOutcome::UnknownError,
            });
        }
    }

    fn resolve_connect_string(&self, _session_name: &str) -> Option<String> {
        self.pending_connect.clone()
    }
}
