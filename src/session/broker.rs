use crate::config::BrokerConfig;
use crate::error::SessionError;
use crate::messages::{BrokerMessage, MenuEvent};
use crate::session::backend::SessionBackend;
use crate::session::types::{
    JoinOutcome, RawSessionResult, ServerListing, SessionQuery, SessionSettings,
};
use crate::world::WorldLink;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

const NAME_FALLBACK: &str = "Couldn't find name.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RequestKind {
    Create,
    Destroy,
    Find,
    Join,
}

/// Orchestrates the asynchronous lifecycle of hosting, discovering and
/// joining a session. Strictly single-threaded: `broker_task` feeds it menu
/// commands and backend completions off one channel, and at most one backend
/// request is in flight at a time.
pub struct SessionBroker {
    config: BrokerConfig,
    backend: Option<Box<dyn SessionBackend>>,
    world: Arc<dyn WorldLink>,
    menu_tx: mpsc::UnboundedSender<MenuEvent>,
    desired_server_name: String,
    session_active: bool,
    in_flight: Option<RequestKind>,
    pending_results: Option<Vec<RawSessionResult>>,
}

impl SessionBroker {
    pub fn new(
        config: BrokerConfig,
        backend: Option<Box<dyn SessionBackend>>,
        world: Arc<dyn WorldLink>,
        menu_tx: mpsc::UnboundedSender<MenuEvent>,
    ) -> Self {
        match &backend {
            Some(backend) => info!("Found session backend {}", backend.backend_name()),
            None => warn!("Found no session backend, session operations are no-ops"),
        }
        Self {
            config,
            backend,
            world,
            menu_tx,
            desired_server_name: String::new(),
            session_active: false,
            in_flight: None,
            pending_results: None,
        }
    }

    /// Single entry point; failures are terminal for the triggering call and
    /// surface only as a log line plus a transient menu notice.
    pub fn handle(&mut self, msg: BrokerMessage) {
        let result = match msg {
            BrokerMessage::Host { server_name } => self.host(server_name),
            BrokerMessage::RefreshServerList => self.refresh_server_list(),
            BrokerMessage::Join { index } => self.join(index),
            BrokerMessage::CreateComplete { success, .. } => self.on_create_complete(success),
            BrokerMessage::DestroyComplete { success, .. } => self.on_destroy_complete(success),
            BrokerMessage::FindComplete { success, results } => {
                self.on_find_sessions_complete(success, results)
            }
            BrokerMessage::JoinComplete {
                session_name,
                outcome,
            } => self.on_join_complete(session_name, outcome),
        };

        if let Err(e) = result {
            warn!("{}", e);
            let _ = self.menu_tx.send(MenuEvent::Notice(e.to_string()));
        }
    }

    fn host(&mut self, server_name: String) -> Result<(), SessionError> {
        self.ensure_idle()?;
        self.desired_server_name = server_name;
        if self.session_active {
            let Some(backend) = self.backend.as_mut() else {
                return Err(SessionError::BackendUnavailable);
            };
            // Re-host: tear the old session down first, its completion
            // triggers the re-create.
            backend.destroy_session(&self.config.session_name);
            self.in_flight = Some(RequestKind::Destroy);
            Ok(())
        } else {
            self.create_session()
        }
    }

    fn create_session(&mut self) -> Result<(), SessionError> {
        let Some(backend) = self.backend.as_mut() else {
            return Err(SessionError::BackendUnavailable);
        };
        let mut settings = SessionSettings {
            lan_match: backend.is_lan(),
            max_public_connections: self.config.max_public_connections,
            advertise: self.config.advertise,
            presence: self.config.presence,
            extra: HashMap::new(),
        };
        settings.set(
            &self.config.server_name_key,
            self.desired_server_name.clone(),
        );
        backend.create_session(&self.config.session_name, settings);
        self.in_flight = Some(RequestKind::Create);
        Ok(())
    }

    fn on_create_complete(&mut self, success: bool) -> Result<(), SessionError> {
        self.in_flight = None;
        if !success {
            return Err(SessionError::RequestFailed("create session"));
        }

        self.session_active = true;
        let _ = self.menu_tx.send(MenuEvent::Notice(String::from("Hosting")));
        info!(
            "Session created, traveling to {}",
            self.config.lobby_map_url
        );
        self.world.server_travel(&self.config.lobby_map_url, false);
        Ok(())
    }

    fn on_destroy_complete(&mut self, success: bool) -> Result<(), SessionError> {
        self.in_flight = None;
        // Either way no session remains active; a failed destroy is not retried.
        self.session_active = false;
        if success {
            self.create_session()
        } else {
            Err(SessionError::RequestFailed("destroy session"))
        }
    }

    fn refresh_server_list(&mut self) -> Result<(), SessionError> {
        self.ensure_idle()?;
        let Some(backend) = self.backend.as_mut() else {
            return Err(SessionError::BackendUnavailable);
        };
        self.pending_results = None;
        info!("Starting session search");
        backend.find_sessions(SessionQuery {
            max_results: self.config.max_search_results,
            presence_only: true,
        });
        self.in_flight = Some(RequestKind::Find);
        Ok(())
    }

    fn on_find_sessions_complete(
        &mut self,
        success: bool,
        results: Vec<RawSessionResult>,
    ) -> Result<(), SessionError> {
        self.in_flight = None;
        if !success {
            // The stale list, if any, stays on screen.
            return Err(SessionError::RequestFailed("find sessions"));
        }
        info!("Finished session search, {} result(s)", results.len());

        let listings: Vec<ServerListing> = results
            .iter()
            .map(|result| {
                debug!("Found session {}", result.session_id);
                ServerListing {
                    name: result
                        .settings
                        .get(&self.config.server_name_key)
                        .map(str::to_string)
                        .unwrap_or_else(|| String::from(NAME_FALLBACK)),
                    max_players: result.max_public_connections,
                    current_players: result
                        .max_public_connections
                        .saturating_sub(result.open_public_connections),
                    host_username: result.host_username.clone(),
                }
            })
            .collect();

        self.pending_results = Some(results);
        let _ = self.menu_tx.send(MenuEvent::ServerList(listings));
        Ok(())
    }

    fn join(&mut self, index: usize) -> Result<(), SessionError> {
        // Joining without a valid search or session state is a silent no-op.
        if self.backend.is_none() || self.in_flight.is_some() {
            debug!("Ignoring join, no backend or a request is in flight");
            return Ok(());
        }
        let Some(result) = self
            .pending_results
            .as_ref()
            .and_then(|results| results.get(index))
            .cloned()
        else {
            debug!("Ignoring join, no search result at index {}", index);
            return Ok(());
        };

        if let Some(backend) = self.backend.as_mut() {
            backend.join_session(&self.config.session_name, &result);
            self.in_flight = Some(RequestKind::Join);
        }
        Ok(())
    }

    fn on_join_complete(
        &mut self,
        session_name: String,
        outcome: JoinOutcome,
    ) -> Result<(), SessionError> {
        self.in_flight = None;
        if outcome != JoinOutcome::Success {
            warn!("Join of session {} failed: {:?}", session_name, outcome);
            return Err(SessionError::RequestFailed("join session"));
        }
        let Some(backend) = self.backend.as_ref() else {
            return Err(SessionError::BackendUnavailable);
        };
        let Some(address) = backend.resolve_connect_string(&session_name) else {
            return Err(SessionError::ResolutionFailed(session_name));
        };

        let _ = self
            .menu_tx
            .send(MenuEvent::Notice(format!("Joining {}", address)));
        info!("Joining session at {}", address);
        self.world.client_travel(&address, true);
        Ok(())
    }

    fn ensure_idle(&self) -> Result<(), SessionError> {
        if self.in_flight.is_some() {
            Err(SessionError::PreconditionUnmet(
                "a session request is already in flight",
            ))
        } else {
            Ok(())
        }
    }
}

/// Broker event loop: menu commands and backend completions, one at a time.
pub async fn broker_task(mut broker: SessionBroker, mut rx: mpsc::UnboundedReceiver<BrokerMessage>) {
    info!("Session broker started");
    while let Some(msg) = rx.recv().await {
        broker.handle(msg);
    }
    debug!("Session broker task ended");
}
