use crate::session::types::{RawSessionResult, SessionQuery, SessionSettings};

/// Pluggable online backend (LAN registry, matchmaking service, ...).
///
/// Request methods are fire-and-forget: each one eventually produces exactly
/// one completion message (`CreateComplete`, `DestroyComplete`,
/// `FindComplete`, `JoinComplete`) posted on the broker channel the backend
/// was constructed with. The broker guarantees at most one request is in
/// flight at a time.
pub trait SessionBackend: Send {
    fn backend_name(&self) -> &'static str;

    /// LAN backends get `lan_match` set on the sessions they host.
    fn is_lan(&self) -> bool;

    fn create_session(&mut self, session_name: &str, settings: SessionSettings);

    fn destroy_session(&mut self, session_name: &str);

    fn find_sessions(&mut self, query: SessionQuery);

    fn join_session(&mut self, session_name: &str, result: &RawSessionResult);

    /// Connect address for the session joined last, if one could be resolved.
    fn resolve_connect_string(&self, session_name: &str) -> Option<String>;
}
