use tracing::info;

/// Travel facility provided by the host process. The session layer only
/// decides when to travel and with what argument; moving players is the
/// engine's job.
pub trait WorldLink: Send + Sync {
    /// Server-authoritative transition moving all connected clients.
    fn server_travel(&self, map_url: &str, seamless: bool);

    /// Single-client connection to an explicit network address.
    fn client_travel(&self, address: &str, absolute: bool);
}

/// Stand-in world for the demo binary: logs the travel it was asked to do.
pub struct LoggingWorld;

impl WorldLink for LoggingWorld {
    fn server_travel(&self, map_url: &str, seamless: bool) {
        info!("server travel to {} (seamless: {})", map_url, seamless);
    }

    fn client_travel(&self, address: &str, absolute: bool) {
        info!("client travel to {} (absolute: {})", address, absolute);
    }
}
