use super::gate::LobbyGate;
use crate::config::GateConfig;
use crate::messages::GateMessage;
use crate::world::WorldLink;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Lobby gate event loop. Runs on the hosting process once a session is up;
/// a triggered travel is scheduled on its own task and always fires, there is
/// no cancellation.
pub async fn gate_task(
    config: GateConfig,
    mut rx: mpsc::UnboundedReceiver<GateMessage>,
    world: Arc<dyn WorldLink>,
) {
    info!(
        "Lobby gate started (threshold: {}, delay: {}s)",
        config.player_threshold, config.trigger_delay_secs
    );
    let mut gate = LobbyGate::new(config);

    while let Some(msg) = rx.recv().await {
        match msg {
            GateMessage::PlayerJoined => {
                if let Some(order) = gate.player_joined() {
                    let world = Arc::clone(&world);
                    tokio::spawn(async move {
                        if !order.delay.is_zero() {
                            tokio::time::sleep(order.delay).await;
                        }
                        world.server_travel(&order.map_url, order.seamless);
                    });
                }
            }
            GateMessage::PlayerLeft => gate.player_left(),
        }
    }
    debug!("Lobby gate task ended");
}
