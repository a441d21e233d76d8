use crate::config::GateConfig;
use std::time::Duration;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Waiting,
    Triggered,
}

/// Travel the gate wants performed once enough players are in. A zero delay
/// means travel right away.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TravelOrder {
    pub map_url: String,
    pub seamless: bool,
    pub delay: Duration,
}

/// Server-side admission counter. Counts joins and leaves and trips exactly
/// once when the player threshold is reached; `Triggered` is terminal for the
/// lobby's lifetime, a later leave never reverts it.
pub struct LobbyGate {
    config: GateConfig,
    players: u32,
    state: GateState,
}

impl LobbyGate {
    pub fn new(config: GateConfig) -> Self {
        Self {
            config,
            players: 0,
            state: GateState::Waiting,
        }
    }

    pub fn players(&self) -> u32 {
        self.players
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn player_joined(&mut self) -> Option<TravelOrder> {
        self.players += 1;
        debug!("Player joined lobby, {} present", self.players);

        if self.state == GateState::Waiting && self.players >= self.config.player_threshold {
            self.state = GateState::Triggered;
            info!(
                "Lobby gate triggered at {} players, traveling to {} in {}s",
                self.players, self.config.game_map_url, self.config.trigger_delay_secs
            );
            return Some(TravelOrder {
                map_url: self.config.game_map_url.clone(),
                seamless: self.config.seamless,
                delay: Duration::from_secs(self.config.trigger_delay_secs),
            });
        }
        None
    }

    pub fn player_left(&mut self) {
        if self.players == 0 {
            warn!("Player left an empty lobby, count stays at 0");
            return;
        }
        self.players -= 1;
        debug!("Player left lobby, {} present", self.players);
    }
}
