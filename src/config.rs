use serde::Deserialize;

/// Settings the broker applies to every session it hosts. The session name is
/// fixed per process so repeated Host calls collapse into destroy+recreate
/// cycles instead of stacking sessions.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BrokerConfig {
    pub session_name: String,
    /// Key under which the human-readable server name is advertised.
    pub server_name_key: String,
    pub max_public_connections: u32,
    pub advertise: bool,
    pub presence: bool,
    /// Cap on discovery results. High enough to filter other games' sessions
    /// out of a busy LAN and still find ours.
    pub max_search_results: usize,
    pub lobby_map_url: String,
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            session_name: String::from("GameSession"),
            server_name_key: String::from("ServerName"),
            max_public_connections: 2,
            advertise: true,
            presence: true,
            max_search_results: 100,
            lobby_map_url: String::from("/maps/lobby?listen"),
        }
    }
}

/// Lobby gate tuning. Both shipped variants are expressible here:
/// immediate travel at 3 players is `player_threshold: 3, trigger_delay_secs: 0`,
/// the delayed seamless variant is the default below.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    pub player_threshold: u32,
    pub trigger_delay_secs: u64,
    pub seamless: bool,
    pub game_map_url: String,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            player_threshold: 2,
            trigger_delay_secs: 5,
            seamless: true,
            game_map_url: String::from("/maps/overworld?listen"),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub broker: BrokerConfig,
    pub gate: GateConfig,
}

impl AppConfig {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}
