use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::info;

mod config;
mod error;
mod lobby_gate;
mod messages;
mod session;
#[cfg(test)]
mod test_utils;
mod world;

use crate::config::AppConfig;
use crate::lobby_gate::gate_task;
use crate::messages::{BrokerMessage, GateMessage, MenuEvent};
use crate::session::lan::{registry_task, LanBackend, RegistryRequest};
use crate::session::{broker_task, SessionBroker};
use crate::world::{LoggingWorld, WorldLink};

/// Entry point: wires the session broker, the lobby gate and a line-based
/// menu stand-in on stdin.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => AppConfig::load(&path)?,
        None => AppConfig::default(),
    };
    info!("Session server starting");

    let world: Arc<dyn WorldLink> = Arc::new(LoggingWorld);

    // In-process LAN registry standing in for the online subsystem.
    let (registry_tx, registry_rx) = mpsc::unbounded_channel::<RegistryRequest>();
    tokio::spawn(registry_task(registry_rx));

    let (broker_tx, broker_rx) = mpsc::unbounded_channel::<BrokerMessage>();
    let (menu_tx, menu_rx) = mpsc::unbounded_channel::<MenuEvent>();
    let username = std::env::var("USER").unwrap_or_else(|_| String::from("Player"));
    let backend = LanBackend::new(registry_tx, broker_tx.clone(), username);
    let broker = SessionBroker::new(
        config.broker,
        Some(Box::new(backend)),
        Arc::clone(&world),
        menu_tx,
    );
    tokio::spawn(broker_task(broker, broker_rx));

    let (gate_tx, gate_rx) = mpsc::unbounded_channel::<GateMessage>();
    tokio::spawn(gate_task(config.gate, gate_rx, Arc::clone(&world)));

    tokio::spawn(print_menu_events(menu_rx));

    // Menu stand-in: one command per line.
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    println!("commands: host <name> | refresh | join <n> | player-join | player-leave | quit");
    while let Some(line) = lines.next_line().await? {
        let mut parts = line.split_whitespace();
        match parts.next() {
            Some("host") => {
                let server_name = parts.collect::<Vec<_>>().join(" ");
                broker_tx.send(BrokerMessage::Host { server_name })?;
            }
            Some("refresh") => broker_tx.send(BrokerMessage::RefreshServerList)?,
            Some("join") => match parts.next().and_then(|s| s.parse::<usize>().ok()) {
                Some(index) => broker_tx.send(BrokerMessage::Join { index })?,
                None => println!("usage: join <index>"),
            },
            Some("player-join") => gate_tx.send(GateMessage::PlayerJoined)?,
            Some("player-leave") => gate_tx.send(GateMessage::PlayerLeft)?,
            Some("quit") => break,
            Some(other) => println!("unknown command: {}", other),
            None => {}
        }
    }

    info!("Session server shutting down");
    Ok(())
}

/// Presentation side of the menu contract: renders server lists and notices.
async fn print_menu_events(mut rx: mpsc::UnboundedReceiver<MenuEvent>) {
    while let Some(ev) = rx.recv().await {
        match ev {
            MenuEvent::ServerList(entries) => {
                println!("servers ({}):", entries.len());
                for (index, entry) in entries.iter().enumerate() {
                    println!(
                        "  [{}] {} | {}/{} players | host {}",
                        index,
                        entry.name,
                        entry.current_players,
                        entry.max_players,
                        entry.host_username
                    );
                }
            }
            MenuEvent::Notice(text) => println!("* {}", text),
        }
    }
}
