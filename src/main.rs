use crate::config::Config;
use crate::session::SessionManager;
use crate::ws::{accept_connection, Gateway, Presence};
use anyhow::Context;
use std::net::{Ipv4Addr, SocketAddrV4};
use std::sync::Arc;
use tokio::net::TcpListener;

mod api;
mod command;
mod config;
mod error;
mod game;
mod session;
mod settings;
mod ws;

// FIXME: Implement TLS support

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::try_init().ok();

    let config = Config::from_env().context("invalid configuration")?;
    let db = sled::open(&config.db_path).with_context(|| format!("could not open database at {}", config.db_path))?;

    let presence = Arc::new(Presence::default());
    let port = config.port;
    let status_port = config.status_port;
    let manager = Arc::new(SessionManager::new(config, &db, presence.clone())?);

    if let Some(status_port) = status_port {
        let manager = manager.clone();
        tokio::spawn(async move {
            if let Err(err) = api::serve(manager, status_port).await {
                log::error!("Status endpoint stopped: {:#}", err);
            }
        });
    }

    let gateway = Arc::new(Gateway::new(manager, presence));

    let addr = SocketAddrV4::new(Ipv4Addr::new(127, 0, 0, 1), port);
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("could not bind to address {:?}", addr))?;
    log::info!("Listening on: {:?}", addr);

    while let Ok((stream, _)) = listener.accept().await {
        tokio::spawn(accept_connection(stream, gateway.clone()));
    }
    Ok(())
}
