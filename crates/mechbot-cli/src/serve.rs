//! `mechbot serve` — run the HTTP chat service.
//!
//! Startup sequence:
//! 1. Load config
//! 2. Build the completion provider (fatal without an API key)
//! 3. Build the session store + shared state
//! 4. Spawn the idle-session sweeper
//! 5. Serve axum with graceful shutdown on Ctrl+C

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::sync::Notify;
use tracing::info;

use mechbot_core::config::load_config;
use mechbot_core::session::{SessionLimits, SessionStore};
use mechbot_providers::HttpProvider;
use mechbot_server::{router, sweeper, AppState};

use crate::helpers;

/// Run the serve command.
pub async fn run() -> Result<()> {
    println!();
    helpers::print_banner();
    println!();

    // 1. Load config
    let config = load_config(None);

    // 2. Create provider — the service cannot answer without a credential
    let provider = HttpProvider::from_config(&config.provider).context(
        "failed to initialize completion provider \
         (set GROQ_API_KEY or provider.apiKey in ~/.mechbot/config.json)",
    )?;

    // 3. Session store + shared state
    let store = SessionStore::new(SessionLimits::from(&config.sessions));
    let state = AppState::new(store, Arc::new(provider));

    // 4. Idle-session sweeper
    let shutdown = Arc::new(Notify::new());
    let sweeper_task = tokio::spawn(sweeper::run(
        state.clone(),
        Duration::from_secs(config.sessions.sweep_interval_seconds),
        shutdown.clone(),
    ));

    // 5. Bind and serve
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    println!("  Model:    {}", config.provider.model);
    println!("  Listen:   http://{addr}");
    println!(
        "  Sessions: max {}, idle timeout {}m",
        config.sessions.max_sessions, config.sessions.idle_timeout_minutes
    );
    println!();
    println!("  Ctrl+C to stop");
    println!();

    info!(%addr, model = %config.provider.model, "service starting");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            println!();
            println!("  Shutting down...");
            info!("received Ctrl+C, shutting down");
        })
        .await
        .context("server error")?;

    shutdown.notify_waiters();
    sweeper_task.await.ok();

    println!("  Service stopped. Goodbye!");
    Ok(())
}
