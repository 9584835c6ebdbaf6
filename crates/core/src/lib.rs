//! s2net Core - Recipient Filters and Server Frame Driver
//!
//! This crate decides who receives each outgoing server message and drives
//! the server frame that those messages are built in.
//!
//! # Re-exports
//!
//! This crate re-exports the SDK and engine crates for convenience:
//! - [`sdk`] - Player slots, bit vectors and network enums
//! - [`engine`] - The client-slot table and server state machine

use tracing::info;

pub use s2net_engine as engine;
pub use s2net_sdk as sdk;

pub mod config;
pub mod host;
pub mod listeners;
pub mod logging;
pub mod recipients;
pub mod tasks;

pub use host::ServerHost;
pub use tasks::{TaskError, TaskSender};

pub use recipients::{
    make_broadcast_filter, make_except_filter, make_pas_filter, make_pvs_filter,
    make_reliable_broadcast_filter, make_single_recipient_and_replay_filter,
    make_single_recipient_filter, make_team_filter, send_message, MessageSink, OutboundMessage,
    RecipientFilter, RecipientSource,
};

pub use listeners::{
    on_client_active, on_client_connect, on_client_disconnect, on_server_state_changed, on_tick,
    remove_listener, ListenerKey,
};

pub use config::{ConfigError, ConfigResult, CoreConfig};

/// Load the core config, install logging and create the server host
///
/// A config that fails to load is reported and replaced by defaults.
pub fn init() -> ServerHost {
    let (config, error) = match CoreConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (CoreConfig::default(), Some(e)),
    };

    logging::init_logging(&config);
    if let Some(e) = error {
        tracing::warn!("Failed to load core config, using defaults: {}", e);
    }

    info!(
        "s2net core v{} initialized ({} client slots)",
        env!("CARGO_PKG_VERSION"),
        config.max_clients.min(sdk::ABSOLUTE_PLAYER_LIMIT)
    );
    ServerHost::new(&config)
}
