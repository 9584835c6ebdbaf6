//! Client lifecycle listeners
//!
//! - OnClientConnect: Called when a client takes a slot
//! - OnClientActive: Called when a client fully enters the game
//! - OnClientDisconnect: Called once for every slot freed by a disconnect

use std::sync::LazyLock;

use parking_lot::RwLock;
use s2net_sdk::PlayerSlot;
use slotmap::SecondaryMap;

use super::{register_key, ListenerKey, ListenerType};

/// Callback for client connect: (slot, name)
pub type ClientConnectCallback = Box<dyn Fn(PlayerSlot, &str) + Send + Sync>;
/// Callback for client active: (slot)
pub type ClientActiveCallback = Box<dyn Fn(PlayerSlot) + Send + Sync>;
/// Callback for client disconnect: (slot)
pub type ClientDisconnectCallback = Box<dyn Fn(PlayerSlot) + Send + Sync>;

struct ClientConnectRegistry {
    callbacks: SecondaryMap<ListenerKey, ClientConnectCallback>,
}

struct ClientActiveRegistry {
    callbacks: SecondaryMap<ListenerKey, ClientActiveCallback>,
}

struct ClientDisconnectRegistry {
    callbacks: SecondaryMap<ListenerKey, ClientDisconnectCallback>,
}

static CLIENT_CONNECT_REGISTRY: LazyLock<RwLock<ClientConnectRegistry>> = LazyLock::new(|| {
    RwLock::new(ClientConnectRegistry {
        callbacks: SecondaryMap::new(),
    })
});

static CLIENT_ACTIVE_REGISTRY: LazyLock<RwLock<ClientActiveRegistry>> = LazyLock::new(|| {
    RwLock::new(ClientActiveRegistry {
        callbacks: SecondaryMap::new(),
    })
});

static CLIENT_DISCONNECT_REGISTRY: LazyLock<RwLock<ClientDisconnectRegistry>> =
    LazyLock::new(|| {
        RwLock::new(ClientDisconnectRegistry {
            callbacks: SecondaryMap::new(),
        })
    });

// === OnClientConnect ===

/// Register a callback to be called when a client connects
///
/// # Arguments
/// The callback receives:
/// - `slot`: Player slot the client took
/// - `name`: Player name
///
/// # Returns
/// A key that can be used to unregister the callback via `remove_listener`.
pub fn on_client_connect<F>(callback: F) -> ListenerKey
where
    F: Fn(PlayerSlot, &str) + Send + Sync + 'static,
{
    let key = register_key(ListenerType::ClientConnect);
    CLIENT_CONNECT_REGISTRY
        .write()
        .callbacks
        .insert(key, Box::new(callback));
    key
}

pub(super) fn remove_client_connect(key: ListenerKey) -> bool {
    CLIENT_CONNECT_REGISTRY
        .write()
        .callbacks
        .remove(key)
        .is_some()
}

/// Fire all client connect callbacks
pub fn fire_client_connect(slot: PlayerSlot, name: &str) {
    tracing::debug!("Firing OnClientConnect: slot={}, name={}", slot, name);
    let registry = CLIENT_CONNECT_REGISTRY.read();
    for (_, callback) in registry.callbacks.iter() {
        callback(slot, name);
    }
}

// === OnClientActive ===

/// Register a callback to be called when a client fully enters the game
///
/// From this point the client is included in broadcast filters.
///
/// # Returns
/// A key that can be used to unregister the callback via `remove_listener`.
pub fn on_client_active<F>(callback: F) -> ListenerKey
where
    F: Fn(PlayerSlot) + Send + Sync + 'static,
{
    let key = register_key(ListenerType::ClientActive);
    CLIENT_ACTIVE_REGISTRY
        .write()
        .callbacks
        .insert(key, Box::new(callback));
    key
}

pub(super) fn remove_client_active(key: ListenerKey) -> bool {
    CLIENT_ACTIVE_REGISTRY
        .write()
        .callbacks
        .remove(key)
        .is_some()
}

/// Fire all client active callbacks
pub fn fire_client_active(slot: PlayerSlot) {
    tracing::debug!("Firing OnClientActive: slot={}", slot);
    let registry = CLIENT_ACTIVE_REGISTRY.read();
    for (_, callback) in registry.callbacks.iter() {
        callback(slot);
    }
}

// === OnClientDisconnect ===

/// Register a callback to be called when a client disconnects
///
/// Split-screen slots freed along with their owner fire separately.
///
/// # Returns
/// A key that can be used to unregister the callback via `remove_listener`.
pub fn on_client_disconnect<F>(callback: F) -> ListenerKey
where
    F: Fn(PlayerSlot) + Send + Sync + 'static,
{
    let key = register_key(ListenerType::ClientDisconnect);
    CLIENT_DISCONNECT_REGISTRY
        .write()
        .callbacks
        .insert(key, Box::new(callback));
    key
}

pub(super) fn remove_client_disconnect(key: ListenerKey) -> bool {
    CLIENT_DISCONNECT_REGISTRY
        .write()
        .callbacks
        .remove(key)
        .is_some()
}

/// Fire all client disconnect callbacks
pub fn fire_client_disconnect(slot: PlayerSlot) {
    tracing::debug!("Firing OnClientDisconnect: slot={}", slot);
    let registry = CLIENT_DISCONNECT_REGISTRY.read();
    for (_, callback) in registry.callbacks.iter() {
        callback(slot);
    }
}
