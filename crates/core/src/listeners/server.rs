//! Server lifecycle listeners
//!
//! - OnTick: Called after every simulated tick
//! - OnServerStateChanged: Called when the server moves between states

use std::sync::LazyLock;

use parking_lot::RwLock;
use s2net_sdk::ServerState;
use slotmap::SecondaryMap;

use super::{register_key, ListenerKey, ListenerType};

/// Callback for tick: (tick)
pub type TickCallback = Box<dyn Fn(u64) + Send + Sync>;
/// Callback for state change: (old, new)
pub type ServerStateChangedCallback = Box<dyn Fn(ServerState, ServerState) + Send + Sync>;

struct TickRegistry {
    callbacks: SecondaryMap<ListenerKey, TickCallback>,
}

struct ServerStateChangedRegistry {
    callbacks: SecondaryMap<ListenerKey, ServerStateChangedCallback>,
}

static TICK_REGISTRY: LazyLock<RwLock<TickRegistry>> = LazyLock::new(|| {
    RwLock::new(TickRegistry {
        callbacks: SecondaryMap::new(),
    })
});

static SERVER_STATE_CHANGED_REGISTRY: LazyLock<RwLock<ServerStateChangedRegistry>> =
    LazyLock::new(|| {
        RwLock::new(ServerStateChangedRegistry {
            callbacks: SecondaryMap::new(),
        })
    });

// === OnTick ===

/// Register a callback to be called after every simulated tick
///
/// The callback receives the tick that just ran. Callbacks must not register
/// or remove listeners themselves.
///
/// # Returns
/// A key that can be used to unregister the callback via `remove_listener`.
pub fn on_tick<F>(callback: F) -> ListenerKey
where
    F: Fn(u64) + Send + Sync + 'static,
{
    let key = register_key(ListenerType::Tick);
    TICK_REGISTRY.write().callbacks.insert(key, Box::new(callback));
    key
}

pub(super) fn remove_tick(key: ListenerKey) -> bool {
    TICK_REGISTRY.write().callbacks.remove(key).is_some()
}

/// Fire all tick callbacks
pub fn fire_tick(tick: u64) {
    let registry = TICK_REGISTRY.read();
    for (_, callback) in registry.callbacks.iter() {
        callback(tick);
    }
}

// === OnServerStateChanged ===

/// Register a callback to be called when the server changes state
///
/// # Arguments
/// The callback receives the previous and the new state.
///
/// # Returns
/// A key that can be used to unregister the callback via `remove_listener`.
pub fn on_server_state_changed<F>(callback: F) -> ListenerKey
where
    F: Fn(ServerState, ServerState) + Send + Sync + 'static,
{
    let key = register_key(ListenerType::ServerStateChanged);
    SERVER_STATE_CHANGED_REGISTRY
        .write()
        .callbacks
        .insert(key, Box::new(callback));
    key
}

pub(super) fn remove_server_state_changed(key: ListenerKey) -> bool {
    SERVER_STATE_CHANGED_REGISTRY
        .write()
        .callbacks
        .remove(key)
        .is_some()
}

/// Fire all state change callbacks
pub fn fire_server_state_changed(old: ServerState, new: ServerState) {
    tracing::debug!("Firing OnServerStateChanged: {} -> {}", old, new);
    let registry = SERVER_STATE_CHANGED_REGISTRY.read();
    for (_, callback) in registry.callbacks.iter() {
        callback(old, new);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listeners::remove_listener;
    use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
    use std::sync::Arc;

    // Listener registries are process-wide, so each test filters on a
    // payload no other test produces.

    #[test]
    fn test_tick_listener() {
        const MARKER: u64 = u64::MAX - 11;

        let seen = Arc::new(AtomicU64::new(0));
        let seen_cb = Arc::clone(&seen);
        let key = on_tick(move |tick| {
            if tick == MARKER {
                seen_cb.fetch_add(1, Ordering::SeqCst);
            }
        });

        fire_tick(MARKER);
        assert_eq!(seen.load(Ordering::SeqCst), 1);

        assert!(remove_listener(key));
        fire_tick(MARKER);
        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_state_listener() {
        let hits = Arc::new(AtomicUsize::new(0));
        let hits_cb = Arc::clone(&hits);
        let key = on_server_state_changed(move |old, new| {
            // A transition the server never performs
            if old == ServerState::Paused && new == ServerState::WaitingForManifest {
                hits_cb.fetch_add(1, Ordering::SeqCst);
            }
        });

        fire_server_state_changed(ServerState::Paused, ServerState::WaitingForManifest);
        fire_server_state_changed(ServerState::Paused, ServerState::WaitingForManifest);
        assert_eq!(hits.load(Ordering::SeqCst), 2);

        assert!(remove_listener(key));
    }

    #[test]
    fn test_removal_only_drops_own_callback() {
        const MARKER: u64 = u64::MAX - 12;

        let hits = Arc::new(AtomicUsize::new(0));
        let first_cb = Arc::clone(&hits);
        let second_cb = Arc::clone(&hits);
        let first = on_tick(move |tick| {
            if tick == MARKER {
                first_cb.fetch_add(1, Ordering::SeqCst);
            }
        });
        let second = on_tick(move |tick| {
            if tick == MARKER {
                second_cb.fetch_add(10, Ordering::SeqCst);
            }
        });

        assert!(remove_listener(first));
        fire_tick(MARKER);
        assert_eq!(hits.load(Ordering::SeqCst), 10);

        assert!(remove_listener(second));
    }
}
