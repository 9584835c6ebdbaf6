//! Global listeners for server lifecycle and client events
//!
//! Callbacks are stored in thread-safe registries and invoked by
//! [`ServerHost`](crate::ServerHost) when the corresponding event occurs.
//!
//! # Example
//!
//! ```ignore
//! use s2net_core::listeners;
//!
//! let key = listeners::on_client_active(|slot| {
//!     tracing::info!("Client {} entered the game", slot);
//! });
//!
//! listeners::remove_listener(key);
//! ```

pub mod client;
pub mod server;

use std::sync::LazyLock;

use parking_lot::RwLock;
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Key for registered listeners, used for removal
    pub struct ListenerKey;
}

/// Which registry a listener belongs to
#[derive(Clone, Copy, Debug)]
enum ListenerType {
    Tick,
    ServerStateChanged,
    ClientConnect,
    ClientActive,
    ClientDisconnect,
}

struct KeyRegistry {
    keys: SlotMap<ListenerKey, ListenerType>,
}

static KEY_REGISTRY: LazyLock<RwLock<KeyRegistry>> = LazyLock::new(|| {
    RwLock::new(KeyRegistry {
        keys: SlotMap::with_key(),
    })
});

/// Reserve a key for a listener of the given type
fn register_key(listener_type: ListenerType) -> ListenerKey {
    KEY_REGISTRY.write().keys.insert(listener_type)
}

/// Remove a listener by its key
///
/// Returns `true` if the listener was found and removed.
pub fn remove_listener(key: ListenerKey) -> bool {
    let listener_type = KEY_REGISTRY.write().keys.remove(key);

    match listener_type {
        Some(ListenerType::Tick) => server::remove_tick(key),
        Some(ListenerType::ServerStateChanged) => server::remove_server_state_changed(key),
        Some(ListenerType::ClientConnect) => client::remove_client_connect(key),
        Some(ListenerType::ClientActive) => client::remove_client_active(key),
        Some(ListenerType::ClientDisconnect) => client::remove_client_disconnect(key),
        None => false,
    }
}

pub use client::{on_client_active, on_client_connect, on_client_disconnect};
pub use server::{on_server_state_changed, on_tick};

pub use client::{fire_client_active, fire_client_connect, fire_client_disconnect};
pub use server::{fire_server_state_changed, fire_tick};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_unknown_key() {
        assert!(!remove_listener(ListenerKey::default()));
    }

    #[test]
    fn test_remove_listener_twice() {
        let key = on_tick(|_| {});
        assert!(remove_listener(key));
        assert!(!remove_listener(key));
    }
}
