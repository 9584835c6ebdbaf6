//! Server frame driver
//!
//! [`ServerHost`] owns the [`NetworkGameServer`] and is the only path that
//! mutates it, so every state change and client lifecycle event reaches the
//! global listeners. Call [`ServerHost::game_frame`] once per server frame on
//! the simulation thread.

use std::time::{Duration, Instant};

use s2net_engine::{NetworkGameServer, ServerError};
use s2net_sdk::{ClusterId, PlayerSlot, ServerState, TeamId};

use crate::config::CoreConfig;
use crate::listeners;
use crate::tasks::{TaskQueue, TaskSender};

/// The simulation-thread owner of the network server
pub struct ServerHost {
    server: NetworkGameServer,
    tasks: TaskQueue,
    frame_budget: Duration,
    /// Frame counter (increments every `game_frame` call)
    frame_count: u64,
    /// Last frame's processing time for performance monitoring (nanoseconds)
    last_frame_time_ns: u64,
}

impl ServerHost {
    pub fn new(config: &CoreConfig) -> Self {
        Self {
            server: NetworkGameServer::new(config.max_clients),
            tasks: TaskQueue::new(),
            frame_budget: Duration::from_micros(config.frame_budget_us),
            frame_count: 0,
            last_frame_time_ns: 0,
        }
    }

    /// Read access to the slot table, for building recipient filters
    pub fn server(&self) -> &NetworkGameServer {
        &self.server
    }

    /// Handle for queueing simulation-thread work from other threads
    pub fn task_sender(&self) -> TaskSender {
        self.tasks.sender()
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the last frame processing time in nanoseconds
    pub fn last_frame_time_ns(&self) -> u64 {
        self.last_frame_time_ns
    }

    // ========================================================================
    // Server lifecycle
    // ========================================================================

    /// Move the server to a new state
    ///
    /// Entering [`ServerState::Dead`] fires a disconnect for every client
    /// that was still connected.
    pub fn set_state(&mut self, next: ServerState) -> Result<ServerState, ServerError> {
        let dropped: Vec<PlayerSlot> = if next == ServerState::Dead {
            self.server.clients().map(|c| c.player_slot()).collect()
        } else {
            Vec::new()
        };

        let previous = self.server.set_state(next)?;
        if previous == next {
            return Ok(previous);
        }

        for slot in dropped {
            listeners::fire_client_disconnect(slot);
        }
        listeners::fire_server_state_changed(previous, next);
        Ok(previous)
    }

    /// Run one server frame
    ///
    /// Drains queued tasks, then advances the tick and fires tick listeners
    /// if the server is simulating.
    ///
    /// # Returns
    /// The tick that ran, or `None` if the server is not active.
    pub fn game_frame(&mut self) -> Option<u64> {
        let start = Instant::now();

        self.frame_count += 1;

        let tasks_processed = self.tasks.process(&self.server);
        if tasks_processed > 0 {
            tracing::trace!("Processed {} queued tasks", tasks_processed);
        }

        let tick = self.server.advance_tick();
        if let Some(tick) = tick {
            listeners::fire_tick(tick);
        }

        let elapsed = start.elapsed();
        self.last_frame_time_ns = elapsed.as_nanos() as u64;

        if elapsed > self.frame_budget {
            tracing::warn!(
                "Game frame took {}us (frame {}, budget {}us)",
                elapsed.as_micros(),
                self.frame_count,
                self.frame_budget.as_micros()
            );
        }

        tick
    }

    // ========================================================================
    // Client lifecycle
    // ========================================================================

    pub fn connect_client(&mut self, name: &str) -> Result<PlayerSlot, ServerError> {
        let slot = self.server.connect_client(name)?;
        listeners::fire_client_connect(slot, name);
        Ok(slot)
    }

    pub fn connect_fake_client(&mut self, name: &str) -> Result<PlayerSlot, ServerError> {
        let slot = self.server.connect_fake_client(name)?;
        listeners::fire_client_connect(slot, name);
        Ok(slot)
    }

    pub fn connect_replay_client(&mut self, name: &str) -> Result<PlayerSlot, ServerError> {
        let slot = self.server.connect_replay_client(name)?;
        listeners::fire_client_connect(slot, name);
        Ok(slot)
    }

    pub fn connect_split_screen_client(
        &mut self,
        owner: PlayerSlot,
        name: &str,
    ) -> Result<PlayerSlot, ServerError> {
        let slot = self.server.connect_split_screen_client(owner, name)?;
        listeners::fire_client_connect(slot, name);
        Ok(slot)
    }

    pub fn activate_client(&mut self, slot: PlayerSlot) -> Result<(), ServerError> {
        self.server.activate_client(slot)?;
        listeners::fire_client_active(slot);
        Ok(())
    }

    /// Disconnect a client, firing a disconnect for every freed slot
    pub fn disconnect_client(&mut self, slot: PlayerSlot) -> Result<Vec<PlayerSlot>, ServerError> {
        let freed = self.server.disconnect_client(slot)?;
        for &freed_slot in &freed {
            listeners::fire_client_disconnect(freed_slot);
        }
        Ok(freed)
    }

    pub fn set_client_team(&mut self, slot: PlayerSlot, team: TeamId) -> Result<(), ServerError> {
        self.server.set_client_team(slot, team)
    }

    pub fn set_client_view_cluster(
        &mut self,
        slot: PlayerSlot,
        cluster: Option<ClusterId>,
    ) -> Result<(), ServerError> {
        self.server.set_client_view_cluster(slot, cluster)
    }
}

impl Default for ServerHost {
    fn default() -> Self {
        Self::new(&CoreConfig::default())
    }
}
