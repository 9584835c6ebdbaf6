//! Task queue for simulation-thread execution
//!
//! Lets background threads hand work to the simulation thread. The queue is
//! drained by [`ServerHost::game_frame`](crate::ServerHost::game_frame), and
//! each task runs with shared access to the server, so a task can read the
//! client roster and build recipient filters safely.

pub mod queue;

pub use queue::*;
