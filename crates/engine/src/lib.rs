//! s2net Engine - Client Slot Table and Server Lifecycle
//!
//! This crate handles:
//! - The server's client-slot table ([`NetworkGameServer`])
//! - Per-client records with connection flags ([`ServerSideClient`])
//! - Server state transitions and tick advancement
//!
//! # Architecture
//!
//! The server is a plain owned value. Reading the client list takes `&self`,
//! connecting, activating or disconnecting clients takes `&mut self`, so the
//! client list cannot change while a recipient filter is reading it.
//!
//! # Thread Safety
//!
//! The thread that creates the server is recorded as the simulation thread and
//! can be checked at runtime via [`NetworkGameServer::is_simulation_thread`].

pub mod client;
pub mod error;
pub mod server;

pub use client::{ClientFlags, ServerSideClient};
pub use error::ServerError;
pub use server::NetworkGameServer;
