//! s2net SDK - Source 2 Network Type Definitions
//!
//! This crate contains the plain value types shared by the server slot table
//! and the recipient filters. It has no dependencies and compiles quickly,
//! allowing parallel compilation of dependent crates.
//!
//! # Modules
//!
//! - [`slot`] - Player slot addressing
//! - [`bitvec`] - Fixed-capacity player bit vector
//! - [`net`] - Network channel buffer types and server state
//! - [`world`] - Positions, visibility clusters and team identifiers

pub mod bitvec;
pub mod net;
pub mod slot;
pub mod world;

pub use bitvec::{PlayerBitVec, PlayerBitVecIter, PLAYER_BITVEC_WORDS};
pub use net::{NetChannelBufType, ServerState};
pub use slot::{PlayerSlot, ABSOLUTE_PLAYER_LIMIT};
pub use world::{ClusterId, ClusterSet, TeamId, Vector};
