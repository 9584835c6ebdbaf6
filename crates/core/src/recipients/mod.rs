//! Recipient filters
//!
//! A [`RecipientFilter`] decides which player slots receive an outgoing
//! message and over which channel. Filters are built on the simulation
//! thread, read once by [`send_message`], and dropped.
//!
//! # Example
//!
//! ```ignore
//! use s2net_core::recipients::{make_pvs_filter, send_message};
//!
//! let mut filter = make_pvs_filter(&oracle, &origin);
//! filter.remove_recipients_by_team(&server, TeamId::SPECTATOR);
//! send_message(filter, &payload, &mut outbox);
//! ```

mod builders;
mod dispatch;
mod filter;
mod providers;
mod server;

#[cfg(test)]
mod testing;

pub use builders::{
    make_broadcast_filter, make_except_filter, make_pas_filter, make_pvs_filter,
    make_reliable_broadcast_filter, make_single_recipient_and_replay_filter,
    make_single_recipient_filter, make_team_filter,
};
pub use dispatch::{send_message, MessageSink, OutboundMessage};
pub use filter::{RecipientFilter, RecipientSource};
pub use providers::{
    ClientHandle, ClientRoster, PredictionHost, ReplayDirector, SplitScreenRegistry, TeamRoster,
    VisibilityOracle, VisibilityQuery,
};
pub use server::ServerVisibility;
