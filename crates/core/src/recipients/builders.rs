//! Ready-made filters
//!
//! Each builder is a constructor policy over the same [`RecipientFilter`]:
//! a channel choice plus an initial recipient set.
//!
//! | builder                                     | channel    |
//! |---------------------------------------------|------------|
//! | [`make_single_recipient_filter`]            | reliable   |
//! | [`make_single_recipient_and_replay_filter`] | reliable   |
//! | [`make_team_filter`]                        | unreliable |
//! | [`make_broadcast_filter`]                   | unreliable |
//! | [`make_reliable_broadcast_filter`]          | reliable   |
//! | [`make_pvs_filter`] / [`make_pas_filter`]   | unreliable |
//! | [`make_except_filter`]                      | source's   |

use s2net_sdk::{PlayerSlot, TeamId, Vector};

use super::filter::{RecipientFilter, RecipientSource};
use super::providers::{ClientRoster, ReplayDirector, TeamRoster, VisibilityOracle};

/// Filter addressing exactly one player
pub fn make_single_recipient_filter(slot: PlayerSlot) -> RecipientFilter {
    let mut filter = RecipientFilter::reliable();
    filter.add_recipient(slot);
    filter
}

/// Filter addressing one player and every broadcast relay
///
/// Relay clients record what regular clients receive, so a message meant for
/// one player still shows up in the broadcast and its demo.
pub fn make_single_recipient_and_replay_filter<D: ReplayDirector + ?Sized>(
    slot: PlayerSlot,
    director: &D,
) -> RecipientFilter {
    let mut filter = make_single_recipient_filter(slot);
    filter.add_players_from_bit_mask(&director.replay_slots());
    filter
}

/// Filter addressing every member of a team
pub fn make_team_filter<T: TeamRoster + ?Sized>(teams: &T, team: TeamId) -> RecipientFilter {
    let mut filter = RecipientFilter::unreliable();
    filter.add_recipients_by_team(teams, team);
    filter
}

/// Unreliable filter addressing every active client
pub fn make_broadcast_filter<R: ClientRoster + ?Sized>(roster: &R) -> RecipientFilter {
    let mut filter = RecipientFilter::unreliable();
    filter.add_all_players(roster);
    filter
}

/// Reliable filter addressing every active client
pub fn make_reliable_broadcast_filter<R: ClientRoster + ?Sized>(roster: &R) -> RecipientFilter {
    let mut filter = RecipientFilter::reliable();
    filter.add_all_players(roster);
    filter
}

/// Filter addressing every client that can see `origin`
pub fn make_pvs_filter<O: VisibilityOracle + ?Sized>(
    oracle: &O,
    origin: &Vector,
) -> RecipientFilter {
    let mut filter = RecipientFilter::unreliable();
    filter.add_recipients_by_pvs(oracle, origin);
    filter
}

/// Filter addressing every client that can hear `origin`
pub fn make_pas_filter<O: VisibilityOracle + ?Sized>(
    oracle: &O,
    origin: &Vector,
) -> RecipientFilter {
    let mut filter = RecipientFilter::unreliable();
    filter.add_recipients_by_pas(oracle, origin);
    filter
}

/// Copy of `source` without `except`, for "everyone but the sender"
pub fn make_except_filter<S: RecipientSource + ?Sized>(
    source: &S,
    except: PlayerSlot,
) -> RecipientFilter {
    RecipientFilter::from_source(source, except)
}
