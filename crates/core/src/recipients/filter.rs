//! The recipient filter
//!
//! A [`RecipientFilter`] is built fresh for each outbound message, shaped by
//! add/remove calls, and consumed once by [`send_message`](super::send_message).
//!
//! All membership changes go through [`RecipientFilter::add_recipient`] and
//! [`RecipientFilter::remove_recipient`], so slot validation and prediction
//! culling apply no matter which bulk operation added a player.

use s2net_sdk::{NetChannelBufType, PlayerBitVec, PlayerBitVecIter, PlayerSlot, TeamId, Vector};

use super::providers::{
    ClientHandle, ClientRoster, PredictionHost, SplitScreenRegistry, TeamRoster,
    VisibilityOracle, VisibilityQuery,
};

/// Anything that can tell the send path who receives a message
///
/// Foreign filter implementations are copied into a [`RecipientFilter`] via
/// [`RecipientFilter::from_source`].
pub trait RecipientSource {
    fn recipients(&self) -> &PlayerBitVec;

    fn network_buf_type(&self) -> NetChannelBufType;

    /// Check if this is a signon / full-state message
    fn is_init_message(&self) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct PredictionRules {
    enabled: bool,
    ignore_cull: bool,
    suppressed: Option<PlayerSlot>,
}

/// Per-message set of destination slots plus channel metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipientFilter {
    recipients: PlayerBitVec,
    buf_type: NetChannelBufType,
    init_message: bool,
    prediction: PredictionRules,
}

impl RecipientFilter {
    /// Create an empty filter writing to `buf_type`
    pub fn new(buf_type: NetChannelBufType) -> Self {
        Self {
            recipients: PlayerBitVec::new(),
            buf_type,
            init_message: false,
            prediction: PredictionRules::default(),
        }
    }

    pub fn reliable() -> Self {
        Self::new(NetChannelBufType::Reliable)
    }

    pub fn unreliable() -> Self {
        Self::new(NetChannelBufType::Unreliable)
    }

    /// Rebuild a filter from any [`RecipientSource`], leaving out `except`
    ///
    /// Used to rebroadcast a message to everyone but its sender. Pass
    /// [`PlayerSlot::INVALID`] to copy every recipient.
    pub fn from_source<S: RecipientSource + ?Sized>(source: &S, except: PlayerSlot) -> Self {
        let mut filter = Self::new(source.network_buf_type());
        filter.recipients = *source.recipients();
        filter.init_message = source.is_init_message();
        filter.remove_recipient(except);
        filter
    }

    // ========================================================================
    // Single slots
    // ========================================================================

    /// Add a slot
    ///
    /// Out-of-range slots are ignored, as is the predicted host while
    /// prediction rules are active.
    pub fn add_recipient(&mut self, slot: PlayerSlot) {
        if !slot.is_valid() {
            return;
        }
        if self.is_culled_by_prediction(slot) {
            tracing::trace!("Skipping predicted host {}", slot);
            return;
        }
        self.recipients.set(slot);
    }

    /// Remove a slot (out-of-range slots are ignored)
    pub fn remove_recipient(&mut self, slot: PlayerSlot) {
        self.recipients.clear(slot);
    }

    pub fn has_recipient(&self, slot: PlayerSlot) -> bool {
        self.recipients.is_set(slot)
    }

    /// Number of recipients, counted across every slot
    pub fn recipient_count(&self) -> usize {
        self.recipients.count()
    }

    pub fn is_empty(&self) -> bool {
        self.recipients.is_empty()
    }

    pub fn recipients(&self) -> &PlayerBitVec {
        &self.recipients
    }

    /// Iterate recipients in slot order
    pub fn iter(&self) -> PlayerBitVecIter {
        self.recipients.iter()
    }

    /// Drop every recipient and any prediction state
    pub fn reset(&mut self) {
        self.recipients.clear_all();
        self.prediction = PredictionRules::default();
    }

    // ========================================================================
    // Masks
    // ========================================================================

    /// Add every slot set in `mask`
    pub fn add_players_from_bit_mask(&mut self, mask: &PlayerBitVec) {
        let mut bit = mask.find_next_set_bit(0);
        while bit >= 0 {
            self.add_recipient(PlayerSlot::new(bit));
            bit = mask.find_next_set_bit(bit + 1);
        }
    }

    /// Remove every slot set in `mask`
    pub fn remove_players_from_bit_mask(&mut self, mask: &PlayerBitVec) {
        let mut bit = mask.find_next_set_bit(0);
        while bit >= 0 {
            self.remove_recipient(PlayerSlot::new(bit));
            bit = mask.find_next_set_bit(bit + 1);
        }
    }

    /// Add every slot of a raw 64-bit mask
    pub fn set_recipients(&mut self, mask: u64) {
        self.add_players_from_bit_mask(&PlayerBitVec::from_mask(mask));
    }

    // ========================================================================
    // Roster
    // ========================================================================

    /// Replace the recipients with every active client
    ///
    /// The roster must exist. Calling this before the network server is up
    /// panics in debug builds and leaves the filter empty in release builds.
    pub fn add_all_players<R: ClientRoster + ?Sized>(&mut self, roster: &R) {
        self.recipients.clear_all();

        if !roster.is_available() {
            debug_assert!(false, "add_all_players called before the client roster exists");
            tracing::warn!("add_all_players called before the client roster exists");
            return;
        }

        if !roster.is_simulation_thread() {
            tracing::warn!("Client roster read off the simulation thread");
        }

        for client in roster.clients().filter(|c| c.is_active()) {
            self.add_recipient(client.player_slot());
        }
    }

    // ========================================================================
    // Visibility
    // ========================================================================

    /// Add every client that can see `origin`
    pub fn add_recipients_by_pvs<O: VisibilityOracle + ?Sized>(
        &mut self,
        oracle: &O,
        origin: &Vector,
    ) {
        self.add_players_from_bit_mask(&oracle.clients_visible_from(origin, VisibilityQuery::Pvs));
    }

    /// Add every client that can hear `origin`
    pub fn add_recipients_by_pas<O: VisibilityOracle + ?Sized>(
        &mut self,
        oracle: &O,
        origin: &Vector,
    ) {
        self.add_players_from_bit_mask(&oracle.clients_visible_from(origin, VisibilityQuery::Pas));
    }

    /// Remove every client that can see `origin`
    pub fn remove_recipients_by_pvs<O: VisibilityOracle + ?Sized>(
        &mut self,
        oracle: &O,
        origin: &Vector,
    ) {
        let visible = oracle.clients_visible_from(origin, VisibilityQuery::Pvs);
        self.remove_players_from_bit_mask(&visible);
    }

    /// Remove every client that can hear `origin`
    pub fn remove_recipients_by_pas<O: VisibilityOracle + ?Sized>(
        &mut self,
        oracle: &O,
        origin: &Vector,
    ) {
        let visible = oracle.clients_visible_from(origin, VisibilityQuery::Pas);
        self.remove_players_from_bit_mask(&visible);
    }

    // ========================================================================
    // Teams
    // ========================================================================

    pub fn add_recipients_by_team<T: TeamRoster + ?Sized>(&mut self, teams: &T, team: TeamId) {
        self.add_players_from_bit_mask(&teams.team_members(team));
    }

    pub fn remove_recipients_by_team<T: TeamRoster + ?Sized>(&mut self, teams: &T, team: TeamId) {
        self.remove_players_from_bit_mask(&teams.team_members(team));
    }

    /// Keep only recipients on `team`
    pub fn remove_recipients_not_on_team<T: TeamRoster + ?Sized>(
        &mut self,
        teams: &T,
        team: TeamId,
    ) {
        self.recipients.intersect_with(&teams.team_members(team));
    }

    // ========================================================================
    // Split screen
    // ========================================================================

    /// Remove every secondary split-screen slot
    pub fn remove_split_screen_players<S: SplitScreenRegistry + ?Sized>(&mut self, registry: &S) {
        let secondaries = self.secondary_slots(registry);
        self.remove_players_from_bit_mask(&secondaries);
    }

    /// Swap every secondary split-screen slot for its owner
    ///
    /// Owners already present stay present once. A secondary whose owner is
    /// invalid is dropped.
    pub fn replace_split_screen_players_with_owners<S: SplitScreenRegistry + ?Sized>(
        &mut self,
        registry: &S,
    ) {
        let secondaries = self.secondary_slots(registry);
        for slot in secondaries.iter() {
            self.remove_recipient(slot);
            self.add_recipient(registry.owner_of(slot));
        }
    }

    /// No-op kept for callers written against additive recipient lists
    ///
    /// The set representation cannot hold a slot twice.
    pub fn remove_duplicate_recipients(&mut self) {}

    fn secondary_slots<S: SplitScreenRegistry + ?Sized>(&self, registry: &S) -> PlayerBitVec {
        self.recipients
            .iter()
            .filter(|&slot| registry.is_secondary(slot))
            .collect()
    }

    // ========================================================================
    // Message flags
    // ========================================================================

    /// Mark the message as part of signon / full state
    pub fn make_init_message(&mut self) {
        self.init_message = true;
    }

    pub fn is_init_message(&self) -> bool {
        self.init_message
    }

    /// Compatibility no-op: the channel is fixed at construction
    pub fn make_reliable(&mut self) {
        if !self.buf_type.is_reliable() {
            tracing::trace!(
                "make_reliable ignored, filter stays on {:?}",
                self.buf_type
            );
        }
    }

    pub fn network_buf_type(&self) -> NetChannelBufType {
        self.buf_type
    }

    // ========================================================================
    // Prediction
    // ========================================================================

    /// Leave out the player whose command is being predicted
    ///
    /// The host reported by `prediction` is removed now and refused by later
    /// adds, unless prediction culling is ignored.
    pub fn use_prediction_rules<P: PredictionHost + ?Sized>(&mut self, prediction: &P) {
        self.prediction.enabled = true;
        self.prediction.suppressed = prediction.suppressed_host();

        if let Some(host) = self.prediction.suppressed {
            if !self.prediction.ignore_cull {
                self.remove_recipient(host);
            }
        }
    }

    pub fn is_using_prediction_rules(&self) -> bool {
        self.prediction.enabled
    }

    pub fn set_ignore_prediction_cull(&mut self, ignore: bool) {
        self.prediction.ignore_cull = ignore;
    }

    pub fn ignore_prediction_cull(&self) -> bool {
        self.prediction.ignore_cull
    }

    fn is_culled_by_prediction(&self, slot: PlayerSlot) -> bool {
        self.prediction.enabled
            && !self.prediction.ignore_cull
            && self.prediction.suppressed == Some(slot)
    }
}

impl Default for RecipientFilter {
    fn default() -> Self {
        Self::reliable()
    }
}

impl RecipientSource for RecipientFilter {
    fn recipients(&self) -> &PlayerBitVec {
        &self.recipients
    }

    fn network_buf_type(&self) -> NetChannelBufType {
        self.buf_type
    }

    fn is_init_message(&self) -> bool {
        self.init_message
    }
}

impl<'a> IntoIterator for &'a RecipientFilter {
    type Item = PlayerSlot;
    type IntoIter = PlayerBitVecIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
