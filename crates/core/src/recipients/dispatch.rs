//! Message send path
//!
//! [`send_message`] takes the filter by value: a filter is read exactly once
//! and cannot be reused for a second message.

use s2net_sdk::{NetChannelBufType, PlayerBitVec};

use super::filter::RecipientSource;

/// A serialized message paired with its resolved recipients
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub recipients: PlayerBitVec,
    pub buf_type: NetChannelBufType,
    pub init_message: bool,
    pub payload: Vec<u8>,
}

/// Transport side of the send path
pub trait MessageSink {
    fn post_message(&mut self, message: OutboundMessage);
}

/// In-memory outbox
impl MessageSink for Vec<OutboundMessage> {
    fn post_message(&mut self, message: OutboundMessage) {
        self.push(message);
    }
}

/// Hand a finished filter and its payload to the transport
///
/// Filters without recipients are dropped without touching the sink.
///
/// # Returns
/// The number of recipients the message was posted to.
#[tracing::instrument(skip_all, fields(bytes = payload.len()))]
pub fn send_message<F, S>(filter: F, payload: &[u8], sink: &mut S) -> usize
where
    F: RecipientSource,
    S: MessageSink + ?Sized,
{
    let recipients = *filter.recipients();
    let buf_type = filter.network_buf_type();
    let init_message = filter.is_init_message();

    if recipients.is_empty() {
        tracing::trace!("Message has no recipients, dropped");
        return 0;
    }

    let count = recipients.count();
    sink.post_message(OutboundMessage {
        recipients,
        buf_type,
        init_message,
        payload: payload.to_vec(),
    });
    tracing::trace!("Posted {:?} message to {} recipients", buf_type, count);
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipients::testing::collect;
    use crate::recipients::{make_single_recipient_filter, RecipientFilter};
    use s2net_sdk::PlayerSlot;

    #[test]
    fn test_send_posts_once() {
        let mut outbox: Vec<OutboundMessage> = Vec::new();

        let mut filter = make_single_recipient_filter(PlayerSlot::new(4));
        filter.add_recipient(PlayerSlot::new(6));
        filter.make_init_message();

        let sent = send_message(filter, b"\x01\x02", &mut outbox);
        assert_eq!(sent, 2);
        assert_eq!(outbox.len(), 1);

        let message = &outbox[0];
        assert_eq!(collect(&message.recipients), vec![4, 6]);
        assert_eq!(message.buf_type, NetChannelBufType::Reliable);
        assert!(message.init_message);
        assert_eq!(message.payload, vec![1, 2]);
    }

    #[test]
    fn test_send_empty_filter_is_dropped() {
        let mut outbox: Vec<OutboundMessage> = Vec::new();
        let sent = send_message(RecipientFilter::unreliable(), b"hello", &mut outbox);
        assert_eq!(sent, 0);
        assert!(outbox.is_empty());
    }
}
