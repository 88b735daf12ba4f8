use cup_core::SessionEvent;
use log::debug;
use tokio::sync::broadcast;

const CHANNEL_CAPACITY: usize = 64;

/// Fan-out channel from match mutations to every connected viewer.
///
/// Delivery is at-most-once and best-effort: publishing never blocks,
/// a channel with no subscribers drops the message, and a subscriber
/// that lags past the channel capacity loses the overwritten messages.
/// There is no replay; a client that connects late fetches the full
/// state through the query endpoints first.
#[derive(Clone)]
pub struct EventHub {
    sender: broadcast::Sender<SessionEvent>,
}

impl EventHub {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        EventHub { sender }
    }

    /// Fire-and-forget publish. The mutating request has already
    /// succeeded by the time this runs, so delivery failure is not an
    /// error.
    pub fn publish(&self, event: SessionEvent) {
        match self.sender.send(event) {
            Ok(receivers) => debug!("event delivered to {} viewers", receivers),
            Err(_) => debug!("event dropped, no connected viewers"),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventHub {
    fn default() -> Self {
        EventHub::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cup_core::GoalScored;

    #[test]
    fn publish_without_subscribers_is_a_noop() {
        let hub = EventHub::new();
        hub.publish(SessionEvent::MatchDeleted(1));
    }

    #[tokio::test]
    async fn subscribers_see_events_in_emission_order() {
        let hub = EventHub::new();
        let mut rx = hub.subscribe();

        hub.publish(SessionEvent::MatchDeleted(1));
        hub.publish(SessionEvent::GoalScored(GoalScored {
            match_id: 2,
            team_id: 1,
            new_score: 1,
            scorer_name: None,
        }));

        assert_eq!(rx.recv().await.unwrap(), SessionEvent::MatchDeleted(1));
        assert!(matches!(
            rx.recv().await.unwrap(),
            SessionEvent::GoalScored(_)
        ));
    }
}
