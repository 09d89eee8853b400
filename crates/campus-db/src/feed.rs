//! In-process change feed.
//!
//! A bounded `tokio::sync::broadcast` channel carries every committed
//! [`ChangeEvent`]. Each [`Subscription`] applies its own [`ChangeFilter`]
//! on receive. There is no replay: a subscriber that falls more than the
//! channel capacity behind is told how many events it missed and continues
//! from the oldest event still buffered.

use tokio::sync::broadcast;
use tokio::sync::broadcast::error::{RecvError, TryRecvError};

use campus_core::realtime::{ChangeEvent, ChangeFilter};

/// What a subscription yields.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    /// A matching committed change.
    Change(ChangeEvent),
    /// The subscriber fell behind and this many events were dropped.
    Lagged(u64),
}

/// Publisher side of the change feed. Cloning shares the channel.
#[derive(Debug, Clone)]
pub struct ChangeFeed {
    tx: broadcast::Sender<ChangeEvent>,
}

impl ChangeFeed {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Publish one event. Returns the number of live subscriptions it reached.
    pub fn publish(&self, event: ChangeEvent) -> usize {
        tracing::debug!(
            table = %event.table,
            kind = %event.kind,
            id = %event.id,
            "change published"
        );
        // No subscribers is not an error.
        self.tx.send(event).unwrap_or(0)
    }

    #[must_use]
    pub fn subscribe(&self, filter: ChangeFilter) -> Subscription {
        Subscription {
            rx: self.tx.subscribe(),
            filter,
        }
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

/// A filtered view of the change feed. Dropping it unsubscribes.
#[derive(Debug)]
pub struct Subscription {
    rx: broadcast::Receiver<ChangeEvent>,
    filter: ChangeFilter,
}

impl Subscription {
    #[must_use]
    pub const fn filter(&self) -> &ChangeFilter {
        &self.filter
    }

    /// Wait for the next matching event. Returns `None` once the feed is closed.
    pub async fn recv(&mut self) -> Option<Notice> {
        loop {
            match self.rx.recv().await {
                Ok(event) if self.filter.matches(&event) => return Some(Notice::Change(event)),
                Ok(_) => {}
                Err(RecvError::Lagged(missed)) => return Some(Notice::Lagged(missed)),
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Return the next matching event already buffered, without waiting.
    pub fn try_recv(&mut self) -> Option<Notice> {
        loop {
            match self.rx.try_recv() {
                Ok(event) if self.filter.matches(&event) => return Some(Notice::Change(event)),
                Ok(_) => {}
                Err(TryRecvError::Lagged(missed)) => return Some(Notice::Lagged(missed)),
                Err(TryRecvError::Empty | TryRecvError::Closed) => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus_core::enums::Table;
    use campus_core::realtime::ChangeKind;
    use serde_json::json;

    fn event(table: Table, group_id: &str) -> ChangeEvent {
        ChangeEvent::new(
            table,
            ChangeKind::Insert,
            "msg-00000001",
            &json!({ "group_id": group_id }),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn subscription_only_sees_matching_events() {
        let feed = ChangeFeed::new(16);
        let mut sub = feed.subscribe(
            ChangeFilter::table(Table::Messages).column_eq("group_id", "grp-aaaaaaaa"),
        );

        feed.publish(event(Table::Posts, "grp-aaaaaaaa"));
        feed.publish(event(Table::Messages, "grp-bbbbbbbb"));
        feed.publish(event(Table::Messages, "grp-aaaaaaaa"));

        let Some(Notice::Change(got)) = sub.recv().await else {
            panic!("expected a change");
        };
        assert_eq!(got.record["group_id"], "grp-aaaaaaaa");
        assert_eq!(sub.try_recv(), None);
    }

    #[tokio::test]
    async fn publish_without_subscribers_is_fine() {
        let feed = ChangeFeed::new(4);
        assert_eq!(feed.publish(event(Table::Posts, "x")), 0);
    }

    #[tokio::test]
    async fn lagging_subscriber_is_told_how_many_it_missed() {
        let feed = ChangeFeed::new(2);
        let mut sub = feed.subscribe(ChangeFilter::table(Table::Messages));
        for _ in 0..5 {
            feed.publish(event(Table::Messages, "grp-aaaaaaaa"));
        }
        assert_eq!(sub.try_recv(), Some(Notice::Lagged(3)));
        assert!(matches!(sub.try_recv(), Some(Notice::Change(_))));
        assert!(matches!(sub.try_recv(), Some(Notice::Change(_))));
        assert_eq!(sub.try_recv(), None);
    }

    #[tokio::test]
    async fn dropping_subscription_unsubscribes() {
        let feed = ChangeFeed::new(4);
        let sub = feed.subscribe(ChangeFilter::table(Table::Posts));
        assert_eq!(feed.subscriber_count(), 1);
        drop(sub);
        assert_eq!(feed.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn closed_feed_ends_subscription() {
        let feed = ChangeFeed::new(4);
        let mut sub = feed.subscribe(ChangeFilter::table(Table::Posts));
        drop(feed);
        assert_eq!(sub.recv().await, None);
    }
}
