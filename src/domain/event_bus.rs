//! In-process fan-out of domain events to live subscribers.
//!
//! One broadcast channel per [`Channel`]. Publishing delivers to every
//! subscriber registered on that channel at publish time; each subscriber
//! owns an independent bounded queue, so a slow consumer never blocks the
//! publisher or its peers. Delivery is FIFO per subscriber in publish order;
//! there is no ordering guarantee across channels or across subscribers.
//!
//! Backpressure is drop-oldest: when a subscriber's queue overflows, the
//! oldest undelivered events are overwritten and the subscriber resumes from
//! the earliest event still buffered, logging how many it missed.
//!
//! Unsubscribing is dropping the [`EventStream`]; the broadcast registry
//! releases the slot on drop, on every exit path including abrupt transport
//! disconnects. No delivery is attempted after the drop.

use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::domain::events::{Channel, DomainEvent};

/// Default per-subscriber queue capacity.
const DEFAULT_CAPACITY: usize = 256;

/// Process-wide event fan-out register.
///
/// Cheaply cloneable; constructed once at startup and injected into services
/// and handlers through `AppState`. There is no global instance.
#[derive(Clone)]
pub struct EventBus {
    new_link_tx: broadcast::Sender<DomainEvent>,
    new_vote_tx: broadcast::Sender<DomainEvent>,
}

impl EventBus {
    /// Creates an event bus with the default per-subscriber capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an event bus with a custom per-subscriber queue capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        let (new_link_tx, _) = broadcast::channel(capacity);
        let (new_vote_tx, _) = broadcast::channel(capacity);
        Self {
            new_link_tx,
            new_vote_tx,
        }
    }

    fn sender(&self, channel: Channel) -> &broadcast::Sender<DomainEvent> {
        match channel {
            Channel::NewLink => &self.new_link_tx,
            Channel::NewVote => &self.new_vote_tx,
        }
    }

    /// Publishes an event on the channel it belongs to.
    ///
    /// Returns the number of subscribers the event was delivered to. Zero
    /// subscribers is not an error; the event is simply gone. Never blocks.
    pub fn publish(&self, event: DomainEvent) -> usize {
        let channel = event.channel();
        match self.sender(channel).send(event) {
            Ok(count) => {
                debug!(channel = %channel, receivers = count, "Published event");
                count
            }
            Err(_) => {
                debug!(channel = %channel, "Published event with no subscribers");
                0
            }
        }
    }

    /// Registers a new subscriber on a channel.
    ///
    /// The returned stream yields events published after this call, in
    /// publish order. Dropping it unsubscribes.
    pub fn subscribe(&self, channel: Channel) -> EventStream {
        EventStream {
            rx: self.sender(channel).subscribe(),
            channel,
        }
    }

    /// Number of live subscribers on a channel.
    pub fn subscriber_count(&self, channel: Channel) -> usize {
        self.sender(channel).receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// A live subscription to one channel.
///
/// Owning this value is the registration; dropping it releases the slot.
pub struct EventStream {
    rx: broadcast::Receiver<DomainEvent>,
    channel: Channel,
}

impl EventStream {
    pub fn channel(&self) -> Channel {
        self.channel
    }

    /// Receives the next event.
    ///
    /// Returns `None` once the bus itself is gone (process shutdown). A
    /// lagged subscriber skips the overwritten events and continues from the
    /// oldest one still buffered.
    pub async fn recv(&mut self) -> Option<DomainEvent> {
        loop {
            match self.rx.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(
                        channel = %self.channel,
                        skipped_events = skipped,
                        "Subscriber lagged, dropped oldest events"
                    );
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Adapts the subscription into a [`futures::Stream`] for push-driven
    /// transports. The stream ends when the bus shuts down; dropping it
    /// unsubscribes.
    pub fn into_stream(self) -> impl futures::Stream<Item = DomainEvent> {
        futures::stream::unfold(self, |mut sub| async move {
            sub.recv().await.map(|event| (event, sub))
        })
    }
}
