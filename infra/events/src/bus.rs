use crate::error::EventBusError;
use fxhash::FxHashMap;
use parking_lot::RwLock;
use std::any::{Any, TypeId, type_name};
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};
use tracing::{trace, warn};

/// Channel buffer used when the bus is created with [`EventBus::new`].
pub const DEFAULT_CAPACITY: usize = 128;

/// Channel kind bound to an event type on first use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    /// Fan-out to every live subscriber.
    Broadcast { capacity: usize },
    /// Single-consumer bounded queue.
    Mpsc { capacity: usize },
}

/// Marker trait for types that can be sent across the [`EventBus`].
pub trait Event: Any + Send + Sync + 'static {}
impl<T: Any + Send + Sync + 'static> Event for T {}

#[derive(Debug)]
struct ChannelState {
    kind: ChannelKind,
    slot: Box<dyn Any + Send + Sync>,
}

#[derive(Debug)]
struct QueueSlot<T> {
    sender: mpsc::Sender<Arc<T>>,
    receiver: Option<mpsc::Receiver<Arc<T>>>,
}

impl ChannelState {
    fn new_broadcast<T: Event>(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel::<Arc<T>>(capacity);
        Self { kind: ChannelKind::Broadcast { capacity }, slot: Box::new(tx) }
    }

    fn new_queue<T: Event>(capacity: usize) -> Self {
        let (sender, receiver) = mpsc::channel::<Arc<T>>(capacity);
        let slot = QueueSlot { sender, receiver: Some(receiver) };
        Self { kind: ChannelKind::Mpsc { capacity }, slot: Box::new(slot) }
    }

    fn broadcast<T: Event>(&self) -> Result<broadcast::Sender<Arc<T>>, EventBusError> {
        if !matches!(self.kind, ChannelKind::Broadcast { .. }) {
            return Err(kind_mismatch::<T>("Broadcast", self.kind));
        }
        self.slot
            .downcast_ref::<broadcast::Sender<Arc<T>>>()
            .cloned()
            .ok_or_else(type_mismatch::<T>)
    }

    fn queue<T: Event>(&mut self) -> Result<&mut QueueSlot<T>, EventBusError> {
        if !matches!(self.kind, ChannelKind::Mpsc { .. }) {
            return Err(kind_mismatch::<T>("Mpsc", self.kind));
        }
        self.slot.downcast_mut::<QueueSlot<T>>().ok_or_else(type_mismatch::<T>)
    }
}

/// A thread-safe event bus. Channels are keyed by the event's [`TypeId`] and created lazily.
///
/// Cloning is cheap; clones share the same channels.
#[derive(Debug, Clone)]
pub struct EventBus {
    channels: Arc<RwLock<FxHashMap<TypeId, ChannelState>>>,
    capacity: usize,
}

impl Default for EventBus {
    fn default() -> Self {
        Self { channels: Arc::default(), capacity: DEFAULT_CAPACITY }
    }
}

impl EventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a bus whose channels buffer `capacity` events.
    ///
    /// # Errors
    /// Returns [`EventBusError::InvalidCapacity`] if `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Result<Self, EventBusError> {
        if capacity == 0 {
            return Err(EventBusError::InvalidCapacity {
                message: "capacity must be at least 1".into(),
                context: None,
            });
        }
        Ok(Self { capacity, ..Self::default() })
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Subscribes to broadcast events of type `T`.
    ///
    /// # Errors
    /// Returns [`EventBusError::ChannelKindMismatch`] if `T` is bound to a queue.
    pub fn subscribe<T: Event>(&self) -> Result<broadcast::Receiver<Arc<T>>, EventBusError> {
        Ok(self.broadcast_sender::<T>()?.subscribe())
    }

    /// Broadcasts an event and returns how many subscribers received it.
    ///
    /// Publishing with no live subscriber drops the event and returns `Ok(0)`.
    ///
    /// # Errors
    /// Returns [`EventBusError::ChannelKindMismatch`] if `T` is bound to a queue.
    pub fn publish<T: Event>(&self, event: T) -> Result<usize, EventBusError> {
        let sender = self.broadcast_sender::<T>()?;
        match sender.send(Arc::new(event)) {
            Ok(count) => {
                trace!(event = type_name::<T>(), count, "Event dispatched");
                Ok(count)
            },
            Err(_) => {
                trace!(event = type_name::<T>(), "Event dropped: no active subscribers");
                Ok(0)
            },
        }
    }

    /// Takes the single consumer of the queue for `T`.
    ///
    /// # Errors
    /// Returns [`EventBusError::ReceiverTaken`] on the second call for the same type, or
    /// [`EventBusError::ChannelKindMismatch`] if `T` is bound to a broadcast channel.
    pub fn subscribe_queue<T: Event>(&self) -> Result<mpsc::Receiver<Arc<T>>, EventBusError> {
        let mut channels = self.channels.write();
        let state = channels
            .entry(TypeId::of::<T>())
            .or_insert_with(|| ChannelState::new_queue::<T>(self.capacity));
        state.queue::<T>()?.receiver.take().ok_or_else(|| EventBusError::ReceiverTaken {
            message: type_name::<T>().into(),
            context: None,
        })
    }

    /// Enqueues an event without waiting for room.
    ///
    /// # Errors
    /// Returns [`EventBusError::ChannelFull`] when the queue is at capacity,
    /// [`EventBusError::ChannelClosed`] when its consumer is gone, or
    /// [`EventBusError::ChannelKindMismatch`] if `T` is bound to a broadcast channel.
    pub fn enqueue<T: Event>(&self, event: T) -> Result<(), EventBusError> {
        let sender = {
            let mut channels = self.channels.write();
            let state = channels
                .entry(TypeId::of::<T>())
                .or_insert_with(|| ChannelState::new_queue::<T>(self.capacity));
            state.queue::<T>()?.sender.clone()
        };

        sender.try_send(Arc::new(event)).map_err(|err| match err {
            mpsc::error::TrySendError::Full(_) => EventBusError::ChannelFull {
                message: type_name::<T>().into(),
                context: None,
            },
            mpsc::error::TrySendError::Closed(_) => EventBusError::ChannelClosed {
                message: type_name::<T>().into(),
                context: None,
            },
        })
    }

    /// Kind bound to `T`, if any channel exists for it.
    #[must_use]
    pub fn kind_of<T: Event>(&self) -> Option<ChannelKind> {
        self.channels.read().get(&TypeId::of::<T>()).map(|state| state.kind)
    }

    /// Drops every channel, closing all receivers. Returns the number of channels closed.
    pub fn shutdown(&self) -> usize {
        let mut channels = self.channels.write();
        let count = channels.len();
        channels.clear();
        count
    }

    fn broadcast_sender<T: Event>(&self) -> Result<broadcast::Sender<Arc<T>>, EventBusError> {
        let id = TypeId::of::<T>();
        if let Some(state) = self.channels.read().get(&id) {
            return state.broadcast::<T>();
        }

        let mut channels = self.channels.write();
        channels
            .entry(id)
            .or_insert_with(|| {
                trace!(event = type_name::<T>(), capacity = self.capacity, "New broadcast channel");
                ChannelState::new_broadcast::<T>(self.capacity)
            })
            .broadcast::<T>()
    }
}

fn type_mismatch<T>() -> EventBusError {
    EventBusError::TypeMismatch {
        message: type_name::<T>().into(),
        context: Some("Unexpected event type".into()),
    }
}

fn kind_mismatch<T>(expected: &str, found: ChannelKind) -> EventBusError {
    warn!(event = type_name::<T>(), expected, ?found, "Event channel kind mismatch");
    EventBusError::ChannelKindMismatch {
        message: format!("Expected {expected} but found {found:?} for {}", type_name::<T>()).into(),
        context: None,
    }
}
