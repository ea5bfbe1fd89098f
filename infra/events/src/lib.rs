//! # Event Bus
//!
//! A small, type-keyed asynchronous event bus. Producers publish events without knowing who
//! consumes them; the booking slice uses it to hand valid submissions to delivery workers.
//!
//! Two channel kinds are available per event type:
//!
//! * **Broadcast**: fan-out to every live subscriber; publishing with no subscriber is not an error.
//! * **Queue** (`mpsc`): a single consumer with bounded backpressure.
//!
//! # Example
//!
//! ```rust
//! use castellan_event_bus::{EventBus, EventReceiverExt, EventBusError};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Submitted { form: &'static str }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), EventBusError> {
//!     let bus = EventBus::new();
//!     let mut rx = bus.subscribe::<Submitted>()?;
//!     bus.publish(Submitted { form: "events" })?;
//!
//!     let event = rx.next_event().await.expect("bus is open");
//!     assert_eq!(event.form, "events");
//!     Ok(())
//! }
//! ```

mod bus;
mod error;
mod receiver;

pub use bus::{ChannelKind, DEFAULT_CAPACITY, Event, EventBus};
pub use error::{EventBusError, EventBusErrorExt};
pub use receiver::EventReceiverExt;
