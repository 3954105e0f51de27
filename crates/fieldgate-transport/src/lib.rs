//! Blocking TCP transport to the upstream sensor-network gateway.
//!
//! This is the lowest layer of fieldgate. The gateway exposes exactly one
//! stream connection; everything else builds on top of the [`NetStream`]
//! type provided here. There is no reconnection logic — a dropped
//! connection surfaces as an error to the caller.

pub mod error;
pub mod stream;
pub mod tcp;

pub use error::{Result, TransportError};
pub use stream::NetStream;
pub use tcp::connect;
