//! Dispatch/policy engine and session loop for the field gateway client.
//!
//! Two independent triggers run each loop iteration:
//!
//! - Reactive: a successfully decoded sensor report may produce an
//!   outbound command (lights on below the light threshold).
//! - Scheduled: a tick counter, advanced once per iteration, fires an
//!   irrigation command every `tick_interval` iterations.
//!
//! Scheduling is loop-iteration based, not wall-clock: the tick only
//! advances when a frame arrives, so real-world timing is coupled to
//! inbound traffic rate. That coupling is part of the deployed
//! protocol's behavior and is preserved here.

pub mod engine;
pub mod error;
pub mod session;

pub use engine::{Engine, PolicyConfig};
pub use error::{PolicyError, Result, SessionError};
pub use session::Session;
