/// Errors raised by the policy engine.
#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    /// The scheduled path fired before any inbound message had been
    /// decoded, so there is no address to target. Surfaced explicitly
    /// instead of emitting a command with an undefined target.
    #[error("scheduled command fired with no known target address")]
    UnresolvedTarget,
}

/// Errors that terminate a session.
///
/// Decode failures never appear here — they are reported and the loop
/// continues with the next frame.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Transport or framing failure; fatal, there is no reconnection.
    #[error("frame error: {0}")]
    Frame(#[from] fieldgate_frame::FrameError),

    /// Policy failure on the scheduled path.
    #[error(transparent)]
    Policy(#[from] PolicyError),
}

pub type Result<T> = std::result::Result<T, SessionError>;
