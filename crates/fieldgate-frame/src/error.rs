/// Errors that can occur during frame reading/writing.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The frame grew past the configured maximum without a terminator.
    #[error("frame too large ({size} bytes, max {max})")]
    FrameTooLarge { size: usize, max: usize },

    /// An outbound payload contains the frame terminator byte.
    #[error("payload contains frame terminator at offset {offset}")]
    DelimiterInPayload { offset: usize },

    /// An I/O error occurred while reading or writing frames.
    #[error("frame I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The connection was closed by the peer.
    #[error("connection closed")]
    ConnectionClosed,
}

pub type Result<T> = std::result::Result<T, FrameError>;
