use bytes::{BufMut, BytesMut};

use crate::error::{FrameError, Result};

/// Frame terminator byte: `\n`.
pub const TERMINATOR: u8 = 0x0A;

/// Default maximum frame size: 64 KiB.
///
/// Real gateway frames are well under 100 bytes; the cap only exists so a
/// stream that never produces a terminator cannot grow the buffer without
/// bound.
pub const DEFAULT_MAX_FRAME_SIZE: usize = 64 * 1024;

/// Encode a payload into the wire format.
///
/// Wire format:
/// ```text
/// ┌─────────────────────┬────────────┐
/// │ Payload (N bytes,   │ Terminator │
/// │ no 0x0A inside)     │ 0x0A       │
/// └─────────────────────┴────────────┘
/// ```
///
/// Fails with [`FrameError::DelimiterInPayload`] if the payload contains
/// the terminator — there is no escaping on this wire.
pub fn encode_frame(payload: &[u8], dst: &mut BytesMut) -> Result<()> {
    if let Some(offset) = payload.iter().position(|&b| b == TERMINATOR) {
        return Err(FrameError::DelimiterInPayload { offset });
    }
    dst.reserve(payload.len() + 1);
    dst.put_slice(payload);
    dst.put_u8(TERMINATOR);
    Ok(())
}

/// Configuration for the frame codec.
#[derive(Debug, Clone)]
pub struct FrameConfig {
    /// Maximum frame size in bytes (excluding the terminator).
    pub max_frame_size: usize,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            max_frame_size: DEFAULT_MAX_FRAME_SIZE,
        }
    }
}
