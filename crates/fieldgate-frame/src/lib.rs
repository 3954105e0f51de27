//! Newline-delimited message framing for the gateway wire protocol.
//!
//! Every frame, in both directions, is a run of bytes terminated by a
//! single `\n`. There is no length prefix and no escaping of embedded
//! delimiters inside the payload, so a frame must never contain the
//! terminator byte itself.
//!
//! The reader deliberately consumes the stream one byte at a time: it
//! never reads past the terminator, so the stream is always positioned
//! exactly at the start of the next frame.

pub mod codec;
pub mod error;
pub mod reader;
pub mod writer;

pub use codec::{encode_frame, FrameConfig, DEFAULT_MAX_FRAME_SIZE, TERMINATOR};
pub use error::{FrameError, Result};
pub use reader::FrameReader;
pub use writer::FrameWriter;
