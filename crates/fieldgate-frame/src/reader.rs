use std::io::{ErrorKind, Read};

use bytes::{BufMut, Bytes, BytesMut};

use crate::codec::{FrameConfig, TERMINATOR};
use crate::error::{FrameError, Result};

const INITIAL_BUFFER_CAPACITY: usize = 128;

/// Reads terminator-delimited frames from any `Read` stream.
///
/// The stream is consumed one byte at a time, so no bytes beyond the
/// terminator are ever pulled off the wire: after `read_frame` returns,
/// the underlying stream is positioned exactly at the start of the next
/// frame, and the stream can be handed to any other reader.
pub struct FrameReader<T> {
    inner: T,
    config: FrameConfig,
}

impl<T: Read> FrameReader<T> {
    /// Create a new frame reader with default configuration.
    pub fn new(inner: T) -> Self {
        Self::with_config(inner, FrameConfig::default())
    }

    /// Create a new frame reader with explicit configuration.
    pub fn with_config(inner: T, config: FrameConfig) -> Self {
        Self { inner, config }
    }

    /// Read the next complete frame (blocking), excluding the terminator.
    ///
    /// Blocks until a terminator arrives. Returns
    /// `Err(FrameError::ConnectionClosed)` when the stream yields zero
    /// bytes (peer closed), including mid-frame.
    pub fn read_frame(&mut self) -> Result<Bytes> {
        let mut buf = BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY);
        let mut byte = [0u8; 1];

        loop {
            let read = match self.inner.read(&mut byte) {
                Ok(n) => n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(FrameError::Io(err)),
            };

            if read == 0 {
                return Err(FrameError::ConnectionClosed);
            }

            if byte[0] == TERMINATOR {
                tracing::trace!(len = buf.len(), "frame read");
                return Ok(buf.freeze());
            }

            if buf.len() >= self.config.max_frame_size {
                return Err(FrameError::FrameTooLarge {
                    size: buf.len() + 1,
                    max: self.config.max_frame_size,
                });
            }

            buf.put_u8(byte[0]);
        }
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the reader and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Current frame reader configuration.
    pub fn config(&self) -> &FrameConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::codec::DEFAULT_MAX_FRAME_SIZE;

    #[test]
    fn read_single_frame() {
        let mut reader = FrameReader::new(Cursor::new(b"hello\n".to_vec()));
        let frame = reader.read_frame().unwrap();
        assert_eq!(frame.as_ref(), b"hello");
    }

    #[test]
    fn read_multiple_frames() {
        let mut reader = FrameReader::new(Cursor::new(b"one\ntwo\nthree\n".to_vec()));

        assert_eq!(reader.read_frame().unwrap().as_ref(), b"one");
        assert_eq!(reader.read_frame().unwrap().as_ref(), b"two");
        assert_eq!(reader.read_frame().unwrap().as_ref(), b"three");
    }

    #[test]
    fn read_empty_frame() {
        let mut reader = FrameReader::new(Cursor::new(b"\nnext\n".to_vec()));
        assert!(reader.read_frame().unwrap().is_empty());
        assert_eq!(reader.read_frame().unwrap().as_ref(), b"next");
    }

    #[test]
    fn stream_positioned_after_terminator() {
        let mut reader = FrameReader::new(Cursor::new(b"frame\ntrailing".to_vec()));
        let frame = reader.read_frame().unwrap();
        assert_eq!(frame.as_ref(), b"frame");

        // Nothing past the terminator was consumed.
        let mut rest = Vec::new();
        reader.get_mut().read_to_end(&mut rest).unwrap();
        assert_eq!(rest, b"trailing");
    }

    #[test]
    fn connection_closed_cleanly() {
        let mut reader = FrameReader::new(Cursor::new(Vec::<u8>::new()));
        let err = reader.read_frame().unwrap_err();
        assert!(matches!(err, FrameError::ConnectionClosed));
    }

    #[test]
    fn connection_closed_mid_frame() {
        let mut reader = FrameReader::new(Cursor::new(b"no-terminator".to_vec()));
        let err = reader.read_frame().unwrap_err();
        assert!(matches!(err, FrameError::ConnectionClosed));
    }

    #[test]
    fn oversized_frame_rejected() {
        let cfg = FrameConfig { max_frame_size: 8 };
        let mut reader = FrameReader::with_config(Cursor::new(vec![b'x'; 64]), cfg);
        let err = reader.read_frame().unwrap_err();
        assert!(matches!(err, FrameError::FrameTooLarge { max: 8, .. }));
    }

    #[test]
    fn frame_at_exactly_max_size_accepted() {
        let cfg = FrameConfig { max_frame_size: 4 };
        let mut reader = FrameReader::with_config(Cursor::new(b"abcd\n".to_vec()), cfg);
        assert_eq!(reader.read_frame().unwrap().as_ref(), b"abcd");
    }

    #[test]
    fn interrupted_read_retries() {
        let reader = InterruptedThenData {
            state: 0,
            bytes: b"ok\n".to_vec(),
            pos: 0,
        };
        let mut framed = FrameReader::new(reader);
        assert_eq!(framed.read_frame().unwrap().as_ref(), b"ok");
    }

    struct InterruptedThenData {
        state: u8,
        bytes: Vec<u8>,
        pos: usize,
    }

    impl Read for InterruptedThenData {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if self.state == 0 {
                self.state = 1;
                return Err(std::io::Error::from(ErrorKind::Interrupted));
            }
            if self.pos >= self.bytes.len() || buf.is_empty() {
                return Ok(0);
            }
            buf[0] = self.bytes[self.pos];
            self.pos += 1;
            Ok(1)
        }
    }

    #[test]
    fn would_block_propagates_io_error() {
        struct WouldBlock;
        impl Read for WouldBlock {
            fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::from(ErrorKind::WouldBlock))
            }
        }

        let mut reader = FrameReader::new(WouldBlock);
        let err = reader.read_frame().unwrap_err();
        assert!(matches!(err, FrameError::Io(e) if e.kind() == ErrorKind::WouldBlock));
    }

    #[test]
    fn accessors_and_into_inner() {
        let cursor = Cursor::new(Vec::<u8>::new());
        let mut reader = FrameReader::new(cursor);

        let _ = reader.get_ref();
        let _ = reader.get_mut();
        assert_eq!(reader.config().max_frame_size, DEFAULT_MAX_FRAME_SIZE);
        let _inner = reader.into_inner();
    }
}
