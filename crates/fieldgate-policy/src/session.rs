use std::io::{Read, Write};

use fieldgate_frame::{FrameConfig, FrameReader, FrameWriter};
use fieldgate_wire::{decode, AppCat, Command, Decoded, Report};
use tracing::{info, warn};

use crate::engine::Engine;
use crate::error::Result;

/// One synchronous protocol session: read a frame, dispatch, tick,
/// write any commands. Generic over the stream halves so it runs
/// against in-memory streams in tests exactly as it runs against the
/// gateway connection.
///
/// Strictly single-threaded: reads and writes alternate on the same
/// control flow, there is no background timer and no reconnection.
pub struct Session<R, W> {
    reader: FrameReader<R>,
    writer: FrameWriter<W>,
    engine: Engine,
}

impl<R: Read, W: Write> Session<R, W> {
    /// Build a session over raw stream halves with default framing.
    pub fn new(reader: R, writer: W, engine: Engine) -> Self {
        Self {
            reader: FrameReader::new(reader),
            writer: FrameWriter::new(writer),
            engine,
        }
    }

    /// Build a session with explicit frame configuration.
    pub fn with_frame_config(reader: R, writer: W, engine: Engine, config: FrameConfig) -> Self {
        Self {
            reader: FrameReader::with_config(reader, config.clone()),
            writer: FrameWriter::with_config(writer, config),
            engine,
        }
    }

    /// Run one loop iteration.
    ///
    /// Blocks on the next inbound frame, then:
    /// - a decoded report runs the reactive path (and may emit a command);
    /// - an undecodable frame is reported and discarded, nothing is sent
    ///   for it;
    /// - a frame with an unrecognized direction tag is dropped silently;
    /// - the scheduled tick runs regardless of the decode outcome.
    ///
    /// Errors are fatal to the session: connection loss, and a scheduled
    /// command coming due before any report has been decoded.
    pub fn step(&mut self) -> Result<()> {
        let frame = self.reader.read_frame()?;

        match decode(frame.as_ref()) {
            Ok(Decoded::Report(report)) => {
                let command = self.engine.observe(&report);
                self.log_report(&report, command.as_ref());
                if let Some(command) = command {
                    self.send(&command)?;
                }
            }
            Ok(Decoded::Ignored) => {
                // Unrelated wire traffic; dropped without a diagnostic.
            }
            Err(err) => {
                warn!(
                    frame = %String::from_utf8_lossy(frame.as_ref()),
                    error = %err,
                    "discarding undecodable frame"
                );
            }
        }

        if let Some(command) = self.engine.tick()? {
            info!(
                addr = %command.target,
                secs = command.value,
                "scheduled: setting irrigation on"
            );
            self.send(&command)?;
        }

        Ok(())
    }

    fn send(&mut self, command: &Command) -> Result<()> {
        let payload = match command.encode() {
            Ok(payload) => payload,
            Err(err) => {
                // The target address came off the wire; a pipe inside it
                // cannot be framed, so the command is dropped rather
                // than corrupting the stream.
                warn!(error = %err, "dropping unencodable command");
                return Ok(());
            }
        };
        self.writer.write_frame(payload.as_ref())?;
        Ok(())
    }

    /// One status line per actionable application message.
    fn log_report(&self, report: &Report, command: Option<&Command>) {
        let Some(payload) = report.actionable() else {
            return;
        };

        match payload.cat {
            AppCat::LightLevel => {
                info!(addr = %report.src, value = payload.value, "light level");
                if let Some(command) = command {
                    info!(addr = %report.src, secs = command.value, "setting lights on");
                }
            }
            AppCat::IrrigationAck => {
                let state = if payload.value == 1 { "on" } else { "off" };
                info!(addr = %report.src, state, "irrigation acknowledged");
            }
            _ => {}
        }
    }

    /// Borrow the policy engine (tick count, last target).
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Tear the session apart, e.g. to inspect the written stream.
    pub fn into_parts(self) -> (FrameReader<R>, FrameWriter<W>, Engine) {
        (self.reader, self.writer, self.engine)
    }
}
