use serde::Deserialize;

use crate::error::{Result, WireError};
use crate::types::{AppCat, AppPayload, MsgCat, NodeAddr, Rank};

/// Direction tag on frames travelling from the gateway to this client.
pub const SERV_TAG: &str = "[2serv]";

/// A decoded inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub rank: Rank,
    pub msgcat: MsgCat,
    /// Present iff `msgcat == Application`; enforced at decode time.
    pub app: Option<AppPayload>,
    pub src: NodeAddr,
}

impl Report {
    /// Application payload when this report carries actionable
    /// application semantics: sensor-originated APPLICATION messages.
    ///
    /// Hello/handshake/disconnect traffic and application messages from
    /// other ranks decode fine but are never acted upon.
    pub fn actionable(&self) -> Option<AppPayload> {
        if self.rank != Rank::Sensor || self.msgcat != MsgCat::Application {
            return None;
        }
        self.app
    }
}

/// Outcome of decoding one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded {
    /// The frame carried the inbound tag and a well-formed report.
    Report(Report),
    /// The frame carried some other direction tag (or none); dropped
    /// silently so unrelated wire traffic stays forward-compatible.
    Ignored,
}

/// JSON shape of the record after the direction tag. `appcat` and
/// `value` are absent for non-application categories.
#[derive(Debug, Deserialize)]
struct RawReport {
    rank: i64,
    msgcat: i64,
    #[serde(default)]
    appcat: Option<i64>,
    #[serde(default)]
    value: Option<i64>,
    src: String,
}

/// Decode one frame (terminator already stripped by the frame layer).
///
/// Frames not starting with [`SERV_TAG`] are [`Decoded::Ignored`], not
/// errors. A frame with the right tag but a malformed record is a
/// [`WireError`] — recoverable, the caller discards the frame.
pub fn decode(frame: &[u8]) -> Result<Decoded> {
    let Some(body) = frame.strip_prefix(SERV_TAG.as_bytes()) else {
        return Ok(Decoded::Ignored);
    };

    let body = std::str::from_utf8(body)?;
    let raw: RawReport = serde_json::from_str(body)?;

    let rank = Rank::from_code(raw.rank)?;
    let msgcat = MsgCat::from_code(raw.msgcat)?;

    let app = if msgcat == MsgCat::Application {
        let cat = AppCat::from_code(raw.appcat.ok_or(WireError::MissingKey("appcat"))?)?;
        let value = raw.value.ok_or(WireError::MissingKey("value"))?;
        Some(AppPayload { cat, value })
    } else {
        None
    };

    Ok(Decoded::Report(Report {
        rank,
        msgcat,
        app,
        src: NodeAddr::new(raw.src),
    }))
}
