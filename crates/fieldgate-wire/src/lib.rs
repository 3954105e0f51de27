//! Message taxonomy and codecs for the gateway application protocol.
//!
//! Frames travel in two directions, each with its own direction tag and
//! payload serialization:
//!
//! - Inbound (gateway to client): `[2serv]` followed by a JSON object —
//!   decoded into a [`Report`].
//! - Outbound (client to gateway): `[2clie]` followed by pipe-delimited
//!   numeric fields — encoded from a [`Command`].
//!
//! Enum wire values are stable integer codes, not names; the receiving
//! motes match on the numbers.

pub mod command;
pub mod error;
pub mod report;
pub mod types;

pub use command::{Command, CLIE_TAG};
pub use error::{Result, WireError};
pub use report::{decode, Decoded, Report, SERV_TAG};
pub use types::{AppCat, AppPayload, MsgCat, NodeAddr, Rank};
