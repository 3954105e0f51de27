use std::fmt;

use crate::error::{Result, WireError};

/// Role of a message's origin node in the sensor-network topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rank {
    Gateway,
    Subgateway,
    Sensor,
}

impl Rank {
    /// Stable integer wire code.
    pub const fn code(self) -> i64 {
        match self {
            Rank::Gateway => 0,
            Rank::Subgateway => 1,
            Rank::Sensor => 2,
        }
    }

    pub fn from_code(code: i64) -> Result<Self> {
        match code {
            0 => Ok(Rank::Gateway),
            1 => Ok(Rank::Subgateway),
            2 => Ok(Rank::Sensor),
            other => Err(WireError::UnknownRank(other)),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Rank::Gateway => "GATEWAY",
            Rank::Subgateway => "SUBGATEWAY",
            Rank::Sensor => "SENSOR",
        }
    }
}

/// Coarse message type (handshake, disconnect, application data).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MsgCat {
    Null,
    Hello,
    HelloAck,
    ChildDisconnect,
    Application,
}

impl MsgCat {
    /// Stable integer wire code.
    pub const fn code(self) -> i64 {
        match self {
            MsgCat::Null => 0,
            MsgCat::Hello => 1,
            MsgCat::HelloAck => 2,
            MsgCat::ChildDisconnect => 3,
            MsgCat::Application => 4,
        }
    }

    pub fn from_code(code: i64) -> Result<Self> {
        match code {
            0 => Ok(MsgCat::Null),
            1 => Ok(MsgCat::Hello),
            2 => Ok(MsgCat::HelloAck),
            3 => Ok(MsgCat::ChildDisconnect),
            4 => Ok(MsgCat::Application),
            other => Err(WireError::UnknownMsgCat(other)),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            MsgCat::Null => "NULL",
            MsgCat::Hello => "HELLO",
            MsgCat::HelloAck => "HELLO_ACK",
            MsgCat::ChildDisconnect => "CHILD_DISCONNECT",
            MsgCat::Application => "APPLICATION",
        }
    }
}

/// Fine-grained application message subtype, valid only within
/// APPLICATION-category messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppCat {
    NullApp,
    LightLevel,
    LightOn,
    IrrigationOn,
    IrrigationAck,
}

impl AppCat {
    /// Stable integer wire code.
    pub const fn code(self) -> i64 {
        match self {
            AppCat::NullApp => 0,
            AppCat::LightLevel => 1,
            AppCat::LightOn => 2,
            AppCat::IrrigationOn => 3,
            AppCat::IrrigationAck => 4,
        }
    }

    pub fn from_code(code: i64) -> Result<Self> {
        match code {
            0 => Ok(AppCat::NullApp),
            1 => Ok(AppCat::LightLevel),
            2 => Ok(AppCat::LightOn),
            3 => Ok(AppCat::IrrigationOn),
            4 => Ok(AppCat::IrrigationAck),
            other => Err(WireError::UnknownAppCat(other)),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            AppCat::NullApp => "NULL_APP",
            AppCat::LightLevel => "LIGHT_LEVEL",
            AppCat::LightOn => "LIGHT_ON",
            AppCat::IrrigationOn => "IRRIGATION_ON",
            AppCat::IrrigationAck => "IRRIGATION_ACK",
        }
    }
}

/// Application payload of an APPLICATION-category message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppPayload {
    pub cat: AppCat,
    /// Semantics depend on `cat`: a light-level reading, an on/off flag,
    /// or a duration in seconds.
    pub value: i64,
}

/// Opaque node-address identifier.
///
/// Treated as an unstructured token; never parsed or validated beyond
/// wire safety (the outbound record format cannot carry `|` or `\n`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeAddr(String);

impl NodeAddr {
    pub fn new(addr: impl Into<String>) -> Self {
        Self(addr.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this address can be embedded in a pipe-delimited record.
    pub fn is_wire_safe(&self) -> bool {
        !self.0.contains(['|', '\n'])
    }
}

impl fmt::Display for NodeAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeAddr {
    fn from(addr: &str) -> Self {
        Self::new(addr)
    }
}

impl From<String> for NodeAddr {
    fn from(addr: String) -> Self {
        Self(addr)
    }
}
