use bytes::Bytes;

use crate::error::{Result, WireError};
use crate::types::{AppCat, MsgCat, NodeAddr, Rank};

/// Direction tag on frames travelling from this client to the gateway.
pub const CLIE_TAG: &str = "[2clie]";

/// An outbound control command.
///
/// This client always speaks as the gateway rank with application
/// category messages, but the record format carries all fields so the
/// constructors stay honest about what goes on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub rank: Rank,
    pub msgcat: MsgCat,
    pub appcat: AppCat,
    /// Duration in seconds for *_ON commands.
    pub value: i64,
    pub target: NodeAddr,
}

impl Command {
    /// Switch the lights on at `target` for `secs` seconds.
    pub fn light_on(target: NodeAddr, secs: i64) -> Self {
        Self {
            rank: Rank::Gateway,
            msgcat: MsgCat::Application,
            appcat: AppCat::LightOn,
            value: secs,
            target,
        }
    }

    /// Switch irrigation on at `target` for `secs` seconds.
    pub fn irrigation_on(target: NodeAddr, secs: i64) -> Self {
        Self {
            rank: Rank::Gateway,
            msgcat: MsgCat::Application,
            appcat: AppCat::IrrigationOn,
            value: secs,
            target,
        }
    }

    /// Encode into the wire record: tag + `rank|msgcat|appcat|value|src`
    /// using numeric enum codes. The frame terminator is owned by the
    /// frame layer, not added here.
    ///
    /// Fails with [`WireError::UnsafeAddress`] if the target contains a
    /// pipe or newline — there is no escaping on this wire.
    pub fn encode(&self) -> Result<Bytes> {
        if !self.target.is_wire_safe() {
            return Err(WireError::UnsafeAddress(self.target.as_str().to_string()));
        }

        let record = format!(
            "{CLIE_TAG}{}|{}|{}|{}|{}",
            self.rank.code(),
            self.msgcat.code(),
            self.appcat.code(),
            self.value,
            self.target,
        );
        Ok(Bytes::from(record))
    }

    /// Parse a command record — the receiving gateway's view of an
    /// outbound frame. Used to verify what actually went on the wire.
    pub fn parse_wire(frame: &[u8]) -> Result<Self> {
        let body = frame
            .strip_prefix(CLIE_TAG.as_bytes())
            .ok_or(WireError::NotACommand)?;
        let body = std::str::from_utf8(body)?;

        let fields: Vec<&str> = body.split('|').collect();
        if fields.len() != 5 {
            return Err(WireError::FieldCount(fields.len()));
        }

        let int = |field: &'static str, raw: &str| -> Result<i64> {
            raw.parse()
                .map_err(|source| WireError::BadInt { field, source })
        };

        Ok(Self {
            rank: Rank::from_code(int("rank", fields[0])?)?,
            msgcat: MsgCat::from_code(int("msgcat", fields[1])?)?,
            appcat: AppCat::from_code(int("appcat", fields[2])?)?,
            value: int("value", fields[3])?,
            target: NodeAddr::new(fields[4]),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn light_on_encodes_exact_record() {
        let cmd = Command::light_on(NodeAddr::new("A1"), 2);
        assert_eq!(cmd.encode().unwrap().as_ref(), b"[2clie]0|4|2|2|A1");
    }

    #[test]
    fn irrigation_on_encodes_exact_record() {
        let cmd = Command::irrigation_on(NodeAddr::new("0001.0001.0001.0001"), 10);
        assert_eq!(
            cmd.encode().unwrap().as_ref(),
            b"[2clie]0|4|3|10|0001.0001.0001.0001"
        );
    }

    #[test]
    fn encode_rejects_unsafe_target() {
        let cmd = Command::light_on(NodeAddr::new("a|b"), 2);
        assert!(matches!(cmd.encode(), Err(WireError::UnsafeAddress(_))));

        let cmd = Command::light_on(NodeAddr::new("a\nb"), 2);
        assert!(matches!(cmd.encode(), Err(WireError::UnsafeAddress(_))));
    }

    #[test]
    fn roundtrip_all_enum_values() {
        for rank in [Rank::Gateway, Rank::Subgateway, Rank::Sensor] {
            for appcat in [
                AppCat::NullApp,
                AppCat::LightLevel,
                AppCat::LightOn,
                AppCat::IrrigationOn,
                AppCat::IrrigationAck,
            ] {
                let cmd = Command {
                    rank,
                    msgcat: MsgCat::Application,
                    appcat,
                    value: 42,
                    target: NodeAddr::new("0102.0304.0506.0708"),
                };
                let wire = cmd.encode().unwrap();
                assert_eq!(Command::parse_wire(wire.as_ref()).unwrap(), cmd);
            }
        }
    }

    #[test]
    fn roundtrip_representative_addresses() {
        for addr in ["A1", "node-7", "0001.0001.0001.0001", ""] {
            let cmd = Command::irrigation_on(NodeAddr::new(addr), 10);
            let wire = cmd.encode().unwrap();
            let parsed = Command::parse_wire(wire.as_ref()).unwrap();
            assert_eq!(parsed.target.as_str(), addr);
        }
    }

    #[test]
    fn parse_rejects_wrong_tag() {
        assert!(matches!(
            Command::parse_wire(b"[2serv]0|4|2|2|A1"),
            Err(WireError::NotACommand)
        ));
    }

    #[test]
    fn parse_rejects_wrong_field_count() {
        assert!(matches!(
            Command::parse_wire(b"[2clie]0|4|2|2"),
            Err(WireError::FieldCount(4))
        ));
        assert!(matches!(
            Command::parse_wire(b"[2clie]0|4|2|2|A1|extra"),
            Err(WireError::FieldCount(6))
        ));
    }

    #[test]
    fn parse_rejects_non_numeric_field() {
        let err = Command::parse_wire(b"[2clie]0|4|two|2|A1").unwrap_err();
        assert!(matches!(err, WireError::BadInt { field: "appcat", .. }));
    }

    #[test]
    fn parse_rejects_out_of_range_codes() {
        assert!(matches!(
            Command::parse_wire(b"[2clie]9|4|2|2|A1"),
            Err(WireError::UnknownRank(9))
        ));
    }
}
