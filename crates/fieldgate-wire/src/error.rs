/// Errors that can occur while decoding or encoding wire messages.
///
/// These are all recoverable at the session level: a bad frame is
/// reported and discarded, the connection stays up.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// The payload after the direction tag is not valid UTF-8.
    #[error("payload is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// The report payload is not a well-formed JSON record.
    #[error("malformed report payload: {0}")]
    Json(#[from] serde_json::Error),

    /// The rank code is outside the known range.
    #[error("unknown rank code {0}")]
    UnknownRank(i64),

    /// The message category code is outside the known range.
    #[error("unknown message category code {0}")]
    UnknownMsgCat(i64),

    /// The application category code is outside the known range.
    #[error("unknown application category code {0}")]
    UnknownAppCat(i64),

    /// An application-category report is missing a required key.
    #[error("application report missing required key `{0}`")]
    MissingKey(&'static str),

    /// A command frame does not carry the client direction tag.
    #[error("command frame missing [2clie] tag")]
    NotACommand,

    /// A command record has the wrong number of pipe-delimited fields.
    #[error("command record has {0} fields, expected 5")]
    FieldCount(usize),

    /// A numeric command field failed to parse.
    #[error("invalid integer in command field `{field}`: {source}")]
    BadInt {
        field: &'static str,
        source: std::num::ParseIntError,
    },

    /// A node address contains a pipe or newline and cannot be framed.
    /// There is no escaping on this wire.
    #[error("node address {0:?} contains a wire delimiter")]
    UnsafeAddress(String),
}

pub type Result<T> = std::result::Result<T, WireError>;
