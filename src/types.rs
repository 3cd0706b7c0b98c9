// src/types.rs
use serde::Deserialize;

/// The one field consumed from a delivery body. Anything else is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Payload {
    /// Absent on some events (e.g. `ping`), in which case it is empty.
    #[serde(default)]
    pub action: String,
}

/// A verified delivery as handed to the event sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub payload: Payload,
    /// `X-GitHub-Event`
    pub event: Option<String>,
    /// `X-GitHub-Delivery`
    pub delivery_id: Option<String>,
}
