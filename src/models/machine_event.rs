//! Machine event model and event kinds.
//!
//! This module defines the MachineEvent struct and the EventKind enum for
//! representing state-change events emitted by the bottling line.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// The kind of a machine event.
///
/// The set of event kinds is open-ended: the line may emit kinds this
/// engine has never seen, which are preserved as [`EventKind::Other`].
/// Only [`EventKind::FailureStart`] and [`EventKind::FailureEnd`] affect
/// the OEE computation; everything else is carried for display.
///
/// # Example
///
/// ```
/// use oee_engine::models::EventKind;
///
/// assert_eq!(EventKind::from("FAILURE_START"), EventKind::FailureStart);
/// assert_eq!(EventKind::from("DOOR_OPEN"), EventKind::Other("DOOR_OPEN".to_string()));
/// assert_eq!(EventKind::FailureEnd.as_str(), "FAILURE_END");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventKind {
    /// The line (or the simulator feeding it) started running.
    RunStart,
    /// The line entered a failure state.
    FailureStart,
    /// The line recovered from a failure state.
    FailureEnd,
    /// Any event kind the engine does not interpret.
    Other(String),
}

impl EventKind {
    /// Returns the wire representation of the event kind.
    pub fn as_str(&self) -> &str {
        match self {
            EventKind::RunStart => "RUN_START",
            EventKind::FailureStart => "FAILURE_START",
            EventKind::FailureEnd => "FAILURE_END",
            EventKind::Other(kind) => kind,
        }
    }
}

impl From<&str> for EventKind {
    fn from(s: &str) -> Self {
        match s {
            "RUN_START" => EventKind::RunStart,
            "FAILURE_START" => EventKind::FailureStart,
            "FAILURE_END" => EventKind::FailureEnd,
            other => EventKind::Other(other.to_string()),
        }
    }
}

impl From<String> for EventKind {
    fn from(s: String) -> Self {
        EventKind::from(s.as_str())
    }
}

impl From<EventKind> for String {
    fn from(kind: EventKind) -> Self {
        kind.as_str().to_string()
    }
}

/// Represents one state-change event recorded for a shift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineEvent {
    /// The shift this event belongs to.
    pub shift_id: i64,
    /// When the event occurred.
    pub timestamp: NaiveDateTime,
    /// The kind of event.
    pub kind: EventKind,
    /// Free-text detail attached by the emitter.
    #[serde(default)]
    pub details: Option<String>,
}
