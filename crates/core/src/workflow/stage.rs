//! Stage, actor and terminal-exception definitions.

use std::fmt;
use std::str::FromStr;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Actor
// ---------------------------------------------------------------------------

/// The role that normally causes a transition.
///
/// On a [`Stage`] this names who moves a record *into* that stage. On a
/// transition request it is the role declared by the caller. [`Actor::All`]
/// only appears on stages; callers cannot declare it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Actor {
    Donor,
    Recipient,
    Volunteer,
    Admin,
    System,
    All,
}

impl Actor {
    /// Roles a caller may declare.
    pub const CALLERS: [Actor; 5] = [
        Actor::Donor,
        Actor::Recipient,
        Actor::Volunteer,
        Actor::Admin,
        Actor::System,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Actor::Donor => "donor",
            Actor::Recipient => "recipient",
            Actor::Volunteer => "volunteer",
            Actor::Admin => "admin",
            Actor::System => "system",
            Actor::All => "all",
        }
    }

    /// Admins and the matching engine may drive any stage.
    pub fn is_privileged(self) -> bool {
        matches!(self, Actor::Admin | Actor::System)
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Actor {
    type Err = CoreError;

    /// Parse a caller-declared role. `all` is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Actor::CALLERS
            .into_iter()
            .find(|a| a.as_str() == normalized)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid actor '{s}'. Must be one of: donor, recipient, volunteer, admin, system"
                ))
            })
    }
}

// ---------------------------------------------------------------------------
// Stage
// ---------------------------------------------------------------------------

/// A named, ordered point in an entity's status progression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Stage {
    /// Stable key stored in the `status` column.
    pub id: &'static str,
    /// Zero-based position within the sequence.
    pub ordinal: usize,
    pub label: &'static str,
    /// Role that normally moves a record into this stage.
    pub actor: Actor,
    pub icon: &'static str,
    pub color: &'static str,
    /// Alternate ids written by older clients that resolve to this stage.
    pub aliases: &'static [&'static str],
}

impl Stage {
    /// Whether `status` is this stage's id or one of its aliases.
    pub fn matches(&self, status: &str) -> bool {
        self.id == status || self.aliases.contains(&status)
    }
}

// ---------------------------------------------------------------------------
// TerminalStatus
// ---------------------------------------------------------------------------

/// A status outside the linear progression.
///
/// Terminal exceptions have no ordinal and end the workflow. Which ones
/// apply depends on the entity type, see
/// [`EntityType::exceptions`](super::EntityType::exceptions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerminalStatus {
    Cancelled,
    Expired,
    Rejected,
}

impl TerminalStatus {
    pub const ALL: [TerminalStatus; 3] = [
        TerminalStatus::Cancelled,
        TerminalStatus::Expired,
        TerminalStatus::Rejected,
    ];

    pub fn id(self) -> &'static str {
        match self {
            TerminalStatus::Cancelled => "cancelled",
            TerminalStatus::Expired => "expired",
            TerminalStatus::Rejected => "rejected",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TerminalStatus::Cancelled => "Cancelled",
            TerminalStatus::Expired => "Expired",
            TerminalStatus::Rejected => "Rejected",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            TerminalStatus::Cancelled => "x-circle",
            TerminalStatus::Expired => "clock-alert",
            TerminalStatus::Rejected => "ban",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            TerminalStatus::Cancelled => "red",
            TerminalStatus::Expired => "gray",
            TerminalStatus::Rejected => "rose",
        }
    }

    /// Parse an already-normalized status id.
    pub fn parse(status: &str) -> Option<Self> {
        TerminalStatus::ALL.into_iter().find(|t| t.id() == status)
    }
}

impl fmt::Display for TerminalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl Serialize for TerminalStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("TerminalStatus", 4)?;
        s.serialize_field("id", self.id())?;
        s.serialize_field("label", self.label())?;
        s.serialize_field("icon", self.icon())?;
        s.serialize_field("color", self.color())?;
        s.end()
    }
}
