//! The record kinds that carry a workflow `status`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::stage::{Actor, Stage, TerminalStatus};
use super::tables;
use crate::error::CoreError;

/// A Donation, Request or Delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Donation,
    Request,
    Delivery,
}

impl EntityType {
    pub const ALL: [EntityType; 3] = [
        EntityType::Donation,
        EntityType::Request,
        EntityType::Delivery,
    ];

    /// Singular key, as stored in `status_changes.entity_type`.
    pub fn as_str(self) -> &'static str {
        match self {
            EntityType::Donation => "donation",
            EntityType::Request => "request",
            EntityType::Delivery => "delivery",
        }
    }

    /// Backing table name.
    pub fn table(self) -> &'static str {
        match self {
            EntityType::Donation => "donations",
            EntityType::Request => "requests",
            EntityType::Delivery => "deliveries",
        }
    }

    /// Human-readable name used in error messages.
    pub fn label(self) -> &'static str {
        match self {
            EntityType::Donation => "Donation",
            EntityType::Request => "Request",
            EntityType::Delivery => "Delivery",
        }
    }

    /// The ordered stage table for this entity type.
    pub fn stages(self) -> &'static [Stage] {
        match self {
            EntityType::Donation => &tables::DONATION_STAGES[..],
            EntityType::Request => &tables::REQUEST_STAGES[..],
            EntityType::Delivery => &tables::DELIVERY_STAGES[..],
        }
    }

    /// Terminal exceptions that may end this entity's workflow.
    pub fn exceptions(self) -> &'static [TerminalStatus] {
        match self {
            EntityType::Donation => &tables::DONATION_EXCEPTIONS[..],
            EntityType::Request => &tables::REQUEST_EXCEPTIONS[..],
            EntityType::Delivery => &tables::DELIVERY_EXCEPTIONS[..],
        }
    }

    pub fn allows_exception(self, status: TerminalStatus) -> bool {
        self.exceptions().contains(&status)
    }

    /// Stage assigned to newly created records (ordinal 0).
    pub fn initial_stage(self) -> &'static Stage {
        &self.stages()[0]
    }

    /// Last stage of the linear progression.
    pub fn final_stage(self) -> &'static Stage {
        let stages = self.stages();
        &stages[stages.len() - 1]
    }

    /// The role that owns records of this type and may cancel them.
    pub fn owner(self) -> Actor {
        match self {
            EntityType::Donation => Actor::Donor,
            EntityType::Request => Actor::Recipient,
            EntityType::Delivery => Actor::Volunteer,
        }
    }

    /// Every value the `status` column may legally hold, aliases included.
    pub fn valid_statuses(self) -> Vec<&'static str> {
        let mut out = Vec::new();
        for stage in self.stages() {
            out.push(stage.id);
            out.extend(stage.aliases.iter().copied());
        }
        out.extend(self.exceptions().iter().map(|t| t.id()));
        out
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityType {
    type Err = CoreError;

    /// Accepts singular or plural forms, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "donation" | "donations" => Ok(EntityType::Donation),
            "request" | "requests" => Ok(EntityType::Request),
            "delivery" | "deliveries" => Ok(EntityType::Delivery),
            _ => Err(CoreError::Validation(format!(
                "Unknown entity type '{s}'. Must be one of: donation, request, delivery"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn parses_singular_and_plural() {
        assert_eq!("donation".parse::<EntityType>().unwrap(), EntityType::Donation);
        assert_eq!("Requests".parse::<EntityType>().unwrap(), EntityType::Request);
        assert_eq!("deliveries".parse::<EntityType>().unwrap(), EntityType::Delivery);
    }

    #[test]
    fn unknown_entity_type_is_validation_error() {
        assert_matches!("claims".parse::<EntityType>(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn initial_and_final_stages() {
        assert_eq!(EntityType::Donation.initial_stage().id, "available");
        assert_eq!(EntityType::Donation.final_stage().id, "completed");
        assert_eq!(EntityType::Request.initial_stage().id, "open");
        assert_eq!(EntityType::Request.final_stage().id, "fulfilled");
        assert_eq!(EntityType::Delivery.final_stage().id, "delivered");
    }

    #[test]
    fn valid_statuses_include_aliases_and_exceptions() {
        let statuses = EntityType::Delivery.valid_statuses();
        assert!(statuses.contains(&"coordination_needed"));
        assert!(statuses.contains(&"out_for_delivery"));
        assert!(statuses.contains(&"cancelled"));
        assert!(!statuses.contains(&"expired"));
    }

    #[test]
    fn exception_applicability() {
        assert!(EntityType::Donation.allows_exception(TerminalStatus::Expired));
        assert!(!EntityType::Donation.allows_exception(TerminalStatus::Rejected));
        assert!(EntityType::Request.allows_exception(TerminalStatus::Rejected));
        assert!(!EntityType::Delivery.allows_exception(TerminalStatus::Expired));
    }
}
