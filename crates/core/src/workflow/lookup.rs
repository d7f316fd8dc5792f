//! Status-to-stage lookup.
//!
//! Lookup is lenient: a null, blank or unrecognized status resolves to the
//! first stage (ordinal 0) with `recognized: false` so callers can always
//! render something. Terminal exceptions take their own branch and are
//! never mapped onto an ordinal.

use serde::Serialize;

use super::entity::EntityType;
use super::stage::{Stage, TerminalStatus};

/// Display metadata resolved for a single `status` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StatusView {
    /// A position in the linear progression.
    Stage {
        stage: &'static Stage,
        /// `false` when the raw value was missing or unknown and the view
        /// fell back to the first stage.
        recognized: bool,
    },
    /// A terminal exception outside the progression.
    Terminal { exception: TerminalStatus },
}

impl StatusView {
    /// Ordinal of the stage, or `None` for a terminal exception.
    pub fn ordinal(&self) -> Option<usize> {
        match self {
            StatusView::Stage { stage, .. } => Some(stage.ordinal),
            StatusView::Terminal { .. } => None,
        }
    }

    /// Canonical status id (aliases resolve to their stage id).
    pub fn id(&self) -> &'static str {
        match self {
            StatusView::Stage { stage, .. } => stage.id,
            StatusView::Terminal { exception } => exception.id(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatusView::Stage { stage, .. } => stage.label,
            StatusView::Terminal { exception } => exception.label(),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, StatusView::Terminal { .. })
    }

    /// Whether the raw value matched a stage or a permitted exception.
    pub fn is_recognized(&self) -> bool {
        match self {
            StatusView::Stage { recognized, .. } => *recognized,
            StatusView::Terminal { .. } => true,
        }
    }
}

/// Normalize a raw status value: trim, lowercase, drop blanks.
pub(crate) fn normalize(status: Option<&str>) -> Option<String> {
    status
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_ascii_lowercase)
}

/// Find the stage whose id or alias equals an already-normalized status.
pub fn find_stage(entity_type: EntityType, status: &str) -> Option<&'static Stage> {
    entity_type.stages().iter().find(|stage| stage.matches(status))
}

/// Resolve a raw `status` value for the given entity type. Never fails.
pub fn lookup(entity_type: EntityType, status: Option<&str>) -> StatusView {
    let fallback = StatusView::Stage {
        stage: entity_type.initial_stage(),
        recognized: false,
    };

    let Some(normalized) = normalize(status) else {
        return fallback;
    };

    if let Some(stage) = find_stage(entity_type, &normalized) {
        return StatusView::Stage {
            stage,
            recognized: true,
        };
    }

    match TerminalStatus::parse(&normalized) {
        Some(exception) if entity_type.allows_exception(exception) => {
            StatusView::Terminal { exception }
        }
        _ => fallback,
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn every_stage_resolves_to_its_declaration_order() {
        for entity_type in EntityType::ALL {
            let mut previous = None;
            for (i, stage) in entity_type.stages().iter().enumerate() {
                let view = lookup(entity_type, Some(stage.id));
                assert_eq!(view.ordinal(), Some(i));
                assert!(view.is_recognized());
                if let Some(prev) = previous {
                    assert!(i > prev);
                }
                previous = Some(i);
            }
        }
    }

    #[test]
    fn donation_in_transit_is_ordinal_three() {
        let view = lookup(EntityType::Donation, Some("in_transit"));
        assert_eq!(view.ordinal(), Some(3));
        assert_eq!(view.label(), "In Transit");
    }

    #[test]
    fn request_fulfilled_is_ordinal_three() {
        let view = lookup(EntityType::Request, Some("fulfilled"));
        assert_eq!(view.ordinal(), Some(3));
    }

    #[test]
    fn unknown_status_falls_back_to_first_stage() {
        let view = lookup(EntityType::Donation, Some("bogus_value"));
        assert_eq!(view.ordinal(), Some(0));
        assert_eq!(view.id(), "available");
        assert!(!view.is_recognized());
    }

    #[test]
    fn null_and_blank_status_fall_back_to_first_stage() {
        assert_eq!(lookup(EntityType::Request, None).ordinal(), Some(0));
        assert_eq!(lookup(EntityType::Request, Some("  ")).ordinal(), Some(0));
        assert!(!lookup(EntityType::Request, None).is_recognized());
    }

    #[test]
    fn aliases_resolve_to_canonical_stage() {
        let view = lookup(EntityType::Delivery, Some("out_for_delivery"));
        assert_eq!(view.id(), "picked_up");
        assert_eq!(view.ordinal(), Some(3));
        assert_eq!(lookup(EntityType::Delivery, Some("scheduled")).id(), "assigned");
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(lookup(EntityType::Donation, Some("MATCHED")).ordinal(), Some(1));
    }

    #[test]
    fn terminal_exceptions_take_their_own_branch() {
        let view = lookup(EntityType::Donation, Some("cancelled"));
        assert_matches!(
            view,
            StatusView::Terminal {
                exception: TerminalStatus::Cancelled
            }
        );
        assert_eq!(view.ordinal(), None);
        assert!(view.is_terminal());
    }

    #[test]
    fn exception_not_valid_for_type_is_unrecognized() {
        let view = lookup(EntityType::Donation, Some("rejected"));
        assert!(!view.is_terminal());
        assert!(!view.is_recognized());
        assert_eq!(view.ordinal(), Some(0));
    }

    #[test]
    fn claimed_resolves_per_entity_type() {
        assert_eq!(lookup(EntityType::Donation, Some("claimed")).ordinal(), Some(2));
        assert_eq!(lookup(EntityType::Request, Some("claimed")).ordinal(), Some(1));
    }

    #[test]
    fn view_serializes_with_kind_tag() {
        let json = serde_json::to_value(lookup(EntityType::Donation, Some("matched"))).unwrap();
        assert_eq!(json["kind"], "stage");
        assert_eq!(json["stage"]["id"], "matched");
        assert_eq!(json["recognized"], true);

        let json = serde_json::to_value(lookup(EntityType::Request, Some("expired"))).unwrap();
        assert_eq!(json["kind"], "terminal");
        assert_eq!(json["exception"]["id"], "expired");
    }
}
