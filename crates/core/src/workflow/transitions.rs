//! Authoritative transition rules.
//!
//! The API consults these before every status write and serves
//! [`allowed_transitions`] to clients, so the UI never re-encodes which
//! buttons to show.
//!
//! Rules:
//! - A record advances one stage at a time. The move is open to the target
//!   stage's actor (or anyone for [`Actor::All`] stages) and to privileged
//!   callers (admin, system).
//! - Admins may skip forward to any later stage.
//! - Terminal exceptions are reachable from every non-final stage, for the
//!   exceptions the entity type permits and the roles listed in
//!   [`may_raise`].
//! - Nothing leaves a final stage or a terminal exception.
//! - A record whose stored status is unrecognized may only be reset by an
//!   admin, to any known status.

use serde::Serialize;

use super::entity::EntityType;
use super::lookup::{find_stage, lookup, normalize, StatusView};
use super::stage::{Actor, TerminalStatus};
use crate::error::CoreError;

/// How a transition relates to the current stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    /// Move to the next stage.
    Advance,
    /// Jump past one or more stages (admin only).
    Skip,
    /// End the workflow with a terminal exception.
    Exception,
    /// Repair an unrecognized stored status (admin only).
    Reset,
}

/// A status the caller may move the record to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TransitionOption {
    pub to: &'static str,
    pub label: &'static str,
    pub kind: TransitionKind,
}

/// Whether `actor` may raise `exception` on a record of `entity_type`.
pub fn may_raise(entity_type: EntityType, exception: TerminalStatus, actor: Actor) -> bool {
    if !entity_type.allows_exception(exception) {
        return false;
    }
    match exception {
        TerminalStatus::Cancelled => actor == Actor::Admin || actor == entity_type.owner(),
        TerminalStatus::Expired => actor.is_privileged(),
        TerminalStatus::Rejected => {
            actor == Actor::Admin
                || (entity_type == EntityType::Delivery && actor == Actor::Volunteer)
        }
    }
}

fn may_enter(stage_actor: Actor, actor: Actor) -> bool {
    actor.is_privileged() || stage_actor == Actor::All || stage_actor == actor
}

/// List the transitions `actor` may perform from `current`.
pub fn allowed_transitions(
    entity_type: EntityType,
    current: Option<&str>,
    actor: Actor,
) -> Vec<TransitionOption> {
    let view = lookup(entity_type, current);
    let stages = entity_type.stages();
    let mut options = Vec::new();

    match view {
        StatusView::Terminal { .. } => {}
        StatusView::Stage {
            recognized: false, ..
        } => {
            if actor == Actor::Admin {
                options.extend(stages.iter().map(|s| TransitionOption {
                    to: s.id,
                    label: s.label,
                    kind: TransitionKind::Reset,
                }));
                options.extend(entity_type.exceptions().iter().map(|t| TransitionOption {
                    to: t.id(),
                    label: t.label(),
                    kind: TransitionKind::Reset,
                }));
            }
        }
        StatusView::Stage { stage, .. } => {
            let later = &stages[stage.ordinal + 1..];
            if let Some(next) = later.first() {
                if may_enter(next.actor, actor) {
                    options.push(TransitionOption {
                        to: next.id,
                        label: next.label,
                        kind: TransitionKind::Advance,
                    });
                }
                if actor == Actor::Admin {
                    options.extend(later.iter().skip(1).map(|s| TransitionOption {
                        to: s.id,
                        label: s.label,
                        kind: TransitionKind::Skip,
                    }));
                }
                options.extend(
                    entity_type
                        .exceptions()
                        .iter()
                        .filter(|t| may_raise(entity_type, **t, actor))
                        .map(|t| TransitionOption {
                            to: t.id(),
                            label: t.label(),
                            kind: TransitionKind::Exception,
                        }),
                );
            }
        }
    }

    options
}

/// Check that `actor` may move a record from `current` to `target`.
///
/// Returns the canonical id to store (aliases resolve to their stage id).
pub fn validate_transition(
    entity_type: EntityType,
    current: Option<&str>,
    target: &str,
    actor: Actor,
) -> Result<&'static str, CoreError> {
    let normalized = normalize(Some(target))
        .ok_or_else(|| CoreError::Validation("Target status must not be empty".to_string()))?;

    let canonical = find_stage(entity_type, &normalized)
        .map(|s| s.id)
        .or_else(|| {
            TerminalStatus::parse(&normalized)
                .filter(|t| entity_type.allows_exception(*t))
                .map(TerminalStatus::id)
        })
        .ok_or_else(|| {
            CoreError::Validation(format!(
                "Invalid {} status '{target}'. Must be one of: {}",
                entity_type.as_str(),
                entity_type.valid_statuses().join(", ")
            ))
        })?;

    let allowed = allowed_transitions(entity_type, current, actor);
    if allowed.iter().any(|o| o.to == canonical) {
        return Ok(canonical);
    }

    let view = lookup(entity_type, current);
    let reason = rejection_reason(entity_type, &view, canonical, actor);
    Err(CoreError::InvalidTransition {
        entity: entity_type.label(),
        from: current.unwrap_or_default().to_string(),
        to: canonical.to_string(),
        reason,
    })
}

/// Explain why a transition absent from [`allowed_transitions`] was refused.
fn rejection_reason(
    entity_type: EntityType,
    view: &StatusView,
    target: &str,
    actor: Actor,
) -> String {
    match view {
        StatusView::Terminal { exception } => {
            format!("status '{}' is terminal", exception.id())
        }
        StatusView::Stage {
            recognized: false, ..
        } => "current status is unrecognized; only an admin may reset it".to_string(),
        StatusView::Stage { stage, .. } => {
            if stage.id == entity_type.final_stage().id {
                return format!("status '{}' is final", stage.id);
            }
            match find_stage(entity_type, target) {
                Some(to) if to.ordinal == stage.ordinal => "status is unchanged".to_string(),
                Some(to) if to.ordinal < stage.ordinal => {
                    "workflow cannot move backwards".to_string()
                }
                Some(to) if to.ordinal > stage.ordinal + 1 && actor != Actor::Admin => {
                    "only an admin may skip stages".to_string()
                }
                _ => format!("actor '{actor}' may not perform this transition"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn targets(options: &[TransitionOption]) -> Vec<&'static str> {
        options.iter().map(|o| o.to).collect()
    }

    #[test]
    fn donor_can_only_cancel_an_available_donation() {
        let options = allowed_transitions(EntityType::Donation, Some("available"), Actor::Donor);
        assert_eq!(targets(&options), vec!["cancelled"]);
    }

    #[test]
    fn system_advances_available_donation_to_matched() {
        let options = allowed_transitions(EntityType::Donation, Some("available"), Actor::System);
        assert_eq!(options[0].to, "matched");
        assert_eq!(options[0].kind, TransitionKind::Advance);
        assert!(targets(&options).contains(&"expired"));
        assert!(!targets(&options).contains(&"cancelled"));
    }

    #[test]
    fn admin_may_skip_forward() {
        let options = allowed_transitions(EntityType::Request, Some("open"), Actor::Admin);
        assert_eq!(
            targets(&options),
            vec!["claimed", "in_progress", "fulfilled", "cancelled", "expired", "rejected"]
        );
        let fulfilled = options.iter().find(|o| o.to == "fulfilled").unwrap();
        assert_eq!(fulfilled.kind, TransitionKind::Skip);
    }

    #[test]
    fn final_stage_has_no_transitions() {
        for actor in Actor::CALLERS {
            assert!(allowed_transitions(EntityType::Donation, Some("completed"), actor).is_empty());
        }
    }

    #[test]
    fn terminal_exception_has_no_transitions() {
        assert!(allowed_transitions(EntityType::Request, Some("cancelled"), Actor::Admin).is_empty());
    }

    #[test]
    fn unrecognized_status_only_resettable_by_admin() {
        assert!(allowed_transitions(EntityType::Donation, Some("bogus"), Actor::Donor).is_empty());
        let options = allowed_transitions(EntityType::Donation, Some("bogus"), Actor::Admin);
        assert_eq!(options.len(), 8);
        assert!(options.iter().all(|o| o.kind == TransitionKind::Reset));
    }

    #[test]
    fn volunteer_may_reject_a_delivery_but_not_a_request() {
        let delivery = allowed_transitions(EntityType::Delivery, Some("assigned"), Actor::Volunteer);
        assert!(targets(&delivery).contains(&"accepted"));
        assert!(targets(&delivery).contains(&"rejected"));

        let request = allowed_transitions(EntityType::Request, Some("claimed"), Actor::Volunteer);
        assert!(!targets(&request).contains(&"rejected"));
    }

    #[test]
    fn validate_accepts_alias_and_returns_canonical_id() {
        let stored = validate_transition(
            EntityType::Delivery,
            Some("accepted"),
            "out_for_delivery",
            Actor::Volunteer,
        )
        .unwrap();
        assert_eq!(stored, "picked_up");
    }

    #[test]
    fn validate_rejects_backward_move() {
        let err = validate_transition(EntityType::Donation, Some("claimed"), "matched", Actor::Admin)
            .unwrap_err();
        assert_matches!(err, CoreError::InvalidTransition { ref reason, .. } if reason.contains("backwards"));
    }

    #[test]
    fn validate_rejects_skip_by_non_admin() {
        let err =
            validate_transition(EntityType::Donation, Some("available"), "claimed", Actor::System)
                .unwrap_err();
        assert_matches!(err, CoreError::InvalidTransition { ref reason, .. } if reason.contains("skip"));
    }

    #[test]
    fn validate_rejects_wrong_actor() {
        let err = validate_transition(
            EntityType::Donation,
            Some("matched"),
            "claimed",
            Actor::Volunteer,
        )
        .unwrap_err();
        assert_matches!(err, CoreError::InvalidTransition { ref reason, .. } if reason.contains("volunteer"));
    }

    #[test]
    fn validate_rejects_leaving_final_stage() {
        let err = validate_transition(EntityType::Request, Some("fulfilled"), "cancelled", Actor::Admin)
            .unwrap_err();
        assert_matches!(err, CoreError::InvalidTransition { ref reason, .. } if reason.contains("final"));
    }

    #[test]
    fn validate_rejects_unknown_target() {
        let err = validate_transition(EntityType::Donation, Some("available"), "rejected", Actor::Admin)
            .unwrap_err();
        assert_matches!(err, CoreError::Validation(_));
    }

    #[test]
    fn validate_rejects_empty_target() {
        assert_matches!(
            validate_transition(EntityType::Donation, Some("available"), " ", Actor::Admin),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn recipient_claims_matched_donation() {
        assert_eq!(
            validate_transition(EntityType::Donation, Some("matched"), "claimed", Actor::Recipient)
                .unwrap(),
            "claimed"
        );
    }

    #[test]
    fn anyone_may_complete_a_delivered_donation() {
        for actor in Actor::CALLERS {
            assert!(
                validate_transition(EntityType::Donation, Some("delivered"), "completed", actor)
                    .is_ok(),
                "{actor} should complete"
            );
        }
    }
}
