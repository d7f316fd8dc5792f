//! Progress-bar computation from a stage ordinal.

use serde::Serialize;

use super::entity::EntityType;
use super::lookup::StatusView;

/// Classification of one stage relative to the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepState {
    Completed,
    Current,
    Upcoming,
}

/// Progress through a stage sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub current_ordinal: usize,
    pub total_stages: usize,
    /// Always within `0..=100`.
    pub percentage: u8,
    /// One entry per stage, in declaration order.
    pub steps: Vec<StepState>,
}

/// `round(current / (total - 1) * 100)`, or `100` for a single-stage table.
///
/// `total == 0` is treated as a single stage and `current` is clamped to the
/// last index, so the result stays in `[0, 100]`.
pub fn percentage(current_ordinal: usize, total_stages: usize) -> u8 {
    let total = total_stages.max(1);
    if total == 1 {
        return 100;
    }
    let last = total - 1;
    let current = current_ordinal.min(last);
    ((current as f64 / last as f64) * 100.0).round() as u8
}

/// Classify every stage and compute the overall percentage.
pub fn compute_progress(current_ordinal: usize, total_stages: usize) -> Progress {
    let total = total_stages.max(1);
    let current = current_ordinal.min(total - 1);

    let steps = (0..total)
        .map(|i| match i.cmp(&current) {
            std::cmp::Ordering::Less => StepState::Completed,
            std::cmp::Ordering::Equal => StepState::Current,
            std::cmp::Ordering::Greater => StepState::Upcoming,
        })
        .collect();

    Progress {
        current_ordinal: current,
        total_stages: total,
        percentage: percentage(current, total),
        steps,
    }
}

/// Progress for a resolved status, or `None` for terminal exceptions.
pub fn progress_for(entity_type: EntityType, view: &StatusView) -> Option<Progress> {
    view.ordinal()
        .map(|ordinal| compute_progress(ordinal, entity_type.stages().len()))
}
