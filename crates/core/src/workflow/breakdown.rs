//! Status counts per entity type, for dashboard charts.

use serde::Serialize;

use super::entity::EntityType;
use super::lookup::{lookup, StatusView};

/// Number of records in a single status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub status: &'static str,
    pub label: &'static str,
    pub color: &'static str,
    pub count: i64,
}

/// Counts grouped by stage (aliases folded in), exception and unrecognized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusBreakdown {
    pub entity_type: EntityType,
    /// One entry per stage in declaration order, zero counts included.
    pub stages: Vec<StatusCount>,
    /// One entry per exception the entity type permits.
    pub exceptions: Vec<StatusCount>,
    pub unrecognized: i64,
    pub total: i64,
}

impl StatusBreakdown {
    /// An all-zero breakdown for `entity_type`.
    pub fn empty(entity_type: EntityType) -> Self {
        Self {
            entity_type,
            stages: entity_type
                .stages()
                .iter()
                .map(|s| StatusCount {
                    status: s.id,
                    label: s.label,
                    color: s.color,
                    count: 0,
                })
                .collect(),
            exceptions: entity_type
                .exceptions()
                .iter()
                .map(|t| StatusCount {
                    status: t.id(),
                    label: t.label(),
                    color: t.color(),
                    count: 0,
                })
                .collect(),
            unrecognized: 0,
            total: 0,
        }
    }

    /// Fold pre-aggregated `(status, count)` rows, e.g. from `GROUP BY status`.
    pub fn from_counts<'a, I>(entity_type: EntityType, rows: I) -> Self
    where
        I: IntoIterator<Item = (Option<&'a str>, i64)>,
    {
        let mut breakdown = Self::empty(entity_type);
        for (status, count) in rows {
            breakdown.add(status, count);
        }
        breakdown
    }

    /// Count individual status values.
    pub fn from_statuses<'a, I>(entity_type: EntityType, statuses: I) -> Self
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        Self::from_counts(entity_type, statuses.into_iter().map(|s| (s, 1)))
    }

    fn add(&mut self, status: Option<&str>, count: i64) {
        self.total += count;
        let view = lookup(self.entity_type, status);
        if !view.is_recognized() {
            self.unrecognized += count;
            return;
        }
        let bucket = match view {
            StatusView::Stage { .. } => &mut self.stages,
            StatusView::Terminal { .. } => &mut self.exceptions,
        };
        if let Some(entry) = bucket.iter_mut().find(|c| c.status == view.id()) {
            entry.count += count;
        }
    }
}
