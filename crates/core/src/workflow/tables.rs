//! Stage tables for each entity type.
//!
//! Status ids must match the `CHECK` constraints on the `donations`,
//! `requests` and `deliveries` tables in `db/migrations`.

use super::stage::{Actor, Stage, TerminalStatus};

// ---------------------------------------------------------------------------
// Donation
// ---------------------------------------------------------------------------

pub const DONATION_AVAILABLE: &str = "available";
pub const DONATION_MATCHED: &str = "matched";
pub const DONATION_CLAIMED: &str = "claimed";
pub const DONATION_IN_TRANSIT: &str = "in_transit";
pub const DONATION_DELIVERED: &str = "delivered";
pub const DONATION_COMPLETED: &str = "completed";

pub static DONATION_STAGES: [Stage; 6] = [
    Stage {
        id: DONATION_AVAILABLE,
        ordinal: 0,
        label: "Available",
        actor: Actor::Donor,
        icon: "gift",
        color: "blue",
        aliases: &[],
    },
    Stage {
        id: DONATION_MATCHED,
        ordinal: 1,
        label: "Matched",
        actor: Actor::System,
        icon: "link",
        color: "purple",
        aliases: &[],
    },
    Stage {
        id: DONATION_CLAIMED,
        ordinal: 2,
        label: "Claimed",
        actor: Actor::Recipient,
        icon: "hand-heart",
        color: "yellow",
        aliases: &[],
    },
    Stage {
        id: DONATION_IN_TRANSIT,
        ordinal: 3,
        label: "In Transit",
        actor: Actor::Volunteer,
        icon: "truck",
        color: "orange",
        aliases: &[],
    },
    Stage {
        id: DONATION_DELIVERED,
        ordinal: 4,
        label: "Delivered",
        actor: Actor::Volunteer,
        icon: "package-check",
        color: "green",
        aliases: &[],
    },
    Stage {
        id: DONATION_COMPLETED,
        ordinal: 5,
        label: "Completed",
        actor: Actor::All,
        icon: "check-circle",
        color: "emerald",
        aliases: &[],
    },
];

pub static DONATION_EXCEPTIONS: [TerminalStatus; 2] =
    [TerminalStatus::Cancelled, TerminalStatus::Expired];

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

pub const REQUEST_OPEN: &str = "open";
pub const REQUEST_CLAIMED: &str = "claimed";
pub const REQUEST_IN_PROGRESS: &str = "in_progress";
pub const REQUEST_FULFILLED: &str = "fulfilled";

pub static REQUEST_STAGES: [Stage; 4] = [
    Stage {
        id: REQUEST_OPEN,
        ordinal: 0,
        label: "Open",
        actor: Actor::Recipient,
        icon: "inbox",
        color: "blue",
        aliases: &[],
    },
    Stage {
        id: REQUEST_CLAIMED,
        ordinal: 1,
        label: "Claimed",
        actor: Actor::Donor,
        icon: "hand-heart",
        color: "yellow",
        aliases: &[],
    },
    Stage {
        id: REQUEST_IN_PROGRESS,
        ordinal: 2,
        label: "In Progress",
        actor: Actor::Volunteer,
        icon: "loader",
        color: "orange",
        aliases: &[],
    },
    Stage {
        id: REQUEST_FULFILLED,
        ordinal: 3,
        label: "Fulfilled",
        actor: Actor::All,
        icon: "check-circle",
        color: "green",
        aliases: &[],
    },
];

pub static REQUEST_EXCEPTIONS: [TerminalStatus; 3] = [
    TerminalStatus::Cancelled,
    TerminalStatus::Expired,
    TerminalStatus::Rejected,
];

// ---------------------------------------------------------------------------
// Delivery
// ---------------------------------------------------------------------------

pub const DELIVERY_PENDING: &str = "pending";
pub const DELIVERY_ASSIGNED: &str = "assigned";
pub const DELIVERY_ACCEPTED: &str = "accepted";
pub const DELIVERY_PICKED_UP: &str = "picked_up";
pub const DELIVERY_IN_TRANSIT: &str = "in_transit";
pub const DELIVERY_DELIVERED: &str = "delivered";

pub static DELIVERY_STAGES: [Stage; 6] = [
    Stage {
        id: DELIVERY_PENDING,
        ordinal: 0,
        label: "Pending",
        actor: Actor::System,
        icon: "hourglass",
        color: "gray",
        aliases: &["coordination_needed"],
    },
    Stage {
        id: DELIVERY_ASSIGNED,
        ordinal: 1,
        label: "Assigned",
        actor: Actor::System,
        icon: "calendar",
        color: "indigo",
        aliases: &["scheduled"],
    },
    Stage {
        id: DELIVERY_ACCEPTED,
        ordinal: 2,
        label: "Accepted",
        actor: Actor::Volunteer,
        icon: "user-check",
        color: "purple",
        aliases: &[],
    },
    Stage {
        id: DELIVERY_PICKED_UP,
        ordinal: 3,
        label: "Picked Up",
        actor: Actor::Volunteer,
        icon: "package",
        color: "yellow",
        aliases: &["out_for_delivery"],
    },
    Stage {
        id: DELIVERY_IN_TRANSIT,
        ordinal: 4,
        label: "In Transit",
        actor: Actor::Volunteer,
        icon: "truck",
        color: "orange",
        aliases: &[],
    },
    Stage {
        id: DELIVERY_DELIVERED,
        ordinal: 5,
        label: "Delivered",
        actor: Actor::Volunteer,
        icon: "package-check",
        color: "green",
        aliases: &[],
    },
];

pub static DELIVERY_EXCEPTIONS: [TerminalStatus; 2] =
    [TerminalStatus::Cancelled, TerminalStatus::Rejected];
