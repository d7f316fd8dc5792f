use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid transition for {entity}: '{from}' -> '{to}' ({reason})")]
    InvalidTransition {
        entity: &'static str,
        from: String,
        to: String,
        reason: String,
    },

    #[error("Conflict: {0}")]
    Conflict(String),
}
