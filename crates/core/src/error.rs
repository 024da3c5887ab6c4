use crate::catalog::EntityKind;
use crate::types::DbId;
use crate::validation::Violations;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(Violations),
}

impl CoreError {
    /// Shorthand for a [`CoreError::NotFound`] naming the entity kind.
    pub fn not_found(kind: EntityKind, id: DbId) -> Self {
        CoreError::NotFound {
            entity: kind.name(),
            id,
        }
    }
}

impl From<Violations> for CoreError {
    fn from(violations: Violations) -> Self {
        CoreError::Validation(violations)
    }
}
