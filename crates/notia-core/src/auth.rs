//! Owner identity consumed from the auth collaborator.
//!
//! Session management itself is out of scope; once a session exists the
//! collaborator exposes a stable owner id synchronously. Operations performed
//! with no session are rejected here, before any store access.

use uuid::Uuid;

use crate::error::AppError;

/// The current user's identity, required by every owner-scoped operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OwnerContext {
    pub owner_id: Uuid,
}

impl OwnerContext {
    pub fn new(owner_id: Uuid) -> Self {
        Self { owner_id }
    }

    /// Build a context from the auth collaborator's session state.
    /// `None` means no session: rejected before reaching the store.
    pub fn require(session_owner: Option<Uuid>) -> Result<Self, AppError> {
        session_owner
            .map(Self::new)
            .ok_or_else(|| AppError::Unauthorized("No active session".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_rejects_missing_session() {
        let err = OwnerContext::require(None).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[test]
    fn require_passes_through_owner_id() {
        let owner = Uuid::new_v4();
        let ctx = OwnerContext::require(Some(owner)).unwrap();
        assert_eq!(ctx.owner_id, owner);
    }
}
