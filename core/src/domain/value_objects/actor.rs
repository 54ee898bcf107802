//! The authenticated caller on whose behalf a service operation runs.

use dc_shared::error_messages;
use uuid::Uuid;

use crate::domain::entities::user::Role;
use crate::errors::{DomainError, DomainResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: Uuid,
    pub role: Role,
}

impl Actor {
    pub fn new(user_id: Uuid, role: Role) -> Self {
        Self { user_id, role }
    }

    pub fn user(user_id: Uuid) -> Self {
        Self::new(user_id, Role::User)
    }

    pub fn admin(user_id: Uuid) -> Self {
        Self::new(user_id, Role::Administrator)
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Administrator
    }

    pub fn owns(&self, owner_id: Uuid) -> bool {
        self.user_id == owner_id
    }

    /// Admins pass; users must own the resource
    pub fn ensure_owner(&self, owner_id: Uuid) -> DomainResult<()> {
        if self.is_admin() || self.owns(owner_id) {
            Ok(())
        } else {
            Err(DomainError::forbidden(error_messages::FORBIDDEN))
        }
    }

    pub fn ensure_admin(&self) -> DomainResult<()> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(DomainError::forbidden(error_messages::FORBIDDEN))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_and_admin_pass() {
        let owner = Uuid::new_v4();
        assert!(Actor::user(owner).ensure_owner(owner).is_ok());
        assert!(Actor::admin(Uuid::new_v4()).ensure_owner(owner).is_ok());
    }

    #[test]
    fn test_stranger_is_forbidden() {
        let err = Actor::user(Uuid::new_v4())
            .ensure_owner(Uuid::new_v4())
            .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden { .. }));
        assert!(Actor::user(Uuid::new_v4()).ensure_admin().is_err());
    }
}
