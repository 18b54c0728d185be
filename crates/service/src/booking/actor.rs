use uuid::Uuid;

use super::errors::BookingError;

/// Request principal assembled once per request from verified identity
/// claims, immutable afterwards and never persisted.
///
/// Capability is encoded by id presence: the actor holds client capability
/// iff `client_id` is set and employee capability iff `employee_id` is set.
/// A dual-role caller is one `Actor` with both ids present, never two
/// actors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    id: Uuid,
    client_id: Option<Uuid>,
    employee_id: Option<Uuid>,
    is_admin: bool,
    is_banned: bool,
}

impl Actor {
    /// Build a principal from identity claims. A non-admin holding neither
    /// client nor employee capability is not a valid principal.
    pub fn new(
        id: Uuid,
        client_id: Option<Uuid>,
        employee_id: Option<Uuid>,
        is_admin: bool,
        is_banned: bool,
    ) -> Result<Self, BookingError> {
        if !is_admin && client_id.is_none() && employee_id.is_none() {
            return Err(BookingError::Unauthenticated);
        }
        Ok(Self { id, client_id, employee_id, is_admin, is_banned })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn client_id(&self) -> Option<Uuid> {
        self.client_id
    }

    pub fn employee_id(&self) -> Option<Uuid> {
        self.employee_id
    }

    pub fn is_client(&self) -> bool {
        self.client_id.is_some()
    }

    pub fn is_employee(&self) -> bool {
        self.employee_id.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.is_admin
    }

    pub fn is_banned(&self) -> bool {
        self.is_banned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roleless_non_admin_is_rejected() {
        let err = Actor::new(Uuid::new_v4(), None, None, false, false).unwrap_err();
        assert!(matches!(err, BookingError::Unauthenticated));
    }

    #[test]
    fn admin_needs_no_role() {
        let actor = Actor::new(Uuid::new_v4(), None, None, true, false).unwrap();
        assert!(actor.is_admin());
        assert!(!actor.is_client());
        assert!(!actor.is_employee());
    }

    #[test]
    fn dual_role_is_one_actor() {
        let c = Uuid::new_v4();
        let e = Uuid::new_v4();
        let actor = Actor::new(Uuid::new_v4(), Some(c), Some(e), false, false).unwrap();
        assert!(actor.is_client() && actor.is_employee());
        assert_eq!(actor.client_id(), Some(c));
        assert_eq!(actor.employee_id(), Some(e));
    }
}
