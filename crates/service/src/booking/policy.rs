use uuid::Uuid;

use models::booking;

use super::actor::Actor;
use super::errors::BookingError;
use super::ownership::{self, OwnershipKind};

/// Operations subject to the access policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Retrieve,
    Create,
    Update,
    Destroy,
}

/// Row scope for list queries, passed explicitly to the repository together
/// with the canonical sort order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Visibility {
    All,
    Owned { client_id: Option<Uuid>, employee_id: Option<Uuid> },
}

impl Visibility {
    /// In-memory form of the scope; delegates to the ownership resolver.
    pub fn permits(&self, booking: &booking::Model) -> bool {
        match self {
            Visibility::All => true,
            Visibility::Owned { client_id, employee_id } => {
                ownership::resolve_ids(*client_id, *employee_id, booking) != OwnershipKind::None
            }
        }
    }
}

/// Scope of bookings the actor may see in list results. Non-admins see the
/// union of their client-owned and employee-assigned bookings.
pub fn visibility(actor: &Actor) -> Visibility {
    if actor.is_admin() {
        Visibility::All
    } else {
        Visibility::Owned { client_id: actor.client_id(), employee_id: actor.employee_id() }
    }
}

/// Authentication step alone; used before the target row has been loaded.
pub fn require_actor(principal: Option<&Actor>) -> Result<&Actor, BookingError> {
    principal.ok_or(BookingError::Unauthenticated)
}

/// Decide whether `principal` may perform `op`, optionally against a
/// concrete booking. First match wins; admin short-circuits every row of
/// the table. Returns the authenticated actor on success.
pub fn authorize<'a>(
    principal: Option<&'a Actor>,
    op: Operation,
    booking: Option<&booking::Model>,
) -> Result<&'a Actor, BookingError> {
    let actor = require_actor(principal)?;
    if actor.is_banned() {
        return Err(BookingError::forbidden("account is banned"));
    }
    if actor.is_admin() {
        return Ok(actor);
    }
    match op {
        Operation::List => Ok(actor),
        Operation::Create => {
            if actor.is_client() {
                Ok(actor)
            } else {
                Err(BookingError::forbidden("client capability required"))
            }
        }
        Operation::Retrieve | Operation::Update => match booking {
            Some(b) if ownership::resolve(actor, b).is_owner() => Ok(actor),
            _ => Err(BookingError::forbidden("owner or admin only")),
        },
        Operation::Destroy => Err(BookingError::forbidden("admin only")),
    }
}
