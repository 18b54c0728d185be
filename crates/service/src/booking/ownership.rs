use uuid::Uuid;

use models::booking;

use super::actor::Actor;

/// Relation between an actor and a booking record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnershipKind {
    None,
    ClientOwner,
    EmployeeOwner,
    Both,
}

impl OwnershipKind {
    pub fn is_owner(self) -> bool {
        !matches!(self, OwnershipKind::None)
    }
}

/// Single source of truth for "may this actor treat the booking as theirs".
/// Both the list visibility scope and the single-object check go through
/// here, so the two can never disagree.
pub fn resolve(actor: &Actor, booking: &booking::Model) -> OwnershipKind {
    resolve_ids(actor.client_id(), actor.employee_id(), booking)
}

pub(crate) fn resolve_ids(
    client_id: Option<Uuid>,
    employee_id: Option<Uuid>,
    booking: &booking::Model,
) -> OwnershipKind {
    let client = client_id == Some(booking.client_id);
    // A booking without an assigned employee is owned by nobody on that axis
    let employee = employee_id.is_some() && employee_id == booking.employee_id;
    match (client, employee) {
        (true, true) => OwnershipKind::Both,
        (true, false) => OwnershipKind::ClientOwner,
        (false, true) => OwnershipKind::EmployeeOwner,
        (false, false) => OwnershipKind::None,
    }
}
