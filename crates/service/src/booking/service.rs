use std::sync::Arc;

use chrono::Utc;
use sea_orm::prelude::DateTimeWithTimeZone;
use tracing::{info, instrument};

use models::booking;

use super::actor::Actor;
use super::domain::{BookingChanges, CreateBooking, NewBooking, UpdateBooking};
use super::errors::BookingError;
use super::ownership;
use super::policy::{self, Operation};
use super::repository::BookingRepository;
use super::status;

/// Lifecycle switches for the booking engine.
///
/// With `enforce_monotonic_transitions` off (the default) any of the four
/// statuses may be assigned by an actor holding update rights. Switching it
/// on restricts status updates to forward transitions.
#[derive(Debug, Clone, Copy, Default)]
pub struct BookingPolicyConfig {
    pub enforce_monotonic_transitions: bool,
}

/// Booking business service independent of the web framework.
///
/// Every mutating operation runs the same fixed sequence: authenticate,
/// authorize, re-derive ownership for object-targeted calls, validate
/// temporal and immutable-field constraints, apply the status rules, then
/// persist. A rejected step aborts the whole operation with no side
/// effects.
pub struct BookingService<R: BookingRepository> {
    repo: Arc<R>,
    cfg: BookingPolicyConfig,
}

impl<R: BookingRepository> BookingService<R> {
    pub fn new(repo: Arc<R>, cfg: BookingPolicyConfig) -> Self {
        Self { repo, cfg }
    }

    /// List bookings visible to the principal, latest schedule first.
    #[instrument(skip(self, principal))]
    pub async fn list(&self, principal: Option<&Actor>) -> Result<Vec<booking::Model>, BookingError> {
        let actor = policy::authorize(principal, Operation::List, None)?;
        let scope = policy::visibility(actor);
        self.repo.list_visible(&scope).await
    }

    pub async fn retrieve(
        &self,
        principal: Option<&Actor>,
        id: i64,
    ) -> Result<booking::Model, BookingError> {
        policy::require_actor(principal)?;
        let found = self.repo.find(id).await?.ok_or(BookingError::NotFound)?;
        policy::authorize(principal, Operation::Retrieve, Some(&found))?;
        Ok(found)
    }

    #[instrument(skip(self, principal, input))]
    pub async fn create(
        &self,
        principal: Option<&Actor>,
        input: CreateBooking,
    ) -> Result<booking::Model, BookingError> {
        let actor = policy::authorize(principal, Operation::Create, None)?;
        // Non-admins always book for themselves, whatever the payload says
        let client_id = if actor.is_admin() {
            input
                .client_id
                .or(actor.client_id())
                .ok_or_else(|| BookingError::validation("client_id", "client_id is required"))?
        } else {
            actor
                .client_id()
                .ok_or_else(|| BookingError::forbidden("client capability required"))?
        };
        ensure_future("scheduled_at", input.scheduled_at)?;
        let created = self
            .repo
            .insert(NewBooking {
                client_id,
                employee_id: input.employee_id,
                service_id: input.service_id,
                scheduled_at: input.scheduled_at,
                is_lab_flag: input.is_lab_flag,
                is_visit_flag: input.is_visit_flag,
            })
            .await?;
        info!(booking_id = created.id, client_id = %created.client_id, "booking_created");
        Ok(created)
    }

    #[instrument(skip(self, principal, input))]
    pub async fn update(
        &self,
        principal: Option<&Actor>,
        id: i64,
        input: UpdateBooking,
    ) -> Result<booking::Model, BookingError> {
        let actor = policy::require_actor(principal)?;
        let current = self.repo.find(id).await?.ok_or(BookingError::NotFound)?;
        policy::authorize(principal, Operation::Update, Some(&current))?;

        if let Some(ts) = input.scheduled_at {
            ensure_future("scheduled_at", ts)?;
        }
        if let Some(paid) = input.is_paid {
            if current.is_paid != Some(paid) {
                return Err(BookingError::validation("is_paid", "payment status cannot be changed"));
            }
        }
        if let Some(cid) = input.client_id {
            if cid != current.client_id {
                return Err(BookingError::validation("client_id", "immutable after creation"));
            }
        }
        if let Some(eid) = input.employee_id {
            if current.employee_id != Some(eid) {
                return Err(BookingError::validation("employee_id", "immutable after creation"));
            }
        }
        if let Some(sid) = input.service_id {
            if sid != current.service_id {
                return Err(BookingError::validation("service_id", "immutable after creation"));
            }
        }
        if let Some(next) = input.status {
            if self.cfg.enforce_monotonic_transitions
                && !status::is_forward_transition(current.status, next)
            {
                return Err(BookingError::validation(
                    "status",
                    format!("illegal transition {:?} -> {:?}", current.status, next),
                ));
            }
        }
        // Ownership re-derived on the fetched snapshot right before the write
        if !actor.is_admin() && !ownership::resolve(actor, &current).is_owner() {
            return Err(BookingError::forbidden("owner or admin only"));
        }
        let updated = self
            .repo
            .update(
                id,
                BookingChanges {
                    scheduled_at: input.scheduled_at,
                    status: input.status,
                    is_lab_flag: input.is_lab_flag,
                    is_visit_flag: input.is_visit_flag,
                },
            )
            .await?;
        info!(booking_id = updated.id, "booking_updated");
        Ok(updated)
    }

    #[instrument(skip(self, principal))]
    pub async fn destroy(&self, principal: Option<&Actor>, id: i64) -> Result<(), BookingError> {
        policy::require_actor(principal)?;
        let found = self.repo.find(id).await?.ok_or(BookingError::NotFound)?;
        policy::authorize(principal, Operation::Destroy, Some(&found))?;
        if !self.repo.delete(id).await? {
            return Err(BookingError::NotFound);
        }
        info!(booking_id = id, "booking_deleted");
        Ok(())
    }
}

fn ensure_future(field: &'static str, value: DateTimeWithTimeZone) -> Result<(), BookingError> {
    let now: DateTimeWithTimeZone = Utc::now().into();
    if value <= now {
        return Err(BookingError::validation(field, "must be strictly in the future"));
    }
    Ok(())
}
