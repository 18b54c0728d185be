use std::sync::Arc;

use chrono::{Duration, Utc};
use sea_orm::prelude::DateTimeWithTimeZone;
use uuid::Uuid;

use models::booking::{BookingStatus, Model};

use super::actor::Actor;
use super::domain::{CreateBooking, UpdateBooking};
use super::errors::BookingError;
use super::repository::mock::MockBookingRepository;
use super::service::{BookingPolicyConfig, BookingService};

fn hours_from_now(hours: i64) -> DateTimeWithTimeZone {
    (Utc::now() + Duration::hours(hours)).into()
}

fn row(id: i64, client: Uuid, employee: Option<Uuid>, hours: i64) -> Model {
    let now: DateTimeWithTimeZone = Utc::now().into();
    Model {
        id,
        client_id: client,
        employee_id: employee,
        service_id: Uuid::new_v4(),
        scheduled_at: hours_from_now(hours),
        status: BookingStatus::Created,
        is_paid: None,
        is_lab_flag: None,
        is_visit_flag: None,
        created_at: now,
        updated_at: now,
    }
}

fn service_with(rows: Vec<Model>) -> BookingService<MockBookingRepository> {
    service_with_cfg(rows, BookingPolicyConfig::default())
}

fn service_with_cfg(
    rows: Vec<Model>,
    cfg: BookingPolicyConfig,
) -> BookingService<MockBookingRepository> {
    let repo = MockBookingRepository::default();
    for r in rows {
        repo.seed(r);
    }
    BookingService::new(Arc::new(repo), cfg)
}

fn client_actor(client: Uuid) -> Actor {
    Actor::new(Uuid::new_v4(), Some(client), None, false, false).unwrap()
}

fn employee_actor(employee: Uuid) -> Actor {
    Actor::new(Uuid::new_v4(), None, Some(employee), false, false).unwrap()
}

fn admin_actor() -> Actor {
    Actor::new(Uuid::new_v4(), None, None, true, false).unwrap()
}

#[tokio::test]
async fn dual_role_list_is_the_union_without_duplicates() {
    let c1 = Uuid::new_v4();
    let c2 = Uuid::new_v4();
    let c3 = Uuid::new_v4();
    let e9 = Uuid::new_v4();
    let e7 = Uuid::new_v4();
    let e3 = Uuid::new_v4();
    let svc = service_with(vec![
        row(1, c1, Some(e9), 1),
        row(2, c2, Some(e7), 2),
        row(3, c3, Some(e3), 3),
    ]);

    let dual = Actor::new(Uuid::new_v4(), Some(c1), Some(e7), false, false).unwrap();
    let visible = svc.list(Some(&dual)).await.unwrap();

    let mut ids: Vec<i64> = visible.iter().map(|b| b.id).collect();
    ids.sort();
    assert_eq!(ids, vec![1, 2]);
}

#[tokio::test]
async fn booking_matched_on_both_axes_appears_exactly_once() {
    let c = Uuid::new_v4();
    let e = Uuid::new_v4();
    let svc = service_with(vec![row(1, c, Some(e), 1)]);

    let dual = Actor::new(Uuid::new_v4(), Some(c), Some(e), false, false).unwrap();
    let visible = svc.list(Some(&dual)).await.unwrap();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].id, 1);
}

#[tokio::test]
async fn non_admin_list_never_leaks_foreign_bookings() {
    let mine = Uuid::new_v4();
    let svc = service_with(vec![
        row(1, mine, Some(Uuid::new_v4()), 1),
        row(2, Uuid::new_v4(), Some(Uuid::new_v4()), 2),
        row(3, Uuid::new_v4(), Some(Uuid::new_v4()), 3),
    ]);

    let me = client_actor(mine);
    let visible = svc.list(Some(&me)).await.unwrap();
    assert!(visible.iter().all(|b| b.client_id == mine));
    assert_eq!(visible.len(), 1);
}

#[tokio::test]
async fn admin_list_returns_all_in_canonical_order() {
    let tie = hours_from_now(5);
    let mut b4 = row(4, Uuid::new_v4(), Some(Uuid::new_v4()), 0);
    b4.scheduled_at = tie;
    let mut b2 = row(2, Uuid::new_v4(), Some(Uuid::new_v4()), 0);
    b2.scheduled_at = tie;
    let svc = service_with(vec![
        row(1, Uuid::new_v4(), Some(Uuid::new_v4()), 9),
        b2,
        row(3, Uuid::new_v4(), Some(Uuid::new_v4()), 1),
        b4,
    ]);

    let admin = admin_actor();
    let visible = svc.list(Some(&admin)).await.unwrap();
    let ids: Vec<i64> = visible.iter().map(|b| b.id).collect();
    // Descending scheduled_at; the tie at +5h resolves by ascending id
    assert_eq!(ids, vec![1, 2, 4, 3]);
}

#[tokio::test]
async fn anonymous_caller_is_unauthenticated() {
    let svc = service_with(vec![row(1, Uuid::new_v4(), Some(Uuid::new_v4()), 1)]);
    let err = svc.list(None).await.unwrap_err();
    assert!(matches!(err, BookingError::Unauthenticated));
    let err = svc.retrieve(None, 1).await.unwrap_err();
    assert!(matches!(err, BookingError::Unauthenticated));
}

#[tokio::test]
async fn retrieve_distinguishes_not_found_from_forbidden() {
    let c = Uuid::new_v4();
    let svc = service_with(vec![row(7, c, Some(Uuid::new_v4()), 1)]);

    let stranger = client_actor(Uuid::new_v4());
    let err = svc.retrieve(Some(&stranger), 999).await.unwrap_err();
    assert!(matches!(err, BookingError::NotFound));
    // A real id that is not yours answers forbidden, revealing existence
    let err = svc.retrieve(Some(&stranger), 7).await.unwrap_err();
    assert!(matches!(err, BookingError::Forbidden(_)));

    let owner = client_actor(c);
    assert_eq!(svc.retrieve(Some(&owner), 7).await.unwrap().id, 7);
}

#[tokio::test]
async fn employee_owner_can_retrieve_assigned_booking() {
    let e = Uuid::new_v4();
    let svc = service_with(vec![row(1, Uuid::new_v4(), Some(e), 1)]);
    let doctor = employee_actor(e);
    assert_eq!(svc.retrieve(Some(&doctor), 1).await.unwrap().id, 1);
}

#[tokio::test]
async fn create_forces_client_id_for_non_admin() {
    let mine = Uuid::new_v4();
    let svc = service_with(vec![]);
    let me = client_actor(mine);
    let created = svc
        .create(
            Some(&me),
            CreateBooking {
                client_id: Some(Uuid::new_v4()),
                employee_id: Uuid::new_v4(),
                service_id: Uuid::new_v4(),
                scheduled_at: hours_from_now(24),
                is_lab_flag: None,
                is_visit_flag: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(created.client_id, mine);
    assert_eq!(created.status, BookingStatus::Created);
    assert!(created.is_paid.is_none());
}

#[tokio::test]
async fn admin_may_create_on_behalf_of_any_client() {
    let someone = Uuid::new_v4();
    let svc = service_with(vec![]);
    let created = svc
        .create(
            Some(&admin_actor()),
            CreateBooking {
                client_id: Some(someone),
                employee_id: Uuid::new_v4(),
                service_id: Uuid::new_v4(),
                scheduled_at: hours_from_now(24),
                is_lab_flag: None,
                is_visit_flag: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(created.client_id, someone);
}

#[tokio::test]
async fn create_in_the_past_fails_validation() {
    let svc = service_with(vec![]);
    let me = client_actor(Uuid::new_v4());
    let err = svc
        .create(
            Some(&me),
            CreateBooking {
                client_id: None,
                employee_id: Uuid::new_v4(),
                service_id: Uuid::new_v4(),
                scheduled_at: hours_from_now(-1),
                is_lab_flag: None,
                is_visit_flag: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::Validation { field: "scheduled_at", .. }));
}

#[tokio::test]
async fn update_in_the_past_fails_validation() {
    let c = Uuid::new_v4();
    let svc = service_with(vec![row(1, c, Some(Uuid::new_v4()), 1)]);
    let me = client_actor(c);
    let err = svc
        .update(
            Some(&me),
            1,
            UpdateBooking { scheduled_at: Some(hours_from_now(-2)), ..Default::default() },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::Validation { field: "scheduled_at", .. }));
}

#[tokio::test]
async fn changing_is_paid_fails_even_for_admin() {
    let svc = service_with(vec![row(1, Uuid::new_v4(), Some(Uuid::new_v4()), 1)]);
    let err = svc
        .update(
            Some(&admin_actor()),
            1,
            UpdateBooking { is_paid: Some(true), ..Default::default() },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::Validation { field: "is_paid", .. }));
}

#[tokio::test]
async fn resubmitting_the_current_is_paid_value_passes() {
    let c = Uuid::new_v4();
    let mut seeded = row(1, c, Some(Uuid::new_v4()), 1);
    seeded.is_paid = Some(true);
    let svc = service_with(vec![seeded]);
    let me = client_actor(c);
    let updated = svc
        .update(
            Some(&me),
            1,
            UpdateBooking {
                is_paid: Some(true),
                is_visit_flag: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.is_paid, Some(true));
    assert_eq!(updated.is_visit_flag, Some(true));
}

#[tokio::test]
async fn plain_client_updates_a_flag_and_nothing_else_moves() {
    let c = Uuid::new_v4();
    let seeded = row(1, c, Some(Uuid::new_v4()), 4);
    let before = seeded.clone();
    let svc = service_with(vec![seeded]);
    let me = client_actor(c);
    let updated = svc
        .update(Some(&me), 1, UpdateBooking { is_lab_flag: Some(true), ..Default::default() })
        .await
        .unwrap();
    assert_eq!(updated.is_lab_flag, Some(true));
    assert_eq!(updated.client_id, before.client_id);
    assert_eq!(updated.employee_id, before.employee_id);
    assert_eq!(updated.service_id, before.service_id);
    assert_eq!(updated.scheduled_at, before.scheduled_at);
    assert_eq!(updated.status, before.status);
    assert_eq!(updated.is_paid, before.is_paid);
}

#[tokio::test]
async fn immutable_ids_cannot_be_rewritten() {
    let c = Uuid::new_v4();
    let svc = service_with(vec![row(1, c, Some(Uuid::new_v4()), 1)]);
    let me = client_actor(c);
    let err = svc
        .update(
            Some(&me),
            1,
            UpdateBooking { service_id: Some(Uuid::new_v4()), ..Default::default() },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::Validation { field: "service_id", .. }));
}

#[tokio::test]
async fn update_by_non_owner_is_forbidden() {
    let svc = service_with(vec![row(1, Uuid::new_v4(), Some(Uuid::new_v4()), 1)]);
    let stranger = client_actor(Uuid::new_v4());
    let err = svc
        .update(Some(&stranger), 1, UpdateBooking { is_lab_flag: Some(true), ..Default::default() })
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::Forbidden(_)));
}

#[tokio::test]
async fn admin_reverts_terminal_status_in_permissive_mode() {
    let mut seeded = row(1, Uuid::new_v4(), Some(Uuid::new_v4()), 1);
    seeded.status = BookingStatus::Done;
    let svc = service_with(vec![seeded]);
    let updated = svc
        .update(
            Some(&admin_actor()),
            1,
            UpdateBooking { status: Some(BookingStatus::Created), ..Default::default() },
        )
        .await
        .unwrap();
    assert_eq!(updated.status, BookingStatus::Created);
}

#[tokio::test]
async fn monotonic_mode_rejects_reverting_terminal_status() {
    let mut seeded = row(1, Uuid::new_v4(), Some(Uuid::new_v4()), 1);
    seeded.status = BookingStatus::Done;
    let svc = service_with_cfg(
        vec![seeded],
        BookingPolicyConfig { enforce_monotonic_transitions: true },
    );
    let err = svc
        .update(
            Some(&admin_actor()),
            1,
            UpdateBooking { status: Some(BookingStatus::Created), ..Default::default() },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::Validation { field: "status", .. }));
}

#[tokio::test]
async fn monotonic_mode_still_allows_forward_steps() {
    let c = Uuid::new_v4();
    let svc = service_with_cfg(
        vec![row(1, c, Some(Uuid::new_v4()), 1)],
        BookingPolicyConfig { enforce_monotonic_transitions: true },
    );
    let me = client_actor(c);
    let updated = svc
        .update(
            Some(&me),
            1,
            UpdateBooking { status: Some(BookingStatus::Processing), ..Default::default() },
        )
        .await
        .unwrap();
    assert_eq!(updated.status, BookingStatus::Processing);
}

#[tokio::test]
async fn destroy_is_forbidden_for_owners_and_allowed_for_admin() {
    let c = Uuid::new_v4();
    let e = Uuid::new_v4();
    let svc = service_with(vec![row(1, c, Some(e), 1)]);

    let err = svc.destroy(Some(&client_actor(c)), 1).await.unwrap_err();
    assert!(matches!(err, BookingError::Forbidden(_)));
    let err = svc.destroy(Some(&employee_actor(e)), 1).await.unwrap_err();
    assert!(matches!(err, BookingError::Forbidden(_)));

    svc.destroy(Some(&admin_actor()), 1).await.unwrap();
    let admin = admin_actor();
    assert!(svc.list(Some(&admin)).await.unwrap().is_empty());
}

#[tokio::test]
async fn destroy_of_unknown_id_is_not_found() {
    let svc = service_with(vec![]);
    let err = svc.destroy(Some(&admin_actor()), 42).await.unwrap_err();
    assert!(matches!(err, BookingError::NotFound));
}

#[tokio::test]
async fn banned_actor_is_refused_every_operation() {
    let c = Uuid::new_v4();
    let svc = service_with(vec![row(1, c, Some(Uuid::new_v4()), 1)]);
    let banned = Actor::new(Uuid::new_v4(), Some(c), None, false, true).unwrap();

    let err = svc.list(Some(&banned)).await.unwrap_err();
    assert!(matches!(err, BookingError::Forbidden(_)));
    let err = svc.retrieve(Some(&banned), 1).await.unwrap_err();
    assert!(matches!(err, BookingError::Forbidden(_)));
    let err = svc
        .update(Some(&banned), 1, UpdateBooking { is_lab_flag: Some(true), ..Default::default() })
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::Forbidden(_)));
}

#[tokio::test]
async fn pure_employee_cannot_create() {
    let svc = service_with(vec![]);
    let doctor = employee_actor(Uuid::new_v4());
    let err = svc
        .create(
            Some(&doctor),
            CreateBooking {
                client_id: None,
                employee_id: Uuid::new_v4(),
                service_id: Uuid::new_v4(),
                scheduled_at: hours_from_now(24),
                is_lab_flag: None,
                is_visit_flag: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::Forbidden(_)));
}
