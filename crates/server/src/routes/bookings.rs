use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use models::booking;
use service::booking::domain::{CreateBooking, UpdateBooking};
use service::booking::repo::seaorm::SeaOrmBookingRepository;
use service::booking::service::BookingService;

use crate::auth::{self, ServerState};
use crate::errors::JsonApiError;

#[derive(Debug, Deserialize, Serialize)]
pub struct CreateBookingRequest {
    #[serde(default)]
    pub client_id: Option<Uuid>,
    pub employee_id: Uuid,
    pub service_id: Uuid,
    pub scheduled_at: DateTimeWithTimeZone,
    #[serde(default)]
    pub is_lab_flag: Option<bool>,
    #[serde(default)]
    pub is_visit_flag: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UpdateBookingRequest {
    pub client_id: Option<Uuid>,
    pub employee_id: Option<Uuid>,
    pub service_id: Option<Uuid>,
    pub scheduled_at: Option<DateTimeWithTimeZone>,
    pub status: Option<booking::BookingStatus>,
    pub is_paid: Option<bool>,
    pub is_lab_flag: Option<bool>,
    pub is_visit_flag: Option<bool>,
}

fn booking_service(state: &ServerState) -> BookingService<SeaOrmBookingRepository> {
    BookingService::new(
        Arc::new(SeaOrmBookingRepository { db: state.db.clone() }),
        state.policy,
    )
}

#[utoipa::path(
    get, path = "/me/history/", tag = "bookings",
    responses(
        (status = 200, description = "Visible bookings, latest schedule first"),
        (status = 401, description = "Not Authenticated"),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn list(
    State(state): State<ServerState>,
    headers: HeaderMap,
    jar: CookieJar,
) -> Result<Json<Vec<booking::Model>>, JsonApiError> {
    let actor = auth::resolve_actor(&headers, &jar, &state.auth.jwt_secret);
    let out = booking_service(&state).list(actor.as_ref()).await?;
    info!(count = out.len(), "list bookings");
    Ok(Json(out))
}

#[utoipa::path(
    get, path = "/me/history/service/{id}/", tag = "bookings",
    params(("id" = i64, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "OK"),
        (status = 401, description = "Not Authenticated"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn retrieve(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    jar: CookieJar,
) -> Result<Json<booking::Model>, JsonApiError> {
    let actor = auth::resolve_actor(&headers, &jar, &state.auth.jwt_secret);
    let found = booking_service(&state).retrieve(actor.as_ref(), id).await?;
    Ok(Json(found))
}

#[utoipa::path(
    post, path = "/me/service/", tag = "bookings",
    request_body = crate::openapi::CreateBookingRequestDoc,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Validation Error"),
        (status = 401, description = "Not Authenticated"),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    headers: HeaderMap,
    jar: CookieJar,
    Json(input): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<booking::Model>), JsonApiError> {
    let actor = auth::resolve_actor(&headers, &jar, &state.auth.jwt_secret);
    let created = booking_service(&state)
        .create(
            actor.as_ref(),
            CreateBooking {
                client_id: input.client_id,
                employee_id: input.employee_id,
                service_id: input.service_id,
                scheduled_at: input.scheduled_at,
                is_lab_flag: input.is_lab_flag,
                is_visit_flag: input.is_visit_flag,
            },
        )
        .await?;
    info!(booking_id = created.id, "created booking");
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put, path = "/me/history/service/{id}/", tag = "bookings",
    params(("id" = i64, Path, description = "Booking ID")),
    request_body = crate::openapi::UpdateBookingRequestDoc,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Validation Error"),
        (status = 401, description = "Not Authenticated"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    jar: CookieJar,
    Json(input): Json<UpdateBookingRequest>,
) -> Result<Json<booking::Model>, JsonApiError> {
    let actor = auth::resolve_actor(&headers, &jar, &state.auth.jwt_secret);
    let updated = booking_service(&state)
        .update(
            actor.as_ref(),
            id,
            UpdateBooking {
                client_id: input.client_id,
                employee_id: input.employee_id,
                service_id: input.service_id,
                scheduled_at: input.scheduled_at,
                status: input.status,
                is_paid: input.is_paid,
                is_lab_flag: input.is_lab_flag,
                is_visit_flag: input.is_visit_flag,
            },
        )
        .await?;
    info!(booking_id = updated.id, "updated booking");
    Ok(Json(updated))
}

#[utoipa::path(
    delete, path = "/me/history/service/{id}/", tag = "bookings",
    params(("id" = i64, Path, description = "Booking ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 401, description = "Not Authenticated"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn destroy(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    jar: CookieJar,
) -> Result<StatusCode, JsonApiError> {
    let actor = auth::resolve_actor(&headers, &jar, &state.auth.jwt_secret);
    booking_service(&state).destroy(actor.as_ref(), id).await?;
    info!(booking_id = id, "deleted booking");
    Ok(StatusCode::NO_CONTENT)
}
