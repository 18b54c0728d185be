use utoipa::OpenApi;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(utoipa::ToSchema)]
pub struct CreateBookingRequestDoc {
    pub client_id: Option<Uuid>,
    pub employee_id: Uuid,
    pub service_id: Uuid,
    /// RFC 3339 timestamp, strictly in the future
    pub scheduled_at: String,
    pub is_lab_flag: Option<bool>,
    pub is_visit_flag: Option<bool>,
}

#[derive(utoipa::ToSchema)]
pub struct UpdateBookingRequestDoc {
    pub client_id: Option<Uuid>,
    pub employee_id: Option<Uuid>,
    pub service_id: Option<Uuid>,
    /// RFC 3339 timestamp, strictly in the future
    pub scheduled_at: Option<String>,
    /// One of Created, Processing, Done, Canceled
    pub status: Option<String>,
    pub is_paid: Option<bool>,
    pub is_lab_flag: Option<bool>,
    pub is_visit_flag: Option<bool>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::bookings::list,
        crate::routes::bookings::retrieve,
        crate::routes::bookings::create,
        crate::routes::bookings::update,
        crate::routes::bookings::destroy,
    ),
    components(
        schemas(
            HealthResponse,
            CreateBookingRequestDoc,
            UpdateBookingRequestDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "bookings")
    )
)]
pub struct ApiDoc;
