use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use models::booking::BookingStatus;

/// Create payload. `client_id` is honored only for admins; everyone else
/// books for themselves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBooking {
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

/// Partial update payload; absent fields stay untouched. The immutable
/// fields may appear, but a value differing from the stored one fails
/// validation instead of being silently dropped.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateBooking {
    pub client_id: Option<Uuid>,
    pub employee_id: Option<Uuid>,
    pub service_id: Option<Uuid>,
    pub scheduled_at: Option<DateTimeWithTimeZone>,
    pub status: Option<BookingStatus>,
    pub is_paid: Option<bool>,
    pub is_lab_flag: Option<bool>,
    pub is_visit_flag: Option<bool>,
}

/// Validated insert handed to the repository. Status always starts at
/// `Created` and the payment state is unknown.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub client_id: Uuid,
    pub employee_id: Uuid,
    pub service_id: Uuid,
    pub scheduled_at: DateTimeWithTimeZone,
    pub is_lab_flag: Option<bool>,
    pub is_visit_flag: Option<bool>,
}

/// Field changes that survived validation.
#[derive(Debug, Clone, Default)]
pub struct BookingChanges {
    pub scheduled_at: Option<DateTimeWithTimeZone>,
    pub status: Option<BookingStatus>,
    pub is_lab_flag: Option<bool>,
    pub is_visit_flag: Option<bool>,
}
