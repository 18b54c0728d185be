use async_trait::async_trait;

use models::booking;

use super::domain::{BookingChanges, NewBooking};
use super::errors::BookingError;
use super::policy::Visibility;

/// Repository abstraction for booking persistence.
///
/// Implementations apply the supplied visibility scope and the canonical
/// order: `scheduled_at` descending, ties broken by ascending id.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn list_visible(&self, scope: &Visibility) -> Result<Vec<booking::Model>, BookingError>;
    async fn find(&self, id: i64) -> Result<Option<booking::Model>, BookingError>;
    async fn insert(&self, new: NewBooking) -> Result<booking::Model, BookingError>;
    async fn update(&self, id: i64, changes: BookingChanges) -> Result<booking::Model, BookingError>;
    async fn delete(&self, id: i64) -> Result<bool, BookingError>;
}

/// Simple in-memory repository for tests and doc examples
pub mod mock {
    use super::*;
    use chrono::Utc;
    use models::booking::BookingStatus;
    use sea_orm::prelude::DateTimeWithTimeZone;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockBookingRepository {
        rows: Mutex<Vec<booking::Model>>,
        next_id: Mutex<i64>,
    }

    impl MockBookingRepository {
        /// Seed a row directly, bypassing validation.
        pub fn seed(&self, row: booking::Model) {
            let mut next = self.next_id.lock().unwrap();
            *next = (*next).max(row.id);
            self.rows.lock().unwrap().push(row);
        }
    }

    #[async_trait]
    impl BookingRepository for MockBookingRepository {
        async fn list_visible(
            &self,
            scope: &Visibility,
        ) -> Result<Vec<booking::Model>, BookingError> {
            let rows = self.rows.lock().unwrap();
            let mut out: Vec<booking::Model> =
                rows.iter().filter(|b| scope.permits(b)).cloned().collect();
            out.sort_by(|a, b| b.scheduled_at.cmp(&a.scheduled_at).then(a.id.cmp(&b.id)));
            Ok(out)
        }

        async fn find(&self, id: i64) -> Result<Option<booking::Model>, BookingError> {
            let rows = self.rows.lock().unwrap();
            Ok(rows.iter().find(|b| b.id == id).cloned())
        }

        async fn insert(&self, new: NewBooking) -> Result<booking::Model, BookingError> {
            let mut next = self.next_id.lock().unwrap();
            *next += 1;
            let now: DateTimeWithTimeZone = Utc::now().into();
            let row = booking::Model {
                id: *next,
                client_id: new.client_id,
                employee_id: Some(new.employee_id),
                service_id: new.service_id,
                scheduled_at: new.scheduled_at,
                status: BookingStatus::Created,
                is_paid: None,
                is_lab_flag: new.is_lab_flag,
                is_visit_flag: new.is_visit_flag,
                created_at: now,
                updated_at: now,
            };
            self.rows.lock().unwrap().push(row.clone());
            Ok(row)
        }

        async fn update(
            &self,
            id: i64,
            changes: BookingChanges,
        ) -> Result<booking::Model, BookingError> {
            let mut rows = self.rows.lock().unwrap();
            let row = rows.iter_mut().find(|b| b.id == id).ok_or(BookingError::NotFound)?;
            if let Some(ts) = changes.scheduled_at {
                row.scheduled_at = ts;
            }
            if let Some(s) = changes.status {
                row.status = s;
            }
            if let Some(v) = changes.is_lab_flag {
                row.is_lab_flag = Some(v);
            }
            if let Some(v) = changes.is_visit_flag {
                row.is_visit_flag = Some(v);
            }
            row.updated_at = Utc::now().into();
            Ok(row.clone())
        }

        async fn delete(&self, id: i64) -> Result<bool, BookingError> {
            let mut rows = self.rows.lock().unwrap();
            let before = rows.len();
            rows.retain(|b| b.id != id);
            Ok(rows.len() < before)
        }
    }
}
