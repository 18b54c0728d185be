use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

use models::booking;

use crate::booking::domain::{BookingChanges, NewBooking};
use crate::booking::errors::BookingError;
use crate::booking::policy::Visibility;
use crate::booking::repository::BookingRepository;

pub struct SeaOrmBookingRepository {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl BookingRepository for SeaOrmBookingRepository {
    async fn list_visible(&self, scope: &Visibility) -> Result<Vec<booking::Model>, BookingError> {
        let mut query = booking::Entity::find();
        if let Visibility::Owned { client_id, employee_id } = scope {
            let mut cond = Condition::any();
            if let Some(c) = client_id {
                cond = cond.add(booking::Column::ClientId.eq(*c));
            }
            if let Some(e) = employee_id {
                cond = cond.add(booking::Column::EmployeeId.eq(*e));
            }
            query = query.filter(cond);
        }
        query
            .order_by_desc(booking::Column::ScheduledAt)
            .order_by_asc(booking::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| BookingError::Repository(e.to_string()))
    }

    async fn find(&self, id: i64) -> Result<Option<booking::Model>, BookingError> {
        booking::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| BookingError::Repository(e.to_string()))
    }

    async fn insert(&self, new: NewBooking) -> Result<booking::Model, BookingError> {
        let now: sea_orm::prelude::DateTimeWithTimeZone = Utc::now().into();
        let am = booking::ActiveModel {
            client_id: Set(new.client_id),
            employee_id: Set(Some(new.employee_id)),
            service_id: Set(new.service_id),
            scheduled_at: Set(new.scheduled_at),
            status: Set(booking::BookingStatus::Created),
            is_paid: Set(None),
            is_lab_flag: Set(new.is_lab_flag),
            is_visit_flag: Set(new.is_visit_flag),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        am.insert(&self.db).await.map_err(|e| BookingError::Repository(e.to_string()))
    }

    async fn update(&self, id: i64, changes: BookingChanges) -> Result<booking::Model, BookingError> {
        let found = booking::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| BookingError::Repository(e.to_string()))?
            .ok_or(BookingError::NotFound)?;
        let mut am: booking::ActiveModel = found.into();
        if let Some(ts) = changes.scheduled_at {
            am.scheduled_at = Set(ts);
        }
        if let Some(s) = changes.status {
            am.status = Set(s);
        }
        if let Some(v) = changes.is_lab_flag {
            am.is_lab_flag = Set(Some(v));
        }
        if let Some(v) = changes.is_visit_flag {
            am.is_visit_flag = Set(Some(v));
        }
        am.updated_at = Set(Utc::now().into());
        am.update(&self.db).await.map_err(|e| BookingError::Repository(e.to_string()))
    }

    async fn delete(&self, id: i64) -> Result<bool, BookingError> {
        let res = booking::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| BookingError::Repository(e.to_string()))?;
        Ok(res.rows_affected > 0)
    }
}
