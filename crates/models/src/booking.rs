use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A client's reservation of a catalog service, fulfilled by an assigned
/// employee at a scheduled time.
///
/// `client_id`, `employee_id` and `service_id` are fixed at creation.
/// `is_paid` is written by the payment collaborator and is read-only for
/// update operations. Ascending `id` equals insertion order.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "booking")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub client_id: Uuid,
    pub employee_id: Option<Uuid>,
    pub service_id: Uuid,
    pub scheduled_at: DateTimeWithTimeZone,
    pub status: BookingStatus,
    pub is_paid: Option<bool>,
    pub is_lab_flag: Option<bool>,
    pub is_visit_flag: Option<bool>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Booking lifecycle states, stored as two-letter codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(2))")]
pub enum BookingStatus {
    #[sea_orm(string_value = "CR")]
    Created,
    #[sea_orm(string_value = "PR")]
    Processing,
    #[sea_orm(string_value = "DO")]
    Done,
    #[sea_orm(string_value = "CA")]
    Canceled,
}

impl BookingStatus {
    pub fn as_code(&self) -> &'static str {
        match self {
            BookingStatus::Created => "CR",
            BookingStatus::Processing => "PR",
            BookingStatus::Done => "DO",
            BookingStatus::Canceled => "CA",
        }
    }
}
