//! Create `booking` table.
//!
//! Client, employee and service ids reference records owned by external
//! collaborators; no foreign keys are created for them here.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Booking::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Booking::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(uuid(Booking::ClientId).not_null())
                    // Assigned employee may be absent only transiently
                    .col(ColumnDef::new(Booking::EmployeeId).uuid().null())
                    .col(uuid(Booking::ServiceId).not_null())
                    .col(timestamp_with_time_zone(Booking::ScheduledAt).not_null())
                    .col(string_len(Booking::Status, 2).not_null())
                    .col(ColumnDef::new(Booking::IsPaid).boolean().null())
                    .col(ColumnDef::new(Booking::IsLabFlag).boolean().null())
                    .col(ColumnDef::new(Booking::IsVisitFlag).boolean().null())
                    .col(timestamp_with_time_zone(Booking::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Booking::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Booking::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Booking {
    Table,
    Id,
    ClientId,
    EmployeeId,
    ServiceId,
    ScheduledAt,
    Status,
    IsPaid,
    IsLabFlag,
    IsVisitFlag,
    CreatedAt,
    UpdatedAt,
}
