//! Indexes supporting the visibility scope (client/employee match) and the
//! canonical list order (`scheduled_at` descending).
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("idx_booking_client_id")
                    .table(Booking::Table)
                    .col(Booking::ClientId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_booking_employee_id")
                    .table(Booking::Table)
                    .col(Booking::EmployeeId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_booking_scheduled_at")
                    .table(Booking::Table)
                    .col(Booking::ScheduledAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_booking_client_id").table(Booking::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_booking_employee_id").table(Booking::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_booking_scheduled_at").table(Booking::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Booking {
    Table,
    ClientId,
    EmployeeId,
    ScheduledAt,
}
