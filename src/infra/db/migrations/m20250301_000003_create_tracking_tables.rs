//! Migration: Create salaries, attendances and leaves tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Salaries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Salaries::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Salaries::EmployeeId).integer().not_null())
                    .col(
                        ColumnDef::new(Salaries::BaseSalary)
                            .decimal_len(15, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Salaries::EffectiveFrom).date().not_null())
                    .col(ColumnDef::new(Salaries::EffectiveTo).date().null())
                    .col(
                        ColumnDef::new(Salaries::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_salaries_employee")
                            .from(Salaries::Table, Salaries::EmployeeId)
                            .to(Employees::Table, Employees::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .check(Expr::col(Salaries::BaseSalary).gt(0))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_salaries_employee_period")
                    .table(Salaries::Table)
                    .col(Salaries::EmployeeId)
                    .col(Salaries::EffectiveFrom)
                    .col(Salaries::EffectiveTo)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Attendances::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Attendances::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Attendances::EmployeeId).integer().not_null())
                    .col(ColumnDef::new(Attendances::Date).date().not_null())
                    .col(ColumnDef::new(Attendances::CheckInTime).time().null())
                    .col(ColumnDef::new(Attendances::CheckOutTime).time().null())
                    .col(
                        ColumnDef::new(Attendances::Status)
                            .string_len(20)
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_attendances_employee")
                            .from(Attendances::Table, Attendances::EmployeeId)
                            .to(Employees::Table, Employees::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One record per employee per day; the real enforcement point for
        // the service-level duplicate check
        manager
            .create_index(
                Index::create()
                    .name("uq_attendances_employee_date")
                    .table(Attendances::Table)
                    .col(Attendances::EmployeeId)
                    .col(Attendances::Date)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_attendances_date_status")
                    .table(Attendances::Table)
                    .col(Attendances::Date)
                    .col(Attendances::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Leaves::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Leaves::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Leaves::EmployeeId).integer().not_null())
                    .col(ColumnDef::new(Leaves::LeaveType).string_len(20).not_null())
                    .col(ColumnDef::new(Leaves::StartDate).date().not_null())
                    .col(ColumnDef::new(Leaves::EndDate).date().not_null())
                    .col(ColumnDef::new(Leaves::TotalDays).integer().not_null())
                    .col(ColumnDef::new(Leaves::Reason).text().null())
                    .col(ColumnDef::new(Leaves::Status).string_len(20).not_null())
                    .col(ColumnDef::new(Leaves::ApprovedBy).integer().null())
                    .col(
                        ColumnDef::new(Leaves::ApprovedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Leaves::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Leaves::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_leaves_employee")
                            .from(Leaves::Table, Leaves::EmployeeId)
                            .to(Employees::Table, Employees::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_leaves_approver")
                            .from(Leaves::Table, Leaves::ApprovedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .check(Expr::col(Leaves::EndDate).gte(Expr::col(Leaves::StartDate)))
                    .check(Expr::col(Leaves::TotalDays).gt(0))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_leaves_employee_status")
                    .table(Leaves::Table)
                    .col(Leaves::EmployeeId)
                    .col(Leaves::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_leaves_date_range")
                    .table(Leaves::Table)
                    .col(Leaves::StartDate)
                    .col(Leaves::EndDate)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Leaves::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Attendances::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Salaries::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Salaries {
    Table,
    Id,
    EmployeeId,
    BaseSalary,
    EffectiveFrom,
    EffectiveTo,
    CreatedAt,
}

#[derive(Iden)]
enum Attendances {
    Table,
    Id,
    EmployeeId,
    Date,
    CheckInTime,
    CheckOutTime,
    Status,
}

#[derive(Iden)]
enum Leaves {
    Table,
    Id,
    EmployeeId,
    LeaveType,
    StartDate,
    EndDate,
    TotalDays,
    Reason,
    Status,
    ApprovedBy,
    ApprovedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Employees {
    Table,
    Id,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
