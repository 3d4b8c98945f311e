//! Leave request database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{Leave, LeaveStatus, LeaveType};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "leaves")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub employee_id: i32,
    pub leave_type: LeaveType,
    pub start_date: Date,
    pub end_date: Date,
    pub total_days: i32,
    #[sea_orm(column_type = "Text", nullable)]
    pub reason: Option<String>,
    pub status: LeaveStatus,
    pub approved_by: Option<i32>,
    pub approved_at: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::employee::Entity",
        from = "Column::EmployeeId",
        to = "super::employee::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Employee,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::ApprovedBy",
        to = "super::user::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Approver,
}

impl Related<super::employee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employee.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for Leave {
    fn from(model: Model) -> Self {
        Leave {
            id: model.id,
            employee_id: model.employee_id,
            leave_type: model.leave_type,
            start_date: model.start_date,
            end_date: model.end_date,
            total_days: model.total_days,
            reason: model.reason,
            status: model.status,
            approved_by: model.approved_by,
            approved_at: model.approved_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
