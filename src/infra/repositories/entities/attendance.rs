//! Attendance database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{Attendance, AttendanceStatus};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "attendances")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub employee_id: i32,
    /// Unique together with employee_id
    pub date: Date,
    pub check_in_time: Option<Time>,
    pub check_out_time: Option<Time>,
    pub status: AttendanceStatus,
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
}

impl Related<super::employee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employee.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for Attendance {
    fn from(model: Model) -> Self {
        Attendance {
            id: model.id,
            employee_id: model.employee_id,
            date: model.date,
            check_in_time: model.check_in_time,
            check_out_time: model.check_out_time,
            status: model.status,
        }
    }
}
