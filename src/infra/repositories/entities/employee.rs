//! Employee database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{Employee, EmploymentStatus};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub employee_code: String,
    pub full_name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub phone: Option<String>,
    pub department_id: Option<i32>,
    pub position_id: Option<i32>,
    pub hire_date: Date,
    pub employment_status: EmploymentStatus,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::department::Entity",
        from = "Column::DepartmentId",
        to = "super::department::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Department,
    #[sea_orm(
        belongs_to = "super::position::Entity",
        from = "Column::PositionId",
        to = "super::position::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Position,
    #[sea_orm(has_one = "super::user::Entity")]
    User,
    #[sea_orm(has_many = "super::salary::Entity")]
    Salary,
    #[sea_orm(has_many = "super::attendance::Entity")]
    Attendance,
    #[sea_orm(has_many = "super::leave::Entity")]
    Leave,
}

impl Related<super::department::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Department.def()
    }
}

impl Related<super::position::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Position.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for Employee {
    fn from(model: Model) -> Self {
        Employee {
            id: model.id,
            employee_code: model.employee_code,
            full_name: model.full_name,
            email: model.email,
            phone: model.phone,
            department_id: model.department_id,
            position_id: model.position_id,
            hire_date: model.hire_date,
            employment_status: model.employment_status,
        }
    }
}
