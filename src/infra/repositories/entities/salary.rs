//! Salary database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::Salary;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "salaries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub employee_id: i32,
    #[sea_orm(column_type = "Decimal(Some((15, 2)))")]
    pub base_salary: Decimal,
    pub effective_from: Date,
    /// NULL marks the open period carrying the current rate
    pub effective_to: Option<Date>,
    pub created_at: DateTimeUtc,
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
impl From<Model> for Salary {
    fn from(model: Model) -> Self {
        Salary {
            id: model.id,
            employee_id: model.employee_id,
            base_salary: model.base_salary,
            effective_from: model.effective_from,
            effective_to: model.effective_to,
            created_at: model.created_at,
        }
    }
}
