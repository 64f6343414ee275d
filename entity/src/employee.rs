use std::fmt;

use sea_orm::{ActiveValue, ConnectionTrait};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "employee")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub firstname: String,
    pub surname: String,
    pub start_date: DateTimeWithTimeZone,
    #[sea_orm(indexed)]
    pub role_id: Option<i32>,
    #[sea_orm(indexed)]
    pub manager_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::employee_type::Entity",
        from = "Column::RoleId",
        to = "super::employee_type::Column::Id",
        on_delete = "SetNull"
    )]
    Role,
    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::ManagerId",
        to = "Column::Id",
        on_delete = "SetNull"
    )]
    Manager,
}

impl Related<super::employee_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Role.def()
    }
}

/// Walks from an employee to the employee recorded as its manager.
#[derive(Debug)]
pub struct ManagerLink;

impl Linked for ManagerLink {
    type FromEntity = Entity;
    type ToEntity = Entity;

    fn link(&self) -> Vec<RelationDef> {
        vec![Relation::Manager.def()]
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        if insert && self.start_date.is_not_set() {
            self.start_date = ActiveValue::Set(chrono::Utc::now().into());
        }
        Ok(self)
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Employee: {} {}>", self.firstname, self.surname)
    }
}
